//! # Key-Deserializer Resolution
//!
//! Entry points for resolving how raw string keys become typed map keys.
//!
//! ## Overview
//!
//! Resolution is split across three paths, consulted by the host in order:
//! the fixed built-in registry for primitive key types, the enum path for
//! types the host has classified as enums, and dynamic resolution against
//! the introspection seam for everything else. The split keeps each path
//! independently testable and keeps type discovery out of the selection
//! rules.
//!
//! ## Architecture
//!
//! ```text
//! Resolution Paths
//! ├── builtin        (construct_all: primitive registry)
//! ├── enum_keys      (construct_enum_key_deserializer: symbol tables)
//! ├── string_based   (find_string_based_key_deserializer: creator probing)
//! └── introspection  (KeyIntrospector seam + CandidateRegistry default)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use mapkey_core::registry::{
//!     find_string_based_key_deserializer, CandidateRegistry,
//! };
//! use mapkey_core::KeyType;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct DeviceId(u64);
//!
//! // Populate the introspection table at startup
//! let registry = CandidateRegistry::new();
//! registry.register_constructor(|raw: &str| raw.parse::<u64>().map(DeviceId));
//!
//! // Resolve on registry miss
//! let deserializer =
//!     find_string_based_key_deserializer(&KeyType::of::<DeviceId>(), &registry)
//!         .expect("single-string constructor registered");
//! let key = deserializer.deserialize_key("88")?.downcast::<DeviceId>();
//! assert_eq!(key, Some(DeviceId(88)));
//! # Ok::<(), mapkey_core::KeyConversionError>(())
//! ```

pub mod builtin;
pub mod enum_keys;
pub mod introspection;
pub mod string_based;

// Re-export main types for easy access
pub use builtin::construct_all;
pub use enum_keys::{construct_enum_key_deserializer, EnumKey};
pub use introspection::{
    CandidateRegistry, CandidateSignature, CreatorCandidate, KeyIntrospector, ParamKind,
};
pub use string_based::{find_string_based_key_deserializer, select_string_creator};
