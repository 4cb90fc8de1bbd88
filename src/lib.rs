#![allow(clippy::doc_markdown)] // Allow technical terms like FromStr, TypeId in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Mapkey Core
//!
//! Key-deserialization resolver for mapping structures reconstructed from
//! string-keyed serialized forms.
//!
//! ## Overview
//!
//! Wire formats with textual maps carry every key as a string, while the
//! in-memory structure may key on numbers, characters, enums, or domain
//! types. This crate decides how a raw string key becomes an instance of
//! the target key type: a uniform, extensible strategy surface with
//! graceful failure when no strategy applies.
//!
//! ## Resolution Order
//!
//! The host consults three entry points in order:
//!
//! 1. **Built-ins**: [`construct_all`] returns the fixed registry covering
//!    the primitive key types (bool, i8, char, i16, i32, i64, f32, f64).
//! 2. **Enums**: [`construct_enum_key_deserializer`] builds a symbol-table
//!    strategy for types the host has classified as enums.
//! 3. **Dynamic**: [`find_string_based_key_deserializer`] probes the
//!    [`KeyIntrospector`] seam for a single-string constructor or factory.
//!    Constructors win over factories; `None` means the key type is
//!    unsupported and the host decides whether that is fatal.
//!
//! ## Module Organization
//!
//! - [`key_type`] - Opaque key type descriptors
//! - [`deserializer`] - Resolved strategies and the conversion dispatch
//! - [`registry`] - Resolution entry points and the introspection seam
//! - [`errors`] - Structured conversion errors
//!
//! ## Quick Start
//!
//! ```rust
//! use mapkey_core::{
//!     construct_all, find_string_based_key_deserializer, CandidateRegistry, KeyType,
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct AccountId(String);
//!
//! // Built-ins cover the primitive key types
//! let registry = construct_all();
//! let int_keys = &registry[&KeyType::of::<i32>()];
//! assert_eq!(int_keys.deserialize_key("42")?.downcast::<i32>(), Some(42));
//!
//! // Everything else goes through the introspection seam
//! let candidates = CandidateRegistry::new();
//! candidates.register_constructor(|raw: &str| {
//!     Ok::<_, std::convert::Infallible>(AccountId(raw.to_string()))
//! });
//!
//! let strategy =
//!     find_string_based_key_deserializer(&KeyType::of::<AccountId>(), &candidates)
//!         .expect("constructor registered above");
//! let key = strategy.deserialize_key("acct-7")?.downcast::<AccountId>();
//! assert_eq!(key, Some(AccountId("acct-7".to_string())));
//! # Ok::<(), mapkey_core::KeyConversionError>(())
//! ```
//!
//! ## Concurrency
//!
//! Resolved strategies and the built-in registry are immutable and
//! `Send + Sync`; publish them once and share freely. [`CandidateRegistry`]
//! takes registrations under `&self` so hosts can populate it during
//! startup and read concurrently afterwards.

pub mod deserializer;
pub mod errors;
pub mod key_type;
pub mod registry;

// Re-export main types for easy access
pub use deserializer::{
    CreatorFn, CreatorHandle, CreatorKind, EnumTable, EnumTableBuilder, KeyDeserializer, KeyValue,
    NameMatching, PrimitiveKind,
};
pub use errors::{BoxError, KeyConversionError};
pub use key_type::KeyType;
pub use registry::{
    construct_all, construct_enum_key_deserializer, find_string_based_key_deserializer,
    select_string_creator, CandidateRegistry, CandidateSignature, CreatorCandidate, EnumKey,
    KeyIntrospector, ParamKind,
};
