//! # Key Type Descriptors
//!
//! Structural identity for map-key types. The wire format always carries
//! string keys; [`KeyType`] is the lookup handle that ties a raw Rust type
//! to the strategy able to rebuild it from those strings.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque descriptor of a target map-key type.
///
/// Wraps the raw type identity together with its static name for
/// diagnostics. Equality and hashing are structural over the raw type
/// only: every descriptor produced for the same type is interchangeable
/// as a registry lookup key.
#[derive(Debug, Clone, Copy)]
pub struct KeyType {
    id: TypeId,
    name: &'static str,
}

impl KeyType {
    /// Build the descriptor for a concrete key type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Raw type identity used for registry lookups.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Diagnostic name of the underlying type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this descriptor denotes `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// Structural identity: the name is derived from the type and carries no
// extra information, so comparisons and hashes use the TypeId alone.
impl PartialEq for KeyType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for KeyType {}

impl Hash for KeyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
