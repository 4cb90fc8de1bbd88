//! Built-in registry of primitive key deserializers.

use std::collections::HashMap;

use tracing::debug;

use crate::deserializer::{KeyDeserializer, PrimitiveKind};
use crate::key_type::KeyType;

/// Construct the full set of built-in key deserializers.
///
/// One stateless [`Primitive`](KeyDeserializer::Primitive) strategy per
/// scalar key kind, keyed by its [`KeyType`]. The returned map is owned by
/// the caller and never mutated by this crate; holding it behind a shared
/// reference is safe. Repeated calls yield registries with identical key
/// sets and equivalent behavior.
#[must_use]
pub fn construct_all() -> HashMap<KeyType, KeyDeserializer> {
    let mut registry = HashMap::with_capacity(PrimitiveKind::ALL.len());
    for kind in PrimitiveKind::ALL {
        let previous = registry.insert(kind.key_type(), KeyDeserializer::Primitive(kind));
        debug_assert!(previous.is_none(), "duplicate built-in for {kind:?}");
    }

    debug!(
        entries = registry.len(),
        "Constructed built-in key deserializer registry"
    );
    registry
}
