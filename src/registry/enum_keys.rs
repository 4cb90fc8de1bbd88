//! Enum key resolution entry point.

use crate::deserializer::{EnumTable, KeyDeserializer};

/// Enum types usable as map keys.
///
/// The type itself supplies its symbol table: each implementation lists its
/// constants (and any aliases) through [`EnumTable::builder`]. Used by
/// [`construct_enum_key_deserializer`] once the caller has classified a key
/// type as enum-like.
///
/// ```
/// use mapkey_core::{EnumKey, EnumTable};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Tier {
///     Free,
///     Paid,
/// }
///
/// impl EnumKey for Tier {
///     fn symbols() -> EnumTable {
///         EnumTable::builder::<Tier>()
///             .constant("Free", Tier::Free)
///             .constant("Paid", Tier::Paid)
///             .build()
///     }
/// }
/// ```
pub trait EnumKey: Clone + Send + Sync + 'static {
    /// Symbol table mapping constant names to values of `Self`.
    fn symbols() -> EnumTable;
}

/// Construct the key deserializer for enum type `E`.
///
/// Precondition, owned by the caller's type classification and not checked
/// here: `E` is an enum-like set of named constants.
#[must_use]
pub fn construct_enum_key_deserializer<E: EnumKey>() -> KeyDeserializer {
    let table = E::symbols();
    debug_assert!(
        table.key_type().is::<E>(),
        "symbol table built for {} instead of the requested enum type",
        table.key_type()
    );
    KeyDeserializer::Enum(table)
}
