//! Key deserialization strategies.
//!
//! A [`KeyDeserializer`] is a resolved, ready-to-run strategy for converting
//! raw string keys into typed values. The variants cover the four supported
//! construction paths:
//!
//! - **Primitive**: built-in parsing for scalar key types
//! - **Enum**: symbol-table lookup against registered constant names
//! - **Constructor**: a bound single-string constructor on the key type
//! - **Factory**: a bound single-string factory function
//!
//! Dispatch happens in exactly one place, [`KeyDeserializer::deserialize_key`],
//! so adding a strategy means adding a variant and one match arm.

pub mod creator;
pub mod enum_table;
pub mod primitive;

use std::any::Any;
use std::fmt;

use crate::errors::KeyConversionError;
use crate::key_type::KeyType;

pub use creator::{CreatorFn, CreatorHandle, CreatorKind};
pub use enum_table::{EnumTable, EnumTableBuilder, NameMatching};
pub use primitive::PrimitiveKind;

/// Owned result of a successful key conversion.
///
/// Scalar keys are carried inline; every other key type is boxed and
/// recovered with [`downcast`](KeyValue::downcast).
pub enum KeyValue {
    Bool(bool),
    I8(i8),
    Char(char),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Value(Box<dyn Any + Send + Sync>),
}

impl KeyValue {
    /// Recover the typed key, consuming the value.
    ///
    /// Returns `None` when `T` does not match the contained type.
    #[must_use]
    pub fn downcast<T: 'static>(self) -> Option<T> {
        let boxed: Box<dyn Any + Send + Sync> = match self {
            Self::Bool(v) => Box::new(v),
            Self::I8(v) => Box::new(v),
            Self::Char(v) => Box::new(v),
            Self::I16(v) => Box::new(v),
            Self::I32(v) => Box::new(v),
            Self::I64(v) => Box::new(v),
            Self::F32(v) => Box::new(v),
            Self::F64(v) => Box::new(v),
            Self::Value(v) => v,
        };
        boxed.downcast::<T>().ok().map(|value| *value)
    }
}

impl fmt::Debug for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::I8(v) => write!(f, "I8({v})"),
            Self::Char(v) => write!(f, "Char({v:?})"),
            Self::I16(v) => write!(f, "I16({v})"),
            Self::I32(v) => write!(f, "I32({v})"),
            Self::I64(v) => write!(f, "I64({v})"),
            Self::F32(v) => write!(f, "F32({v})"),
            Self::F64(v) => write!(f, "F64({v})"),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// A resolved strategy for converting raw string keys of one target type.
#[derive(Debug)]
pub enum KeyDeserializer {
    /// Built-in scalar parsing.
    Primitive(PrimitiveKind),
    /// Symbol-table lookup for an enum type.
    Enum(EnumTable),
    /// Bound string-accepting constructor.
    Constructor(CreatorHandle),
    /// Bound string-accepting factory.
    Factory(CreatorHandle),
}

impl KeyDeserializer {
    /// The key type this strategy produces.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Primitive(kind) => kind.key_type(),
            Self::Enum(table) => table.key_type(),
            Self::Constructor(handle) | Self::Factory(handle) => handle.key_type(),
        }
    }

    /// Strategy name for diagnostics and logging.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Enum(_) => "enum",
            Self::Constructor(_) => "constructor",
            Self::Factory(_) => "factory",
        }
    }

    /// Convert one raw string key into a typed value.
    pub fn deserialize_key(&self, raw: &str) -> Result<KeyValue, KeyConversionError> {
        match self {
            Self::Primitive(kind) => kind.parse(raw),
            Self::Enum(table) => table.lookup(raw),
            Self::Constructor(handle) | Self::Factory(handle) => handle.call(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    enum Region {
        East,
        West,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TenantId(u64);

    fn tenant_handle(kind: CreatorKind) -> CreatorHandle {
        CreatorHandle::new(
            KeyType::of::<TenantId>(),
            kind,
            "new".to_string(),
            Arc::new(|raw| {
                raw.parse::<u64>()
                    .map(|id| Box::new(TenantId(id)) as Box<dyn Any + Send + Sync>)
                    .map_err(Into::into)
            }),
        )
    }

    #[test]
    fn test_primitive_dispatch() {
        let deserializer = KeyDeserializer::Primitive(PrimitiveKind::I32);

        let value = deserializer.deserialize_key("41").unwrap();
        assert_eq!(value.downcast::<i32>(), Some(41));
        assert_eq!(deserializer.key_type(), KeyType::of::<i32>());
        assert_eq!(deserializer.kind_name(), "primitive");
    }

    #[test]
    fn test_enum_dispatch() {
        let table = EnumTable::builder::<Region>()
            .constant("East", Region::East)
            .constant("West", Region::West)
            .build();
        let deserializer = KeyDeserializer::Enum(table);

        let value = deserializer.deserialize_key("West").unwrap();
        assert_eq!(value.downcast::<Region>(), Some(Region::West));
        assert_eq!(deserializer.key_type(), KeyType::of::<Region>());
        assert_eq!(deserializer.kind_name(), "enum");
    }

    #[test]
    fn test_constructor_dispatch() {
        let deserializer = KeyDeserializer::Constructor(tenant_handle(CreatorKind::Constructor));

        let value = deserializer.deserialize_key("7").unwrap();
        assert_eq!(value.downcast::<TenantId>(), Some(TenantId(7)));
        assert_eq!(deserializer.kind_name(), "constructor");
    }

    #[test]
    fn test_factory_dispatch_surfaces_creator_errors() {
        let deserializer = KeyDeserializer::Factory(tenant_handle(CreatorKind::Factory));

        let error = deserializer.deserialize_key("not-a-number").unwrap_err();
        assert_eq!(error.input(), "not-a-number");
        assert_eq!(error.key_type(), KeyType::of::<TenantId>());
        assert_eq!(deserializer.kind_name(), "factory");
    }

    #[test]
    fn test_downcast_rejects_mismatched_types() {
        let value = KeyValue::I64(5);
        assert_eq!(value.downcast::<i32>(), None);
    }

    #[test]
    fn test_key_value_debug_is_stable_for_boxed_values() {
        let value = KeyValue::Value(Box::new(TenantId(1)));
        assert_eq!(format!("{value:?}"), "Value(..)");
        assert_eq!(format!("{:?}", KeyValue::Char('k')), "Char('k')");
    }
}
