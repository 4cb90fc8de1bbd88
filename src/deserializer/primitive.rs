//! Built-in primitive key parsing.
//!
//! One kind per scalar type that commonly appears as a map key after transit
//! through a string-keyed wire format. Parsing follows the standard library's
//! `FromStr` rules: booleans accept exactly `true` and `false`, characters
//! must be a single scalar, and numeric parses reject surrounding whitespace.

use crate::deserializer::KeyValue;
use crate::errors::KeyConversionError;
use crate::key_type::KeyType;

/// Scalar key types with built-in deserializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    I8,
    Char,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Every kind, in registration order for the built-in table.
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Bool,
        PrimitiveKind::I8,
        PrimitiveKind::Char,
        PrimitiveKind::I16,
        PrimitiveKind::I32,
        PrimitiveKind::I64,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
    ];

    /// The key type this kind parses into.
    #[must_use]
    pub fn key_type(self) -> KeyType {
        match self {
            Self::Bool => KeyType::of::<bool>(),
            Self::I8 => KeyType::of::<i8>(),
            Self::Char => KeyType::of::<char>(),
            Self::I16 => KeyType::of::<i16>(),
            Self::I32 => KeyType::of::<i32>(),
            Self::I64 => KeyType::of::<i64>(),
            Self::F32 => KeyType::of::<f32>(),
            Self::F64 => KeyType::of::<f64>(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::Char => "char",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Parse a raw string key into the typed value for this kind.
    pub(crate) fn parse(self, raw: &str) -> Result<KeyValue, KeyConversionError> {
        macro_rules! parse_as {
            ($ty:ty, $variant:ident) => {
                raw.parse::<$ty>()
                    .map(KeyValue::$variant)
                    .map_err(|e| KeyConversionError::invalid_literal(self.key_type(), raw, e.to_string()))
            };
        }

        match self {
            Self::Bool => parse_as!(bool, Bool),
            Self::I8 => parse_as!(i8, I8),
            Self::Char => parse_as!(char, Char),
            Self::I16 => parse_as!(i16, I16),
            Self::I32 => parse_as!(i32, I32),
            Self::I64 => parse_as!(i64, I64),
            Self::F32 => parse_as!(f32, F32),
            Self::F64 => parse_as!(f64, F64),
        }
    }
}
