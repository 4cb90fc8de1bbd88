//! Error types for key conversion.
//!
//! Resolution-time absence is deliberately not an error: the dynamic
//! resolver returns `None` for unsupported key types and the host decides
//! whether that is fatal. The variants here cover conversion time only,
//! and every one of them carries the offending input string and the
//! target key type so per-entry diagnostics stay actionable.

use thiserror::Error;

use crate::deserializer::creator::CreatorKind;
use crate::key_type::KeyType;

/// Boxed error produced by user-supplied creator handles.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure raised when a bound strategy cannot convert a raw string key.
#[derive(Debug, Error)]
pub enum KeyConversionError {
    /// A primitive key literal failed to parse.
    #[error("invalid {key_type} key literal '{input}': {reason}")]
    InvalidLiteral {
        key_type: KeyType,
        input: String,
        reason: String,
    },

    /// An enum lookup matched no registered constant name or alias.
    #[error("unknown {key_type} key '{input}', expected one of {expected:?}")]
    UnknownVariant {
        key_type: KeyType,
        input: String,
        expected: Vec<String>,
    },

    /// A bound constructor or factory failed on the given input.
    #[error("{creator} for {key_type} key failed on '{input}': {source}")]
    CreatorFailed {
        key_type: KeyType,
        creator: CreatorKind,
        input: String,
        #[source]
        source: BoxError,
    },
}

impl KeyConversionError {
    /// Primitive parse failure for `key_type` on `input`.
    pub(crate) fn invalid_literal(
        key_type: KeyType,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidLiteral {
            key_type,
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Enum symbol-table miss on `input`; `expected` lists canonical names.
    pub(crate) fn unknown_variant(
        key_type: KeyType,
        input: impl Into<String>,
        expected: Vec<String>,
    ) -> Self {
        Self::UnknownVariant {
            key_type,
            input: input.into(),
            expected,
        }
    }

    /// Creator invocation failure, wrapping the underlying error.
    pub(crate) fn creator_failed(
        key_type: KeyType,
        creator: CreatorKind,
        input: impl Into<String>,
        source: BoxError,
    ) -> Self {
        Self::CreatorFailed {
            key_type,
            creator,
            input: input.into(),
            source,
        }
    }

    /// The raw string key that failed to convert.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidLiteral { input, .. }
            | Self::UnknownVariant { input, .. }
            | Self::CreatorFailed { input, .. } => input,
        }
    }

    /// The target key type of the failed conversion.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::InvalidLiteral { key_type, .. }
            | Self::UnknownVariant { key_type, .. }
            | Self::CreatorFailed { key_type, .. } => *key_type,
        }
    }
}
