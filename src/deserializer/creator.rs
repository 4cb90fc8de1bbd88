//! Bound creator handles.
//!
//! A creator is a string-accepting construction routine discovered during
//! resolution and bound here for repeated invocation. The handle erases the
//! concrete key type so heterogeneous deserializers can share one registry,
//! while keeping enough metadata (kind, name, target type) for diagnostics.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::deserializer::KeyValue;
use crate::errors::{BoxError, KeyConversionError};
use crate::key_type::KeyType;

/// Type-erased conversion routine bound into a [`CreatorHandle`].
pub type CreatorFn =
    Arc<dyn Fn(&str) -> Result<Box<dyn Any + Send + Sync>, BoxError> + Send + Sync>;

/// Construction convention a creator follows.
///
/// The distinction matters during resolution: constructors outrank factories
/// when both accept a single string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatorKind {
    /// Canonical single-argument constructor (`new` by convention).
    Constructor,
    /// Named factory function (`from_str`, `parse`, and the like).
    Factory,
}

impl CreatorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Factory => "factory",
        }
    }
}

impl fmt::Display for CreatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A creator selected by resolution and bound for repeated invocation.
#[derive(Clone)]
pub struct CreatorHandle {
    key_type: KeyType,
    kind: CreatorKind,
    name: String,
    invoke: CreatorFn,
}

impl CreatorHandle {
    pub(crate) fn new(
        key_type: KeyType,
        kind: CreatorKind,
        name: String,
        invoke: CreatorFn,
    ) -> Self {
        Self {
            key_type,
            kind,
            name,
            invoke,
        }
    }

    /// Key type this handle produces.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Whether the bound routine is a constructor or a factory.
    #[must_use]
    pub fn kind(&self) -> CreatorKind {
        self.kind
    }

    /// Name of the bound routine, as registered.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the bound routine on a raw string key.
    ///
    /// Failures are wrapped with the input and target type so the caller can
    /// report which map entry could not be converted.
    pub(crate) fn call(&self, raw: &str) -> Result<KeyValue, KeyConversionError> {
        match (self.invoke)(raw) {
            Ok(value) => Ok(KeyValue::Value(value)),
            Err(source) => Err(KeyConversionError::creator_failed(
                self.key_type,
                self.kind,
                raw,
                source,
            )),
        }
    }
}

impl fmt::Debug for CreatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorHandle")
            .field("key_type", &self.key_type)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
