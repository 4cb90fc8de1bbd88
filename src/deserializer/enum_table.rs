//! Enum key symbol tables.
//!
//! An [`EnumTable`] binds the constant names of one enum type to producers of
//! its values, so raw string keys can be mapped back to variants without any
//! runtime type discovery. Tables are immutable once built; name-matching
//! policy (exact or case-insensitive) is fixed at build time and applied
//! uniformly to constants, aliases, and lookups.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::deserializer::KeyValue;
use crate::errors::KeyConversionError;
use crate::key_type::KeyType;

/// How raw keys are matched against registered constant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatching {
    /// Byte-for-byte equality with the registered name.
    #[default]
    Exact,
    /// Unicode case-insensitive equality.
    CaseInsensitive,
}

type ConstantProducer = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// Immutable symbol table mapping constant names to enum values.
pub struct EnumTable {
    key_type: KeyType,
    matching: NameMatching,
    symbols: HashMap<String, ConstantProducer>,
    canonical: Vec<String>,
}

impl EnumTable {
    /// Start building a table for enum type `E`.
    #[must_use]
    pub fn builder<E: Clone + Send + Sync + 'static>() -> EnumTableBuilder<E> {
        EnumTableBuilder {
            matching: NameMatching::default(),
            entries: Vec::new(),
        }
    }

    /// The enum type this table produces.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The name-matching policy fixed at build time.
    #[must_use]
    pub fn matching(&self) -> NameMatching {
        self.matching
    }

    /// Canonical constant names in registration order, aliases excluded.
    ///
    /// These are the names surfaced in lookup failures.
    #[must_use]
    pub fn canonical_names(&self) -> &[String] {
        &self.canonical
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Resolve a raw string key to the enum value registered under it.
    pub(crate) fn lookup(&self, raw: &str) -> Result<KeyValue, KeyConversionError> {
        let normalized = self.normalize(raw);
        match self.symbols.get(normalized.as_ref()) {
            Some(producer) => Ok(KeyValue::Value(producer())),
            None => Err(KeyConversionError::unknown_variant(
                self.key_type,
                raw,
                self.canonical.clone(),
            )),
        }
    }

    fn normalize<'a>(&self, name: &'a str) -> std::borrow::Cow<'a, str> {
        match self.matching {
            NameMatching::Exact => std::borrow::Cow::Borrowed(name),
            NameMatching::CaseInsensitive => std::borrow::Cow::Owned(name.to_lowercase()),
        }
    }
}

impl fmt::Debug for EnumTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumTable")
            .field("key_type", &self.key_type)
            .field("matching", &self.matching)
            .field("canonical", &self.canonical)
            .field("symbols", &self.symbols.len())
            .finish()
    }
}

/// Builder for [`EnumTable`].
///
/// Entries are recorded in call order and normalized once at [`build`], so
/// [`case_insensitive`] may be called at any point in the chain. Registering
/// a name twice keeps the later entry.
///
/// [`build`]: EnumTableBuilder::build
/// [`case_insensitive`]: EnumTableBuilder::case_insensitive
pub struct EnumTableBuilder<E> {
    matching: NameMatching,
    entries: Vec<(String, E, bool)>,
}

impl<E: Clone + Send + Sync + 'static> EnumTableBuilder<E> {
    /// Register a canonical constant under its name.
    #[must_use]
    pub fn constant(mut self, name: impl Into<String>, value: E) -> Self {
        self.entries.push((name.into(), value, true));
        self
    }

    /// Register an alternate name for a constant.
    ///
    /// Aliases resolve like constants but are left out of the canonical name
    /// list reported on lookup failure.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>, value: E) -> Self {
        self.entries.push((name.into(), value, false));
        self
    }

    /// Match lookups case-insensitively.
    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.matching = NameMatching::CaseInsensitive;
        self
    }

    /// Finalize the table.
    #[must_use]
    pub fn build(self) -> EnumTable {
        let key_type = KeyType::of::<E>();
        let matching = self.matching;

        let mut symbols: HashMap<String, ConstantProducer> =
            HashMap::with_capacity(self.entries.len());
        let mut canonical = Vec::new();
        for (name, value, is_canonical) in self.entries {
            if is_canonical && !canonical.contains(&name) {
                canonical.push(name.clone());
            }
            let normalized = match matching {
                NameMatching::Exact => name,
                NameMatching::CaseInsensitive => name.to_lowercase(),
            };
            let producer: ConstantProducer =
                Arc::new(move || Box::new(value.clone()) as Box<dyn Any + Send + Sync>);
            symbols.insert(normalized, producer);
        }

        debug!(
            key_type = %key_type,
            symbols = symbols.len(),
            matching = ?matching,
            "Built enum key symbol table"
        );

        EnumTable {
            key_type,
            matching,
            symbols,
            canonical,
        }
    }
}
