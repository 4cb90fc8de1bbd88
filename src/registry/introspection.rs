//! Type introspection seam for dynamic key resolution.
//!
//! The string-based resolver does not discover creators itself. It asks a
//! [`KeyIntrospector`] for the structural creator candidates of a key type
//! and selects among them. [`CandidateRegistry`] is the default
//! implementation: a table hosts populate during startup with typed
//! registration helpers, standing in for runtime type discovery.
//!
//! Candidates carry configuration metadata the resolver consults but does
//! not define: `ignored` excludes a candidate from selection, `designated`
//! surfaces it ahead of discovered candidates of its type.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::deserializer::creator::{CreatorFn, CreatorHandle, CreatorKind};
use crate::errors::BoxError;
use crate::key_type::KeyType;

/// Declared parameter kind of a creator candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// A single string parameter.
    Str,
    /// Any other parameter shape.
    Other,
}

/// Declared call signature of a creator candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSignature {
    arity: usize,
    param: ParamKind,
}

impl CandidateSignature {
    /// The only shape the string-based resolver binds.
    pub const SINGLE_STRING: CandidateSignature = CandidateSignature {
        arity: 1,
        param: ParamKind::Str,
    };

    #[must_use]
    pub fn new(arity: usize, param: ParamKind) -> Self {
        Self { arity, param }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub fn param(&self) -> ParamKind {
        self.param
    }

    #[must_use]
    pub fn accepts_single_string(&self) -> bool {
        self.arity == 1 && self.param == ParamKind::Str
    }
}

/// A structural creator surfaced by introspection.
///
/// Built through [`constructor`](CreatorCandidate::constructor) or
/// [`factory`](CreatorCandidate::factory), then adjusted with the chainable
/// metadata methods before registration.
#[derive(Clone)]
pub struct CreatorCandidate {
    key_type: KeyType,
    kind: CreatorKind,
    name: String,
    signature: CandidateSignature,
    ignored: bool,
    designated: bool,
    handle: CreatorFn,
}

impl CreatorCandidate {
    /// Candidate for a single-string constructor of `T`, named `new`.
    pub fn constructor<T, F, E>(convert: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::erased(CreatorKind::Constructor, "new", convert)
    }

    /// Candidate for a named single-string factory of `T`.
    pub fn factory<T, F, E>(name: impl Into<String>, convert: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::erased(CreatorKind::Factory, name, convert)
    }

    fn erased<T, F, E>(kind: CreatorKind, name: impl Into<String>, convert: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let handle: CreatorFn = Arc::new(move |raw| {
            convert(raw)
                .map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
                .map_err(Into::into)
        });
        Self {
            key_type: KeyType::of::<T>(),
            kind,
            name: name.into(),
            signature: CandidateSignature::SINGLE_STRING,
            ignored: false,
            designated: false,
            handle,
        }
    }

    /// Override the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Exclude this candidate from selection.
    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Mark this candidate as explicitly designated by configuration.
    ///
    /// Designated candidates surface ahead of discovered ones of the same
    /// type; designation never disqualifies a candidate by name.
    #[must_use]
    pub fn designated(mut self) -> Self {
        self.designated = true;
        self
    }

    /// Override the declared signature.
    ///
    /// Registration helpers always produce single-string candidates; this
    /// exists for introspectors that surface other shapes.
    #[must_use]
    pub fn with_signature(mut self, signature: CandidateSignature) -> Self {
        self.signature = signature;
        self
    }

    #[must_use]
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    #[must_use]
    pub fn kind(&self) -> CreatorKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn signature(&self) -> CandidateSignature {
        self.signature
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    #[must_use]
    pub fn is_designated(&self) -> bool {
        self.designated
    }

    /// Bind the selected candidate into an invocable handle.
    pub(crate) fn into_handle(self) -> CreatorHandle {
        CreatorHandle::new(self.key_type, self.kind, self.name, self.handle)
    }
}

impl fmt::Debug for CreatorCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorCandidate")
            .field("key_type", &self.key_type)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("ignored", &self.ignored)
            .field("designated", &self.designated)
            .finish_non_exhaustive()
    }
}

/// Enumerates structural creator candidates for key types.
pub trait KeyIntrospector: Send + Sync {
    /// Candidates for `key_type`, in surfacing order.
    ///
    /// Order matters: the resolver binds the first qualifying candidate of
    /// the winning kind. An empty vector means the type exposes no creators.
    fn candidates(&self, key_type: &KeyType) -> Vec<CreatorCandidate>;
}

/// Table-backed [`KeyIntrospector`].
///
/// Hosts register candidates during startup, under `&self` so the registry
/// can sit behind a shared reference. Reads are concurrent; registration
/// takes the write lock briefly.
pub struct CandidateRegistry {
    entries: RwLock<HashMap<KeyType, Vec<CreatorCandidate>>>,
}

impl CandidateRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a fully built candidate.
    pub fn register(&self, candidate: CreatorCandidate) {
        debug!(
            key_type = %candidate.key_type(),
            kind = %candidate.kind(),
            creator = %candidate.name(),
            ignored = candidate.is_ignored(),
            designated = candidate.is_designated(),
            "Registered creator candidate"
        );

        let mut entries = self.entries.write().unwrap();
        entries.entry(candidate.key_type).or_default().push(candidate);
    }

    /// Register a single-string constructor for `T`.
    pub fn register_constructor<T, F, E>(&self, convert: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.register(CreatorCandidate::constructor(convert));
    }

    /// Register `T`'s `FromStr` implementation as a factory candidate.
    pub fn register_from_str<T>(&self)
    where
        T: FromStr + Send + Sync + 'static,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.register(CreatorCandidate::factory("from_str", T::from_str));
    }

    /// Register a named single-string factory for `T`.
    pub fn register_factory<T, F, E>(&self, name: impl Into<String>, convert: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.register(CreatorCandidate::factory(name, convert));
    }

    /// Register a factory that deserializes `T` from a JSON string value.
    ///
    /// Covers types whose string form is already defined by their serde
    /// implementation, newtype wrappers around strings in particular.
    pub fn register_serde<T>(&self)
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.register(CreatorCandidate::factory("deserialize", |raw: &str| {
            serde_json::from_value::<T>(serde_json::Value::String(raw.to_owned()))
        }));
    }

    /// Total candidates across all key types.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.entries.read().unwrap().values().map(Vec::len).sum()
    }

    /// Remove every registered candidate.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

impl Default for CandidateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CandidateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap();
        f.debug_struct("CandidateRegistry")
            .field("types", &entries.len())
            .field("candidates", &entries.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl KeyIntrospector for CandidateRegistry {
    fn candidates(&self, key_type: &KeyType) -> Vec<CreatorCandidate> {
        let entries = self.entries.read().unwrap();
        let mut surfaced = entries.get(key_type).cloned().unwrap_or_default();
        // Designated candidates surface first; the sort is stable, so
        // registration order holds within each group.
        surfaced.sort_by_key(|candidate| usize::from(!candidate.is_designated()));
        surfaced
    }
}
