//! Dynamic resolution for string-based key deserializers.
//!
//! Fallback path for key types outside the built-in registry and the enum
//! path. The resolver asks the introspection collaborator for creator
//! candidates and applies a fixed precedence: single-string constructors
//! beat single-string factories, ignored candidates never qualify, and an
//! empty result is an answer (unsupported key type), not an error.
//!
//! Selection itself is a pure function over the surfaced list, kept apart
//! from the introspection mechanism so custom introspectors get identical
//! precedence behavior.

use tracing::{debug, instrument, trace, warn};

use crate::deserializer::creator::CreatorKind;
use crate::deserializer::KeyDeserializer;
use crate::key_type::KeyType;
use crate::registry::introspection::{CreatorCandidate, KeyIntrospector};

/// Resolve a string-based key deserializer for `key_type`.
///
/// Returns `None` when the type surfaces no qualifying creator; the caller
/// decides whether an unsupported key type is fatal.
#[instrument(skip_all, fields(key_type = %key_type))]
pub fn find_string_based_key_deserializer(
    key_type: &KeyType,
    introspector: &dyn KeyIntrospector,
) -> Option<KeyDeserializer> {
    let candidates = introspector.candidates(key_type);
    if candidates.is_empty() {
        debug!("No creator candidates surfaced for key type");
        return None;
    }

    let surfaced = candidates.len();
    match select_string_creator(candidates) {
        Some(candidate) => {
            debug!(
                kind = %candidate.kind(),
                creator = %candidate.name(),
                "Bound string-based key deserializer"
            );
            Some(match candidate.kind() {
                CreatorKind::Constructor => KeyDeserializer::Constructor(candidate.into_handle()),
                CreatorKind::Factory => KeyDeserializer::Factory(candidate.into_handle()),
            })
        }
        None => {
            warn!(
                surfaced,
                "Creator candidates exist but none accept a single string; \
                 register a single-string constructor or factory for this key type"
            );
            None
        }
    }
}

/// Select the winning creator under the fixed precedence rules.
///
/// The first candidate in surfaced order that is a constructor, accepts
/// exactly one string parameter, and is not ignored wins outright. Failing
/// that, the first factory meeting the same bar. Surfacing order belongs to
/// the introspector; the tie-break here is not configurable.
#[must_use]
pub fn select_string_creator(candidates: Vec<CreatorCandidate>) -> Option<CreatorCandidate> {
    let mut fallback_factory: Option<CreatorCandidate> = None;

    for candidate in candidates {
        if candidate.is_ignored() {
            trace!(
                kind = %candidate.kind(),
                creator = %candidate.name(),
                "Skipping ignored creator candidate"
            );
            continue;
        }
        if !candidate.signature().accepts_single_string() {
            trace!(
                kind = %candidate.kind(),
                creator = %candidate.name(),
                "Skipping candidate without a single-string signature"
            );
            continue;
        }

        match candidate.kind() {
            CreatorKind::Constructor => return Some(candidate),
            CreatorKind::Factory => {
                if fallback_factory.is_none() {
                    fallback_factory = Some(candidate);
                }
            }
        }
    }

    fallback_factory
}
