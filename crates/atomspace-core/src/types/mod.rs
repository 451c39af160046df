//! # Core Type Definitions
//!
//! This module contains the data model of the AtomSpace store:
//! - Identifiers (`AtomId`, `LinkId`)
//! - Probabilistic annotation (`TruthValue`)
//! - Stored records (`Atom`, `Link`)
//! - Error types (`AtomSpaceError`)
//!
//! ## Value Semantics
//!
//! All records are plain values. Tables hand out clones, never references
//! into their internals, so a caller can hold a snapshot while the store
//! keeps changing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an atom.
///
/// Allocated by the atom table from a strictly increasing counter and never
/// reused until the store is cleared.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AtomId(pub u64);

/// Identifier of a link: its position in the append-only link table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkId(pub u64);

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TRUTH VALUE
// =============================================================================

/// A (strength, confidence) pair, each component in `[0, 1]`.
///
/// Out-of-range input is clamped, never rejected. A NaN component becomes
/// `0.0`. Deserialization goes through the same constructor, so an
/// unclamped value cannot be materialized from JSON either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTruthValue")]
pub struct TruthValue {
    strength: f64,
    confidence: f64,
}

#[derive(Deserialize)]
struct RawTruthValue {
    strength: f64,
    confidence: f64,
}

impl From<RawTruthValue> for TruthValue {
    fn from(raw: RawTruthValue) -> Self {
        Self::new(raw.strength, raw.confidence)
    }
}

/// Clamp into `[0, 1]`, mapping NaN to zero.
fn unit_interval(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

impl TruthValue {
    /// Full belief: the default for stored atoms and links.
    pub const DEFAULT: Self = Self {
        strength: 1.0,
        confidence: 1.0,
    };

    /// Neutral belief used for inference premises with omitted components.
    pub const UNKNOWN: Self = Self {
        strength: 0.5,
        confidence: 0.5,
    };

    /// Create a truth value, clamping both components into `[0, 1]`.
    #[must_use]
    pub fn new(strength: f64, confidence: f64) -> Self {
        Self {
            strength: unit_interval(strength),
            confidence: unit_interval(confidence),
        }
    }

    /// Build from optional components, filling gaps from `fallback`.
    #[must_use]
    pub fn from_parts(strength: Option<f64>, confidence: Option<f64>, fallback: Self) -> Self {
        Self::new(
            strength.unwrap_or(fallback.strength),
            confidence.unwrap_or(fallback.confidence),
        )
    }

    #[must_use]
    pub const fn strength(&self) -> f64 {
        self.strength
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl Default for TruthValue {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// ATOM
// =============================================================================

/// A typed, named node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    /// Free-form type tag, e.g. `ConceptNode`.
    #[serde(rename = "type")]
    pub atom_type: String,
    pub name: String,
    pub truth_value: TruthValue,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// LINK
// =============================================================================

/// A typed hyperedge over an ordered list of atom ids.
///
/// `outgoing` may be empty and may repeat ids. Every id existed when the
/// link was created; later atom deletions are not reflected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    #[serde(rename = "type")]
    pub link_type: String,
    pub outgoing: Vec<AtomId>,
    pub truth_value: TruthValue,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Whether `atom` appears anywhere in the outgoing set.
    #[must_use]
    pub fn references(&self, atom: AtomId) -> bool {
        self.outgoing.contains(&atom)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the AtomSpace system.
///
/// Every variant is a normal, recoverable outcome reported to the immediate
/// caller. The store never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtomSpaceError {
    /// A required field is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No atom with this id exists.
    #[error("Atom {0} not found")]
    AtomNotFound(AtomId),

    /// No link with this id exists.
    #[error("Link {0} not found")]
    LinkNotFound(LinkId),

    /// A link referenced an atom that does not exist.
    #[error("Atom {0} not found")]
    MissingAtom(AtomId),

    /// No agent registered under this name.
    #[error("Agent {0} not found")]
    AgentNotFound(String),

    /// A uniquely named record already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl AtomSpaceError {
    /// Stable machine-readable name of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::AtomNotFound(_) => "atom_not_found",
            Self::LinkNotFound(_) => "link_not_found",
            Self::MissingAtom(_) => "missing_atom",
            Self::AgentNotFound(_) => "agent_not_found",
            Self::Conflict(_) => "conflict",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_value_clamps_out_of_range() {
        let tv = TruthValue::new(1.5, -0.2);
        assert_eq!(tv.strength(), 1.0);
        assert_eq!(tv.confidence(), 0.0);
    }

    #[test]
    fn truth_value_nan_becomes_zero() {
        let tv = TruthValue::new(f64::NAN, 0.4);
        assert_eq!(tv.strength(), 0.0);
        assert_eq!(tv.confidence(), 0.4);
    }

    #[test]
    fn truth_value_deserialize_clamps() {
        let tv: TruthValue =
            serde_json::from_str(r#"{"strength": 3.0, "confidence": -1.0}"#).expect("parse");
        assert_eq!(tv, TruthValue::new(1.0, 0.0));
    }

    #[test]
    fn truth_value_from_parts_uses_fallback() {
        let tv = TruthValue::from_parts(Some(0.9), None, TruthValue::UNKNOWN);
        assert_eq!(tv.strength(), 0.9);
        assert_eq!(tv.confidence(), 0.5);
    }

    #[test]
    fn atom_serializes_type_field() {
        let atom = Atom {
            id: AtomId(7),
            atom_type: "ConceptNode".to_string(),
            name: "human".to_string(),
            truth_value: TruthValue::DEFAULT,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&atom).expect("serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "ConceptNode");
        assert_eq!(json["truth_value"]["strength"], 1.0);
    }

    #[test]
    fn link_references() {
        let link = Link {
            id: LinkId(0),
            link_type: "ListLink".to_string(),
            outgoing: vec![AtomId(1), AtomId(1), AtomId(4)],
            truth_value: TruthValue::DEFAULT,
            created_at: Utc::now(),
        };
        assert!(link.references(AtomId(4)));
        assert!(!link.references(AtomId(2)));
    }

    #[test]
    fn error_kinds_are_distinct() {
        assert_eq!(AtomSpaceError::MissingAtom(AtomId(3)).kind(), "missing_atom");
        assert_eq!(AtomSpaceError::AtomNotFound(AtomId(3)).kind(), "atom_not_found");
        assert_eq!(
            AtomSpaceError::MissingAtom(AtomId(3)).to_string(),
            "Atom 3 not found"
        );
    }
}
