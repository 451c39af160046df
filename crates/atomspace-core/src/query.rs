//! # Query Module
//!
//! Pattern queries over the atom table.
//!
//! A pattern is a conjunctive exact-match filter on `type` and `name`. Keys
//! left out of the pattern impose no constraint, so the empty pattern
//! matches every atom. There is no variable binding and no matching on
//! truth values, ids or link structure.
//!
//! A key that is present must carry a string. `{"type": null}` is a parse
//! error, never an absent key.

use crate::Atom;
use crate::atoms::AtomTable;
use serde::{Deserialize, Deserializer, Serialize};

/// A partial-attribute pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    /// Required atom type, if present.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub atom_type: Option<String>,
    /// Required atom name, if present.
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

/// Only called for keys that appear in the input; `default` covers absence.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl Pattern {
    /// The empty pattern (matches everything).
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Constrain the type.
    #[must_use]
    pub fn with_type(mut self, atom_type: impl Into<String>) -> Self {
        self.atom_type = Some(atom_type.into());
        self
    }

    /// Constrain the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check if the pattern imposes no constraint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atom_type.is_none() && self.name.is_none()
    }

    /// Case-sensitive equality on every present key.
    #[must_use]
    pub fn matches(&self, atom: &Atom) -> bool {
        self.atom_type.as_ref().is_none_or(|t| *t == atom.atom_type)
            && self.name.as_ref().is_none_or(|n| *n == atom.name)
    }
}

/// Full scan of `atoms`, returning matches in insertion order.
pub fn execute<'a>(atoms: &'a AtomTable, pattern: &'a Pattern) -> impl Iterator<Item = &'a Atom> + 'a {
    atoms.iter().filter(move |atom| pattern.matches(atom))
}

// =============================================================================
// TESTS
// =============================================================================
