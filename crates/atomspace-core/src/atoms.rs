//! # Atom Table
//!
//! Owns every atom in the store and allocates their identifiers.
//!
//! Atoms are kept in a `BTreeMap` keyed by `AtomId`. Because ids come from a
//! strictly increasing counter, key order equals insertion order, which keeps
//! enumeration deterministic without a separate order index.

use crate::{Atom, AtomId, AtomSpaceError, TruthValue};
use chrono::Utc;
use std::collections::BTreeMap;

/// Storage for atoms plus the id allocator.
#[derive(Debug, Clone, Default)]
pub struct AtomTable {
    /// Atom storage: AtomId -> Atom
    atoms: BTreeMap<AtomId, Atom>,

    /// Next id to hand out. Only `clear` moves it backwards.
    next_id: u64,
}

impl AtomTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new atom and return a copy of it.
    ///
    /// Never fails. `truth_value` defaults to `TruthValue::DEFAULT`.
    pub fn insert(
        &mut self,
        atom_type: impl Into<String>,
        name: impl Into<String>,
        truth_value: Option<TruthValue>,
    ) -> Atom {
        let id = AtomId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let atom = Atom {
            id,
            atom_type: atom_type.into(),
            name: name.into(),
            truth_value: truth_value.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.atoms.insert(id, atom.clone());
        atom
    }

    /// Exact-key lookup. Absence is a normal outcome.
    #[must_use]
    pub fn get(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    /// Check if an atom currently exists.
    #[must_use]
    pub fn contains(&self, id: AtomId) -> bool {
        self.atoms.contains_key(&id)
    }

    /// All atoms, or only those of `type_filter`, in insertion order.
    pub fn list<'a>(&'a self, type_filter: Option<&'a str>) -> impl Iterator<Item = &'a Atom> + 'a {
        self.atoms
            .values()
            .filter(move |atom| type_filter.is_none_or(|t| atom.atom_type == t))
    }

    /// Iterate over every atom in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    /// Remove and return an atom.
    ///
    /// The id counter is untouched, so the id is never handed out again.
    /// Links that reference the atom are not inspected.
    pub fn delete(&mut self, id: AtomId) -> Result<Atom, AtomSpaceError> {
        self.atoms
            .remove(&id)
            .ok_or(AtomSpaceError::AtomNotFound(id))
    }

    /// Empty the table and reset the id counter. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.atoms.len();
        self.atoms.clear();
        self.next_id = 0;
        count
    }

    /// Get the total number of atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Check if the table holds no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The id the next insertion will receive.
    #[must_use]
    pub fn next_id(&self) -> AtomId {
        AtomId(self.next_id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
