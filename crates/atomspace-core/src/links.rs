//! # Link Table
//!
//! Append-only storage for hyperedges.
//!
//! A link's id is its position in the table. There is no separate counter:
//! ids derive from length, and clearing the table implicitly restarts them.
//! Links are never mutated or removed individually.

use crate::atoms::AtomTable;
use crate::{AtomId, AtomSpaceError, Link, LinkId, TruthValue};
use chrono::Utc;

/// Append-only list of links.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    links: Vec<Link>,
}

impl LinkTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `outgoing` against `atoms`, then append a new link.
    ///
    /// Every id is checked before anything is written; the first missing id
    /// fails the call with `MissingAtom` and leaves the table unchanged.
    /// The check happens once, here, and is never repeated later.
    pub fn insert(
        &mut self,
        link_type: impl Into<String>,
        outgoing: Vec<AtomId>,
        truth_value: Option<TruthValue>,
        atoms: &AtomTable,
    ) -> Result<Link, AtomSpaceError> {
        if let Some(missing) = outgoing.iter().find(|id| !atoms.contains(**id)) {
            return Err(AtomSpaceError::MissingAtom(*missing));
        }

        let link = Link {
            id: LinkId(self.links.len() as u64),
            link_type: link_type.into(),
            outgoing,
            truth_value: truth_value.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.links.push(link.clone());
        Ok(link)
    }

    /// Positional lookup.
    #[must_use]
    pub fn get(&self, id: LinkId) -> Option<&Link> {
        usize::try_from(id.0).ok().and_then(|i| self.links.get(i))
    }

    /// All links in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Links whose outgoing set mentions `atom`, in insertion order.
    pub fn incoming(&self, atom: AtomId) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |link| link.references(atom))
    }

    /// Empty the table. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.links.len();
        self.links.clear();
        count
    }

    /// Get the total number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Check if the table holds no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms_with(n: usize) -> AtomTable {
        let mut atoms = AtomTable::new();
        for i in 0..n {
            atoms.insert("ConceptNode", format!("c{i}"), None);
        }
        atoms
    }

    #[test]
    fn insert_assigns_positional_ids() {
        let atoms = atoms_with(2);
        let mut links = LinkTable::new();
        let l0 = links
            .insert("InheritanceLink", vec![AtomId(0), AtomId(1)], None, &atoms)
            .expect("insert");
        let l1 = links
            .insert("ListLink", vec![], None, &atoms)
            .expect("insert");
        assert_eq!(l0.id, LinkId(0));
        assert_eq!(l1.id, LinkId(1));
        assert_eq!(l0.truth_value, TruthValue::DEFAULT);
    }

    #[test]
    fn insert_rejects_missing_atom_without_partial_write() {
        let atoms = atoms_with(1);
        let mut links = LinkTable::new();
        let result = links.insert("ListLink", vec![AtomId(0), AtomId(5), AtomId(6)], None, &atoms);
        assert_eq!(result, Err(AtomSpaceError::MissingAtom(AtomId(5))));
        assert!(links.is_empty());
    }

    #[test]
    fn duplicates_and_self_references_allowed() {
        let atoms = atoms_with(1);
        let mut links = LinkTable::new();
        let link = links
            .insert("ListLink", vec![AtomId(0), AtomId(0)], None, &atoms)
            .expect("insert");
        assert_eq!(link.outgoing, vec![AtomId(0), AtomId(0)]);
    }

    #[test]
    fn incoming_lists_referencing_links() {
        let atoms = atoms_with(3);
        let mut links = LinkTable::new();
        links
            .insert("ListLink", vec![AtomId(0), AtomId(1)], None, &atoms)
            .expect("insert");
        links
            .insert("ListLink", vec![AtomId(2)], None, &atoms)
            .expect("insert");
        links
            .insert("ListLink", vec![AtomId(1)], None, &atoms)
            .expect("insert");

        let ids: Vec<_> = links.incoming(AtomId(1)).map(|l| l.id).collect();
        assert_eq!(ids, vec![LinkId(0), LinkId(2)]);
    }

    #[test]
    fn clear_restarts_ids() {
        let atoms = atoms_with(1);
        let mut links = LinkTable::new();
        links.insert("ListLink", vec![], None, &atoms).expect("insert");
        assert_eq!(links.clear(), 1);
        let link = links.insert("ListLink", vec![], None, &atoms).expect("insert");
        assert_eq!(link.id, LinkId(0));
        assert!(links.get(LinkId(1)).is_none());
    }
}
