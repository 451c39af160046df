//! # AtomSpace Facade
//!
//! Composes the atom table, link table and query engine into the
//! operations the outside world sees.
//!
//! ## Locking
//!
//! `AtomSpace` is plain data. Every mutating method takes `&mut self`, so a
//! caller that shares the store behind a read/write lock automatically runs
//! link creation's "check every outgoing id, then append" under one write
//! guard: no atom can disappear between validation and append.
//!
//! ## Known Gap
//!
//! Deleting an atom never revisits existing links. A link created while an
//! atom existed keeps its id in `outgoing` after the atom is gone. Links are
//! never updated or deleted one by one.

use crate::atoms::AtomTable;
use crate::links::LinkTable;
use crate::primitives::{MAX_LINK_ARITY, MAX_NAME_LENGTH, MAX_TYPE_LENGTH};
use crate::query::{self, Pattern};
use crate::{Atom, AtomId, AtomSpaceError, Link, LinkId, TruthValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// RESULT SNAPSHOTS
// =============================================================================

/// Counts removed by a full clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSummary {
    pub atoms_cleared: u64,
    pub links_cleared: u64,
}

/// Size of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpaceMetrics {
    pub atom_count: usize,
    pub link_count: usize,
}

/// Size of the store broken down by type tag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpaceStats {
    pub atom_count: usize,
    pub link_count: usize,
    pub next_atom_id: u64,
    pub atom_types: BTreeMap<String, usize>,
    pub link_types: BTreeMap<String, usize>,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate a type tag. Any string is a valid tag, including `""`, up to the
/// length cap.
fn validate_type(field: &str, value: &str) -> Result<(), AtomSpaceError> {
    if value.len() > MAX_TYPE_LENGTH {
        return Err(AtomSpaceError::InvalidInput(format!(
            "{} length {} exceeds maximum {} bytes",
            field,
            value.len(),
            MAX_TYPE_LENGTH
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), AtomSpaceError> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(AtomSpaceError::InvalidInput(format!(
            "name length {} exceeds maximum {} bytes",
            name.len(),
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_arity(outgoing: &[AtomId]) -> Result<(), AtomSpaceError> {
    if outgoing.len() > MAX_LINK_ARITY {
        return Err(AtomSpaceError::InvalidInput(format!(
            "outgoing set of {} atoms exceeds maximum arity {}",
            outgoing.len(),
            MAX_LINK_ARITY
        )));
    }
    Ok(())
}

// =============================================================================
// ATOMSPACE
// =============================================================================

/// The store: exclusive owner of both tables.
#[derive(Debug, Clone, Default)]
pub struct AtomSpace {
    atoms: AtomTable,
    links: LinkTable,
}

impl AtomSpace {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Atoms
    // -------------------------------------------------------------------------

    /// Validate and insert a new atom.
    pub fn create_atom(
        &mut self,
        atom_type: &str,
        name: &str,
        truth_value: Option<TruthValue>,
    ) -> Result<Atom, AtomSpaceError> {
        validate_type("type", atom_type)?;
        validate_name(name)?;
        Ok(self.atoms.insert(atom_type, name, truth_value))
    }

    /// Fetch one atom by id.
    pub fn get_atom(&self, id: AtomId) -> Result<Atom, AtomSpaceError> {
        self.atoms
            .get(id)
            .cloned()
            .ok_or(AtomSpaceError::AtomNotFound(id))
    }

    /// All atoms, optionally restricted to one type, in insertion order.
    #[must_use]
    pub fn list_atoms(&self, type_filter: Option<&str>) -> Vec<Atom> {
        self.atoms.list(type_filter).cloned().collect()
    }

    /// Remove an atom. Links referencing it are left as they are.
    pub fn delete_atom(&mut self, id: AtomId) -> Result<Atom, AtomSpaceError> {
        self.atoms.delete(id)
    }

    /// Links whose outgoing set mentions an existing atom.
    pub fn incoming(&self, id: AtomId) -> Result<Vec<Link>, AtomSpaceError> {
        if !self.atoms.contains(id) {
            return Err(AtomSpaceError::AtomNotFound(id));
        }
        Ok(self.links.incoming(id).cloned().collect())
    }

    // -------------------------------------------------------------------------
    // Links
    // -------------------------------------------------------------------------

    /// Validate and append a new link.
    pub fn create_link(
        &mut self,
        link_type: &str,
        outgoing: Vec<AtomId>,
        truth_value: Option<TruthValue>,
    ) -> Result<Link, AtomSpaceError> {
        validate_type("type", link_type)?;
        validate_arity(&outgoing)?;
        self.links
            .insert(link_type, outgoing, truth_value, &self.atoms)
    }

    /// Fetch one link by id.
    pub fn get_link(&self, id: LinkId) -> Result<Link, AtomSpaceError> {
        self.links
            .get(id)
            .cloned()
            .ok_or(AtomSpaceError::LinkNotFound(id))
    }

    /// All links in insertion order.
    #[must_use]
    pub fn list_links(&self) -> Vec<Link> {
        self.links.list().cloned().collect()
    }

    // -------------------------------------------------------------------------
    // Query / Maintenance
    // -------------------------------------------------------------------------

    /// Every atom matching `pattern`, in insertion order.
    #[must_use]
    pub fn query(&self, pattern: &Pattern) -> Vec<Atom> {
        query::execute(&self.atoms, pattern).cloned().collect()
    }

    /// Empty both tables and reset atom id allocation.
    pub fn clear(&mut self) -> ClearSummary {
        let links_cleared = self.links.clear() as u64;
        let atoms_cleared = self.atoms.clear() as u64;
        ClearSummary {
            atoms_cleared,
            links_cleared,
        }
    }

    /// Current table sizes.
    #[must_use]
    pub fn metrics(&self) -> SpaceMetrics {
        SpaceMetrics {
            atom_count: self.atoms.len(),
            link_count: self.links.len(),
        }
    }

    /// Table sizes with per-type counts.
    #[must_use]
    pub fn stats(&self) -> SpaceStats {
        let mut atom_types: BTreeMap<String, usize> = BTreeMap::new();
        for atom in self.atoms.iter() {
            *atom_types.entry(atom.atom_type.clone()).or_default() += 1;
        }
        let mut link_types: BTreeMap<String, usize> = BTreeMap::new();
        for link in self.links.list() {
            *link_types.entry(link.link_type.clone()).or_default() += 1;
        }

        SpaceStats {
            atom_count: self.atoms.len(),
            link_count: self.links.len(),
            next_atom_id: self.atoms.next_id().0,
            atom_types,
            link_types,
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
    fn create_atom_accepts_empty_type() {
        let mut space = AtomSpace::new();
        let atom = space.create_atom("", "human", None).expect("create");
        assert_eq!(atom.atom_type, "");
        assert_eq!(space.metrics().atom_count, 1);

        let link = space.create_link("", vec![atom.id], None).expect("link");
        assert_eq!(link.link_type, "");
        assert_eq!(space.query(&Pattern::any().with_type("")).len(), 1);
    }

    #[test]
    fn create_atom_rejects_oversized_type() {
        let mut space = AtomSpace::new();
        let long = "T".repeat(MAX_TYPE_LENGTH + 1);
        assert!(matches!(
            space.create_atom(&long, "x", None),
            Err(AtomSpaceError::InvalidInput(_))
        ));
    }

    #[test]
    fn create_atom_allows_empty_name() {
        let mut space = AtomSpace::new();
        let atom = space.create_atom("ConceptNode", "", None).expect("create");
        assert_eq!(atom.name, "");
    }

    #[test]
    fn round_trip() {
        let mut space = AtomSpace::new();
        let tv = TruthValue::new(0.9, 0.8);
        let created = space
            .create_atom("ConceptNode", "human", Some(tv))
            .expect("create");
        let fetched = space.get_atom(created.id).expect("get");
        assert_eq!(created, fetched);
    }

    #[test]
    fn create_link_missing_atom_leaves_table_unchanged() {
        let mut space = AtomSpace::new();
        let a = space.create_atom("ConceptNode", "a", None).expect("create");
        let err = space.create_link("ListLink", vec![a.id, AtomId(42)], None);
        assert_eq!(err, Err(AtomSpaceError::MissingAtom(AtomId(42))));
        assert_eq!(space.metrics().link_count, 0);
    }

    #[test]
    fn create_link_rejects_excess_arity() {
        let mut space = AtomSpace::new();
        let outgoing = vec![AtomId(0); MAX_LINK_ARITY + 1];
        assert!(matches!(
            space.create_link("ListLink", outgoing, None),
            Err(AtomSpaceError::InvalidInput(_))
        ));
    }

    #[test]
    fn delete_leaves_dangling_reference() {
        let mut space = AtomSpace::new();
        let a = space.create_atom("ConceptNode", "a", None).expect("create");
        let b = space.create_atom("ConceptNode", "b", None).expect("create");
        let link = space
            .create_link("InheritanceLink", vec![a.id, b.id], None)
            .expect("link");

        space.delete_atom(a.id).expect("delete");

        let stored = space.get_link(link.id).expect("get link");
        assert_eq!(stored.outgoing, vec![a.id, b.id]);
        assert_eq!(space.metrics().link_count, 1);
    }

    #[test]
    fn incoming_requires_existing_atom() {
        let mut space = AtomSpace::new();
        let a = space.create_atom("ConceptNode", "a", None).expect("create");
        space.create_link("ListLink", vec![a.id], None).expect("link");

        assert_eq!(space.incoming(a.id).expect("incoming").len(), 1);
        assert_eq!(
            space.incoming(AtomId(99)),
            Err(AtomSpaceError::AtomNotFound(AtomId(99)))
        );
    }

    #[test]
    fn get_link_missing() {
        let space = AtomSpace::new();
        assert_eq!(
            space.get_link(LinkId(0)),
            Err(AtomSpaceError::LinkNotFound(LinkId(0)))
        );
    }

    #[test]
    fn clear_reports_counts_and_resets_ids() {
        let mut space = AtomSpace::new();
        let a = space.create_atom("ConceptNode", "a", None).expect("create");
        space.create_atom("ConceptNode", "b", None).expect("create");
        space.create_link("ListLink", vec![a.id], None).expect("link");

        let summary = space.clear();
        assert_eq!(
            summary,
            ClearSummary {
                atoms_cleared: 2,
                links_cleared: 1
            }
        );
        let next = space.create_atom("ConceptNode", "c", None).expect("create");
        assert_eq!(next.id, AtomId(0));
    }

    #[test]
    fn stats_counts_types() {
        let mut space = AtomSpace::new();
        let a = space.create_atom("ConceptNode", "a", None).expect("create");
        let b = space.create_atom("ConceptNode", "b", None).expect("create");
        space.create_atom("PredicateNode", "p", None).expect("create");
        space
            .create_link("InheritanceLink", vec![a.id, b.id], None)
            .expect("link");

        let stats = space.stats();
        assert_eq!(stats.atom_count, 3);
        assert_eq!(stats.link_count, 1);
        assert_eq!(stats.next_atom_id, 3);
        assert_eq!(stats.atom_types.get("ConceptNode"), Some(&2));
        assert_eq!(stats.link_types.get("InheritanceLink"), Some(&1));
    }
}
