//! # Property-Based Tests
//!
//! Store invariants checked with proptest over random operation sequences.

use atomspace_core::{AtomId, AtomSpace, AtomSpaceError, Pattern, TruthValue};
use proptest::collection::vec;
use proptest::prelude::*;

const TYPES: [&str; 3] = ["ConceptNode", "PredicateNode", "ListLink"];
const NAMES: [&str; 3] = ["human", "dog", "eats"];

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Ids returned by create are strictly increasing, whatever is deleted in between.
    #[test]
    fn ids_strictly_increasing(
        deletes in vec(any::<bool>(), 1..60)
    ) {
        let mut space = AtomSpace::new();
        let mut previous: Option<AtomId> = None;

        for (i, delete) in deletes.iter().enumerate() {
            let atom = space.create_atom("ConceptNode", &i.to_string(), None).expect("create");
            if let Some(prev) = previous {
                prop_assert!(atom.id > prev);
            }
            previous = Some(atom.id);
            if *delete {
                space.delete_atom(atom.id).expect("delete");
            }
        }
    }

    /// Any finite input is clamped into the unit square.
    #[test]
    fn truth_value_always_clamped(s in -10.0f64..10.0, c in -10.0f64..10.0) {
        let tv = TruthValue::new(s, c);
        prop_assert!((0.0..=1.0).contains(&tv.strength()));
        prop_assert!((0.0..=1.0).contains(&tv.confidence()));
        if (0.0..=1.0).contains(&s) {
            prop_assert_eq!(tv.strength(), s);
        }
    }

    /// A query returns exactly the atoms a manual filter would.
    #[test]
    fn query_matches_manual_filter(
        atoms in vec((0usize..3, 0usize..3), 0..40),
        want_type in proptest::option::of(0usize..3),
        want_name in proptest::option::of(0usize..3),
    ) {
        let mut space = AtomSpace::new();
        for (t, n) in &atoms {
            space.create_atom(TYPES[*t], NAMES[*n], None).expect("create");
        }

        let mut pattern = Pattern::any();
        if let Some(t) = want_type {
            pattern = pattern.with_type(TYPES[t]);
        }
        if let Some(n) = want_name {
            pattern = pattern.with_name(NAMES[n]);
        }

        let expected: Vec<AtomId> = space
            .list_atoms(None)
            .into_iter()
            .filter(|a| want_type.is_none_or(|t| a.atom_type == TYPES[t]))
            .filter(|a| want_name.is_none_or(|n| a.name == NAMES[n]))
            .map(|a| a.id)
            .collect();
        let actual: Vec<AtomId> = space.query(&pattern).into_iter().map(|a| a.id).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Link creation succeeds iff every outgoing id exists; failure writes nothing.
    #[test]
    fn link_referential_check(
        atom_count in 0u64..10,
        outgoing in vec(0u64..15, 0..6),
    ) {
        let mut space = AtomSpace::new();
        for i in 0..atom_count {
            space.create_atom("ConceptNode", &i.to_string(), None).expect("create");
        }
        let outgoing: Vec<AtomId> = outgoing.into_iter().map(AtomId).collect();
        let first_missing = outgoing.iter().copied().find(|id| id.0 >= atom_count);

        let result = space.create_link("ListLink", outgoing.clone(), None);
        match first_missing {
            Some(missing) => {
                prop_assert_eq!(result, Err(AtomSpaceError::MissingAtom(missing)));
                prop_assert_eq!(space.metrics().link_count, 0);
            }
            None => {
                let link = result.expect("link");
                prop_assert_eq!(link.outgoing, outgoing);
                prop_assert_eq!(space.metrics().link_count, 1);
            }
        }
    }
}
