//! # Store Primitives
//!
//! Fixed limits and defaults compiled into the store.
//!
//! Every store operation is a bounded in-memory computation. These limits
//! keep single records bounded so one request cannot exhaust memory.

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length in bytes of an atom or link type tag.
pub const MAX_TYPE_LENGTH: usize = 256;

/// Maximum length in bytes of an atom name (64KB).
pub const MAX_NAME_LENGTH: usize = 65536;

/// Maximum number of atom ids in a link's outgoing set.
pub const MAX_LINK_ARITY: usize = 1024;

/// Maximum length in bytes of an agent name.
pub const MAX_AGENT_NAME_LENGTH: usize = 256;

// =============================================================================
// INFERENCE
// =============================================================================

/// Confidence discount applied by the induction rule.
pub const INDUCTION_DISCOUNT: f64 = 0.8;

/// Confidence discount applied by the abduction rule.
pub const ABDUCTION_DISCOUNT: f64 = 0.7;

/// Default number of inference records retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10_000;

/// Default number of records returned by a history read.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_limit_fits_capacity() {
        let limit = DEFAULT_HISTORY_LIMIT;
        assert!(limit <= DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn type_limit_below_name_limit() {
        let type_limit = MAX_TYPE_LENGTH;
        assert!(type_limit < MAX_NAME_LENGTH);
    }
}
