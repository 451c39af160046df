//! # atomspace-core
//!
//! The in-memory hypergraph store for AtomSpace - THE STORE.
//!
//! This crate holds typed *atoms* (nodes) and typed *links* (hyperedges over
//! an ordered list of atoms), each annotated with a probabilistic
//! [`TruthValue`], and supports creation, retrieval, pattern queries and
//! bulk clearing.
//!
//! ## Components
//!
//! - `atoms` → Atom Table: id allocation, lookup, enumeration, removal
//! - `links` → Link Table: append-only hyperedges validated on insert
//! - `query` → Pattern Query Engine: conjunctive exact-match filter
//! - `space` → Store Facade: input validation and cross-table operations
//! - `pln` → Truth-value algebra used by callers, never by the store
//! - `agents` → Registry of periodic work items for an external scheduler
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies (pure Rust)
//! - Never panics: every failure is an [`AtomSpaceError`]
//! - Not persistent: state lives as long as the `AtomSpace` value

// =============================================================================
// MODULES
// =============================================================================

pub mod agents;
pub mod atoms;
pub mod links;
pub mod pln;
pub mod primitives;
pub mod query;
pub mod space;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Atom, AtomId, AtomSpaceError, Link, LinkId, TruthValue};

// =============================================================================
// RE-EXPORTS: Store
// =============================================================================

pub use atoms::AtomTable;
pub use links::LinkTable;
pub use query::Pattern;
pub use space::{AtomSpace, ClearSummary, SpaceMetrics, SpaceStats};

// =============================================================================
// RE-EXPORTS: Collaborators
// =============================================================================

pub use agents::{AgentInfo, AgentRegistry, AgentStatus, AgentTask, Heartbeat, TickReport};
pub use pln::{InferenceHistory, InferenceRecord, InferenceRule, InferenceStats};
