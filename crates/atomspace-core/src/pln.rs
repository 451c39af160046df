//! # Truth-Value Algebra
//!
//! Fixed closed-form rules combining truth values, plus a bounded log of
//! applied inferences.
//!
//! The rules are pure functions on `TruthValue`. They hold no reference to
//! the store; callers decide where premises come from and what to do with
//! the result.
//!
//! | Rule | Strength | Confidence |
//! |------|----------|------------|
//! | deduction | s1·s2 | min(c1,c2) |
//! | induction | (s1+s2)/2 | min(c1,c2)·0.8 |
//! | abduction | √(s1·s2) | min(c1,c2)·0.7 |
//! | conjunction | s1·s2 | (c1+c2)/2 |
//! | disjunction | s1+s2−s1·s2 | (c1+c2)/2 |
//! | negation | 1−s | c |
//! | revision | Σsᵢcᵢ/Σcᵢ | min(1, Σcᵢ) |

use crate::primitives::{ABDUCTION_DISCOUNT, DEFAULT_HISTORY_CAPACITY, INDUCTION_DISCOUNT};
use crate::{AtomSpaceError, TruthValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// RULES
// =============================================================================

/// If A→B and B→C, then A→C.
#[must_use]
pub fn deduction(p1: TruthValue, p2: TruthValue) -> TruthValue {
    TruthValue::new(
        p1.strength() * p2.strength(),
        p1.confidence().min(p2.confidence()),
    )
}

/// Generalize from instances.
#[must_use]
pub fn induction(p1: TruthValue, p2: TruthValue) -> TruthValue {
    TruthValue::new(
        (p1.strength() + p2.strength()) / 2.0,
        p1.confidence().min(p2.confidence()) * INDUCTION_DISCOUNT,
    )
}

/// Hypothesis generation.
#[must_use]
pub fn abduction(p1: TruthValue, p2: TruthValue) -> TruthValue {
    TruthValue::new(
        (p1.strength() * p2.strength()).sqrt(),
        p1.confidence().min(p2.confidence()) * ABDUCTION_DISCOUNT,
    )
}

/// A AND B.
#[must_use]
pub fn conjunction(p1: TruthValue, p2: TruthValue) -> TruthValue {
    TruthValue::new(
        p1.strength() * p2.strength(),
        (p1.confidence() + p2.confidence()) / 2.0,
    )
}

/// A OR B.
#[must_use]
pub fn disjunction(p1: TruthValue, p2: TruthValue) -> TruthValue {
    let (s1, s2) = (p1.strength(), p2.strength());
    TruthValue::new(s1 + s2 - s1 * s2, (p1.confidence() + p2.confidence()) / 2.0)
}

/// NOT A.
#[must_use]
pub fn negation(p: TruthValue) -> TruthValue {
    TruthValue::new(1.0 - p.strength(), p.confidence())
}

/// Merge two estimates of the same statement.
///
/// Strength is the confidence-weighted mean. With zero total confidence
/// there is nothing to weigh, so the result is (0.5, 0.0).
#[must_use]
pub fn revision(tv1: TruthValue, tv2: TruthValue) -> TruthValue {
    let total = tv1.confidence() + tv2.confidence();
    if total <= 0.0 {
        return TruthValue::new(0.5, 0.0);
    }
    let strength =
        (tv1.strength() * tv1.confidence() + tv2.strength() * tv2.confidence()) / total;
    TruthValue::new(strength, total.min(1.0))
}

// =============================================================================
// RULE TABLE
// =============================================================================

/// The rules a caller can apply by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceRule {
    Deduction,
    Induction,
    Abduction,
    Conjunction,
    Disjunction,
    Negation,
    Revision,
}

impl InferenceRule {
    /// Every rule, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Deduction,
        Self::Induction,
        Self::Abduction,
        Self::Conjunction,
        Self::Disjunction,
        Self::Negation,
        Self::Revision,
    ];

    /// Lowercase rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deduction => "deduction",
            Self::Induction => "induction",
            Self::Abduction => "abduction",
            Self::Conjunction => "conjunction",
            Self::Disjunction => "disjunction",
            Self::Negation => "negation",
            Self::Revision => "revision",
        }
    }

    /// Number of premises the rule consumes.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Negation => 1,
            _ => 2,
        }
    }

    /// Apply the rule, checking the premise count first.
    pub fn apply(&self, premises: &[TruthValue]) -> Result<TruthValue, AtomSpaceError> {
        match (self, premises) {
            (Self::Negation, [p]) => Ok(negation(*p)),
            (Self::Deduction, [a, b]) => Ok(deduction(*a, *b)),
            (Self::Induction, [a, b]) => Ok(induction(*a, *b)),
            (Self::Abduction, [a, b]) => Ok(abduction(*a, *b)),
            (Self::Conjunction, [a, b]) => Ok(conjunction(*a, *b)),
            (Self::Disjunction, [a, b]) => Ok(disjunction(*a, *b)),
            (Self::Revision, [a, b]) => Ok(revision(*a, *b)),
            _ => Err(AtomSpaceError::InvalidInput(format!(
                "{} takes {} premise(s), got {}",
                self.name(),
                self.arity(),
                premises.len()
            ))),
        }
    }
}

impl fmt::Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InferenceRule {
    type Err = AtomSpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| AtomSpaceError::InvalidInput(format!("unknown inference rule '{}'", s)))
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// One applied inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRecord {
    pub rule: InferenceRule,
    pub premises: Vec<TruthValue>,
    pub result: TruthValue,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate counters over the retained history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InferenceStats {
    pub total_inferences: usize,
    pub rules_applied: u64,
    pub rule_distribution: BTreeMap<InferenceRule, usize>,
}

/// Bounded log of applied inferences.
///
/// When full, the oldest record is evicted. `rules_applied` counts every
/// record ever added since the last `clear`, including evicted ones.
#[derive(Debug, Clone)]
pub struct InferenceHistory {
    records: VecDeque<InferenceRecord>,
    capacity: usize,
    rules_applied: u64,
}

impl Default for InferenceHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl InferenceHistory {
    /// Create an empty history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history retaining at most `capacity` records
    /// (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity: capacity.max(1),
            rules_applied: 0,
        }
    }

    /// Apply `rule` and log the outcome.
    pub fn infer(
        &mut self,
        rule: InferenceRule,
        premises: Vec<TruthValue>,
    ) -> Result<InferenceRecord, AtomSpaceError> {
        let result = rule.apply(&premises)?;
        let record = InferenceRecord {
            rule,
            premises,
            result,
            timestamp: Utc::now(),
        };
        self.record(record.clone());
        Ok(record)
    }

    /// Append a record, evicting the oldest if at capacity.
    pub fn record(&mut self, record: InferenceRecord) {
        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
        self.rules_applied = self.rules_applied.saturating_add(1);
    }

    /// The `limit` most recent records, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<InferenceRecord> {
        let skip = self.records.len().saturating_sub(limit);
        self.records.iter().skip(skip).cloned().collect()
    }

    /// Drop every record and reset the counter. Returns the number dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        self.rules_applied = 0;
        count
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn rules_applied(&self) -> u64 {
        self.rules_applied
    }

    /// Counters over the retained records.
    #[must_use]
    pub fn stats(&self) -> InferenceStats {
        let mut rule_distribution = BTreeMap::new();
        for record in &self.records {
            *rule_distribution.entry(record.rule).or_default() += 1;
        }
        InferenceStats {
            total_inferences: self.records.len(),
            rules_applied: self.rules_applied,
            rule_distribution,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
