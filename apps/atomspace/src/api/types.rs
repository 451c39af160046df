//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Request fields that the store requires are still `Option` here so that a
//! missing field is reported as `invalid_input` with a readable message
//! instead of a serde rejection.

use crate::scheduler::SchedulerStatus;
use atomspace_core::{
    AgentInfo, Atom, AtomId, AtomSpaceError, InferenceRecord, InferenceRule, InferenceStats, Link,
    Pattern, SpaceMetrics, SpaceStats, TruthValue,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service name reported by `/health` and `/v1/version`.
pub const SERVICE_NAME: &str = "atomspace";

// =============================================================================
// HEALTH / VERSION
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub atom_count: usize,
    pub link_count: usize,
}

impl HealthResponse {
    pub fn new(metrics: SpaceMetrics) -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            atom_count: metrics.atom_count,
            link_count: metrics.link_count,
        }
    }
}

/// Static service metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub service: String,
    pub version: String,
    pub description: String,
}

impl Default for VersionResponse {
    fn default() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "In-memory hypergraph store of typed atoms and links".to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub kind: String,
    /// The offending atom for `atom_not_found` and `missing_atom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom_id: Option<u64>,
}

impl ErrorResponse {
    pub fn from_error(err: &AtomSpaceError) -> Self {
        let atom_id = match err {
            AtomSpaceError::AtomNotFound(id) | AtomSpaceError::MissingAtom(id) => Some(id.0),
            _ => None,
        };
        Self {
            success: false,
            error: err.to_string(),
            kind: err.kind().to_string(),
            atom_id,
        }
    }

    /// Generic 500 body for failures that carry no domain error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
            kind: "internal".to_string(),
            atom_id: None,
        }
    }
}

// =============================================================================
// TRUTH VALUE
// =============================================================================

/// Truth value as sent by clients. Either component may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TruthValueJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl TruthValueJson {
    pub fn new(strength: f64, confidence: f64) -> Self {
        Self {
            strength: Some(strength),
            confidence: Some(confidence),
        }
    }

    /// Clamp into a [`TruthValue`], filling omitted components from `fallback`.
    pub fn resolve(&self, fallback: TruthValue) -> TruthValue {
        TruthValue::from_parts(self.strength, self.confidence, fallback)
    }
}

// =============================================================================
// ATOMS
// =============================================================================

/// `POST /api/v1/atoms` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAtomRequest {
    #[serde(rename = "type")]
    pub atom_type: Option<String>,
    pub name: Option<String>,
    pub truth_value: Option<TruthValueJson>,
}

/// A create-atom request with its required fields present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAtom {
    pub atom_type: String,
    pub name: String,
    pub truth_value: Option<TruthValue>,
}

impl CreateAtomRequest {
    /// Check that `type` and `name` are present.
    ///
    /// Length limits are enforced by the store itself.
    pub fn validate(self) -> Result<NewAtom, AtomSpaceError> {
        match (self.atom_type, self.name) {
            (Some(atom_type), Some(name)) => Ok(NewAtom {
                atom_type,
                name,
                truth_value: self
                    .truth_value
                    .map(|tv| tv.resolve(TruthValue::DEFAULT)),
            }),
            _ => Err(AtomSpaceError::InvalidInput(
                "Missing required fields: type and name".to_string(),
            )),
        }
    }
}

/// `GET /api/v1/atoms` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAtomsParams {
    #[serde(rename = "type")]
    pub atom_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomResponse {
    pub success: bool,
    pub atom: Atom,
}

impl AtomResponse {
    pub fn success(atom: Atom) -> Self {
        Self {
            success: true,
            atom,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomListResponse {
    pub success: bool,
    pub count: usize,
    pub atoms: Vec<Atom>,
}

impl AtomListResponse {
    pub fn success(atoms: Vec<Atom>) -> Self {
        Self {
            success: true,
            count: atoms.len(),
            atoms,
        }
    }
}

/// Response to a delete, carrying the removed atom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAtomResponse {
    pub success: bool,
    pub message: String,
    pub atom: Atom,
}

impl DeleteAtomResponse {
    pub fn success(atom: Atom) -> Self {
        Self {
            success: true,
            message: format!("Atom {} deleted successfully", atom.id),
            atom,
        }
    }
}

// =============================================================================
// LINKS
// =============================================================================

/// `POST /api/v1/links` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    pub outgoing: Option<Vec<u64>>,
    pub truth_value: Option<TruthValueJson>,
}

/// A create-link request with its required fields present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub link_type: String,
    pub outgoing: Vec<AtomId>,
    pub truth_value: Option<TruthValue>,
}

impl CreateLinkRequest {
    /// Check that `type` and `outgoing` are present.
    pub fn validate(self) -> Result<NewLink, AtomSpaceError> {
        match (self.link_type, self.outgoing) {
            (Some(link_type), Some(outgoing)) => Ok(NewLink {
                link_type,
                outgoing: outgoing.into_iter().map(AtomId).collect(),
                truth_value: self
                    .truth_value
                    .map(|tv| tv.resolve(TruthValue::DEFAULT)),
            }),
            _ => Err(AtomSpaceError::InvalidInput(
                "Missing required fields: type and outgoing".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    pub success: bool,
    pub link: Link,
}

impl LinkResponse {
    pub fn success(link: Link) -> Self {
        Self {
            success: true,
            link,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkListResponse {
    pub success: bool,
    pub count: usize,
    pub links: Vec<Link>,
}

impl LinkListResponse {
    pub fn success(links: Vec<Link>) -> Self {
        Self {
            success: true,
            count: links.len(),
            links,
        }
    }
}

// =============================================================================
// QUERY / CLEAR / STATS
// =============================================================================

/// `POST /api/v1/query` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    pub pattern: Option<Pattern>,
}

impl QueryRequest {
    pub fn validate(self) -> Result<Pattern, AtomSpaceError> {
        self.pattern.ok_or_else(|| {
            AtomSpaceError::InvalidInput("Missing required field: pattern".to_string())
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    pub count: usize,
    pub results: Vec<Atom>,
}

impl QueryResponse {
    pub fn success(results: Vec<Atom>) -> Self {
        Self {
            success: true,
            count: results.len(),
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
    pub atoms_cleared: u64,
    pub links_cleared: u64,
}

impl ClearResponse {
    pub fn success(atoms_cleared: u64, links_cleared: u64) -> Self {
        Self {
            success: true,
            message: format!(
                "Cleared {} atoms and {} links",
                atoms_cleared, links_cleared
            ),
            atoms_cleared,
            links_cleared,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: SpaceStats,
}

// =============================================================================
// INFERENCE
// =============================================================================

/// `POST /api/v1/infer/{rule}` body.
///
/// Binary rules read `premise1`/`premise2`, negation reads `premise` and
/// revision reads `truth_value1`/`truth_value2`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premise: Option<TruthValueJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premise1: Option<TruthValueJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premise2: Option<TruthValueJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truth_value1: Option<TruthValueJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truth_value2: Option<TruthValueJson>,
}

impl InferRequest {
    /// Extract the premises `rule` expects. Omitted components default to 0.5.
    pub fn premises(&self, rule: InferenceRule) -> Result<Vec<TruthValue>, AtomSpaceError> {
        let (fields, names) = match rule {
            InferenceRule::Negation => (vec![self.premise], "premise"),
            InferenceRule::Revision => (
                vec![self.truth_value1, self.truth_value2],
                "truth_value1 and truth_value2",
            ),
            _ => (vec![self.premise1, self.premise2], "premise1 and premise2"),
        };

        fields
            .into_iter()
            .map(|tv| {
                tv.map(|tv| tv.resolve(TruthValue::UNKNOWN)).ok_or_else(|| {
                    AtomSpaceError::InvalidInput(format!("Missing required fields: {}", names))
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub success: bool,
    pub inference: InferenceRecord,
}

/// `GET /api/v1/inference/history` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub count: usize,
    pub total_inferences: usize,
    pub history: Vec<InferenceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceStatsResponse {
    pub success: bool,
    pub stats: InferenceStats,
}

// =============================================================================
// AGENTS / SCHEDULER
// =============================================================================

/// `POST /api/v1/agents` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub agent_type: Option<String>,
    pub config: Option<serde_json::Value>,
}

/// A create-agent request with its required fields present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub name: String,
    pub agent_type: String,
    pub config: Option<serde_json::Value>,
}

impl CreateAgentRequest {
    pub fn validate(self) -> Result<NewAgent, AtomSpaceError> {
        if self.config.as_ref().is_some_and(|c| !c.is_object()) {
            return Err(AtomSpaceError::InvalidInput(
                "Agent config must be a JSON object".to_string(),
            ));
        }
        match (self.name, self.agent_type) {
            (Some(name), Some(agent_type)) => Ok(NewAgent {
                name,
                agent_type,
                config: self.config,
            }),
            _ => Err(AtomSpaceError::InvalidInput(
                "Missing required fields: name and type".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub success: bool,
    pub agent: AgentInfo,
}

impl AgentResponse {
    pub fn success(agent: AgentInfo) -> Self {
        Self {
            success: true,
            agent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentListResponse {
    pub success: bool,
    pub count: usize,
    pub agents: Vec<AgentInfo>,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerStatusResponse {
    pub success: bool,
    pub scheduler: SchedulerStatus,
}
