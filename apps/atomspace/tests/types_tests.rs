//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use atomspace::api::{
    CreateAgentRequest, CreateAtomRequest, CreateLinkRequest, ErrorResponse, InferRequest,
    QueryRequest, TruthValueJson, VersionResponse,
};
use atomspace_core::{AtomId, AtomSpaceError, InferenceRule, LinkId, TruthValue};

// =============================================================================
// TRUTH VALUE TESTS
// =============================================================================

#[test]
fn test_truth_value_json_partial() {
    let tv: TruthValueJson = serde_json::from_str(r#"{"strength":0.4}"#).unwrap();
    assert_eq!(tv.strength, Some(0.4));
    assert_eq!(tv.confidence, None);
    assert_eq!(tv.resolve(TruthValue::DEFAULT), TruthValue::new(0.4, 1.0));
    assert_eq!(tv.resolve(TruthValue::UNKNOWN), TruthValue::new(0.4, 0.5));
}

#[test]
fn test_truth_value_json_omits_missing_components() {
    let json = serde_json::to_string(&TruthValueJson::default()).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_truth_value_serialization_shape() {
    let json = serde_json::to_string(&TruthValue::new(0.25, 0.5)).unwrap();
    assert_eq!(json, r#"{"strength":0.25,"confidence":0.5}"#);
}

// =============================================================================
// CREATE ATOM REQUEST TESTS
// =============================================================================

#[test]
fn test_create_atom_request_validate() {
    let request: CreateAtomRequest =
        serde_json::from_str(r#"{"type":"ConceptNode","name":"human"}"#).unwrap();
    let atom = request.validate().unwrap();
    assert_eq!(atom.atom_type, "ConceptNode");
    assert_eq!(atom.name, "human");
    assert_eq!(atom.truth_value, None);
}

#[test]
fn test_create_atom_request_empty_name_allowed() {
    let request: CreateAtomRequest =
        serde_json::from_str(r#"{"type":"ConceptNode","name":""}"#).unwrap();
    assert!(request.validate().is_ok());
}

#[test]
fn test_create_atom_request_missing_name() {
    let request: CreateAtomRequest = serde_json::from_str(r#"{"type":"ConceptNode"}"#).unwrap();
    assert!(matches!(
        request.validate(),
        Err(AtomSpaceError::InvalidInput(_))
    ));
}

// =============================================================================
// CREATE LINK REQUEST TESTS
// =============================================================================

#[test]
fn test_create_link_request_validate() {
    let request: CreateLinkRequest = serde_json::from_str(
        r#"{"type":"InheritanceLink","outgoing":[3,1],"truth_value":{"strength":2.0,"confidence":0.5}}"#,
    )
    .unwrap();
    let link = request.validate().unwrap();
    assert_eq!(link.outgoing, vec![AtomId(3), AtomId(1)]);
    assert_eq!(link.truth_value, Some(TruthValue::new(1.0, 0.5)));
}

#[test]
fn test_create_link_request_missing_outgoing() {
    let request: CreateLinkRequest = serde_json::from_str(r#"{"type":"ListLink"}"#).unwrap();
    assert!(request.validate().is_err());
}

// =============================================================================
// QUERY REQUEST TESTS
// =============================================================================

#[test]
fn test_query_request_empty_pattern() {
    let request: QueryRequest = serde_json::from_str(r#"{"pattern":{}}"#).unwrap();
    let pattern = request.validate().unwrap();
    assert!(pattern.is_empty());
}

#[test]
fn test_query_request_rejects_unknown_key() {
    let parsed = serde_json::from_str::<QueryRequest>(r#"{"pattern":{"id":1}}"#);
    assert!(parsed.is_err());
}

// =============================================================================
// INFER REQUEST TESTS
// =============================================================================

#[test]
fn test_infer_request_per_rule_fields() {
    let request: InferRequest = serde_json::from_str(
        r#"{"premise":{"strength":0.2,"confidence":0.9},"truth_value1":{},"truth_value2":{}}"#,
    )
    .unwrap();

    let negation = request.premises(InferenceRule::Negation).unwrap();
    assert_eq!(negation, vec![TruthValue::new(0.2, 0.9)]);

    let revision = request.premises(InferenceRule::Revision).unwrap();
    assert_eq!(revision, vec![TruthValue::UNKNOWN, TruthValue::UNKNOWN]);

    assert!(request.premises(InferenceRule::Deduction).is_err());
}

// =============================================================================
// AGENT REQUEST TESTS
// =============================================================================

#[test]
fn test_create_agent_request_config_must_be_object() {
    let request: CreateAgentRequest =
        serde_json::from_str(r#"{"name":"a","type":"T","config":"fast"}"#).unwrap();
    assert!(request.validate().is_err());

    let request: CreateAgentRequest =
        serde_json::from_str(r#"{"name":"a","type":"T","config":{"threshold":0.5}}"#).unwrap();
    assert!(request.validate().is_ok());
}

// =============================================================================
// RESPONSE TESTS
// =============================================================================

#[test]
fn test_error_response_carries_atom_id() {
    let missing = ErrorResponse::from_error(&AtomSpaceError::MissingAtom(AtomId(9)));
    assert_eq!(missing.kind, "missing_atom");
    assert_eq!(missing.atom_id, Some(9));
    assert_eq!(missing.error, "Atom 9 not found");

    let link = ErrorResponse::from_error(&AtomSpaceError::LinkNotFound(LinkId(2)));
    let json = serde_json::to_string(&link).unwrap();
    assert!(!json.contains("atom_id"));
    assert!(json.contains("\"success\":false"));
}

#[test]
fn test_version_response_default() {
    let version = VersionResponse::default();
    assert_eq!(version.service, "atomspace");
    assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
}
