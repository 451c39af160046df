//! # Store Endpoint Handlers
//!
//! Atoms, links, pattern queries and whole-store operations.
//!
//! Every mutation takes the store write lock for exactly one facade call,
//! so link creation validates and appends under the same guard.

use super::{
    AppState,
    error::ApiError,
    types::{
        AtomListResponse, AtomResponse, ClearResponse, CreateAtomRequest, CreateLinkRequest,
        DeleteAtomResponse, HealthResponse, LinkListResponse, LinkResponse, ListAtomsParams,
        QueryRequest, QueryResponse, StatsResponse, VersionResponse,
    },
};
use atomspace_core::{AtomId, LinkId};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

// =============================================================================
// HEALTH / VERSION
// =============================================================================

/// Health check endpoint.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = state.space.read().await.metrics();
    Json(HealthResponse::new(metrics))
}

/// Static service metadata.
pub async fn version_handler() -> impl IntoResponse {
    Json(VersionResponse::default())
}

// =============================================================================
// ATOMS
// =============================================================================

/// Create an atom.
pub async fn create_atom_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateAtomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AtomResponse>), ApiError> {
    let Json(request) = body?;
    let new = request.validate()?;

    let atom = state
        .space
        .write()
        .await
        .create_atom(&new.atom_type, &new.name, new.truth_value)?;

    tracing::info!(
        event = "atom_created",
        atom_id = atom.id.0,
        atom_type = %atom.atom_type,
        "Created atom"
    );
    Ok((StatusCode::CREATED, Json(AtomResponse::success(atom))))
}

/// Get one atom by id.
pub async fn get_atom_handler(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<AtomResponse>, ApiError> {
    let Path(id) = id?;
    let atom = state.space.read().await.get_atom(AtomId(id))?;
    Ok(Json(AtomResponse::success(atom)))
}

/// List atoms in id order, optionally filtered by `?type=`.
pub async fn list_atoms_handler(
    State(state): State<AppState>,
    params: Result<Query<ListAtomsParams>, QueryRejection>,
) -> Result<Json<AtomListResponse>, ApiError> {
    let Query(params) = params?;
    let atoms = state
        .space
        .read()
        .await
        .list_atoms(params.atom_type.as_deref());
    Ok(Json(AtomListResponse::success(atoms)))
}

/// Delete an atom. Links that mention it are left untouched.
pub async fn delete_atom_handler(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeleteAtomResponse>, ApiError> {
    let Path(id) = id?;
    let atom = state.space.write().await.delete_atom(AtomId(id))?;

    tracing::info!(
        event = "atom_deleted",
        atom_id = atom.id.0,
        atom_type = %atom.atom_type,
        "Deleted atom"
    );
    Ok(Json(DeleteAtomResponse::success(atom)))
}

/// Links whose outgoing set mentions the atom.
pub async fn incoming_handler(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<LinkListResponse>, ApiError> {
    let Path(id) = id?;
    let links = state.space.read().await.incoming(AtomId(id))?;
    Ok(Json(LinkListResponse::success(links)))
}

// =============================================================================
// LINKS
// =============================================================================

/// Create a link over existing atoms.
pub async fn create_link_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), ApiError> {
    let Json(request) = body?;
    let new = request.validate()?;
    let arity = new.outgoing.len();

    let link = state
        .space
        .write()
        .await
        .create_link(&new.link_type, new.outgoing, new.truth_value)?;

    tracing::info!(
        event = "link_created",
        link_id = link.id.0,
        link_type = %link.link_type,
        arity,
        "Created link"
    );
    Ok((StatusCode::CREATED, Json(LinkResponse::success(link))))
}

/// Get one link by id.
pub async fn get_link_handler(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<LinkResponse>, ApiError> {
    let Path(id) = id?;
    let link = state.space.read().await.get_link(LinkId(id))?;
    Ok(Json(LinkResponse::success(link)))
}

/// List links in insertion order.
pub async fn list_links_handler(State(state): State<AppState>) -> impl IntoResponse {
    let links = state.space.read().await.list_links();
    Json(LinkListResponse::success(links))
}

// =============================================================================
// QUERY / CLEAR / STATS
// =============================================================================

/// Conjunctive exact-match pattern query.
pub async fn query_handler(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = body?;
    let pattern = request.validate()?;
    let results = state.space.read().await.query(&pattern);
    Ok(Json(QueryResponse::success(results)))
}

/// Remove every atom and link and reset the atom id counter.
pub async fn clear_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summary = state.space.write().await.clear();

    tracing::info!(
        event = "store_cleared",
        atoms_cleared = summary.atoms_cleared,
        links_cleared = summary.links_cleared,
        "Cleared store"
    );
    Json(ClearResponse::success(
        summary.atoms_cleared,
        summary.links_cleared,
    ))
}

/// Counts by type tag.
pub async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.space.read().await.stats();
    Json(StatsResponse {
        success: true,
        stats,
    })
}
