//! # Agent and Scheduler Endpoint Handlers
//!
//! CRUD over the agent registry plus control of the background scheduler.
//! Agents created here run the built-in heartbeat task.

use super::{
    AppState,
    error::ApiError,
    types::{
        AgentListResponse, AgentResponse, CreateAgentRequest, MessageResponse,
        SchedulerStatusResponse,
    },
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

// =============================================================================
// AGENTS
// =============================================================================

/// Register a new agent in the `stopped` state.
pub async fn create_agent_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateAgentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AgentResponse>), ApiError> {
    let Json(request) = body?;
    let new = request.validate()?;

    let agent = state
        .agents
        .write()
        .await
        .create(&new.name, &new.agent_type, new.config)?;

    tracing::info!(
        event = "agent_created",
        agent = %agent.name,
        agent_type = %agent.agent_type,
        "Created agent"
    );
    Ok((StatusCode::CREATED, Json(AgentResponse::success(agent))))
}

/// List agents in name order.
pub async fn list_agents_handler(State(state): State<AppState>) -> impl IntoResponse {
    let agents = state.agents.read().await.list();
    Json(AgentListResponse {
        success: true,
        count: agents.len(),
        agents,
    })
}

pub async fn get_agent_handler(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Path(name) = name?;
    let agent = state.agents.read().await.get(&name)?;
    Ok(Json(AgentResponse::success(agent)))
}

/// Remove an agent, stopping it first.
pub async fn delete_agent_handler(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(name) = name?;
    state.agents.write().await.delete(&name)?;

    tracing::info!(event = "agent_deleted", agent = %name, "Deleted agent");
    Ok(Json(MessageResponse::success(format!(
        "Agent {} deleted successfully",
        name
    ))))
}

/// Mark an agent running and make sure the scheduler is ticking.
pub async fn start_agent_handler(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Path(name) = name?;
    let agent = state.agents.write().await.start(&name)?;
    state.scheduler.start().await;

    tracing::info!(event = "agent_started", agent = %name, "Started agent");
    Ok(Json(AgentResponse::success(agent)))
}

pub async fn stop_agent_handler(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Path(name) = name?;
    let agent = state.agents.write().await.stop(&name)?;

    tracing::info!(event = "agent_stopped", agent = %name, "Stopped agent");
    Ok(Json(AgentResponse::success(agent)))
}

// =============================================================================
// SCHEDULER
// =============================================================================

pub async fn start_scheduler_handler(State(state): State<AppState>) -> impl IntoResponse {
    let message = if state.scheduler.start().await {
        "Scheduler started successfully"
    } else {
        "Scheduler is already running"
    };
    Json(MessageResponse::success(message))
}

/// Stop the scheduler and every running agent.
pub async fn stop_scheduler_handler(State(state): State<AppState>) -> impl IntoResponse {
    let message = if state.scheduler.stop().await {
        "Scheduler stopped successfully"
    } else {
        "Scheduler is not running"
    };
    Json(MessageResponse::success(message))
}

pub async fn scheduler_status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(SchedulerStatusResponse {
        success: true,
        scheduler: state.scheduler.status().await,
    })
}
