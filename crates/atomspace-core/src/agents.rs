//! # Agent Registry
//!
//! Named work items driven by an external scheduler.
//!
//! The registry knows nothing about time. A scheduler calls [`AgentRegistry::tick`]
//! on whatever cadence it likes; each tick runs every agent whose status is
//! `Running` exactly once. A failing agent is marked `Error` and keeps its
//! error log; the rest of the cycle continues.
//!
//! Agents never touch the store through the registry. Whatever a task needs
//! it must capture itself.

use crate::primitives::MAX_AGENT_NAME_LENGTH;
use crate::AtomSpaceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// TASKS
// =============================================================================

/// One unit of periodic work.
pub trait AgentTask: Send + Sync {
    /// Run once. An `Err` is captured into the agent's error log.
    fn run(&mut self) -> Result<(), String>;
}

/// Task that always succeeds. Used for agents registered without code.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heartbeat;

impl AgentTask for Heartbeat {
    fn run(&mut self) -> Result<(), String> {
        Ok(())
    }
}

// =============================================================================
// AGENT RECORD
// =============================================================================

/// Lifecycle state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Stopped,
    Running,
    Paused,
    Error,
}

/// A captured task failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentError {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Public view of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
    pub config: serde_json::Value,
    pub status: AgentStatus,
    pub created_at: DateTime<Utc>,
    pub last_run: Option<DateTime<Utc>>,
    pub run_count: u64,
    pub error_count: usize,
    pub last_error: Option<String>,
}

struct Agent {
    agent_type: String,
    config: serde_json::Value,
    status: AgentStatus,
    created_at: DateTime<Utc>,
    last_run: Option<DateTime<Utc>>,
    run_count: u64,
    errors: Vec<AgentError>,
    task: Box<dyn AgentTask>,
}

impl Agent {
    fn info(&self, name: &str) -> AgentInfo {
        AgentInfo {
            name: name.to_string(),
            agent_type: self.agent_type.clone(),
            config: self.config.clone(),
            status: self.status,
            created_at: self.created_at,
            last_run: self.last_run,
            run_count: self.run_count,
            error_count: self.errors.len(),
            last_error: self.errors.last().map(|e| e.message.clone()),
        }
    }
}

/// Outcome of one scheduler cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub executed: usize,
    pub failed: usize,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Agents keyed by unique name.
#[derive(Default)]
pub struct AgentRegistry {
    agents: BTreeMap<String, Agent>,
}

impl fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("agents", &self.agents.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AgentRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent running the built-in [`Heartbeat`] task.
    pub fn create(
        &mut self,
        name: &str,
        agent_type: &str,
        config: Option<serde_json::Value>,
    ) -> Result<AgentInfo, AtomSpaceError> {
        self.register(name, agent_type, config, Box::new(Heartbeat))
    }

    /// Register an agent running `task`. Starts out `Stopped`.
    pub fn register(
        &mut self,
        name: &str,
        agent_type: &str,
        config: Option<serde_json::Value>,
        task: Box<dyn AgentTask>,
    ) -> Result<AgentInfo, AtomSpaceError> {
        if name.is_empty() || agent_type.is_empty() {
            return Err(AtomSpaceError::InvalidInput(
                "agent name and type must not be empty".to_string(),
            ));
        }
        if name.len() > MAX_AGENT_NAME_LENGTH {
            return Err(AtomSpaceError::InvalidInput(format!(
                "agent name length {} exceeds maximum {} bytes",
                name.len(),
                MAX_AGENT_NAME_LENGTH
            )));
        }
        if self.agents.contains_key(name) {
            return Err(AtomSpaceError::Conflict(format!(
                "agent {} already exists",
                name
            )));
        }

        let agent = Agent {
            agent_type: agent_type.to_string(),
            config: config.unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
            status: AgentStatus::Stopped,
            created_at: Utc::now(),
            last_run: None,
            run_count: 0,
            errors: Vec::new(),
            task,
        };
        let info = agent.info(name);
        self.agents.insert(name.to_string(), agent);
        Ok(info)
    }

    fn agent_mut(&mut self, name: &str) -> Result<&mut Agent, AtomSpaceError> {
        self.agents
            .get_mut(name)
            .ok_or_else(|| AtomSpaceError::AgentNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<AgentInfo, AtomSpaceError> {
        self.agents
            .get(name)
            .map(|agent| agent.info(name))
            .ok_or_else(|| AtomSpaceError::AgentNotFound(name.to_string()))
    }

    /// All agents in name order.
    #[must_use]
    pub fn list(&self) -> Vec<AgentInfo> {
        self.agents
            .iter()
            .map(|(name, agent)| agent.info(name))
            .collect()
    }

    /// Remove an agent. A running agent is stopped first.
    pub fn delete(&mut self, name: &str) -> Result<AgentInfo, AtomSpaceError> {
        let mut agent = self
            .agents
            .remove(name)
            .ok_or_else(|| AtomSpaceError::AgentNotFound(name.to_string()))?;
        if agent.status == AgentStatus::Running {
            agent.status = AgentStatus::Stopped;
        }
        Ok(agent.info(name))
    }

    /// Mark an agent `Running`. Already running is a no-op.
    pub fn start(&mut self, name: &str) -> Result<AgentInfo, AtomSpaceError> {
        let agent = self.agent_mut(name)?;
        agent.status = AgentStatus::Running;
        Ok(agent.info(name))
    }

    /// Mark an agent `Stopped`.
    pub fn stop(&mut self, name: &str) -> Result<AgentInfo, AtomSpaceError> {
        let agent = self.agent_mut(name)?;
        agent.status = AgentStatus::Stopped;
        Ok(agent.info(name))
    }

    /// Stop every running agent. Returns how many were stopped.
    pub fn stop_all(&mut self) -> usize {
        let mut stopped = 0;
        for agent in self.agents.values_mut() {
            if agent.status == AgentStatus::Running {
                agent.status = AgentStatus::Stopped;
                stopped += 1;
            }
        }
        stopped
    }

    /// Run every `Running` agent once.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for agent in self.agents.values_mut() {
            if agent.status != AgentStatus::Running {
                continue;
            }
            let now = Utc::now();
            agent.last_run = Some(now);
            report.executed += 1;
            match agent.task.run() {
                Ok(()) => agent.run_count = agent.run_count.saturating_add(1),
                Err(message) => {
                    agent.errors.push(AgentError {
                        timestamp: now,
                        message,
                    });
                    agent.status = AgentStatus::Error;
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Total number of agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Check if no agents are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of agents currently `Running`.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.agents
            .values()
            .filter(|a| a.status == AgentStatus::Running)
            .count()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FailEvery {
        calls: u32,
        every: u32,
    }

    impl AgentTask for FailEvery {
        fn run(&mut self) -> Result<(), String> {
            self.calls += 1;
            if self.calls % self.every == 0 {
                Err(format!("call {} failed", self.calls))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn create_starts_stopped() {
        let mut registry = AgentRegistry::new();
        let info = registry
            .create("matcher", "PatternMatchingAgent", None)
            .expect("create");
        assert_eq!(info.status, AgentStatus::Stopped);
        assert_eq!(info.run_count, 0);
        assert!(info.config.is_object());
    }

    #[test]
    fn duplicate_name_conflicts() {
        let mut registry = AgentRegistry::new();
        registry.create("a", "T", None).expect("create");
        assert!(matches!(
            registry.create("a", "T", None),
            Err(AtomSpaceError::Conflict(_))
        ));
    }

    #[test]
    fn empty_name_rejected() {
        let mut registry = AgentRegistry::new();
        assert!(matches!(
            registry.create("", "T", None),
            Err(AtomSpaceError::InvalidInput(_))
        ));
    }

    #[test]
    fn missing_agent_not_found() {
        let mut registry = AgentRegistry::new();
        assert_eq!(
            registry.start("ghost"),
            Err(AtomSpaceError::AgentNotFound("ghost".to_string()))
        );
        assert!(registry.get("ghost").is_err());
        assert!(registry.delete("ghost").is_err());
    }

    #[test]
    fn tick_runs_only_running_agents() {
        let mut registry = AgentRegistry::new();
        registry.create("a", "T", None).expect("create");
        registry.create("b", "T", None).expect("create");
        registry.start("a").expect("start");

        let report = registry.tick();
        assert_eq!(report, TickReport { executed: 1, failed: 0 });
        assert_eq!(registry.get("a").expect("get").run_count, 1);
        assert!(registry.get("a").expect("get").last_run.is_some());
        assert_eq!(registry.get("b").expect("get").run_count, 0);
    }

    #[test]
    fn failure_is_captured_without_aborting_cycle() {
        let mut registry = AgentRegistry::new();
        registry
            .register("flaky", "T", None, Box::new(FailEvery { calls: 0, every: 1 }))
            .expect("register");
        registry.create("steady", "T", None).expect("create");
        registry.start("flaky").expect("start");
        registry.start("steady").expect("start");

        let report = registry.tick();
        assert_eq!(report, TickReport { executed: 2, failed: 1 });

        let flaky = registry.get("flaky").expect("get");
        assert_eq!(flaky.status, AgentStatus::Error);
        assert_eq!(flaky.error_count, 1);
        assert_eq!(flaky.last_error.as_deref(), Some("call 1 failed"));
        assert_eq!(registry.get("steady").expect("get").run_count, 1);

        // An errored agent is skipped until restarted.
        let report = registry.tick();
        assert_eq!(report.executed, 1);
    }

    #[test]
    fn stop_all_and_running_count() {
        let mut registry = AgentRegistry::new();
        registry.create("a", "T", None).expect("create");
        registry.create("b", "T", None).expect("create");
        registry.start("a").expect("start");
        registry.start("b").expect("start");
        assert_eq!(registry.running_count(), 2);

        assert_eq!(registry.stop_all(), 2);
        assert_eq!(registry.running_count(), 0);
    }

    #[test]
    fn delete_stops_running_agent() {
        let mut registry = AgentRegistry::new();
        registry.create("a", "T", None).expect("create");
        registry.start("a").expect("start");
        let info = registry.delete("a").expect("delete");
        assert_eq!(info.status, AgentStatus::Stopped);
        assert!(registry.is_empty());
    }

    #[test]
    fn list_in_name_order() {
        let mut registry = AgentRegistry::new();
        registry.create("zeta", "T", None).expect("create");
        registry.create("alpha", "T", None).expect("create");
        let names: Vec<_> = registry.list().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 2);
    }
}
