//! # Agent Scheduler
//!
//! Periodic driver for the [`AgentRegistry`].
//!
//! A single tokio task ticks the registry every `interval`. The task owns a
//! `watch` receiver and checks it on every cycle, so `stop()` takes effect
//! at the next await point without aborting a tick half way.
//!
//! The scheduler never touches the store. Agents reach shared state only
//! through what their [`AgentTask`](atomspace_core::AgentTask) captured.

use atomspace_core::AgentRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Snapshot returned by `GET /api/v1/scheduler/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    pub running: bool,
    pub interval_ms: u64,
    pub total_agents: usize,
    pub running_agents: usize,
}

struct Worker {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Owns the background tick loop.
pub struct Scheduler {
    agents: Arc<RwLock<AgentRegistry>>,
    interval: Duration,
    worker: Mutex<Option<Worker>>,
}

impl Scheduler {
    /// Create a stopped scheduler over `agents`.
    #[must_use]
    pub fn new(agents: Arc<RwLock<AgentRegistry>>, interval: Duration) -> Self {
        Self {
            agents,
            interval: interval.max(Duration::from_millis(1)),
            worker: Mutex::new(None),
        }
    }

    /// Spawn the tick loop. Returns `false` if it was already running.
    pub async fn start(&self) -> bool {
        let mut worker = self.worker.lock().await;
        if worker.as_ref().is_some_and(|w| !w.task.is_finished()) {
            return false;
        }

        let (stop, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(Arc::clone(&self.agents), self.interval, stop_rx));
        *worker = Some(Worker { stop, task });

        tracing::info!(
            event = "scheduler_started",
            interval_ms = self.interval.as_millis() as u64,
            "Scheduler started"
        );
        true
    }

    /// Signal the loop, wait for it to exit and stop every running agent.
    /// Returns `false` if it was not running.
    pub async fn stop(&self) -> bool {
        let Some(worker) = self.worker.lock().await.take() else {
            return false;
        };

        let _ = worker.stop.send(true);
        if let Err(e) = worker.task.await {
            tracing::error!("Scheduler task ended abnormally: {}", e);
        }

        let stopped = self.agents.write().await.stop_all();
        tracing::info!(
            event = "scheduler_stopped",
            agents_stopped = stopped,
            "Scheduler stopped"
        );
        true
    }

    pub async fn is_running(&self) -> bool {
        self.worker
            .lock()
            .await
            .as_ref()
            .is_some_and(|w| !w.task.is_finished())
    }

    pub async fn status(&self) -> SchedulerStatus {
        let running = self.is_running().await;
        let agents = self.agents.read().await;
        SchedulerStatus {
            running,
            interval_ms: self.interval.as_millis() as u64,
            total_agents: agents.len(),
            running_agents: agents.running_count(),
        }
    }
}

async fn run_loop(
    agents: Arc<RwLock<AgentRegistry>>,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = agents.write().await.tick();
                if report.failed > 0 {
                    tracing::warn!(
                        executed = report.executed,
                        failed = report.failed,
                        "Agent cycle finished with failures"
                    );
                } else if report.executed > 0 {
                    tracing::debug!(executed = report.executed, "Agent cycle finished");
                }
            }
            changed = stop.changed() => {
                // A dropped sender also ends the loop.
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
