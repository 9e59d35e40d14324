//! Per-actor execution loop
//!
//! Each placed actor runs [`run_actor`] as its own tokio task. The loop
//! paces itself with an interval, checks the shutdown signal only between
//! steps (a step in progress always completes), and ends early once the
//! actor is dead.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::core::types::ActorId;
use crate::grid::{ActorStep, Grid};

/// Why an actor task stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskExit {
    /// The run budget ran out
    Shutdown,
    /// The actor died
    Dead,
    /// The grid refused the actor; the error was logged
    Failed,
}

/// Loop until shutdown or death
///
/// `interval` of `None` means the actor never acts and only waits for
/// shutdown. Returns how many steps completed along with the exit reason.
pub async fn run_actor(
    grid: Arc<Grid>,
    id: ActorId,
    interval: Option<Duration>,
    mut shutdown: watch::Receiver<bool>,
) -> (u64, TaskExit) {
    let Some(period) = interval else {
        // sender dropped counts as shutdown too
        let _ = shutdown.wait_for(|stop| *stop).await;
        return (0, TaskExit::Shutdown);
    };

    // first action waits one full period
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut steps = 0;

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return (steps, TaskExit::Shutdown);
                }
                continue;
            }
            _ = ticker.tick() => {}
        }

        if *shutdown.borrow() {
            return (steps, TaskExit::Shutdown);
        }

        match grid.perform_action(id).await {
            Ok(ActorStep::Idle) => {
                tracing::debug!(?id, "actor is dead, task ending");
                return (steps, TaskExit::Dead);
            }
            Ok(ActorStep::Moved(_)) => steps += 1,
            Ok(ActorStep::Fought { outcome, .. }) => {
                steps += 1;
                tracing::debug!(?id, ?outcome, "actor finished an encounter");
            }
            Err(e) => {
                tracing::warn!(?id, "actor task stopped: {}", e);
                return (steps, TaskExit::Failed);
            }
        }
    }
}
