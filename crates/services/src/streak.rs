use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::debug;

use mastery_core::time::{next_local_midnight, until_next_local_midnight, Clock};

use crate::render::DashboardRenderer;
use crate::state::{lock, SharedState};

/// Resets the streak at each local midnight.
///
/// Runs as a single-shot sleep recomputed per day boundary rather than a
/// fixed-interval poll, so a host that suspends simply picks up at the next
/// boundary. Best-effort: a boundary that passes while nothing is running
/// is skipped for that day.
pub struct StreakScheduler {
    state: SharedState,
    renderer: Arc<dyn DashboardRenderer>,
    clock: Clock,
}

impl StreakScheduler {
    #[must_use]
    pub fn new(state: SharedState, renderer: Arc<dyn DashboardRenderer>, clock: Clock) -> Self {
        Self {
            state,
            renderer,
            clock,
        }
    }

    /// Runs forever; the host spawns this onto its runtime.
    pub async fn run(self) {
        loop {
            let now: DateTime<Local> = self.clock.now_local();
            debug!(boundary = %next_local_midnight(now), "streak reset scheduled");
            tokio::time::sleep(until_next_local_midnight(now)).await;
            self.reset_once();
        }
    }

    /// One boundary tick: zero the streak and re-render the badge.
    pub fn reset_once(&self) {
        let streak = {
            let mut guard = lock(&self.state);
            guard.user.reset_streak();
            guard.user.streak()
        };
        self.renderer.render_streak(streak);
    }
}
