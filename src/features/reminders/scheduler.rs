//! Reminder scheduler
//!
//! Owns one live timer task per registered reminder, keyed by reminder id.
//! Each task sleeps until the next occurrence of its schedule, fires through
//! the delivery sink, and loops. A one-shot task ends after its single
//! firing; recurring tasks run until the process exits (there is no
//! cancellation path).
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Expired one-shots are skipped at registration instead of firing late
//! - 1.0.0: Initial per-reminder timer tasks over a DeliverySink

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use log::{debug, error, info, warn};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::model::Reminder;
use super::schedule::{build_schedule, ScheduleExpression};
use crate::core::ChimeError;

/// Sends a rendered reminder text to a channel.
///
/// Implemented by the Discord adapter in the bot binary; the engine only
/// depends on this trait, so tests can substitute a recording sink.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    async fn send(&self, channel_id: &str, text: &str) -> Result<(), ChimeError>;
}

/// Per-reminder timer management over a shared delivery sink.
pub struct ReminderScheduler {
    sink: Arc<dyn DeliverySink>,
    timers: DashMap<Uuid, JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(sink: Arc<dyn DeliverySink>) -> Self {
        Self {
            sink,
            timers: DashMap::new(),
        }
    }

    /// Number of timer handles currently held.
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Builds the reminder's schedule, renders its delivery text once, and
    /// spawns the timer task, storing the handle under the reminder id.
    ///
    /// Registering an id that already has a live timer aborts and replaces
    /// it, so re-registration after a restart is idempotent in effect.
    pub fn register(&self, reminder: &Reminder) -> Result<(), ChimeError> {
        let expr = build_schedule(
            &reminder.date,
            &reminder.time,
            reminder.frequency,
            reminder.interval,
        )?;
        let text = reminder.render_message();
        let channel_id = reminder.channel_id.clone();
        let id = reminder.id;
        let sink = Arc::clone(&self.sink);

        debug!(
            "Registering reminder {id} ({}) for channel {channel_id}",
            reminder.frequency
        );

        let handle = tokio::spawn(async move {
            run_timer(id, expr, sink, channel_id, text).await;
        });
        if let Some(previous) = self.timers.insert(id, handle) {
            previous.abort();
            debug!("Replaced existing timer for reminder {id}");
        }
        Ok(())
    }
}

/// One reminder's firing loop. Firings of the same reminder are strictly
/// ordered and never overlap because this single task drives them all.
async fn run_timer(
    id: Uuid,
    expr: ScheduleExpression,
    sink: Arc<dyn DeliverySink>,
    channel_id: String,
    text: String,
) {
    let mut cursor = Utc::now();

    // A one-shot whose instant already passed (e.g. found during startup
    // recovery after a long outage) is expired: it never fires.
    if expr.next_occurrence(cursor).is_none() {
        warn!("Reminder {id}: one-shot instant already passed, treating as expired");
        return;
    }

    while let Some(at) = expr.next_occurrence(cursor) {
        let wait = (at - Utc::now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        // At-least-once, best-effort: a failed firing is logged and the
        // timer keeps its cadence.
        if let Err(e) = sink.send(&channel_id, &text).await {
            error!("Reminder {id} firing failed: {e}");
        }
        cursor = at;
    }

    info!("Reminder {id} fired for the last time");
}
