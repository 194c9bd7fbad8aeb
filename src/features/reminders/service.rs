//! Reminder service
//!
//! Orchestrates the engine: validates creation requests, persists the record,
//! registers the timer, and replays the persisted set on startup.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use log::info;
use uuid::Uuid;

use super::model::{Frequency, Reminder, ReminderRequest};
use super::schedule::build_schedule;
use super::scheduler::ReminderScheduler;
use super::store::ReminderStore;
use crate::core::ChimeError;

pub struct ReminderService {
    store: Arc<ReminderStore>,
    scheduler: Arc<ReminderScheduler>,
}

impl ReminderService {
    pub fn new(store: Arc<ReminderStore>, scheduler: Arc<ReminderScheduler>) -> Self {
        Self { store, scheduler }
    }

    /// Creates a reminder from raw command input: validate, persist, then
    /// register the timer. All-or-nothing: a validation failure leaves no
    /// record and no timer behind.
    pub fn create(&self, request: ReminderRequest) -> Result<Reminder, ChimeError> {
        if request.message.trim().is_empty() {
            return Err(ChimeError::validation("the reminder message must not be empty"));
        }

        // Run the full schedule validation before any side effect.
        build_schedule(
            &request.date,
            &request.time,
            request.frequency,
            request.interval,
        )?;

        let reminder = Reminder {
            id: Uuid::new_v4(),
            time: request.time,
            date: request.date,
            message: request.message,
            frequency: request.frequency,
            // Interval is only meaningful for custom cadences.
            interval: (request.frequency == Frequency::Custom)
                .then_some(request.interval)
                .flatten(),
            mention: request.mention,
            channel_id: request.channel_id,
        };

        self.store.append(&reminder)?;
        self.scheduler.register(&reminder)?;

        info!(
            "Created reminder {} ({} at {} {} UTC, channel {})",
            reminder.id, reminder.frequency, reminder.date, reminder.time, reminder.channel_id
        );
        Ok(reminder)
    }

    /// Re-registers every persisted reminder. Runs to completion before the
    /// bot signals readiness, so a restart can never leave a previously
    /// scheduled reminder silently unregistered.
    pub fn startup(&self) -> Result<usize, ChimeError> {
        let records = self.store.load_all();
        let count = records.len();
        for reminder in records {
            self.scheduler.register(&reminder)?;
        }
        info!("Startup recovery complete: {count} reminders re-registered");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::scheduler::DeliverySink;
    use async_trait::async_trait;
    use std::path::Path;

    struct NullSink;

    #[async_trait]
    impl DeliverySink for NullSink {
        async fn send(&self, _channel_id: &str, _text: &str) -> Result<(), ChimeError> {
            Ok(())
        }
    }

    fn service(path: &Path) -> (ReminderService, Arc<ReminderScheduler>) {
        let store = Arc::new(ReminderStore::open(path).unwrap());
        let scheduler = Arc::new(ReminderScheduler::new(Arc::new(NullSink)));
        (ReminderService::new(store, scheduler.clone()), scheduler)
    }

    fn request(frequency: Frequency, interval: Option<i64>) -> ReminderRequest {
        ReminderRequest {
            time: "14:30".to_string(),
            date: "2025-03-01".to_string(),
            message: "Standup".to_string(),
            frequency,
            interval,
            mention: None,
            channel_id: "C1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_persists_and_registers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");
        let (service, scheduler) = service(&path);

        let created = service.create(request(Frequency::Daily, None)).unwrap();
        assert_eq!(created.frequency, Frequency::Daily);
        assert_eq!(created.channel_id, "C1");
        assert_eq!(scheduler.timer_count(), 1);

        // The record is durably on disk.
        let reloaded = ReminderStore::open(&path).unwrap().load_all();
        assert_eq!(reloaded, vec![created]);
    }

    #[tokio::test]
    async fn test_invalid_interval_leaves_no_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");
        let (service, scheduler) = service(&path);

        // Zero and absurdly large intervals alike must fail before anything
        // is persisted or scheduled.
        for interval in [0, 1 << 53] {
            let err = service
                .create(request(Frequency::Custom, Some(interval)))
                .unwrap_err();
            assert!(matches!(err, ChimeError::Validation(_)), "{interval}");
        }
        assert_eq!(scheduler.timer_count(), 0);
        assert!(ReminderStore::open(&path).unwrap().load_all().is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (service, scheduler) = service(&dir.path().join("reminders.json"));

        let mut req = request(Frequency::Daily, None);
        req.message = "   ".to_string();
        let err = service.create(req).unwrap_err();
        assert!(matches!(err, ChimeError::Validation(_)));
        assert_eq!(scheduler.timer_count(), 0);
    }

    #[tokio::test]
    async fn test_interval_is_dropped_for_non_custom_frequencies() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = service(&dir.path().join("reminders.json"));

        let created = service.create(request(Frequency::Daily, Some(15))).unwrap();
        assert_eq!(created.interval, None);

        let custom = service
            .create(request(Frequency::Custom, Some(15)))
            .unwrap();
        assert_eq!(custom.interval, Some(15));
    }

    #[tokio::test]
    async fn test_startup_re_registers_every_persisted_reminder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");

        // First process life: create three reminders.
        {
            let (service, _) = service(&path);
            for _ in 0..3 {
                service.create(request(Frequency::Daily, None)).unwrap();
            }
        }

        // Restart: fresh store, fresh scheduler, no live timers.
        let (service, scheduler) = service(&path);
        assert_eq!(scheduler.timer_count(), 0);

        let restored = service.startup().unwrap();
        assert_eq!(restored, 3);
        assert_eq!(scheduler.timer_count(), 3);
    }

    #[tokio::test]
    async fn test_startup_recovers_a_record_persisted_but_never_registered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.json");

        // Crash between append and register: the record is on disk but no
        // timer was ever created for it.
        {
            let store = ReminderStore::open(&path).unwrap();
            let mut req = request(Frequency::Daily, None);
            req.message = "orphaned".to_string();
            let reminder = Reminder {
                id: Uuid::new_v4(),
                time: req.time,
                date: req.date,
                message: req.message,
                frequency: req.frequency,
                interval: None,
                mention: None,
                channel_id: req.channel_id,
            };
            store.append(&reminder).unwrap();
        }

        let (service, scheduler) = service(&path);
        assert_eq!(service.startup().unwrap(), 1);
        assert_eq!(scheduler.timer_count(), 1);
    }

    #[tokio::test]
    async fn test_startup_with_no_prior_state_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let (service, scheduler) = service(&dir.path().join("reminders.json"));

        assert_eq!(service.startup().unwrap(), 0);
        assert_eq!(scheduler.timer_count(), 0);
    }
}
