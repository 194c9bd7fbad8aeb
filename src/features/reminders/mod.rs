//! # Reminders Feature
//!
//! The reminder scheduling engine: schedule building, durable storage,
//! per-reminder timers, and the orchestrating service.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod model;
pub mod schedule;
pub mod scheduler;
pub mod service;
pub mod store;

pub use model::{Frequency, Reminder, ReminderRequest};
pub use schedule::{build_schedule, ScheduleExpression};
pub use scheduler::{DeliverySink, ReminderScheduler};
pub use service::ReminderService;
pub use store::ReminderStore;
