//! # Features
//!
//! Feature modules for the chime bot.

pub mod reminders;

pub use reminders::{DeliverySink, ReminderScheduler, ReminderService, ReminderStore};
