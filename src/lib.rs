// Core layer - configuration and error types
pub mod core;

// Features layer - the reminder engine
pub mod features;

// Application layer - slash command handling
pub mod commands;

// Re-export core items
pub use core::{ChimeError, Config};

// Re-export the reminder engine surface
pub use features::reminders::{
    build_schedule, DeliverySink, Frequency, Reminder, ReminderRequest, ReminderScheduler,
    ReminderService, ReminderStore, ScheduleExpression,
};
