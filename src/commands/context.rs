//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::sync::Arc;

use crate::features::reminders::ReminderService;

/// Shared state handed to every command handler.
#[derive(Clone)]
pub struct CommandContext {
    /// The reminder engine: validation, persistence, and timer registration.
    pub reminders: Arc<ReminderService>,
}

impl CommandContext {
    pub fn new(reminders: Arc<ReminderService>) -> Self {
        Self { reminders }
    }
}
