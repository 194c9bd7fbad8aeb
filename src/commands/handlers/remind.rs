//! Reminder command handler
//!
//! Handles: remind
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{get_integer_option, get_mentionable_option, get_string_option};
use crate::core::ChimeError;
use crate::features::reminders::{Frequency, Reminder, ReminderRequest};

/// Handler for the `/remind` command
pub struct RemindHandler;

#[async_trait]
impl SlashCommandHandler for RemindHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["remind"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request = match Self::parse_request(command) {
            Ok(request) => request,
            Err(reason) => {
                return Self::reply(serenity_ctx, command, &format!("❌ {reason}")).await;
            }
        };

        debug!(
            "Processing /remind from user {} in channel {}",
            command.user.id, request.channel_id
        );

        match ctx.reminders.create(request) {
            Ok(reminder) => {
                Self::reply(serenity_ctx, command, &Self::confirmation(&reminder)).await
            }
            // Validation failures carry a user-facing reason; everything
            // else bubbles up to the gateway error reply.
            Err(ChimeError::Validation(reason)) => {
                Self::reply(serenity_ctx, command, &format!("❌ {reason}")).await
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl RemindHandler {
    /// Extracts a [`ReminderRequest`] from the interaction options.
    fn parse_request(
        command: &ApplicationCommandInteraction,
    ) -> std::result::Result<ReminderRequest, String> {
        let options = &command.data.options;

        let time = get_string_option(options, "time").ok_or("Missing time parameter")?;
        let date = get_string_option(options, "date").ok_or("Missing date parameter")?;
        let message = get_string_option(options, "message").ok_or("Missing message parameter")?;
        let frequency = get_string_option(options, "frequency")
            .and_then(|v| Frequency::parse(&v))
            .ok_or("Frequency must be one of once, daily, weekly, custom")?;
        let interval = get_integer_option(options, "interval");
        let mention = get_mentionable_option(options, "mention");

        Ok(ReminderRequest {
            time,
            date,
            message,
            frequency,
            interval,
            mention,
            channel_id: command.channel_id.to_string(),
        })
    }

    /// Confirmation text echoing the normalized schedule back to the user.
    fn confirmation(reminder: &Reminder) -> String {
        let mut text = format!(
            "⏰ Reminder set for {} {} UTC! Frequency: {}",
            reminder.date, reminder.time, reminder.frequency
        );
        if let Some(interval) = reminder.interval {
            text.push_str(&format!(" every {interval} minutes."));
        }
        // The weekly rule is anchored to Sunday regardless of the supplied
        // date, so tell the caller up front.
        if reminder.frequency == Frequency::Weekly {
            text.push_str(" Weekly reminders fire on Sundays.");
        }
        text
    }

    async fn reply(
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        content: &str,
    ) -> Result<()> {
        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|msg| msg.content(content))
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn reminder(frequency: Frequency, interval: Option<i64>) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            time: "14:30".to_string(),
            date: "2025-03-01".to_string(),
            message: "Standup".to_string(),
            frequency,
            interval,
            mention: None,
            channel_id: "C1".to_string(),
        }
    }

    #[test]
    fn test_remind_handler_commands() {
        let handler = RemindHandler;
        assert_eq!(handler.command_names(), &["remind"]);
    }

    #[test]
    fn test_confirmation_echoes_normalized_schedule() {
        let text = RemindHandler::confirmation(&reminder(Frequency::Daily, None));
        assert_eq!(text, "⏰ Reminder set for 2025-03-01 14:30 UTC! Frequency: daily");
    }

    #[test]
    fn test_confirmation_includes_custom_interval() {
        let text = RemindHandler::confirmation(&reminder(Frequency::Custom, Some(45)));
        assert!(text.contains("Frequency: custom every 45 minutes."));
    }

    #[test]
    fn test_confirmation_warns_about_sunday_anchor() {
        let text = RemindHandler::confirmation(&reminder(Frequency::Weekly, None));
        assert!(text.contains("Weekly reminders fire on Sundays."));
    }
}
