//! # Remind Command
//!
//! Definition of the `/remind` slash command.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Frequency choices offered by the `/remind` command
const FREQUENCY_CHOICES: &[(&str, &str)] = &[
    ("Once", "once"),
    ("Daily", "daily"),
    ("Weekly", "weekly"),
    ("Custom Interval", "custom"),
];

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_remind_command()]
}

fn create_remind_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("remind")
        .description("Set a reminder for a specific date and time in UTC")
        .create_option(|option| {
            option
                .name("time")
                .description("The time in HH:MM format (UTC)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("date")
                .description("The date in YYYY-MM-DD format (UTC)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("message")
                .description("The reminder message")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("frequency")
                .description("Frequency of the reminder (daily, weekly, custom)")
                .kind(CommandOptionType::String)
                .required(true);
            for (name, value) in FREQUENCY_CHOICES {
                option.add_string_choice(name, value);
            }
            option
        })
        .create_option(|option| {
            option
                .name("interval")
                .description("Custom interval in minutes (only if frequency is custom)")
                .kind(CommandOptionType::Integer)
                .required(false)
        })
        .create_option(|option| {
            option
                .name("mention")
                .description("User or role to mention")
                .kind(CommandOptionType::Mentionable)
                .required(false)
        });
    command
}
