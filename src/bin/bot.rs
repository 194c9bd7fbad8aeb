use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::*;
use std::sync::Arc;

use chime::commands::handlers::RemindHandler;
use chime::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandRegistry,
};
use chime::core::{ChimeError, Config};
use chime::features::reminders::{
    DeliverySink, ReminderScheduler, ReminderService, ReminderStore,
};

/// Delivery sink backed by the Discord HTTP API.
struct HttpDeliverySink {
    http: Arc<Http>,
}

#[async_trait]
impl DeliverySink for HttpDeliverySink {
    async fn send(&self, channel_id: &str, text: &str) -> Result<(), ChimeError> {
        let id: u64 = channel_id.parse().map_err(|_| ChimeError::Delivery {
            channel_id: channel_id.to_string(),
            reason: "channel id is not a valid snowflake".to_string(),
        })?;
        ChannelId(id)
            .say(&self.http, text)
            .await
            .map_err(|e| ChimeError::Delivery {
                channel_id: channel_id.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

struct Handler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        // Guild commands update instantly, global ones can take up to an hour
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            let Some(handler) = self.registry.get(&command.data.name) else {
                return;
            };

            if let Err(e) = handler
                .handle(Arc::clone(&self.context), &ctx, &command)
                .await
            {
                error!(
                    "Error handling slash command '{}': {}",
                    command.data.name, e
                );

                let _ = command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(
                                    "❌ Sorry, I encountered an error processing your command. Please try again.",
                                )
                            })
                    })
                    .await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Chime reminder bot...");

    // A corrupt reminder file is fatal here: refusing to start beats coming
    // up with a silently empty reminder set.
    let store = Arc::new(ReminderStore::open(&config.reminders_path)?);

    let http = Arc::new(Http::new(&config.discord_token));
    let sink = Arc::new(HttpDeliverySink { http });
    let scheduler = Arc::new(ReminderScheduler::new(sink));
    let service = Arc::new(ReminderService::new(store, scheduler));

    // Recover persisted reminders before the gateway connects, so a restart
    // can never accept new reminders while old ones are still unregistered.
    let restored = service.startup()?;
    info!("⏰ {restored} reminders restored from {}", config.reminders_path);

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(RemindHandler));

    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler {
        registry,
        context: Arc::new(CommandContext::new(service)),
        guild_id,
    };

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
