//! Bot layer - Discord-specific interface and command handlers.
//!
//! This module provides the Discord interface for the membership system,
//! including all slash commands, autocomplete handlers, and bot context
//! management. Command handlers only parse options, call core operations, and
//! phrase replies; every business rule lives in [`crate::core`].

/// Discord command implementations (member, points, membership, event, tutor, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::config::settings::Settings;
use crate::core::guild;
use crate::errors;
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Application settings loaded at startup
    pub settings: Arc<Settings>,
}

impl BotData {
    /// Creates a new `BotData` instance for the command context.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: Arc<Settings>) -> Self {
        Self { database, settings }
    }
}

// Type alias for the error type Poise will use
pub(crate) type Error = errors::Error;

/// Whether the command author holds the guild's configured admin role.
///
/// Admin commands are already gated by `default_member_permissions`; when a
/// guild has additionally configured an admin role via `/setconfig`, the
/// author must hold it too. The config is fetched per invocation, never
/// cached.
pub(crate) async fn author_has_admin_role(
    ctx: &poise::Context<'_, BotData, Error>,
) -> errors::Result<bool> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(false);
    };

    let config = guild::get_guild_config(&ctx.data().database, &guild_id.to_string()).await?;
    let Some(admin_role_id) = config.and_then(|c| c.admin_role_id) else {
        // No role configured: the permission gate on the command is enough
        return Ok(true);
    };

    let Some(member) = ctx.author_member().await else {
        return Ok(false);
    };
    Ok(member
        .roles
        .iter()
        .any(|role| role.to_string() == admin_role_id))
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {}", error.user_message())).await {
                tracing::error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the bot until shutdown.
pub async fn run_bot(
    token: String,
    settings: Arc<Settings>,
    database: DatabaseConnection,
) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::general::ping(),
                commands::general::help(),
                commands::member::claim(),
                commands::member::profile(),
                commands::member::find(),
                commands::points::balance(),
                commands::points::pay(),
                commands::points::grant(),
                commands::points::leaderboard(),
                commands::membership::grantmembership(),
                commands::membership::cancelmembership(),
                commands::event::createevent(),
                commands::event::checkin(),
                commands::tutor::tutorlog(),
                commands::tutor::tutorstats(),
                commands::admin::setconfig(),
                commands::admin::addcontact(),
                commands::admin::updatecontact(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database, settings))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await
}
