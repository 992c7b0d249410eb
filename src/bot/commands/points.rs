//! Points ledger commands - `balance`, `pay`, `grant`, and `leaderboard`.
//!
//! Point amounts arrive as numbers from Discord and are truncated toward zero
//! before the ledger sees them. A payment is a single atomic transfer; the
//! debit can never land without the credit.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_has_admin_role},
        core::{ledger, resolve},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    async fn resolve_by_discord(
        db: &sea_orm::DatabaseConnection,
        discord_id: String,
    ) -> Result<crate::entities::contact::Model> {
        resolve::resolve_contact(
            db,
            &resolve::ContactQuery {
                discord_id: Some(discord_id),
                ..Default::default()
            },
        )
        .await
    }

    /// Shows your current point balance.
    #[poise::command(slash_command, prefix_command)]
    pub async fn balance(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        match resolve_by_discord(db, ctx.author().id.to_string()).await {
            Ok(record) => {
                let balance = ledger::get_balance(db, record.id).await?;
                ctx.say(format!("You have **{balance}** points.")).await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Sends points from your balance to another member.
    #[poise::command(slash_command, prefix_command)]
    pub async fn pay(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to pay"] user: serenity::User,
        #[description = "Points to send"] amount: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let points = match ledger::points_from_raw(amount) {
            Ok(points) if points > 0 => points,
            _ => {
                ctx.say("❌ Amount must be a positive number of points.")
                    .await?;
                return Ok(());
            }
        };

        let sender = match resolve_by_discord(db, ctx.author().id.to_string()).await {
            Ok(record) => record,
            Err(Error::ContactNotFound) => {
                ctx.say("❌ No record is linked to this Discord account. Use `/claim` first.")
                    .await?;
                return Ok(());
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                return Ok(());
            }
        };
        let recipient = match resolve_by_discord(db, user.id.to_string()).await {
            Ok(record) => record,
            Err(Error::ContactNotFound) => {
                ctx.say(format!(
                    "❌ {} has not linked a membership record yet.",
                    user.name
                ))
                .await?;
                return Ok(());
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                return Ok(());
            }
        };

        match ledger::transfer_points(db, sender.id, recipient.id, points, "payment").await {
            Ok(()) => {
                ctx.say(format!(
                    "✅ Sent **{points}** points to {}.",
                    crate::core::contact::display_label(&recipient)
                ))
                .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Grants (or with a negative amount, deducts) points to a member (admin).
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn grant(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to grant points to"] user: serenity::User,
        #[description = "Points to grant; negative deducts"] amount: f64,
        #[description = "Reason for the grant"] reason: Option<String>,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let db = &ctx.data().database;

        let points = match ledger::points_from_raw(amount) {
            Ok(points) if points != 0 => points,
            _ => {
                ctx.say("❌ Amount must be a non-zero number of points.")
                    .await?;
                return Ok(());
            }
        };

        let record = match resolve_by_discord(db, user.id.to_string()).await {
            Ok(record) => record,
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                return Ok(());
            }
        };

        let reason_code = reason.as_deref().unwrap_or("admin");
        match ledger::append_transaction(db, record.id, points, reason_code).await {
            Ok(_) => {
                let balance = ledger::get_balance(db, record.id).await?;
                ctx.say(format!(
                    "✅ Granted **{points}** points to {} (new balance: {balance}).",
                    crate::core::contact::display_label(&record)
                ))
                .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Shows the top members by net point total.
    #[poise::command(slash_command, prefix_command)]
    pub async fn leaderboard(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "How many entries to show"] limit: Option<u64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let limit = limit.unwrap_or(ctx.data().settings.leaderboard_limit);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX).min(50);

        let board = ledger::get_leaderboard(db, limit).await?;
        if board.is_empty() {
            ctx.say("The ledger is empty - no points have been awarded yet.")
                .await?;
            return Ok(());
        }

        let mut lines = vec!["**Points Leaderboard**".to_string()];
        for (rank, entry) in board.iter().enumerate() {
            lines.push(format!("{}. {} - {} points", rank + 1, entry.label, entry.total));
        }
        ctx.say(lines.join("\n")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
