//! Member identity commands - `claim`, `profile`, and `find`.
//!
//! These are the consumers of the resolution layer: claim links the author's
//! Discord account to an existing contact record, profile shows the author
//! their own record, and find is the admin-side lookup.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_has_admin_role},
        core::{contact, ledger, resolve},
        entities::contact::Model as ContactModel,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    async fn profile_text(
        db: &sea_orm::DatabaseConnection,
        record: &ContactModel,
    ) -> Result<String> {
        let balance = ledger::get_balance(db, record.id).await?;
        let active = resolve::is_active_member(db, record.id).await?;
        let latest = resolve::latest_membership(db, record.id).await?;

        let membership_line = match latest {
            Some(row) if active => format!(
                "Active member until {}",
                row.end_date.format("%Y-%m-%d")
            ),
            Some(row) => format!(
                "Not an active member (last term ended {})",
                row.end_date.format("%Y-%m-%d")
            ),
            None => "No membership on record".to_string(),
        };

        Ok(format!(
            "**{}**\nUH ID: {}\nEmail: {}\n{}\nPoints: {}",
            contact::display_label(record),
            record.uh_id,
            record.email,
            membership_line,
            balance
        ))
    }

    /// Links your Discord account to your membership record.
    ///
    /// Both the UH ID and the email must match the record; linking is
    /// first-claim-wins and cannot overwrite an existing link.
    #[poise::command(slash_command, prefix_command)]
    pub async fn claim(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your 7-digit UH ID"] uh_id: i64,
        #[description = "The email on your membership record"] email: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let query = resolve::ContactQuery {
            uh_id: Some(uh_id),
            email: Some(email),
            ..Default::default()
        };
        let record = match resolve::resolve_contact(db, &query).await {
            Ok(record) => record,
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                return Ok(());
            }
        };

        let discord_id = ctx.author().id.to_string();
        match resolve::link_discord_identity(db, record.id, &discord_id).await {
            Ok(_) => {
                ctx.say(format!(
                    "✅ Linked this Discord account to {} {}",
                    record.first_name,
                    record.last_name.as_deref().unwrap_or_default()
                ))
                .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Shows your own record, membership status, and point balance.
    #[poise::command(slash_command, prefix_command)]
    pub async fn profile(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let query = resolve::ContactQuery {
            discord_id: Some(ctx.author().id.to_string()),
            ..Default::default()
        };
        match resolve::resolve_contact(db, &query).await {
            Ok(record) => {
                let text = profile_text(db, &record).await?;
                ctx.say(text).await?;
            }
            Err(err) if matches!(err, Error::ContactNotFound) => {
                ctx.say("❌ No record is linked to this Discord account. Use `/claim` first.")
                    .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Looks up a contact by any combination of filters (admin).
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn find(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Discord user linked to the record"] user: Option<serenity::User>,
        #[description = "UH ID"] uh_id: Option<i64>,
        #[description = "Email"] email: Option<String>,
        #[description = "First name"] first_name: Option<String>,
        #[description = "Last name"] last_name: Option<String>,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let query = resolve::ContactQuery {
            uh_id,
            email,
            discord_id: user.map(|u| u.id.to_string()),
            first_name,
            last_name,
        };

        match resolve::resolve_contact(db, &query).await {
            Ok(record) => {
                let text = profile_text(db, &record).await?;
                ctx.say(text).await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
