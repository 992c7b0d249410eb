//! Event commands - `createevent` and `checkin` (admin).

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_has_admin_role, handlers::autocomplete},
        core::{event, resolve},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Creates a new event (admin).
    ///
    /// The date is `YYYY-MM-DD`; omitted means today.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn createevent(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Event title"] title: String,
        #[description = "Event date (YYYY-MM-DD)"] date: Option<String>,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let when = match date {
            Some(raw) => match chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(d) => d.and_time(chrono::NaiveTime::MIN).and_utc(),
                Err(_) => {
                    ctx.say(format!("❌ '{raw}' is not a valid date; use YYYY-MM-DD."))
                        .await?;
                    return Ok(());
                }
            },
            None => chrono::Utc::now(),
        };

        match event::create_event(&ctx.data().database, &title, when).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Event '{}' created for {}.",
                    created.title,
                    created.date.format("%Y-%m-%d")
                ))
                .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Checks a member in to an event (admin).
    ///
    /// Each member can check in to an event at most once.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn checkin(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Event title"]
        #[autocomplete = "autocomplete::autocomplete_event_title"]
        event_title: String,
        #[description = "Member to check in"] user: serenity::User,
        #[description = "Whether swag was handed out"] swag: Option<bool>,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let db = &ctx.data().database;

        let found = event::get_event_by_title(db, &event_title).await;
        let target = match found {
            Ok(target) => target,
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                return Ok(());
            }
        };

        let query = resolve::ContactQuery {
            discord_id: Some(user.id.to_string()),
            ..Default::default()
        };
        let record = match resolve::resolve_contact(db, &query).await {
            Ok(record) => record,
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                return Ok(());
            }
        };

        match event::record_attendance(db, record.id, target.id, swag.unwrap_or(false)).await {
            Ok(_) => {
                let count = event::attendance_count(db, target.id).await?;
                ctx.say(format!(
                    "✅ Checked {} in to '{}' ({count} attendees so far).",
                    crate::core::contact::display_label(&record),
                    target.title
                ))
                .await?;
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
