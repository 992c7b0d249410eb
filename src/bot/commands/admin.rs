//! Admin commands - `setconfig`, `addcontact`, and `updatecontact`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_has_admin_role, handlers::autocomplete},
        core::{contact, guild, resolve},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Sets the guild's role configuration (admin).
    ///
    /// Omitting a role clears it. Requires Manage Guild; this command is the
    /// one admin command not additionally gated by the configured admin role,
    /// since it is how that role gets configured in the first place.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn setconfig(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Role allowed to run admin commands"] admin_role: Option<serenity::Role>,
        #[description = "Role granted to active members"] member_role: Option<serenity::Role>,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("❌ This command only works inside a guild.").await?;
            return Ok(());
        };

        let config = guild::upsert_guild_config(
            &ctx.data().database,
            &guild_id.to_string(),
            admin_role.map(|r| r.id.to_string()),
            member_role.map(|r| r.id.to_string()),
        )
        .await?;

        let describe = |role: &Option<String>| match role {
            Some(id) => format!("<@&{id}>"),
            None => "not set".to_string(),
        };
        ctx.say(format!(
            "✅ Guild configuration updated.\nAdmin role: {}\nMember role: {}",
            describe(&config.admin_role_id),
            describe(&config.member_role_id)
        ))
        .await?;
        Ok(())
    }

    /// Inserts a new contact record (admin).
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn addcontact(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "UH id number"] uh_id: i64,
        #[description = "Email address"] email: String,
        #[description = "First name"] first_name: String,
        #[description = "Last name"] last_name: Option<String>,
        #[description = "Phone number"] phone_number: Option<String>,
        #[description = "Shirt size"]
        #[autocomplete = "autocomplete::autocomplete_shirt_size"]
        shirt_size: Option<String>,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let new = contact::NewContact {
            uh_id,
            email,
            first_name,
            last_name,
            phone_number,
            shirt_size,
        };
        match contact::create_contact(&ctx.data().database, new).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Contact created for {} (id {}).",
                    contact::display_label(&created),
                    created.id
                ))
                .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Updates an existing contact in place, located by UH id (admin).
    ///
    /// Only the supplied fields change; the UH id itself is immutable.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn updatecontact(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "UH id of the contact to update"] uh_id: i64,
        #[description = "New email address"] email: Option<String>,
        #[description = "New first name"] first_name: Option<String>,
        #[description = "New last name"] last_name: Option<String>,
        #[description = "New phone number"] phone_number: Option<String>,
        #[description = "New shirt size"]
        #[autocomplete = "autocomplete::autocomplete_shirt_size"]
        shirt_size: Option<String>,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let record = match resolve::resolve_contact(
            db,
            &resolve::ContactQuery {
                uh_id: Some(uh_id),
                ..Default::default()
            },
        )
        .await
        {
            Ok(record) => record,
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                return Ok(());
            }
        };

        let update = contact::ContactUpdate {
            email,
            first_name,
            last_name,
            phone_number,
            shirt_size,
        };
        match contact::update_contact(db, record.id, update).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Contact {} updated.",
                    contact::display_label(&updated)
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
