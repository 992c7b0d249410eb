//! Membership term commands - `grantmembership` and `cancelmembership` (admin).

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, author_has_admin_role},
        core::{membership, resolve},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Term length choices exposed to Discord.
    #[derive(Debug, poise::ChoiceParameter)]
    pub enum TermChoice {
        #[name = "semester"]
        Semester,
        #[name = "year"]
        Year,
    }

    impl From<TermChoice> for membership::MembershipTerm {
        fn from(choice: TermChoice) -> Self {
            match choice {
                TermChoice::Semester => membership::MembershipTerm::Semester,
                TermChoice::Year => membership::MembershipTerm::Year,
            }
        }
    }

    async fn resolve_member(
        ctx: &poise::Context<'_, BotData, Error>,
        user: &serenity::User,
    ) -> Result<Option<crate::entities::contact::Model>> {
        let query = resolve::ContactQuery {
            discord_id: Some(user.id.to_string()),
            ..Default::default()
        };
        match resolve::resolve_contact(&ctx.data().database, &query).await {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
                Ok(None)
            }
        }
    }

    /// Grants a membership term to a member (admin).
    ///
    /// A semester runs to the next Jan 1 / Jul 1 boundary; a year runs one
    /// boundary further. Overlapping an active term is refused.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn grantmembership(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to grant a term to"] user: serenity::User,
        #[description = "Term length"] term: TermChoice,
        #[description = "Reason (payment, scholarship, ...)"] reason: Option<String>,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let Some(record) = resolve_member(&ctx, &user).await? else {
            return Ok(());
        };

        let reason_code = reason.as_deref().unwrap_or("payment");
        match membership::grant_membership(
            &ctx.data().database,
            record.id,
            term.into(),
            reason_code,
        )
        .await
        {
            Ok(granted) => {
                ctx.say(format!(
                    "✅ Membership granted to {} until {}.",
                    crate::core::contact::display_label(&record),
                    granted.end_date.format("%Y-%m-%d")
                ))
                .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Cancels a member's active membership early (admin).
    ///
    /// Truncates the term to now; history is kept and the cancellation is
    /// recorded explicitly.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn cancelmembership(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member whose membership to cancel"] user: serenity::User,
    ) -> Result<()> {
        if !author_has_admin_role(&ctx).await? {
            ctx.say("❌ You need the configured admin role to use this command.")
                .await?;
            return Ok(());
        }

        let Some(record) = resolve_member(&ctx, &user).await? else {
            return Ok(());
        };

        match membership::cancel_membership(&ctx.data().database, record.id).await {
            Ok(cancelled) => {
                ctx.say(format!(
                    "✅ Membership for {} cancelled (term started {}).",
                    crate::core::contact::display_label(&record),
                    cancelled.start_date.format("%Y-%m-%d")
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
