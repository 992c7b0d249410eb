//! Tutor commands - `tutorlog` and `tutorstats`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{resolve, tutor},
        errors::{Error, Result},
    };

    /// Session type choices exposed to Discord.
    #[derive(Debug, poise::ChoiceParameter)]
    pub enum SessionTypeChoice {
        #[name = "in_person"]
        InPerson,
        #[name = "online"]
        Online,
    }

    impl SessionTypeChoice {
        const fn as_str(&self) -> &'static str {
            match self {
                Self::InPerson => "in_person",
                Self::Online => "online",
            }
        }
    }

    /// Stats window choices exposed to Discord.
    #[derive(Debug, poise::ChoiceParameter)]
    pub enum StatsWindowChoice {
        #[name = "week"]
        Week,
        #[name = "semester"]
        Semester,
    }

    /// Logs a tutoring session under your record.
    #[poise::command(slash_command, prefix_command)]
    pub async fn tutorlog(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Session type"] session_type: SessionTypeChoice,
        #[description = "Name of the student tutored"] student: String,
        #[description = "Session length in hours"] hours: f64,
        #[description = "Optional notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let query = resolve::ContactQuery {
            discord_id: Some(ctx.author().id.to_string()),
            ..Default::default()
        };
        let record = match resolve::resolve_contact(db, &query).await {
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

        match tutor::log_session(db, record.id, session_type.as_str(), &student, hours, notes)
            .await
        {
            Ok(logged) => {
                ctx.say(format!(
                    "✅ Logged a {:.1}h {} session with {}.",
                    logged.hours,
                    logged.session_type.replace('_', " "),
                    logged.tutored_user
                ))
                .await?;
            }
            Err(err) => {
                ctx.say(format!("❌ {}", err.user_message())).await?;
            }
        }
        Ok(())
    }

    /// Shows your tutoring stats for the current week or semester.
    #[poise::command(slash_command, prefix_command)]
    pub async fn tutorstats(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Stats window"] window: Option<StatsWindowChoice>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let query = resolve::ContactQuery {
            discord_id: Some(ctx.author().id.to_string()),
            ..Default::default()
        };
        let record = match resolve::resolve_contact(db, &query).await {
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

        let now = chrono::Utc::now();
        let (since, label) = match window.unwrap_or(StatsWindowChoice::Week) {
            StatsWindowChoice::Week => (tutor::week_start(now), "this week"),
            StatsWindowChoice::Semester => (tutor::semester_start(now)?, "this semester"),
        };

        let stats = tutor::stats_since(db, record.id, since).await?;
        ctx.say(format!(
            "You logged **{}** sessions ({:.1} hours) {label}.",
            stats.sessions, stats.hours
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
