//! General Discord commands - ping and help.
//! Simple commands that don't require any database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**CougarCS Bot Help**\n\
        Here is a summary of all available commands.\n\n\
        **Member Commands**\n\
        • `/claim <uh_id> <email>` - Link your Discord account to your membership record.\n\
        • `/profile` - Show your record, membership status, and point balance.\n\
        • `/balance` - Show your current point balance.\n\
        • `/pay <user> <amount>` - Send points to another member.\n\
        • `/leaderboard [limit]` - Top members by points.\n\
        • `/tutorlog <type> <student> <hours> [notes]` - Log a tutoring session.\n\
        • `/tutorstats [window]` - Your tutoring stats for the week or semester.\n\n\
        **Admin Commands**\n\
        • `/find [user] [uh_id] [email] [first] [last]` - Look up a contact.\n\
        • `/grant <user> <amount> [reason]` - Grant (or deduct) points.\n\
        • `/grantmembership <user> <term> [reason]` - Grant a membership term.\n\
        • `/cancelmembership <user>` - Cancel an active membership early.\n\
        • `/createevent <title> [date]` - Create an event.\n\
        • `/checkin <event> <user> [swag]` - Check a member in to an event.\n\
        • `/addcontact <uh_id> <email> <first> [last] [phone] [shirt]` - Insert a contact record.\n\
        • `/updatecontact <uh_id> [fields...]` - Update a contact record in place.\n\
        • `/setconfig [admin_role] [member_role]` - Configure guild roles.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
