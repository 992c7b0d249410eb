//! Guild configuration - per-guild role mapping for command authorization.
//!
//! Rows are keyed by guild id and upserted. Commands fetch the row on every
//! invocation instead of caching it in process state, so a config change
//! takes effect on the next command.

use crate::{
    core::store_call,
    entities::{GuildConfig, guild_config},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Fetches the configuration for a guild, if one has been set.
pub async fn get_guild_config(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<Option<guild_config::Model>> {
    store_call(
        "guild config fetch",
        GuildConfig::find_by_id(guild_id.to_string()).one(db),
    )
    .await
}

/// Creates or replaces the configuration for a guild.
///
/// Passing `None` for a role clears it.
pub async fn upsert_guild_config(
    db: &DatabaseConnection,
    guild_id: &str,
    admin_role_id: Option<String>,
    member_role_id: Option<String>,
) -> Result<guild_config::Model> {
    let now = chrono::Utc::now();
    let existing = get_guild_config(db, guild_id).await?;

    match existing {
        Some(current) => {
            let mut model: guild_config::ActiveModel = current.into();
            model.admin_role_id = Set(admin_role_id);
            model.member_role_id = Set(member_role_id);
            model.updated_at = Set(now);
            store_call("guild config update", model.update(db)).await
        }
        None => {
            let model = guild_config::ActiveModel {
                guild_id: Set(guild_id.to_string()),
                admin_role_id: Set(admin_role_id),
                member_role_id: Set(member_role_id),
                updated_at: Set(now),
            };
            store_call("guild config insert", model.insert(db)).await
        }
    }
}
