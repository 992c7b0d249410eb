//! GuildConfig entity - Per-guild role configuration for command authorization.
//!
//! Keyed by Discord guild id and upserted. Commands fetch this row on every
//! invocation; it is never cached in process-wide state.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Guild configuration database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guild_configs")]
pub struct Model {
    /// Discord guild id this configuration applies to
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    /// Role allowed to run admin commands, in addition to Manage Guild
    pub admin_role_id: Option<String>,
    /// Role granted to active members
    pub member_role_id: Option<String>,
    /// When the row was last written
    pub updated_at: DateTimeUtc,
}

/// GuildConfig has no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
