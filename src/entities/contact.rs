//! Contact entity - The canonical identity record for a person.
//!
//! A contact carries the institution-issued `uh_id`, an email, name fields,
//! and at most one linked Discord account. `uh_id`, `email`, and `discord_id`
//! are each unique across all contacts; the database-level unique indexes are
//! the final arbiter under concurrent writes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contact database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    /// Unique identifier for the contact
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Institution-issued numeric id; immutable once set
    #[sea_orm(unique)]
    pub uh_id: i64,
    /// Contact email address
    #[sea_orm(unique)]
    pub email: String,
    /// First name (required)
    pub first_name: String,
    /// Last name (optional)
    pub last_name: Option<String>,
    /// Phone number (optional)
    pub phone_number: Option<String>,
    /// Shirt size (optional, e.g. `"S"`, `"M"`, `"L"`, `"XL"`)
    pub shirt_size: Option<String>,
    /// Linked Discord account id; at most one contact per Discord id
    #[sea_orm(unique)]
    pub discord_id: Option<String>,
    /// When the contact record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Contact and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A contact can hold many membership terms
    #[sea_orm(has_many = "super::membership::Entity")]
    Membership,
    /// A contact owns many ledger transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
    /// A contact can attend many events
    #[sea_orm(has_many = "super::event_attendance::Entity")]
    EventAttendance,
}

impl Related<super::membership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Membership.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::event_attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventAttendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
