//! EventAttendance entity - Links a contact to an event at most once.
//!
//! Uniqueness of (`contact_id`, `event_id`) is enforced by a composite unique
//! index created alongside the tables, so the pre-insert duplicate check
//! cannot be raced past.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event attendance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_attendance")]
pub struct Model {
    /// Unique identifier for the attendance row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Contact who checked in
    pub contact_id: i64,
    /// Event checked in to
    pub event_id: i64,
    /// Whether swag was handed out at check-in
    pub swag_received: bool,
    /// When the check-in happened
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between EventAttendance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attendance row belongs to one contact
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id"
    )]
    Contact,
    /// Each attendance row belongs to one event
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
