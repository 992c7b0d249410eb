//! TutorLog entity - One logged tutoring session.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tutor log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tutor_logs")]
pub struct Model {
    /// Unique identifier for the log row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Contact id of the tutor who held the session
    pub tutor_contact_id: i64,
    /// Session type: `"in_person"`, `"online"`, ...
    pub session_type: String,
    /// Free-text name of the person tutored
    pub tutored_user: String,
    /// Session length in hours
    pub hours: f64,
    /// Optional notes about the session
    pub description: Option<String>,
    /// When the session was logged
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between TutorLog and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each log row belongs to one tutor contact
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::TutorContactId",
        to = "super::contact::Column::Id"
    )]
    Contact,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
