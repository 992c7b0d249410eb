//! Membership entity - A time-bounded grant of active status to a contact.
//!
//! A contact is an active member at instant T iff at least one of its rows has
//! `end_date > T` (strictly). Cancellation is a stored fact (`cancelled_at`),
//! never inferred from whether `end_date` lands on a semester boundary.
//! Rows are history; cancelling truncates `end_date` but deletes nothing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "memberships")]
pub struct Model {
    /// Unique identifier for the membership term
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Contact this term belongs to
    pub contact_id: i64,
    /// When the term begins
    pub start_date: DateTimeUtc,
    /// When the term ends; strictly-greater-than-now means active
    pub end_date: DateTimeUtc,
    /// Why the term was granted: `"payment"`, `"scholarship"`, ...
    pub reason_code: String,
    /// Set when and only when the term was cancelled early
    pub cancelled_at: Option<DateTimeUtc>,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Lifecycle position of a membership term at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipStatus {
    /// Not yet started
    Pending,
    /// `start_date <= now < end_date`
    Active,
    /// Reached `end_date` naturally
    Expired,
    /// Truncated early by an operator
    Cancelled,
}

impl Model {
    /// Lifecycle status of this term at `at`, derived from stored facts only.
    #[must_use]
    pub fn status_at(&self, at: DateTimeUtc) -> MembershipStatus {
        if self.cancelled_at.is_some() {
            MembershipStatus::Cancelled
        } else if at < self.start_date {
            MembershipStatus::Pending
        } else if at < self.end_date {
            MembershipStatus::Active
        } else {
            MembershipStatus::Expired
        }
    }
}

/// Defines relationships between Membership and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each membership term belongs to one contact
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
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
