//! Transaction entity - One signed point movement in the append-only ledger.
//!
//! A contact's balance is always the sum of its `point_value` column, never a
//! stored number. Rows are immutable: nothing in the application updates or
//! deletes a transaction once written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Contact whose balance this movement affects
    pub contact_id: i64,
    /// Signed point amount; negative is a debit
    pub point_value: i64,
    /// Why the points moved: `"payment"`, `"attendance"`, `"admin"`, ...
    pub reason_code: String,
    /// When the movement was recorded
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one contact
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
