//! Event business logic - event creation and attendance recording.
//!
//! A contact checks in to an event at most once. The duplicate check runs
//! inside the same transaction as the insert, and the composite unique index
//! on (`contact_id`, `event_id`) backstops the race the check alone cannot
//! close.

use crate::{
    core::store_call,
    entities::{Contact, Event, EventAttendance, event, event_attendance},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};

/// Creates a new event.
pub async fn create_event(
    db: &DatabaseConnection,
    title: &str,
    date: chrono::DateTime<chrono::Utc>,
) -> Result<event::Model> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Event title cannot be empty".to_string(),
        });
    }

    let model = event::ActiveModel {
        title: Set(title.trim().to_string()),
        date: Set(date),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    store_call("event insert", model.insert(db)).await
}

/// Finds an event by exact title.
pub async fn get_event_by_title(db: &DatabaseConnection, title: &str) -> Result<event::Model> {
    store_call(
        "event lookup",
        Event::find()
            .filter(event::Column::Title.eq(title))
            .one(db),
    )
    .await?
    .ok_or_else(|| Error::EventNotFound {
        title: title.to_string(),
    })
}

/// All events, newest first. Feeds the check-in autocomplete.
pub async fn all_events(db: &DatabaseConnection) -> Result<Vec<event::Model>> {
    store_call(
        "event scan",
        Event::find().order_by_desc(event::Column::Date).all(db),
    )
    .await
}

/// Records that a contact attended an event.
///
/// A second check-in for the same (contact, event) pair is a `Conflict`,
/// whether it is caught by the pre-insert check or by the unique index.
pub async fn record_attendance(
    db: &DatabaseConnection,
    contact_id: i64,
    event_id: i64,
    swag_received: bool,
) -> Result<event_attendance::Model> {
    let txn = store_call("checkin begin", db.begin()).await?;

    store_call("contact fetch", Contact::find_by_id(contact_id).one(&txn))
        .await?
        .ok_or(Error::ContactNotFound)?;
    let event = store_call("event fetch", Event::find_by_id(event_id).one(&txn))
        .await?
        .ok_or_else(|| Error::EventNotFound {
            title: event_id.to_string(),
        })?;

    let already = store_call(
        "attendance check",
        EventAttendance::find()
            .filter(event_attendance::Column::ContactId.eq(contact_id))
            .filter(event_attendance::Column::EventId.eq(event_id))
            .count(&txn),
    )
    .await?;
    if already > 0 {
        return Err(Error::AlreadyCheckedIn {
            contact_id,
            event_id: event.id,
        });
    }

    let model = event_attendance::ActiveModel {
        contact_id: Set(contact_id),
        event_id: Set(event_id),
        swag_received: Set(swag_received),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let attendance = store_call("attendance insert", model.insert(&txn))
        .await
        .map_err(|err| match err {
            Error::Database(db_err)
                if matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                Error::AlreadyCheckedIn {
                    contact_id,
                    event_id,
                }
            }
            other => other,
        })?;

    store_call("checkin commit", txn.commit()).await?;
    Ok(attendance)
}

/// How many contacts checked in to an event.
pub async fn attendance_count(db: &DatabaseConnection, event_id: i64) -> Result<u64> {
    store_call(
        "attendance count",
        EventAttendance::find()
            .filter(event_attendance::Column::EventId.eq(event_id))
            .count(db),
    )
    .await
}
