//! Tutor business logic - session logging and per-window stats.
//!
//! Stats windows are the current week (Monday 00:00 UTC) and the current
//! semester (most recent Jan 1 / Jul 1).

use crate::{
    core::store_call,
    entities::{Contact, TutorLog, tutor_log},
    errors::{Error, Result},
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Aggregated tutoring activity over a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TutorStats {
    /// Number of sessions logged
    pub sessions: usize,
    /// Total hours across those sessions
    pub hours: f64,
}

/// Logs one tutoring session.
///
/// Hours must be finite and positive; the tutored person is free text.
pub async fn log_session(
    db: &DatabaseConnection,
    tutor_contact_id: i64,
    session_type: &str,
    tutored_user: &str,
    hours: f64,
    description: Option<String>,
) -> Result<tutor_log::Model> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(Error::InvalidHours { hours });
    }
    if tutored_user.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Tutored student name cannot be empty".to_string(),
        });
    }

    store_call(
        "contact fetch",
        Contact::find_by_id(tutor_contact_id).one(db),
    )
    .await?
    .ok_or(Error::ContactNotFound)?;

    let model = tutor_log::ActiveModel {
        tutor_contact_id: Set(tutor_contact_id),
        session_type: Set(session_type.to_string()),
        tutored_user: Set(tutored_user.trim().to_string()),
        hours: Set(hours),
        description: Set(description),
        timestamp: Set(Utc::now()),
        ..Default::default()
    };
    store_call("tutor log insert", model.insert(db)).await
}

/// Session count and summed hours for a tutor since `since`.
pub async fn stats_since(
    db: &DatabaseConnection,
    tutor_contact_id: i64,
    since: DateTime<Utc>,
) -> Result<TutorStats> {
    let rows = store_call(
        "tutor log scan",
        TutorLog::find()
            .filter(tutor_log::Column::TutorContactId.eq(tutor_contact_id))
            .filter(tutor_log::Column::Timestamp.gte(since))
            .order_by_desc(tutor_log::Column::Timestamp)
            .all(db),
    )
    .await?;

    Ok(TutorStats {
        sessions: rows.len(),
        hours: rows.iter().map(|r| r.hours).sum(),
    })
}

/// Most recent Monday 00:00 UTC at or before `at`.
pub fn week_start(at: DateTime<Utc>) -> DateTime<Utc> {
    let days_back = i64::from(at.weekday().num_days_from_monday());
    let monday = at.date_naive() - Duration::days(days_back);
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Most recent semester boundary (Jan 1 / Jul 1 UTC) at or before `at`.
pub fn semester_start(at: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let month = if at.month() >= 7 { 7 } else { 1 };
    NaiveDate::from_ymd_opt(at.year(), month, 1)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| Error::Config {
            message: format!("invalid semester start {}-{month:02}", at.year()),
        })
}
