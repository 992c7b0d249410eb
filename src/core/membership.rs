//! Membership business logic - grant and cancel flows plus semester date math.
//!
//! Semester boundaries fall on Jan 1 and Jul 1 (UTC). A semester term runs to
//! the next boundary strictly after its start; a year term runs one boundary
//! further. Granting refuses to overlap an existing active term. Cancelling
//! truncates the latest-ending active term to now and records `cancelled_at`
//! explicitly - the cancelled/expired distinction is stored, never
//! reconstructed from date patterns.

use crate::{
    core::{resolve::is_active_member_at, store_call},
    entities::{Contact, Membership, membership},
    errors::{Error, Result},
};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// How long a granted membership runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipTerm {
    /// Until the next semester boundary
    Semester,
    /// Until the boundary after next
    Year,
}

fn boundary(year: i32, month: u32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| Error::Config {
            message: format!("invalid semester boundary {year}-{month:02}"),
        })
}

/// The first semester boundary (Jan 1 / Jul 1 UTC) strictly after `at`.
pub fn semester_boundary_after(at: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let jul = boundary(at.year(), 7)?;
    if at < jul {
        Ok(jul)
    } else {
        boundary(at.year() + 1, 1)
    }
}

/// End date for a term starting at `start`: the next boundary for a semester,
/// the one after for a year.
pub fn membership_end_date(start: DateTime<Utc>, term: MembershipTerm) -> Result<DateTime<Utc>> {
    let first = semester_boundary_after(start)?;
    match term {
        MembershipTerm::Semester => Ok(first),
        MembershipTerm::Year => semester_boundary_after(first),
    }
}

/// Grants a membership term to a contact.
///
/// Starts now, ends at the computed boundary. A contact that already holds an
/// active term is refused with `Conflict`; overlapping grants are a policy
/// violation, not history.
pub async fn grant_membership(
    db: &DatabaseConnection,
    contact_id: i64,
    term: MembershipTerm,
    reason_code: &str,
) -> Result<membership::Model> {
    let now = Utc::now();
    let end_date = membership_end_date(now, term)?;

    let txn = store_call("grant begin", db.begin()).await?;

    store_call("contact fetch", Contact::find_by_id(contact_id).one(&txn))
        .await?
        .ok_or(Error::ContactNotFound)?;

    if is_active_member_at(&txn, contact_id, now).await? {
        return Err(Error::MembershipAlreadyActive { contact_id });
    }

    let model = membership::ActiveModel {
        contact_id: Set(contact_id),
        start_date: Set(now),
        end_date: Set(end_date),
        reason_code: Set(reason_code.to_string()),
        cancelled_at: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let granted = store_call("membership insert", model.insert(&txn)).await?;

    store_call("grant commit", txn.commit()).await?;
    Ok(granted)
}

/// Cancels a contact's active membership early.
///
/// The latest-ending active term gets `end_date = now` and `cancelled_at =
/// now`; history rows are never deleted. No active term is `NotFound`.
pub async fn cancel_membership(
    db: &DatabaseConnection,
    contact_id: i64,
) -> Result<membership::Model> {
    let now = Utc::now();
    let txn = store_call("cancel begin", db.begin()).await?;

    let active = store_call(
        "membership fetch",
        Membership::find()
            .filter(membership::Column::ContactId.eq(contact_id))
            .filter(membership::Column::EndDate.gt(now))
            .order_by_desc(membership::Column::EndDate)
            .one(&txn),
    )
    .await?
    .ok_or(Error::NoActiveMembership { contact_id })?;

    let mut model: membership::ActiveModel = active.into();
    model.end_date = Set(now);
    model.cancelled_at = Set(Some(now));
    let cancelled = store_call("membership update", model.update(&txn)).await?;

    store_call("cancel commit", txn.commit()).await?;
    Ok(cancelled)
}

/// All membership terms for a contact, most recently ending first.
pub async fn membership_history(
    db: &DatabaseConnection,
    contact_id: i64,
) -> Result<Vec<membership::Model>> {
    store_call(
        "membership history",
        Membership::find()
            .filter(membership::Column::ContactId.eq(contact_id))
            .order_by_desc(membership::Column::EndDate)
            .all(db),
    )
    .await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::resolve::is_active_member;
    use crate::entities::membership::MembershipStatus;
    use crate::errors::ErrorKind;
    use crate::test_utils::{create_test_contact, setup_test_db};
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_semester_boundary_after() -> Result<()> {
        // Spring date rolls to Jul 1
        assert_eq!(semester_boundary_after(utc(2025, 3, 15))?, boundary(2025, 7)?);
        // Fall date rolls to next Jan 1
        assert_eq!(semester_boundary_after(utc(2025, 9, 1))?, boundary(2026, 1)?);
        // Exactly on Jul 1 midnight: strictly after, so next Jan 1
        let jul1 = boundary(2025, 7)?;
        assert_eq!(semester_boundary_after(jul1)?, boundary(2026, 1)?);
        // Just before Jul 1: still Jul 1
        assert_eq!(
            semester_boundary_after(jul1 - Duration::seconds(1))?,
            jul1
        );
        Ok(())
    }

    #[test]
    fn test_membership_end_date_terms() -> Result<()> {
        let start = utc(2025, 3, 15);
        assert_eq!(
            membership_end_date(start, MembershipTerm::Semester)?,
            boundary(2025, 7)?
        );
        assert_eq!(
            membership_end_date(start, MembershipTerm::Year)?,
            boundary(2026, 1)?
        );

        let fall = utc(2025, 10, 1);
        assert_eq!(
            membership_end_date(fall, MembershipTerm::Year)?,
            boundary(2026, 7)?
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_grant_membership_activates_contact() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;

        assert!(!is_active_member(&db, contact.id).await?);
        let granted = grant_membership(&db, contact.id, MembershipTerm::Semester, "payment").await?;
        assert!(is_active_member(&db, contact.id).await?);

        assert_eq!(granted.contact_id, contact.id);
        assert_eq!(granted.reason_code, "payment");
        assert!(granted.cancelled_at.is_none());
        assert!(granted.end_date > granted.start_date);
        Ok(())
    }

    #[tokio::test]
    async fn test_grant_rejects_overlapping_membership() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;

        grant_membership(&db, contact.id, MembershipTerm::Semester, "payment").await?;
        let result = grant_membership(&db, contact.id, MembershipTerm::Year, "scholarship").await;

        let err = result.unwrap_err();
        assert!(matches!(err, Error::MembershipAlreadyActive { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Only one row was written
        assert_eq!(membership_history(&db, contact.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_grant_unknown_contact() -> Result<()> {
        let db = setup_test_db().await?;
        let result = grant_membership(&db, 999, MembershipTerm::Semester, "payment").await;
        assert!(matches!(result.unwrap_err(), Error::ContactNotFound));
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_membership_truncates_and_marks() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;
        grant_membership(&db, contact.id, MembershipTerm::Year, "payment").await?;

        let cancelled = cancel_membership(&db, contact.id).await?;
        assert!(cancelled.cancelled_at.is_some());
        assert!(cancelled.end_date <= Utc::now());
        assert_eq!(cancelled.status_at(Utc::now()), MembershipStatus::Cancelled);

        // The contact is no longer active, but history survives
        assert!(!is_active_member(&db, contact.id).await?);
        assert_eq!(membership_history(&db, contact.id).await?.len(), 1);

        // And can be granted a fresh term afterwards
        grant_membership(&db, contact.id, MembershipTerm::Semester, "payment").await?;
        assert!(is_active_member(&db, contact.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_without_active_membership() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;

        let result = cancel_membership(&db, contact.id).await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::NoActiveMembership { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[test]
    fn test_status_at_transitions() {
        let row = membership::Model {
            id: 1,
            contact_id: 1,
            start_date: utc(2025, 2, 1),
            end_date: utc(2025, 7, 1),
            reason_code: "payment".to_string(),
            cancelled_at: None,
            created_at: utc(2025, 2, 1),
        };

        assert_eq!(row.status_at(utc(2025, 1, 15)), MembershipStatus::Pending);
        assert_eq!(row.status_at(utc(2025, 4, 1)), MembershipStatus::Active);
        assert_eq!(row.status_at(utc(2025, 8, 1)), MembershipStatus::Expired);
        // end_date itself is already Expired (strict comparison)
        assert_eq!(row.status_at(row.end_date), MembershipStatus::Expired);

        let cancelled = membership::Model {
            cancelled_at: Some(utc(2025, 3, 1)),
            end_date: utc(2025, 3, 1),
            ..row
        };
        assert_eq!(
            cancelled.status_at(utc(2025, 4, 1)),
            MembershipStatus::Cancelled
        );
    }
}
