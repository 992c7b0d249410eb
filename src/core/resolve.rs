//! Contact resolution - maps partial identity to exactly one contact.
//!
//! The query struct is strongly typed and validated before any store call is
//! issued: an empty query is rejected outright rather than returning an
//! unbounded result set. Resolution is exact-match, filters ANDed. The
//! active-membership check is existential and strict (`end_date > now`, not
//! greater-or-equal); linking a Discord identity is first-claim-wins and
//! idempotent, with the unique index on `discord_id` deciding genuine races.

use crate::{
    core::store_call,
    entities::{Contact, Membership, contact, membership},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};

/// Identifying information for a contact lookup. All present fields are ANDed.
#[derive(Debug, Clone, Default)]
pub struct ContactQuery {
    /// Institution-issued numeric id
    pub uh_id: Option<i64>,
    /// Email address, exact match
    pub email: Option<String>,
    /// Linked Discord account id
    pub discord_id: Option<String>,
    /// First name, exact match
    pub first_name: Option<String>,
    /// Last name, exact match
    pub last_name: Option<String>,
}

impl ContactQuery {
    /// True when no filter is present. Such a query is always rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uh_id.is_none()
            && self.email.is_none()
            && self.discord_id.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}

/// Finds the unique contact matching `query`.
///
/// Zero filters is [`Error::EmptyQuery`], zero rows is
/// [`Error::ContactNotFound`], and more than one row is
/// [`Error::AmbiguousContact`] - the caller is told to narrow the search
/// rather than being handed an arbitrary row.
pub async fn resolve_contact(
    db: &DatabaseConnection,
    query: &ContactQuery,
) -> Result<contact::Model> {
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }

    let mut find = Contact::find();
    if let Some(uh_id) = query.uh_id {
        find = find.filter(contact::Column::UhId.eq(uh_id));
    }
    if let Some(email) = &query.email {
        find = find.filter(contact::Column::Email.eq(email.clone()));
    }
    if let Some(discord_id) = &query.discord_id {
        find = find.filter(contact::Column::DiscordId.eq(discord_id.clone()));
    }
    if let Some(first_name) = &query.first_name {
        find = find.filter(contact::Column::FirstName.eq(first_name.clone()));
    }
    if let Some(last_name) = &query.last_name {
        find = find.filter(contact::Column::LastName.eq(last_name.clone()));
    }

    let mut matches = store_call("contact lookup", find.all(db)).await?;
    match matches.len() {
        0 => Err(Error::ContactNotFound),
        1 => Ok(matches.remove(0)),
        matched => Err(Error::AmbiguousContact { matched }),
    }
}

/// Whether `contact_id` holds at least one membership still running at `at`.
///
/// The check is strict: a term whose `end_date` equals `at` has already ended.
pub async fn is_active_member_at<C>(db: &C, contact_id: i64, at: DateTime<Utc>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let active = store_call(
        "membership check",
        Membership::find()
            .filter(membership::Column::ContactId.eq(contact_id))
            .filter(membership::Column::EndDate.gt(at))
            .count(db),
    )
    .await?;
    Ok(active > 0)
}

/// [`is_active_member_at`] evaluated at the current instant.
pub async fn is_active_member(db: &DatabaseConnection, contact_id: i64) -> Result<bool> {
    is_active_member_at(db, contact_id, Utc::now()).await
}

/// The most-recently-ending membership row for a contact, for diagnostics.
/// The activity check itself never depends on which row is "latest".
pub async fn latest_membership(
    db: &DatabaseConnection,
    contact_id: i64,
) -> Result<Option<membership::Model>> {
    store_call(
        "membership fetch",
        Membership::find()
            .filter(membership::Column::ContactId.eq(contact_id))
            .order_by_desc(membership::Column::EndDate)
            .one(db),
    )
    .await
}

/// Links a Discord account to a contact, first-claim-wins.
///
/// No-op success when the contact is already linked to the same account;
/// `Conflict` when the contact is linked elsewhere or the account is claimed
/// by another contact. The write happens inside a transaction, and a race
/// that slips past the pre-checks lands on the unique index and is
/// classified to the same `Conflict`.
pub async fn link_discord_identity(
    db: &DatabaseConnection,
    contact_id: i64,
    discord_id: &str,
) -> Result<contact::Model> {
    let txn = store_call("link begin", db.begin()).await?;

    let contact = store_call("contact fetch", Contact::find_by_id(contact_id).one(&txn))
        .await?
        .ok_or(Error::ContactNotFound)?;

    match &contact.discord_id {
        Some(existing) if existing == discord_id => {
            // Already linked to this exact account: idempotent success.
            return Ok(contact);
        }
        Some(_) => return Err(Error::ContactAlreadyLinked { contact_id }),
        None => {}
    }

    if let Some(holder) = store_call(
        "identity check",
        Contact::find()
            .filter(contact::Column::DiscordId.eq(discord_id))
            .one(&txn),
    )
    .await?
    {
        return Err(Error::DiscordIdTaken {
            contact_id: holder.id,
        });
    }

    let mut active: contact::ActiveModel = contact.into();
    active.discord_id = Set(Some(discord_id.to_string()));
    let updated = store_call("identity link", active.update(&txn))
        .await
        .map_err(|err| classify_claim_race(err, contact_id))?;

    store_call("link commit", txn.commit()).await?;
    Ok(updated)
}

/// Rewrites a unique-index violation on `discord_id` into the same `Conflict`
/// the pre-check produces. This is the path taken by a claim that slipped
/// past the pre-check because a competing claim committed in between.
fn classify_claim_race(err: Error, contact_id: i64) -> Error {
    match err {
        Error::Database(db_err)
            if matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
        {
            Error::DiscordIdTaken { contact_id }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::membership::{MembershipTerm, grant_membership};
    use crate::errors::ErrorKind;
    use crate::test_utils::{create_custom_contact, create_test_contact, setup_test_db};
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_resolve_empty_query_rejected() -> Result<()> {
        // No query should ever reach the store; a mock with no results proves it
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = resolve_contact(&db, &ContactQuery::default()).await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::EmptyQuery));
        assert_eq!(err.kind(), ErrorKind::Invalid);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_not_found() -> Result<()> {
        // Zero rows from the store is NotFound, not an error leak
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<contact::Model>::new()])
            .into_connection();

        let result = resolve_contact(
            &db,
            &ContactQuery {
                uh_id: Some(9999999),
                ..Default::default()
            },
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::ContactNotFound));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_by_uh_id_and_email() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;

        let found = resolve_contact(
            &db,
            &ContactQuery {
                uh_id: Some(1234567),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(found.id, contact.id);

        let found = resolve_contact(
            &db,
            &ContactQuery {
                email: Some("cougar@uh.edu".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(found.id, contact.id);

        // ANDed filters: matching uh_id but wrong email finds nothing
        let result = resolve_contact(
            &db,
            &ContactQuery {
                uh_id: Some(1234567),
                email: Some("someone-else@uh.edu".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::ContactNotFound));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_ambiguous_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_contact(&db, 1111111, "a@uh.edu", "Alex", None).await?;
        create_custom_contact(&db, 2222222, "b@uh.edu", "Alex", None).await?;

        let result = resolve_contact(
            &db,
            &ContactQuery {
                first_name: Some("Alex".to_string()),
                ..Default::default()
            },
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::AmbiguousContact { matched: 2 }));
        assert_eq!(err.kind(), ErrorKind::Invalid);
        Ok(())
    }

    #[tokio::test]
    async fn test_active_membership_is_strict_at_boundary() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;
        grant_membership(&db, contact.id, MembershipTerm::Semester, "payment").await?;

        let latest = latest_membership(&db, contact.id).await?.unwrap();

        // Strictly before end_date: active
        assert!(is_active_member_at(&db, contact.id, latest.end_date - Duration::seconds(1)).await?);
        // Exactly at end_date: NOT active
        assert!(!is_active_member_at(&db, contact.id, latest.end_date).await?);
        // After end_date: not active
        assert!(!is_active_member_at(&db, contact.id, latest.end_date + Duration::seconds(1)).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_no_membership_means_inactive() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;
        assert!(!is_active_member(&db, contact.id).await?);
        assert!(latest_membership(&db, contact.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_link_identity_first_claim_wins() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1234567, "cougar@uh.edu").await?;

        let linked = link_discord_identity(&db, contact.id, "discordA").await?;
        assert_eq!(linked.discord_id.as_deref(), Some("discordA"));

        // Re-linking the same account is an idempotent no-op
        let relinked = link_discord_identity(&db, contact.id, "discordA").await?;
        assert_eq!(relinked.discord_id.as_deref(), Some("discordA"));

        // A different account against the same contact is a denial
        let result = link_discord_identity(&db, contact.id, "discordB").await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::ContactAlreadyLinked { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // The stored link is unchanged
        let check = resolve_contact(
            &db,
            &ContactQuery {
                uh_id: Some(1234567),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(check.discord_id.as_deref(), Some("discordA"));
        Ok(())
    }

    #[tokio::test]
    async fn test_link_identity_claimed_by_other_contact() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_contact(&db, 1111111, "first@uh.edu").await?;
        let second = create_test_contact(&db, 2222222, "second@uh.edu").await?;

        link_discord_identity(&db, first.id, "discordA").await?;

        let result = link_discord_identity(&db, second.id, "discordA").await;
        match result.unwrap_err() {
            Error::DiscordIdTaken { contact_id } => assert_eq!(contact_id, first.id),
            other => panic!("expected DiscordIdTaken, got {other:?}"),
        }

        // Second contact remains unlinked
        let check = resolve_contact(
            &db,
            &ContactQuery {
                uh_id: Some(2222222),
                ..Default::default()
            },
        )
        .await?;
        assert!(check.discord_id.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_link_identity_concurrent_claims_single_winner() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_contact(&db, 1111111, "first@uh.edu").await?;
        let second = create_test_contact(&db, 2222222, "second@uh.edu").await?;

        // Two contacts claim the same Discord account at the same time
        let (a, b) = tokio::join!(
            link_discord_identity(&db, first.id, "discordA"),
            link_discord_identity(&db, second.id, "discordA"),
        );

        let (winner, loser) = match (a, b) {
            (Ok(model), Err(err)) | (Err(err), Ok(model)) => (model, err),
            other => panic!("expected exactly one claim to win, got {other:?}"),
        };
        assert_eq!(winner.discord_id.as_deref(), Some("discordA"));
        assert!(matches!(loser, Error::DiscordIdTaken { .. }));
        assert_eq!(loser.kind(), ErrorKind::Conflict);

        // Exactly one stored link exists
        let holder = resolve_contact(
            &db,
            &ContactQuery {
                discord_id: Some("discordA".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(holder.id, winner.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_lost_claim_race_reads_as_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_contact(&db, 1111111, "first@uh.edu").await?;
        let second = create_test_contact(&db, 2222222, "second@uh.edu").await?;
        let second_id = second.id;

        link_discord_identity(&db, first.id, "discordA").await?;

        // Drive the write directly, the way a claim that slipped past the
        // pre-check would, and feed the genuine index violation through the
        // classifier
        let mut active: contact::ActiveModel = second.into();
        active.discord_id = Set(Some("discordA".to_string()));
        let db_err = active.update(&db).await.unwrap_err();

        let err = classify_claim_race(Error::from(db_err), second_id);
        match err {
            Error::DiscordIdTaken { contact_id } => assert_eq!(contact_id, second_id),
            other => panic!("expected DiscordIdTaken, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_link_identity_contact_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = link_discord_identity(&db, 999, "discordA").await;
        assert!(matches!(result.unwrap_err(), Error::ContactNotFound));
        Ok(())
    }
}
