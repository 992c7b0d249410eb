//! Ledger business logic - signed point movements and derived balances.
//!
//! The ledger is append-only: balances are computed, never stored. A payment
//! between two contacts is exactly one debit row and one credit row written in
//! a single database transaction, with the balance check inside the same
//! transaction, so the debit can never exist without the credit and concurrent
//! payments cannot overdraw a contact.

use crate::{
    core::{contact::display_label, store_call},
    entities::{Contact, Transaction, contact, transaction},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;

/// One ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Contact this row belongs to
    pub contact_id: i64,
    /// Net point total over the whole ledger
    pub total: i64,
    /// Discord mention when linked, else first + last name
    pub label: String,
}

/// Converts raw command input to a whole point value, truncating toward zero.
///
/// Non-finite and out-of-range input is rejected as invalid before the ledger
/// ever sees it.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn points_from_raw(raw: f64) -> Result<i64> {
    if !raw.is_finite() {
        return Err(Error::InvalidAmount { amount: raw });
    }
    let truncated = raw.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(Error::InvalidAmount { amount: raw });
    }
    Ok(truncated as i64)
}

/// Appends one immutable ledger row.
///
/// Zero-value rows are rejected; they would record no movement.
pub async fn append_transaction<C>(
    db: &C,
    contact_id: i64,
    point_value: i64,
    reason_code: &str,
) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    if point_value == 0 {
        return Err(Error::InvalidAmount { amount: 0.0 });
    }

    let model = transaction::ActiveModel {
        contact_id: Set(contact_id),
        point_value: Set(point_value),
        reason_code: Set(reason_code.to_string()),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    store_call("transaction insert", model.insert(db)).await
}

/// Current balance for a contact: backend-aggregated sum of `point_value`.
/// A contact with no rows has balance 0, which is not an error.
pub async fn get_balance<C>(db: &C, contact_id: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let total: Option<Option<i64>> = store_call(
        "balance query",
        Transaction::find()
            .select_only()
            .column_as(transaction::Column::PointValue.sum(), "total")
            .filter(transaction::Column::ContactId.eq(contact_id))
            .into_tuple()
            .one(db),
    )
    .await?;

    Ok(total.flatten().unwrap_or(0))
}

/// Moves `amount` points from one contact to another.
///
/// Both ledger rows are committed atomically: the existence checks, the
/// balance check, the debit, and the credit all run inside one database
/// transaction. Any failure before commit rolls the whole payment back, so
/// an insufficient-funds denial or a backend error leaves the ledger exactly
/// as it was.
#[allow(clippy::cast_precision_loss)]
pub async fn transfer_points(
    db: &DatabaseConnection,
    from_contact: i64,
    to_contact: i64,
    amount: i64,
    reason_code: &str,
) -> Result<()> {
    if amount <= 0 {
        return Err(Error::InvalidAmount {
            amount: amount as f64,
        });
    }
    if from_contact == to_contact {
        return Err(Error::SelfPayment);
    }

    let txn = store_call("transfer begin", db.begin()).await?;

    for id in [from_contact, to_contact] {
        store_call("contact fetch", Contact::find_by_id(id).one(&txn))
            .await?
            .ok_or(Error::ContactNotFound)?;
    }

    let balance = get_balance(&txn, from_contact).await?;
    if balance < amount {
        return Err(Error::InsufficientPoints {
            current: balance,
            required: amount,
        });
    }

    append_transaction(&txn, from_contact, -amount, reason_code).await?;
    append_transaction(&txn, to_contact, amount, reason_code).await?;

    store_call("transfer commit", txn.commit()).await?;
    Ok(())
}

/// Ranks contacts by net ledger total, descending.
///
/// This is a full-ledger scan with an in-memory group-by-sum. Ties keep
/// first-seen ledger order (the sort is stable and rows are scanned in insert
/// order). Acceptable at org scale; revisit if the ledger outgrows it.
pub async fn get_leaderboard(
    db: &DatabaseConnection,
    limit: usize,
) -> Result<Vec<LeaderboardEntry>> {
    let rows = store_call(
        "ledger scan",
        Transaction::find()
            .order_by_asc(transaction::Column::Id)
            .all(db),
    )
    .await?;

    let mut first_seen: Vec<i64> = Vec::new();
    let mut totals: HashMap<i64, i64> = HashMap::new();
    for row in rows {
        if !totals.contains_key(&row.contact_id) {
            first_seen.push(row.contact_id);
        }
        *totals.entry(row.contact_id).or_insert(0) += row.point_value;
    }

    let mut ranked: Vec<(i64, i64)> = first_seen
        .into_iter()
        .map(|id| (id, totals[&id]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    let ids: Vec<i64> = ranked.iter().map(|(id, _)| *id).collect();
    let contacts: HashMap<i64, contact::Model> = store_call(
        "contact lookup",
        Contact::find()
            .filter(contact::Column::Id.is_in(ids))
            .all(db),
    )
    .await?
    .into_iter()
    .map(|c| (c.id, c))
    .collect();

    Ok(ranked
        .into_iter()
        .map(|(contact_id, total)| LeaderboardEntry {
            contact_id,
            total,
            label: contacts
                .get(&contact_id)
                .map_or_else(|| format!("contact {contact_id}"), display_label),
        })
        .collect())
}
