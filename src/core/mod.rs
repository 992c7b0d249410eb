//! Core business logic - framework-agnostic operations over the backing store.
//!
//! Every public function here returns [`crate::errors::Result`]; the bot layer
//! only formats. Multi-row writes run inside database transactions so a crash
//! or error mid-operation leaves no partial state, and every outbound store
//! call carries a bounded timeout so a stalled backend surfaces as
//! `Unavailable` instead of hanging the command (or masquerading as
//! "not found").

/// Contact creation, updates, and display labels
pub mod contact;
/// Event creation and attendance recording
pub mod event;
/// Guild configuration fetch/upsert
pub mod guild;
/// Points ledger: append, balance, transfer, leaderboard
pub mod ledger;
/// Membership grant/cancel flows and semester date math
pub mod membership;
/// Contact resolution and active-membership checks
pub mod resolve;
/// Tutor session logging and stats
pub mod tutor;

use crate::errors::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Upper bound on any single store round-trip.
pub(crate) const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Awaits one store call under [`STORE_TIMEOUT`].
///
/// A timeout becomes [`Error::Unavailable`] tagged with `operation` for the
/// logs; database errors pass through the usual `DbErr` conversion.
pub(crate) async fn store_call<T, F>(operation: &'static str, query: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sea_orm::DbErr>>,
{
    match tokio::time::timeout(STORE_TIMEOUT, query).await {
        Ok(result) => result.map_err(Error::from),
        Err(_elapsed) => Err(Error::Unavailable { operation }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::ErrorKind;

    #[tokio::test]
    async fn test_store_call_passes_through_ok() {
        let result = store_call("noop", async { Ok::<_, sea_orm::DbErr>(7) }).await;
        assert_eq!(result.ok(), Some(7));
    }

    #[tokio::test]
    async fn test_store_call_maps_db_error() {
        let result = store_call("boom", async {
            Err::<(), _>(sea_orm::DbErr::Custom("boom".to_string()))
        })
        .await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Internal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_call_timeout_is_unavailable() {
        // Paused time lets the runtime skip straight to the deadline instead
        // of waiting out STORE_TIMEOUT in real time
        let result = store_call(
            "stalled query",
            std::future::pending::<std::result::Result<i32, sea_orm::DbErr>>(),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            Error::Unavailable {
                operation: "stalled query"
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }
}
