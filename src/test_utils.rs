//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases and creating test
//! entities with sensible defaults.

use crate::{
    core::{contact, event},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test contact with sensible defaults.
///
/// # Defaults
/// * `first_name`: "Test"
/// * `last_name`: None
/// * no phone, shirt size, or Discord link
pub async fn create_test_contact(
    db: &DatabaseConnection,
    uh_id: i64,
    email: &str,
) -> Result<entities::contact::Model> {
    contact::create_contact(
        db,
        contact::NewContact {
            uh_id,
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: None,
            phone_number: None,
            shirt_size: None,
        },
    )
    .await
}

/// Creates a test contact with a custom name.
pub async fn create_custom_contact(
    db: &DatabaseConnection,
    uh_id: i64,
    email: &str,
    first_name: &str,
    last_name: Option<&str>,
) -> Result<entities::contact::Model> {
    contact::create_contact(
        db,
        contact::NewContact {
            uh_id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.map(ToString::to_string),
            phone_number: None,
            shirt_size: None,
        },
    )
    .await
}

/// Creates a test event dated now.
pub async fn create_test_event(
    db: &DatabaseConnection,
    title: &str,
) -> Result<entities::event::Model> {
    event::create_event(db, title, chrono::Utc::now()).await
}
