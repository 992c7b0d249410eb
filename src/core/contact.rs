//! Contact business logic - creation, updates, and display labels.
//!
//! Inserts and updates validate input at the boundary and classify unique-index
//! violations into `Conflict` errors naming the offending field, so a duplicate
//! uh_id/email/Discord id is always a denial and never a silent overwrite.

use crate::{
    core::store_call,
    entities::{Contact, contact},
    errors::{Error, Result},
};
use sea_orm::{Set, SqlErr, prelude::*};

/// Fields accepted when creating a contact.
#[derive(Debug, Clone)]
pub struct NewContact {
    /// Institution-issued numeric id
    pub uh_id: i64,
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: Option<String>,
    /// Phone number
    pub phone_number: Option<String>,
    /// Shirt size
    pub shirt_size: Option<String>,
}

/// Partial field set for updating a contact in place.
///
/// `uh_id` is immutable once set and deliberately absent here.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    /// New email address
    pub email: Option<String>,
    /// New first name
    pub first_name: Option<String>,
    /// New last name
    pub last_name: Option<String>,
    /// New phone number
    pub phone_number: Option<String>,
    /// New shirt size
    pub shirt_size: Option<String>,
}

/// Creates a new contact record, validating input first.
///
/// The name must be non-empty and the email must look like an address.
/// Duplicate uh_id/email surfaces as [`Error::DuplicateIdentity`].
pub async fn create_contact(db: &DatabaseConnection, new: NewContact) -> Result<contact::Model> {
    if new.first_name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "First name cannot be empty".to_string(),
        });
    }
    if !new.email.contains('@') {
        return Err(Error::InvalidInput {
            message: format!("'{}' is not a valid email address", new.email),
        });
    }

    let model = contact::ActiveModel {
        uh_id: Set(new.uh_id),
        email: Set(new.email.trim().to_string()),
        first_name: Set(new.first_name.trim().to_string()),
        last_name: Set(new.last_name),
        phone_number: Set(new.phone_number),
        shirt_size: Set(new.shirt_size),
        discord_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    store_call("contact insert", model.insert(db))
        .await
        .map_err(classify_unique_violation)
}

/// Patches a contact in place with the provided field subset.
pub async fn update_contact(
    db: &DatabaseConnection,
    contact_id: i64,
    update: ContactUpdate,
) -> Result<contact::Model> {
    let existing = store_call("contact fetch", Contact::find_by_id(contact_id).one(db))
        .await?
        .ok_or(Error::ContactNotFound)?;

    let mut active: contact::ActiveModel = existing.into();
    if let Some(email) = update.email {
        if !email.contains('@') {
            return Err(Error::InvalidInput {
                message: format!("'{email}' is not a valid email address"),
            });
        }
        active.email = Set(email.trim().to_string());
    }
    if let Some(first_name) = update.first_name {
        if first_name.trim().is_empty() {
            return Err(Error::InvalidInput {
                message: "First name cannot be empty".to_string(),
            });
        }
        active.first_name = Set(first_name.trim().to_string());
    }
    if let Some(last_name) = update.last_name {
        active.last_name = Set(Some(last_name));
    }
    if let Some(phone_number) = update.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(shirt_size) = update.shirt_size {
        active.shirt_size = Set(Some(shirt_size));
    }

    store_call("contact update", active.update(db))
        .await
        .map_err(classify_unique_violation)
}

/// Human-readable label for a contact: Discord mention when linked,
/// otherwise first + last name.
#[must_use]
pub fn display_label(contact: &contact::Model) -> String {
    match &contact.discord_id {
        Some(discord_id) => format!("<@{discord_id}>"),
        None => match &contact.last_name {
            Some(last) => format!("{} {last}", contact.first_name),
            None => contact.first_name.clone(),
        },
    }
}

/// Rewrites a database unique-violation into a `Conflict` naming the field.
pub(crate) fn classify_unique_violation(err: Error) -> Error {
    match err {
        Error::Database(db_err) => match db_err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Error::DuplicateIdentity {
                field: field_from_violation(&message),
            },
            _ => Error::Database(db_err),
        },
        other => other,
    }
}

/// Picks the violated column out of the backend's constraint message.
fn field_from_violation(message: &str) -> &'static str {
    if message.contains("uh_id") {
        "uh_id"
    } else if message.contains("email") {
        "email"
    } else if message.contains("discord_id") {
        "discord_id"
    } else {
        "identity"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_utils::{create_test_contact, setup_test_db};

    #[test]
    fn test_field_from_violation() {
        assert_eq!(
            field_from_violation("UNIQUE constraint failed: contacts.uh_id"),
            "uh_id"
        );
        assert_eq!(
            field_from_violation("UNIQUE constraint failed: contacts.email"),
            "email"
        );
        assert_eq!(
            field_from_violation("UNIQUE constraint failed: contacts.discord_id"),
            "discord_id"
        );
        assert_eq!(field_from_violation("something else entirely"), "identity");
    }

    #[test]
    fn test_display_label_prefers_mention() {
        let mut contact = contact::Model {
            id: 1,
            uh_id: 1234567,
            email: "cougar@uh.edu".to_string(),
            first_name: "Shasta".to_string(),
            last_name: Some("Cougar".to_string()),
            phone_number: None,
            shirt_size: None,
            discord_id: Some("99887766".to_string()),
            created_at: chrono::Utc::now(),
        };
        assert_eq!(display_label(&contact), "<@99887766>");

        contact.discord_id = None;
        assert_eq!(display_label(&contact), "Shasta Cougar");

        contact.last_name = None;
        assert_eq!(display_label(&contact), "Shasta");
    }

    #[tokio::test]
    async fn test_create_contact_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_contact(
            &db,
            NewContact {
                uh_id: 1234567,
                email: "not-an-email".to_string(),
                first_name: "Shasta".to_string(),
                last_name: None,
                phone_number: None,
                shirt_size: None,
            },
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert_eq!(err.kind(), ErrorKind::Invalid);
        // The rejection must name the problem, not hide behind a server fault
        assert!(err.user_message().contains("not-an-email"));

        let result = create_contact(
            &db,
            NewContact {
                uh_id: 1234567,
                email: "cougar@uh.edu".to_string(),
                first_name: "   ".to_string(),
                last_name: None,
                phone_number: None,
                shirt_size: None,
            },
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert_eq!(err.kind(), ErrorKind::Invalid);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_contact_duplicate_email_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_contact(&db, 1111111, "same@uh.edu").await?;

        let result = create_contact(
            &db,
            NewContact {
                uh_id: 2222222,
                email: "same@uh.edu".to_string(),
                first_name: "Second".to_string(),
                last_name: None,
                phone_number: None,
                shirt_size: None,
            },
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(matches!(err, Error::DuplicateIdentity { field: "email" }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_contact_duplicate_uh_id_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_contact(&db, 1111111, "first@uh.edu").await?;

        let result = create_contact(
            &db,
            NewContact {
                uh_id: 1111111,
                email: "second@uh.edu".to_string(),
                first_name: "Second".to_string(),
                last_name: None,
                phone_number: None,
                shirt_size: None,
            },
        )
        .await;

        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateIdentity { field: "uh_id" }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_contact_patches_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let contact = create_test_contact(&db, 1111111, "cougar@uh.edu").await?;

        let updated = update_contact(
            &db,
            contact.id,
            ContactUpdate {
                last_name: Some("Cougar".to_string()),
                shirt_size: Some("L".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.last_name.as_deref(), Some("Cougar"));
        assert_eq!(updated.shirt_size.as_deref(), Some("L"));
        // Untouched fields survive
        assert_eq!(updated.email, "cougar@uh.edu");
        assert_eq!(updated.uh_id, 1111111);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_contact_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_contact(&db, 999, ContactUpdate::default()).await;
        assert!(matches!(result.unwrap_err(), Error::ContactNotFound));
        Ok(())
    }
}
