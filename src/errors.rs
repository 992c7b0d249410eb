//! Unified error type for the bot.
//!
//! Every core operation returns [`Result`]; no failure crosses the core
//! boundary as a panic. [`Error::kind`] classifies each variant into the
//! four caller-facing categories (invalid input, not found, conflict,
//! unavailable) plus an internal bucket, and [`Error::user_message`] produces
//! phrasing safe to echo back to Discord without leaking backend details.

use sea_orm::DbErr;
use thiserror::Error;

/// All failure modes surfaced by the core and bot layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("at least one search filter is required")]
    EmptyQuery,

    #[error("{matched} contacts matched; add more filters")]
    AmbiguousContact { matched: usize },

    #[error("invalid point amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("invalid hours value: {hours}")]
    InvalidHours { hours: f64 },

    #[error("a contact cannot pay points to itself")]
    SelfPayment,

    #[error("no contact matched the given filters")]
    ContactNotFound,

    #[error("contact {contact_id} has no active membership")]
    NoActiveMembership { contact_id: i64 },

    #[error("no event named '{title}' exists")]
    EventNotFound { title: String },

    #[error("{field} is already in use by another contact")]
    DuplicateIdentity { field: &'static str },

    #[error("contact {contact_id} is already linked to a different Discord account")]
    ContactAlreadyLinked { contact_id: i64 },

    #[error("that Discord account is already linked to contact {contact_id}")]
    DiscordIdTaken { contact_id: i64 },

    #[error("contact {contact_id} already has an active membership")]
    MembershipAlreadyActive { contact_id: i64 },

    #[error("contact {contact_id} is already checked in to event {event_id}")]
    AlreadyCheckedIn { contact_id: i64, event_id: i64 },

    #[error("insufficient points: balance is {current}, need {required}")]
    InsufficientPoints { current: i64, required: i64 },

    #[error("storage backend unavailable during {operation}")]
    Unavailable { operation: &'static str },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::Framework(Box::new(value))
    }
}

/// Caller-facing failure categories.
///
/// Command handlers decide phrasing from the category; the core's job is only
/// to classify correctly. `Unavailable` is deliberately distinct from
/// `NotFound`: a timed-out store call must never read as "no such contact".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing caller input, rejected before any query.
    Invalid,
    /// Resolution produced zero rows.
    NotFound,
    /// A uniqueness or business-rule violation.
    Conflict,
    /// The backing store failed or timed out.
    Unavailable,
    /// Anything else; not for end users.
    Internal,
}

impl Error {
    /// Classifies this error into its caller-facing category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. }
            | Error::EmptyQuery
            | Error::AmbiguousContact { .. }
            | Error::InvalidAmount { .. }
            | Error::InvalidHours { .. }
            | Error::SelfPayment => ErrorKind::Invalid,

            Error::ContactNotFound
            | Error::NoActiveMembership { .. }
            | Error::EventNotFound { .. } => ErrorKind::NotFound,

            Error::DuplicateIdentity { .. }
            | Error::ContactAlreadyLinked { .. }
            | Error::DiscordIdTaken { .. }
            | Error::MembershipAlreadyActive { .. }
            | Error::AlreadyCheckedIn { .. }
            | Error::InsufficientPoints { .. } => ErrorKind::Conflict,

            Error::Unavailable { .. } => ErrorKind::Unavailable,

            Error::Config { .. }
            | Error::Database(_)
            | Error::Io(_)
            | Error::EnvVar(_)
            | Error::Framework(_) => ErrorKind::Internal,
        }
    }

    /// A message suitable for a Discord reply.
    ///
    /// Invalid/NotFound/Conflict variants carry descriptive, already-sanitized
    /// text; Unavailable and Internal collapse to generic phrasing so raw
    /// backend errors stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Invalid | ErrorKind::NotFound | ErrorKind::Conflict => self.to_string(),
            ErrorKind::Unavailable => {
                "the records system is not responding right now, try again in a moment".to_string()
            }
            ErrorKind::Internal => "something went wrong on our end".to_string(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::EmptyQuery.kind(), ErrorKind::Invalid);
        assert_eq!(
            Error::InvalidInput {
                message: "Event title cannot be empty".to_string()
            }
            .kind(),
            ErrorKind::Invalid
        );
        assert_eq!(Error::ContactNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::InsufficientPoints {
                current: 5,
                required: 10
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            Error::Unavailable { operation: "test" }.kind(),
            ErrorKind::Unavailable
        );
        assert_eq!(
            Error::Database(DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = Error::Database(DbErr::Custom("secret connection string".to_string()));
        assert!(!err.user_message().contains("secret"));

        let err = Error::Unavailable { operation: "balance query" };
        assert!(!err.user_message().contains("balance query"));
    }

    #[test]
    fn test_invalid_input_message_reaches_the_user() {
        // Boundary-validation failures must read as the caller's mistake,
        // never as a server-side fault
        let err = Error::InvalidInput {
            message: "Event title cannot be empty".to_string(),
        };
        assert_eq!(err.user_message(), "Event title cannot be empty");

        let err = Error::Config {
            message: "settings file unreadable".to_string(),
        };
        assert_eq!(err.user_message(), "something went wrong on our end");
    }

    #[test]
    fn test_user_message_keeps_descriptive_text() {
        let err = Error::InsufficientPoints {
            current: 5,
            required: 10,
        };
        assert!(err.user_message().contains('5'));
        assert!(err.user_message().contains("10"));
    }
}
