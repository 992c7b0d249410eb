//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod contact;
pub mod event;
pub mod event_attendance;
pub mod guild_config;
pub mod membership;
pub mod transaction;
pub mod tutor_log;

// Re-export specific types to avoid conflicts
pub use contact::{Column as ContactColumn, Entity as Contact, Model as ContactModel};
pub use event::{Column as EventColumn, Entity as Event, Model as EventModel};
pub use event_attendance::{
    Column as EventAttendanceColumn, Entity as EventAttendance, Model as EventAttendanceModel,
};
pub use guild_config::{
    Column as GuildConfigColumn, Entity as GuildConfig, Model as GuildConfigModel,
};
pub use membership::{Column as MembershipColumn, Entity as Membership, Model as MembershipModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
pub use tutor_log::{Column as TutorLogColumn, Entity as TutorLog, Model as TutorLogModel};
