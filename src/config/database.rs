//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL. One extra statement adds the composite
//! unique index on event attendance, which the entity macro cannot express.

use crate::entities::{
    Contact, Event, EventAttendance, GuildConfig, Membership, Transaction, TutorLog,
    event_attendance,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables and indexes from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let contact_table = schema.create_table_from_entity(Contact);
    let membership_table = schema.create_table_from_entity(Membership);
    let transaction_table = schema.create_table_from_entity(Transaction);
    let event_table = schema.create_table_from_entity(Event);
    let attendance_table = schema.create_table_from_entity(EventAttendance);
    let tutor_log_table = schema.create_table_from_entity(TutorLog);
    let guild_config_table = schema.create_table_from_entity(GuildConfig);

    db.execute(builder.build(&contact_table)).await?;
    db.execute(builder.build(&membership_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&event_table)).await?;
    db.execute(builder.build(&attendance_table)).await?;
    db.execute(builder.build(&tutor_log_table)).await?;
    db.execute(builder.build(&guild_config_table)).await?;

    // One check-in per contact per event, enforced at the database level
    let attendance_unique = Index::create()
        .name("idx_event_attendance_contact_event")
        .table(event_attendance::Entity)
        .col(event_attendance::Column::ContactId)
        .col(event_attendance::Column::EventId)
        .unique()
        .to_owned();
    db.execute(builder.build(&attendance_unique)).await?;

    Ok(())
}
