//! Recipe store
//!
//! SQLite connection pool and schema migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
pub use migrations::{get_schema_version, run_migrations, SCHEMA_VERSION};
