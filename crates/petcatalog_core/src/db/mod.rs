//! SQLite storage bootstrap for the pet catalog.
//!
//! # Responsibility
//! - Open and configure SQLite connections handed to the pet gateway.
//! - Provision the `pets` table through versioned migrations.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Gateways are only built on connections whose migrations succeeded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure raised while opening, migrating or querying a database.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a connection setup step or a statement.
    Sqlite(rusqlite::Error),
    /// A migration script failed; nothing from the pending batch was kept.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The file carries a schema stamped by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "migration {version:04}_{name} failed: {source}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "pets schema v{found} is ahead of this build (knows up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
