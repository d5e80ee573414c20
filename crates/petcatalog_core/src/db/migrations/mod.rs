//! Versioned schema steps for the pet store.
//!
//! Each step is a SQL script compiled into the binary. Pending steps run in
//! one transaction and stamp `PRAGMA user_version` as they go, so a failure
//! anywhere leaves the file at its previous version.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init",
    sql: include_str!("0001_init.sql"),
}];

/// Highest schema version this build can provision.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - [`DbError::SchemaTooNew`] when the file is stamped past `latest_version()`.
/// - [`DbError::Migration`] naming the step whose script failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    run_pending(conn, MIGRATIONS)
}

fn run_pending(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let from = stamped_version(conn)?;
    let supported = steps.last().map_or(0, |migration| migration.version);
    if from > supported {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported,
        });
    }

    let pending = steps
        .iter()
        .filter(|migration| migration.version > from)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skipped version={from}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        run_step(&tx, migration)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
        from,
        supported,
        pending.len()
    );
    Ok(())
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    tx.execute_batch(migration.sql)
        .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
        .map_err(|source| DbError::Migration {
            version: migration.version,
            name: migration.name,
            source,
        })?;
    debug!(
        "event=db_migrate_step module=db status=ok version={} name={}",
        migration.version, migration.name
    );
    Ok(())
}

fn stamped_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
