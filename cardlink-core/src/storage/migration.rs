// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Database Schema Migration Framework
//!
//! Versioned schema migrations with transactional safety. The runner tracks
//! applied versions in a `schema_version` table and runs pending migrations
//! in order within a single transaction.

use rusqlite::Connection;

use super::StorageError;

/// A single schema migration step.
pub struct Migration {
    /// Monotonically increasing version number (starting at 1).
    pub version: u32,
    /// Human-readable name for this migration.
    pub name: &'static str,
    pub sql: &'static str,
}

/// Runs schema migrations against a database connection.
pub struct MigrationRunner;

impl MigrationRunner {
    /// Runs all pending migrations in a transaction.
    ///
    /// If any migration fails, all changes of this run are rolled back.
    pub fn run(conn: &mut Connection, migrations: &[Migration]) -> Result<(), StorageError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at INTEGER NOT NULL
            );",
        )?;

        let current_version = Self::current_version(conn)?;

        let pending: Vec<&Migration> = migrations
            .iter()
            .filter(|m| m.version > current_version)
            .collect();

        if pending.is_empty() {
            return Ok(());
        }

        for window in pending.windows(2) {
            if window[0].version >= window[1].version {
                return Err(StorageError::Migration(format!(
                    "Migrations are not in order: v{} before v{}",
                    window[0].version, window[1].version
                )));
            }
        }

        // Dropping the transaction without commit rolls it back.
        let tx = conn.transaction()?;
        let now = crate::contact::now_timestamp();

        for migration in &pending {
            tx.execute_batch(migration.sql).map_err(|e| {
                StorageError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e
                ))
            })?;

            tx.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![migration.version, now as i64],
            )
            .map_err(|e| {
                StorageError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e
                ))
            })?;

            tracing::debug!(
                version = migration.version,
                name = migration.name,
                "applied migration"
            );
        }

        tx.commit()?;
        Ok(())
    }

    /// Returns the current schema version, or 0 if no migrations have been applied.
    pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
        let table_exists: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: Option<u32> =
            conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })?;

        Ok(version.unwrap_or(0))
    }
}

/// Returns all registered migrations in version order.
///
/// New migrations are appended to the end of this list.
pub fn all_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "baseline_schema",
            sql: MIGRATION_V1_BASELINE,
        },
        Migration {
            version: 2,
            name: "own_card_default_level",
            sql: MIGRATION_V2_OWN_CARD_LEVEL,
        },
    ]
}

const MIGRATION_V1_BASELINE: &str = "
CREATE TABLE IF NOT EXISTS contact_snapshot (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    payload_encrypted BLOB NOT NULL,
    contact_count INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS own_card (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    card_encrypted BLOB NOT NULL,
    updated_at INTEGER NOT NULL
);
";

const MIGRATION_V2_OWN_CARD_LEVEL: &str = "
ALTER TABLE own_card ADD COLUMN default_level TEXT NOT NULL DEFAULT 'public';
";
