// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! Encrypted local storage for the contact collection and the user's own card.
//! Uses SQLite with application-level encryption of every payload.

mod contacts;
mod error;
pub mod migration;
pub mod secure;

pub use error::StorageError;
pub use secure::{load_or_create_key, FileKeyStorage, SecureStorage};

#[cfg(feature = "secure-storage")]
pub use secure::PlatformKeyring;

use rusqlite::Connection;
use std::path::Path;

use crate::contact::Contact;
use crate::crypto::SymmetricKey;

/// Persistence contract consumed by the contact repository.
///
/// The store always reads and writes the whole collection.
pub trait ContactStore: Send {
    /// Loads every stored contact.
    ///
    /// Returns [`StorageError::NotFound`] when nothing has been saved yet.
    fn load_all(&self) -> Result<Vec<Contact>, StorageError>;

    /// Replaces the stored collection with `contacts`.
    fn save_all(&mut self, contacts: &[Contact]) -> Result<(), StorageError>;
}

/// SQLite-based encrypted store.
///
/// The contact collection is stored as one encrypted snapshot row, so a save
/// either replaces the whole collection or changes nothing.
pub struct EncryptedStore {
    conn: Connection,
    /// Encryption key for everything written to the database.
    pub(crate) encryption_key: SymmetricKey,
}

impl EncryptedStore {
    /// Opens or creates a store database at the given path.
    pub fn open<P: AsRef<Path>>(path: P, encryption_key: SymmetricKey) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, encryption_key)
    }

    /// Creates an in-memory store (for testing).
    pub fn in_memory(encryption_key: SymmetricKey) -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, encryption_key)
    }

    fn with_connection(conn: Connection, encryption_key: SymmetricKey) -> Result<Self, StorageError> {
        let mut store = EncryptedStore {
            conn,
            encryption_key,
        };
        store.run_migrations()?;
        Ok(store)
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&mut self) -> Result<(), StorageError> {
        let migrations = migration::all_migrations();
        migration::MigrationRunner::run(&mut self.conn, &migrations)
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        migration::MigrationRunner::current_version(&self.conn)
    }
}

impl ContactStore for EncryptedStore {
    fn load_all(&self) -> Result<Vec<Contact>, StorageError> {
        self.load_snapshot()
    }

    fn save_all(&mut self, contacts: &[Contact]) -> Result<(), StorageError> {
        self.save_snapshot(contacts)
    }
}
