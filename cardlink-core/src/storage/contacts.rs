// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact snapshot and own card storage operations.

use rusqlite::params;

use super::{EncryptedStore, StorageError};
use crate::card::{BusinessCard, SharingLevel};
use crate::contact::{now_timestamp, Contact};

impl EncryptedStore {
    // === Contact Snapshot ===

    /// Encrypts and writes the whole contact collection.
    pub(super) fn save_snapshot(&mut self, contacts: &[Contact]) -> Result<(), StorageError> {
        let json =
            serde_json::to_vec(contacts).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let payload = crate::crypto::encrypt(&self.encryption_key, &json)
            .map_err(|e| StorageError::Encryption(e.to_string()))?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO contact_snapshot
             (id, payload_encrypted, contact_count, updated_at)
             VALUES (1, ?1, ?2, ?3)",
            params![payload, contacts.len() as i64, now_timestamp() as i64],
        )?;
        tx.commit()?;

        tracing::debug!(count = contacts.len(), "saved contact snapshot");
        Ok(())
    }

    /// Reads and decrypts the contact collection.
    pub(super) fn load_snapshot(&self) -> Result<Vec<Contact>, StorageError> {
        let result = self.conn.query_row(
            "SELECT payload_encrypted FROM contact_snapshot WHERE id = 1",
            [],
            |row| row.get::<_, Vec<u8>>(0),
        );

        let payload = match result {
            Ok(payload) => payload,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(StorageError::NotFound("contact snapshot".into()))
            }
            Err(e) => return Err(StorageError::Database(e)),
        };

        let json = crate::crypto::decrypt(&self.encryption_key, &payload)
            .map_err(|e| StorageError::Encryption(e.to_string()))?;
        serde_json::from_slice(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Returns when the snapshot was last written, if ever.
    pub fn snapshot_updated_at(&self) -> Result<Option<u64>, StorageError> {
        let result = self.conn.query_row(
            "SELECT updated_at FROM contact_snapshot WHERE id = 1",
            [],
            |row| row.get::<_, i64>(0),
        );

        match result {
            Ok(ts) => Ok(Some(ts as u64)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    // === Own Business Card ===

    /// Saves the user's own business card with its default sharing level.
    pub fn save_own_card(
        &self,
        card: &BusinessCard,
        default_level: SharingLevel,
    ) -> Result<(), StorageError> {
        let json =
            serde_json::to_vec(card).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let card_encrypted = crate::crypto::encrypt(&self.encryption_key, &json)
            .map_err(|e| StorageError::Encryption(e.to_string()))?;

        self.conn.execute(
            "INSERT OR REPLACE INTO own_card (id, card_encrypted, updated_at, default_level)
             VALUES (1, ?1, ?2, ?3)",
            params![
                card_encrypted,
                now_timestamp() as i64,
                default_level.as_str()
            ],
        )?;

        Ok(())
    }

    /// Loads the user's own business card and its default sharing level.
    pub fn load_own_card(&self) -> Result<Option<(BusinessCard, SharingLevel)>, StorageError> {
        let result = self.conn.query_row(
            "SELECT card_encrypted, default_level FROM own_card WHERE id = 1",
            [],
            |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, String>(1)?)),
        );

        match result {
            Ok((card_encrypted, level)) => {
                let json = crate::crypto::decrypt(&self.encryption_key, &card_encrypted)
                    .map_err(|e| StorageError::Encryption(e.to_string()))?;
                let card = serde_json::from_slice(&json)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                let level = level
                    .parse()
                    .map_err(|e: crate::card::UnknownSharingLevel| {
                        StorageError::Serialization(e.to_string())
                    })?;
                Ok(Some((card, level)))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }
}
