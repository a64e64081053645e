// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI Configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use cardlink_core::storage::{load_or_create_key, SecureStorage};
use cardlink_core::{CardLink, CardLinkConfig, LinkConfig, SymmetricKey};

#[cfg(feature = "secure-storage")]
use cardlink_core::storage::PlatformKeyring;

#[cfg(not(feature = "secure-storage"))]
use cardlink_core::storage::FileKeyStorage;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory for storage.
    pub data_dir: PathBuf,
    /// Domain used in share links.
    pub domain: String,
}

/// Key name used for SecureStorage.
const KEY_NAME: &str = "storage_key";

impl CliConfig {
    /// Returns the database path.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("cardlink.db")
    }

    fn key_storage(&self) -> Box<dyn SecureStorage> {
        #[cfg(feature = "secure-storage")]
        {
            Box::new(PlatformKeyring::new("cardlink-cli"))
        }

        #[cfg(not(feature = "secure-storage"))]
        {
            // Only protects the key file against casual reads; use the
            // secure-storage feature for real protection.
            let wrapping_key = SymmetricKey::from_bytes([
                0x43, 0x61, 0x72, 0x64, 0x4c, 0x69, 0x6e, 0x6b, // "CardLink"
                0x43, 0x6c, 0x69, 0x4b, 0x65, 0x79, 0x46, 0x69, // "CliKeyFi"
                0x6c, 0x65, 0x56, 0x31, 0x00, 0x00, 0x00, 0x00, // "leV1"
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            ]);
            Box::new(FileKeyStorage::new(self.data_dir.join("keys"), wrapping_key))
        }
    }

    /// Loads or creates the storage encryption key.
    ///
    /// When the `secure-storage` feature is enabled, uses the OS keychain.
    /// Otherwise, falls back to encrypted file storage.
    pub fn storage_key(&self) -> Result<SymmetricKey> {
        let storage = self.key_storage();
        load_or_create_key(storage.as_ref(), KEY_NAME).context("Failed to load storage key")
    }

    /// Opens the CardLink store for this configuration.
    pub fn open(&self) -> Result<CardLink> {
        let config = CardLinkConfig::with_storage_path(self.storage_path())
            .with_storage_key(self.storage_key()?)
            .with_links(LinkConfig::new().with_domain(&self.domain));

        let cardlink = CardLink::new(config).context("Failed to open CardLink storage")?;
        if let Some(error) = cardlink.contacts().last_error() {
            tracing::warn!(%error, "contacts could not be loaded");
        }
        Ok(cardlink)
    }
}

// INLINE_TEST_REQUIRED: Binary crate without lib.rs - tests cannot be external
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(dir: &std::path::Path) -> CliConfig {
        CliConfig {
            data_dir: dir.to_path_buf(),
            domain: "cardlink.test".to_string(),
        }
    }

    #[cfg(not(feature = "secure-storage"))]
    #[test]
    fn test_storage_key_persists_across_config_instances() {
        let temp_dir = tempdir().unwrap();

        let key1 = config(temp_dir.path()).storage_key().unwrap();
        let key2 = config(temp_dir.path()).storage_key().unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[cfg(not(feature = "secure-storage"))]
    #[test]
    fn test_open_uses_configured_domain() {
        let temp_dir = tempdir().unwrap();
        let cardlink = config(temp_dir.path()).open().unwrap();

        assert_eq!(cardlink.config().links.domain, "cardlink.test");
        assert!(temp_dir.path().join("cardlink.db").exists());
    }
}
