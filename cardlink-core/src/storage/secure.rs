// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key Storage
//!
//! Keeps the storage encryption key outside the database it protects:
//! in the OS keychain when the `secure-storage` feature is enabled,
//! otherwise in an encrypted key file.

use std::path::PathBuf;

use crate::crypto::SymmetricKey;
use crate::storage::StorageError;

/// Storage for raw key material, addressed by name.
pub trait SecureStorage: Send + Sync {
    fn save_key(&self, name: &str, key: &[u8]) -> Result<(), StorageError>;

    /// Returns None if the key doesn't exist.
    fn load_key(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Deleting a missing key is not an error.
    fn delete_key(&self, name: &str) -> Result<(), StorageError>;

    fn has_key(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.load_key(name)?.is_some())
    }
}

/// Loads the 256-bit key stored under `name`, generating and saving one on first use.
pub fn load_or_create_key(
    storage: &dyn SecureStorage,
    name: &str,
) -> Result<SymmetricKey, StorageError> {
    match storage.load_key(name)? {
        Some(bytes) => SymmetricKey::from_slice(&bytes).ok_or_else(|| {
            StorageError::Encryption(format!(
                "Stored key '{}' has invalid length {}",
                name,
                bytes.len()
            ))
        }),
        None => {
            let key = SymmetricKey::generate();
            storage.save_key(name, key.as_bytes())?;
            tracing::info!(name, "generated new storage key");
            Ok(key)
        }
    }
}

/// Platform keyring implementation using the `keyring` crate.
#[cfg(feature = "secure-storage")]
pub struct PlatformKeyring {
    service: String,
}

#[cfg(feature = "secure-storage")]
impl PlatformKeyring {
    /// `service` names the keychain entries (e.g. "cardlink").
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, name: &str) -> Result<keyring::Entry, StorageError> {
        keyring::Entry::new(&self.service, name)
            .map_err(|e| StorageError::Encryption(format!("Keyring error: {}", e)))
    }
}

#[cfg(feature = "secure-storage")]
impl SecureStorage for PlatformKeyring {
    fn save_key(&self, name: &str, key: &[u8]) -> Result<(), StorageError> {
        self.entry(name)?
            .set_secret(key)
            .map_err(|e| StorageError::Encryption(format!("Failed to save to keychain: {}", e)))
    }

    fn load_key(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match self.entry(name)?.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::Encryption(format!(
                "Failed to load from keychain: {}",
                e
            ))),
        }
    }

    fn delete_key(&self, name: &str) -> Result<(), StorageError> {
        match self.entry(name)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::Encryption(format!(
                "Failed to delete from keychain: {}",
                e
            ))),
        }
    }
}

/// Encrypted key files in a directory, one `<name>.key` file per key.
pub struct FileKeyStorage {
    dir: PathBuf,
    wrapping_key: SymmetricKey,
}

impl FileKeyStorage {
    /// Keys under `dir` are encrypted with `wrapping_key`.
    pub fn new(dir: PathBuf, wrapping_key: SymmetricKey) -> Self {
        Self { dir, wrapping_key }
    }

    fn key_file_path(&self, name: &str) -> PathBuf {
        // Keep names inside the directory.
        let safe_name: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.key", safe_name))
    }
}

impl SecureStorage for FileKeyStorage {
    fn save_key(&self, name: &str, key: &[u8]) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;

        let encrypted = crate::crypto::encrypt(&self.wrapping_key, key)
            .map_err(|e| StorageError::Encryption(e.to_string()))?;

        // Write then rename so a crash never leaves a truncated key file.
        let path = self.key_file_path(name);
        let tmp = path.with_extension("key.tmp");
        std::fs::write(&tmp, &encrypted)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_key(&self, name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.key_file_path(name);
        let encrypted = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let key = crate::crypto::decrypt(&self.wrapping_key, &encrypted)
            .map_err(|e| StorageError::Encryption(e.to_string()))?;
        Ok(Some(key))
    }

    fn delete_key(&self, name: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_file_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_storage(dir: &TempDir) -> FileKeyStorage {
        FileKeyStorage::new(dir.path().to_path_buf(), SymmetricKey::from_bytes([9u8; 32]))
    }

    #[test]
    fn test_file_storage_save_load_delete() {
        let dir = TempDir::new().unwrap();
        let storage = file_storage(&dir);

        storage.save_key("storage_key", &[0xDE, 0xAD]).unwrap();
        assert_eq!(
            storage.load_key("storage_key").unwrap(),
            Some(vec![0xDE, 0xAD])
        );

        storage.delete_key("storage_key").unwrap();
        assert!(!storage.has_key("storage_key").unwrap());
        // Deleting twice is fine
        storage.delete_key("storage_key").unwrap();
    }

    #[test]
    fn test_file_storage_is_encrypted_at_rest() {
        let dir = TempDir::new().unwrap();
        let storage = file_storage(&dir);
        let secret = vec![0x42; 32];

        storage.save_key("secret", &secret).unwrap();

        let on_disk = std::fs::read(dir.path().join("secret.key")).unwrap();
        assert_ne!(on_disk, secret);
        assert!(!dir.path().join("secret.key.tmp").exists());
    }

    #[test]
    fn test_file_storage_wrong_wrapping_key_fails() {
        let dir = TempDir::new().unwrap();
        file_storage(&dir).save_key("k", &[1, 2, 3]).unwrap();

        let other = FileKeyStorage::new(dir.path().to_path_buf(), SymmetricKey::generate());
        assert!(other.load_key("k").is_err());
    }

    #[test]
    fn test_file_storage_sanitizes_names() {
        let dir = TempDir::new().unwrap();
        let storage = file_storage(&dir);

        storage.save_key("../escape", &[1]).unwrap();
        assert!(dir.path().join("___escape.key").exists());
    }

    #[test]
    fn test_load_or_create_key_is_stable() {
        let dir = TempDir::new().unwrap();
        let storage = file_storage(&dir);

        let first = load_or_create_key(&storage, "storage_key").unwrap();
        let second = load_or_create_key(&storage, "storage_key").unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_load_or_create_key_rejects_bad_length() {
        let dir = TempDir::new().unwrap();
        let storage = file_storage(&dir);
        storage.save_key("storage_key", &[1, 2, 3]).unwrap();

        assert!(matches!(
            load_or_create_key(&storage, "storage_key"),
            Err(StorageError::Encryption(_))
        ));
    }
}
