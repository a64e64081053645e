// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Configuration
//!
//! Configuration types for the CardLink API layer.

use std::path::PathBuf;

use crate::crypto::SymmetricKey;
use crate::deeplink::LinkConfig;
use crate::repository::{EmptyQueryOrder, RepositoryConfig};

/// Configuration for a CardLink instance.
#[derive(Debug, Clone)]
pub struct CardLinkConfig {
    /// Database file holding contacts and the own card.
    pub storage_path: PathBuf,

    /// Storage encryption key.
    /// If None, a random key will be generated (not persistent across sessions).
    pub storage_key: Option<SymmetricKey>,

    /// Share link configuration.
    pub links: LinkConfig,

    /// Contact repository behavior.
    pub repository: RepositoryConfig,
}

impl Default for CardLinkConfig {
    fn default() -> Self {
        CardLinkConfig {
            storage_path: PathBuf::from("./cardlink_data/cardlink.db"),
            storage_key: None,
            links: LinkConfig::default(),
            repository: RepositoryConfig::default(),
        }
    }
}

impl CardLinkConfig {
    /// Creates a new configuration with the given storage path.
    pub fn with_storage_path(storage_path: impl Into<PathBuf>) -> Self {
        CardLinkConfig {
            storage_path: storage_path.into(),
            ..Default::default()
        }
    }

    /// Sets the storage encryption key.
    /// Use this to persist data across sessions.
    pub fn with_storage_key(mut self, key: SymmetricKey) -> Self {
        self.storage_key = Some(key);
        self
    }

    /// Sets the share link domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.links.domain = domain.into();
        self
    }

    pub fn with_links(mut self, links: LinkConfig) -> Self {
        self.links = links;
        self
    }

    /// Sets how a blank search orders its results.
    pub fn with_empty_query_order(mut self, order: EmptyQueryOrder) -> Self {
        self.repository.empty_query_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CardLinkConfig::default();
        assert!(config.storage_key.is_none());
        assert_eq!(config.links.domain, "cardlink.app");
        assert_eq!(
            config.repository.empty_query_order,
            EmptyQueryOrder::Stored
        );
    }

    #[test]
    fn test_builder_methods() {
        let config = CardLinkConfig::with_storage_path("/tmp/cards.db")
            .with_domain("cards.example.org")
            .with_empty_query_order(EmptyQueryOrder::NewestFirst);

        assert_eq!(config.storage_path, PathBuf::from("/tmp/cards.db"));
        assert_eq!(config.links.domain, "cards.example.org");
        assert_eq!(
            config.repository.empty_query_order,
            EmptyQueryOrder::NewestFirst
        );
    }
}
