// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CardLink Orchestrator
//!
//! Main entry point for the CardLink API.

use std::sync::Arc;

use crate::card::{BusinessCard, CardError, SharingLevel};
use crate::contact::{Contact, ContactSource};
use crate::crypto::SymmetricKey;
use crate::deeplink::{DeepLinkAction, DeepLinkCodec, DeepLinkHandler, LinkKind};
use crate::qr::render_qr;
use crate::repository::ContactRepository;
use crate::storage::EncryptedStore;

use super::config::CardLinkConfig;
use super::error::{CardLinkError, CardLinkResult};
use super::events::{CallbackHandler, CardLinkEvent, EventDispatcher};

/// Shorthand for the repository type used by [`CardLink`].
pub type Contacts = ContactRepository<EncryptedStore>;

/// Main CardLink orchestrator.
///
/// Owns the encrypted store (through the contact repository), the deep link
/// handler and the event dispatcher. Construct one and pass it to whatever
/// needs it.
///
/// # Example
///
/// ```ignore
/// use cardlink_core::api::{CardLink, CardLinkConfig};
/// use cardlink_core::{BusinessCard, LinkKind, SharingLevel};
///
/// let cards = CardLink::new(CardLinkConfig::with_storage_path("cards.db"))?;
///
/// cards.set_own_card(&BusinessCard::new("Ada Lovelace"))?;
/// let link = cards.share_link(Some(SharingLevel::Public), LinkKind::Share)?;
///
/// // On the receiving device
/// if other.receive(&link) {
///     println!("{:?}", other.take_pending_action());
/// }
/// ```
pub struct CardLink {
    config: CardLinkConfig,
    repository: Arc<Contacts>,
    handler: DeepLinkHandler<EncryptedStore>,
    events: Arc<EventDispatcher>,
}

impl CardLink {
    /// Opens (or creates) the store at `config.storage_path`.
    pub fn new(config: CardLinkConfig) -> CardLinkResult<Self> {
        // Use provided storage key or generate a new one
        let storage_key = config
            .storage_key
            .clone()
            .unwrap_or_else(SymmetricKey::generate);

        if let Some(parent) = config.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CardLinkError::Configuration(e.to_string()))?;
            }
        }

        let store = EncryptedStore::open(&config.storage_path, storage_key)?;
        Ok(Self::with_store(config, store))
    }

    /// Creates a CardLink instance with in-memory storage (for testing).
    pub fn in_memory() -> CardLinkResult<Self> {
        Self::in_memory_with_config(CardLinkConfig::default())
    }

    /// Like [`in_memory`](Self::in_memory), keeping everything but the storage path from `config`.
    pub fn in_memory_with_config(config: CardLinkConfig) -> CardLinkResult<Self> {
        let storage_key = config
            .storage_key
            .clone()
            .unwrap_or_else(SymmetricKey::generate);
        let store = EncryptedStore::in_memory(storage_key)?;
        Ok(Self::with_store(config, store))
    }

    fn with_store(config: CardLinkConfig, store: EncryptedStore) -> Self {
        let repository = Arc::new(ContactRepository::with_config(
            store,
            config.repository.clone(),
        ));
        let events = Arc::new(EventDispatcher::new());
        let handler = DeepLinkHandler::new(
            DeepLinkCodec::new(config.links.clone()),
            Arc::clone(&repository),
            Arc::clone(&events),
        );

        CardLink {
            config,
            repository,
            handler,
            events,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &CardLinkConfig {
        &self.config
    }

    /// The contact repository, for queries and direct use.
    pub fn contacts(&self) -> &Arc<Contacts> {
        &self.repository
    }

    pub fn codec(&self) -> &DeepLinkCodec {
        self.handler.codec()
    }

    pub fn events(&self) -> &Arc<EventDispatcher> {
        &self.events
    }

    /// Registers a closure for all events.
    pub fn add_event_handler<F>(&self, callback: F)
    where
        F: Fn(CardLinkEvent) + Send + Sync + 'static,
    {
        self.events
            .add_handler(Arc::new(CallbackHandler::new(callback)));
    }

    // === Own Card ===

    /// Returns the user's own business card, if one was saved.
    pub fn own_card(&self) -> CardLinkResult<Option<BusinessCard>> {
        let stored = self.repository.with_store(|store| store.load_own_card())?;
        Ok(stored.map(|(card, _)| card))
    }

    /// Saves the user's own business card, keeping its default sharing level.
    pub fn set_own_card(&self, card: &BusinessCard) -> CardLinkResult<()> {
        card.validate()?;
        for field in card.fields() {
            field
                .validate()
                .map_err(CardError::Validation)?;
        }

        let level = self.default_level()?;
        self.repository
            .with_store(|store| store.save_own_card(card, level))?;
        tracing::debug!(card_id = card.id(), "own card saved");
        Ok(())
    }

    /// The sharing level used when none is given: the stored one, or the configured default.
    pub fn default_level(&self) -> CardLinkResult<SharingLevel> {
        let stored = self.repository.with_store(|store| store.load_own_card())?;
        Ok(stored
            .map(|(_, level)| level)
            .unwrap_or(self.config.links.default_level))
    }

    /// Changes the default sharing level stored with the own card.
    pub fn set_default_level(&self, level: SharingLevel) -> CardLinkResult<()> {
        let card = self.own_card()?.ok_or(CardLinkError::OwnCardMissing)?;
        self.repository
            .with_store(|store| store.save_own_card(&card, level))?;
        Ok(())
    }

    // === Sharing ===

    /// A temporary link kind with the configured lifetime.
    pub fn temporary_kind(&self) -> LinkKind {
        LinkKind::Temporary {
            hours: self.config.links.default_expiration_hours,
        }
    }

    /// Encodes the own card as a link.
    pub fn share_link(&self, level: Option<SharingLevel>, kind: LinkKind) -> CardLinkResult<String> {
        let (card, stored_level) = self
            .repository
            .with_store(|store| store.load_own_card())?
            .ok_or(CardLinkError::OwnCardMissing)?;
        let level = level.unwrap_or(stored_level);
        Ok(self.handler.codec().encode(&card, level, kind)?)
    }

    /// Renders the share link for the own card as a QR code.
    pub fn share_qr(&self, level: Option<SharingLevel>, kind: LinkKind) -> CardLinkResult<String> {
        let link = self.share_link(level, kind)?;
        Ok(render_qr(&link)?)
    }

    // === Receiving ===

    /// Accepts a link or scanned text. See [`DeepLinkHandler::handle_scanned_text`].
    pub fn receive(&self, text: &str) -> bool {
        self.handler.handle_scanned_text(text)
    }

    pub fn take_pending_action(&self) -> Option<DeepLinkAction> {
        self.handler.take_pending_action()
    }

    pub fn last_received_card(&self) -> Option<BusinessCard> {
        self.handler.last_received_card()
    }

    // === Contacts ===

    /// Stores a card entered by hand as a new contact.
    pub fn add_contact(&self, card: BusinessCard, source: ContactSource) -> CardLinkResult<Contact> {
        card.validate()?;
        let contact = Contact::new(card, source);
        self.repository.add(contact.clone())?;
        self.events.dispatch(CardLinkEvent::ContactAdded {
            contact_id: contact.id().to_string(),
        });
        Ok(contact)
    }

    pub fn update_contact(&self, contact: Contact) -> CardLinkResult<()> {
        let contact_id = contact.id().to_string();
        self.repository.update(contact)?;
        self.events
            .dispatch(CardLinkEvent::ContactUpdated { contact_id });
        Ok(())
    }

    /// Edits a stored contact in place and returns the result.
    pub fn modify_contact<F>(&self, id: &str, change: F) -> CardLinkResult<Contact>
    where
        F: FnOnce(&mut Contact),
    {
        let contact = self.repository.modify(id, change)?;
        self.events.dispatch(CardLinkEvent::ContactUpdated {
            contact_id: contact.id().to_string(),
        });
        Ok(contact)
    }

    pub fn delete_contact(&self, id: &str) -> CardLinkResult<Contact> {
        let removed = self.repository.delete(id)?;
        self.events.dispatch(CardLinkEvent::ContactRemoved {
            contact_id: removed.id().to_string(),
        });
        Ok(removed)
    }
}
