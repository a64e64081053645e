// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Repository
//!
//! In-memory cache of all contacts, mirrored to a [`ContactStore`] on every
//! mutation.
//!
//! Every mutator changes memory first, then persists the whole collection.
//! If the store fails, the change is undone exactly and the store error is
//! returned, so the repository never reports success while the store
//! disagrees with memory.
//!
//! Store, collection and persistence calls all sit behind one mutex, which
//! is the single serialization point for readers and writers.

mod error;

pub use error::{RepositoryError, RepositoryResult};

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::contact::{now_timestamp, Contact, ContactSource, ContactStatistics, VerificationStatus};
use crate::storage::{ContactStore, StorageError};

const SECONDS_PER_DAY: u64 = 86_400;

/// Ordering of `search("")` results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyQueryOrder {
    /// Stored (insertion) order. Every other query sorts newest first.
    #[default]
    Stored,
    /// Newest first, like every other query.
    NewestFirst,
}

/// Repository behavior switches.
#[derive(Clone, Debug, Default)]
pub struct RepositoryConfig {
    pub empty_query_order: EmptyQueryOrder,
}

struct Inner<S> {
    store: S,
    contacts: Vec<Contact>,
    last_error: Option<String>,
}

impl<S: ContactStore> Inner<S> {
    fn persist(&mut self) -> Result<(), StorageError> {
        self.store.save_all(&self.contacts)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.id() == id)
    }

    /// Refuses writes while the stored collection could not be read, so a
    /// save never replaces data that memory does not hold.
    fn ensure_loaded(&self) -> RepositoryResult<()> {
        match &self.last_error {
            Some(error) => Err(StorageError::Unreadable(error.clone()).into()),
            None => Ok(()),
        }
    }

    /// Fails if a contact other than the one at `skip` holds `card_id`.
    fn ensure_unique_card(&self, card_id: &str, skip: Option<usize>) -> RepositoryResult<()> {
        let taken = self
            .contacts
            .iter()
            .enumerate()
            .any(|(i, c)| Some(i) != skip && c.card_id() == card_id);
        if taken {
            return Err(RepositoryError::Duplicate(card_id.to_string()));
        }
        Ok(())
    }

    /// Clones the contacts matching `pred`, newest first.
    fn collect_sorted(&self, pred: impl Fn(&Contact) -> bool) -> Vec<Contact> {
        let mut out: Vec<Contact> = self.contacts.iter().filter(|c| pred(*c)).cloned().collect();
        sort_newest_first(&mut out);
        out
    }
}

/// Stable sort by `received_at` descending.
fn sort_newest_first(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| b.received_at().cmp(&a.received_at()));
}

/// Transactional contact repository over a [`ContactStore`].
pub struct ContactRepository<S: ContactStore> {
    inner: Mutex<Inner<S>>,
    config: RepositoryConfig,
}

impl<S: ContactStore> ContactRepository<S> {
    /// Creates a repository and loads the stored contacts.
    pub fn new(store: S) -> Self {
        Self::with_config(store, RepositoryConfig::default())
    }

    /// Creates a repository with explicit configuration and loads the stored contacts.
    ///
    /// A load failure does not fail construction; it is available from
    /// [`last_error`](Self::last_error).
    pub fn with_config(store: S, config: RepositoryConfig) -> Self {
        let repo = ContactRepository {
            inner: Mutex::new(Inner {
                store,
                contacts: Vec::new(),
                last_error: None,
            }),
            config,
        };
        // Recorded in last_error.
        let _ = repo.refresh();
        repo
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        // Mutators roll back before returning and `modify` edits a copy, so a
        // poisoned lock still guards valid data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Mutations ===

    /// Adds a contact.
    ///
    /// Fails with [`RepositoryError::Duplicate`] if a contact for the same
    /// business card exists.
    ///
    /// Every mutator fails with [`RepositoryError::Persistence`] while the
    /// last load failed; a successful [`refresh`](Self::refresh) lifts that.
    pub fn add(&self, contact: Contact) -> RepositoryResult<()> {
        let mut inner = self.lock();
        inner.ensure_loaded()?;
        inner.ensure_unique_card(contact.card_id(), None)?;

        let contact_id = contact.id().to_string();
        inner.contacts.push(contact);

        if let Err(e) = inner.persist() {
            inner.contacts.pop();
            tracing::warn!(contact_id = %contact_id, error = %e, "add rolled back");
            return Err(e.into());
        }

        tracing::debug!(contact_id = %contact_id, "contact added");
        Ok(())
    }

    /// Replaces the contact with the same ID, keeping its position.
    ///
    /// Fails with [`RepositoryError::Duplicate`] if the new card belongs to
    /// another contact.
    pub fn update(&self, contact: Contact) -> RepositoryResult<()> {
        let mut inner = self.lock();
        inner.ensure_loaded()?;

        let index = inner
            .position(contact.id())
            .ok_or_else(|| RepositoryError::NotFound(contact.id().to_string()))?;
        inner.ensure_unique_card(contact.card_id(), Some(index))?;

        let original = std::mem::replace(&mut inner.contacts[index], contact);

        if let Err(e) = inner.persist() {
            tracing::warn!(contact_id = original.id(), error = %e, "update rolled back");
            inner.contacts[index] = original;
            return Err(e.into());
        }

        tracing::debug!(contact_id = original.id(), "contact updated");
        Ok(())
    }

    /// Applies `change` to a copy of the contact and stores it via [`update`](Self::update) semantics.
    ///
    /// Returns the updated contact. If `change` panics, the stored contact
    /// is left untouched.
    pub fn modify<F>(&self, id: &str, change: F) -> RepositoryResult<Contact>
    where
        F: FnOnce(&mut Contact),
    {
        let mut inner = self.lock();
        inner.ensure_loaded()?;

        let index = inner
            .position(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let mut changed = inner.contacts[index].clone();
        change(&mut changed);
        inner.ensure_unique_card(changed.card_id(), Some(index))?;

        let original = std::mem::replace(&mut inner.contacts[index], changed);

        if let Err(e) = inner.persist() {
            tracing::warn!(contact_id = id, error = %e, "modify rolled back");
            inner.contacts[index] = original;
            return Err(e.into());
        }

        tracing::debug!(contact_id = id, "contact modified");
        Ok(inner.contacts[index].clone())
    }

    /// Removes a contact and returns it.
    pub fn delete(&self, id: &str) -> RepositoryResult<Contact> {
        let mut inner = self.lock();
        inner.ensure_loaded()?;

        let index = inner
            .position(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let removed = inner.contacts.remove(index);

        if let Err(e) = inner.persist() {
            tracing::warn!(contact_id = id, error = %e, "delete rolled back");
            inner.contacts.insert(index, removed);
            return Err(e.into());
        }

        tracing::debug!(contact_id = id, "contact deleted");
        Ok(removed)
    }

    /// Reloads the collection from the store.
    ///
    /// "Nothing stored yet" loads as an empty collection. Any other failure is
    /// recorded as the last error, leaves the in-memory collection as it was
    /// and blocks mutators until a later refresh succeeds.
    pub fn refresh(&self) -> RepositoryResult<()> {
        let mut inner = self.lock();

        match inner.store.load_all() {
            Ok(contacts) => {
                tracing::debug!(count = contacts.len(), "contacts loaded");
                inner.contacts = contacts;
                inner.last_error = None;
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                inner.contacts.clear();
                inner.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading contacts failed, keeping current data");
                inner.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    // === Queries ===

    /// Looks up a contact by ID.
    pub fn get(&self, id: &str) -> RepositoryResult<Contact> {
        let inner = self.lock();
        inner
            .position(id)
            .map(|i| inner.contacts[i].clone())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    /// Looks up the contact holding the given business card.
    pub fn get_by_card_id(&self, card_id: &str) -> Option<Contact> {
        self.lock()
            .contacts
            .iter()
            .find(|c| c.card_id() == card_id)
            .cloned()
    }

    /// All contacts, newest first.
    pub fn get_all(&self) -> Vec<Contact> {
        self.lock().collect_sorted(|_| true)
    }

    /// Case-insensitive substring search over card text, tags and notes.
    ///
    /// A blank query returns every contact, ordered per
    /// [`RepositoryConfig::empty_query_order`]; other queries sort newest first.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        let query = query.trim();
        let inner = self.lock();

        if query.is_empty() {
            return match self.config.empty_query_order {
                EmptyQueryOrder::Stored => inner.contacts.clone(),
                EmptyQueryOrder::NewestFirst => inner.collect_sorted(|_| true),
            };
        }

        let needle = query.to_lowercase();
        inner.collect_sorted(|c| c.matches(&needle))
    }

    /// Contacts received through `source`, newest first.
    pub fn get_by_source(&self, source: ContactSource) -> Vec<Contact> {
        self.lock().collect_sorted(|c| c.source() == source)
    }

    /// Contacts carrying `tag`, newest first.
    pub fn get_by_tag(&self, tag: &str) -> Vec<Contact> {
        self.lock().collect_sorted(|c| c.has_tag(tag))
    }

    /// Contacts with the given verification status, newest first.
    pub fn get_by_verification_status(&self, status: VerificationStatus) -> Vec<Contact> {
        self.lock()
            .collect_sorted(|c| c.verification_status() == status)
    }

    /// Distinct tags across all contacts, sorted lexicographically.
    pub fn get_all_tags(&self) -> Vec<String> {
        let inner = self.lock();
        let mut tags: Vec<String> = inner
            .contacts
            .iter()
            .flat_map(|c| c.tags().iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Contacts received within the last `days` days, newest first.
    pub fn get_recent(&self, days: u32) -> Vec<Contact> {
        let cutoff = now_timestamp().saturating_sub(u64::from(days) * SECONDS_PER_DAY);
        self.lock().collect_sorted(|c| c.received_at() >= cutoff)
    }

    pub fn statistics(&self) -> ContactStatistics {
        ContactStatistics::compute(&self.lock().contacts, now_timestamp())
    }

    pub fn len(&self) -> usize {
        self.lock().contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().contacts.is_empty()
    }

    /// The last load failure, if the most recent load failed.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Runs `f` against the underlying store while holding the repository lock.
    pub fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock().store)
    }
}
