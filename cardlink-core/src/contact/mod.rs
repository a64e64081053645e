// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Module
//!
//! A contact is a received business card plus the local bookkeeping around it:
//! where it came from, when, how far it is trusted, and the user's own tags
//! and notes. Tags and notes never leave the device.

mod statistics;

pub use statistics::ContactStatistics;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::card::BusinessCard;

/// How a contact reached this device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactSource {
    QrCode,
    Manual,
    ShareLink,
    AppClip,
    Nfc,
}

impl fmt::Display for ContactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactSource::QrCode => "qr code",
            ContactSource::Manual => "manual",
            ContactSource::ShareLink => "share link",
            ContactSource::AppClip => "app clip",
            ContactSource::Nfc => "nfc",
        };
        f.write_str(name)
    }
}

/// Trust state of a received card, set by an external verification step.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Verified,
    Failed,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerificationStatus::Unverified => "unverified",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Returns the current Unix timestamp in seconds.
pub(crate) fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// A received business card stored on this device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Local unique identifier (UUID v4).
    id: String,
    /// Snapshot of the card as it was received.
    business_card: BusinessCard,
    /// Unix timestamp of when the card was received.
    received_at: u64,
    source: ContactSource,
    #[serde(default)]
    tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default)]
    verification_status: VerificationStatus,
}

impl Contact {
    /// Creates an unverified contact for a card received just now.
    pub fn new(business_card: BusinessCard, source: ContactSource) -> Self {
        Self::with_received_at(business_card, source, now_timestamp())
    }

    /// Creates an unverified contact with an explicit receive time.
    pub fn with_received_at(
        business_card: BusinessCard,
        source: ContactSource,
        received_at: u64,
    ) -> Self {
        Contact {
            id: uuid::Uuid::new_v4().to_string(),
            business_card,
            received_at,
            source,
            tags: BTreeSet::new(),
            notes: None,
            verification_status: VerificationStatus::Unverified,
        }
    }

    /// Returns the contact's unique ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the received business card.
    pub fn business_card(&self) -> &BusinessCard {
        &self.business_card
    }

    /// Returns the ID of the received business card.
    pub fn card_id(&self) -> &str {
        self.business_card.id()
    }

    /// Returns the display name of the received card.
    pub fn display_name(&self) -> &str {
        self.business_card.display_name()
    }

    /// Replaces the stored card snapshot (e.g. when the same card is re-received).
    pub fn set_business_card(&mut self, card: BusinessCard) {
        self.business_card = card;
    }

    pub fn received_at(&self) -> u64 {
        self.received_at
    }

    pub fn source(&self) -> ContactSource {
        self.source
    }

    // ========================================
    // Tags
    // ========================================

    /// Returns the tags in lexicographic order.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Adds a tag. Surrounding whitespace is trimmed; blank tags are ignored.
    ///
    /// Returns true if the tag was newly added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.tags.insert(tag.to_string())
    }

    /// Removes a tag. Returns true if it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag.trim())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    // ========================================
    // Notes and verification
    // ========================================

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Sets the notes; blank notes clear them.
    pub fn set_notes(&mut self, notes: Option<&str>) {
        self.notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
    }

    pub fn verification_status(&self) -> VerificationStatus {
        self.verification_status
    }

    pub fn set_verification_status(&mut self, status: VerificationStatus) {
        self.verification_status = status;
    }

    /// Returns true if the card, tags or notes contain `needle` (already lowercased).
    pub fn matches(&self, needle: &str) -> bool {
        self.business_card.matches(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle))
    }
}
