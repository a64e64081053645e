// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Business Card Module
//!
//! Handles business card creation, fields, validation and sharing-level filtering.

mod field;
mod sharing;
mod validation;

pub use field::{CardField, FieldType, MAX_VALUE_LENGTH};
pub use sharing::{SharingLevel, UnknownSharingLevel};
pub use validation::ValidationError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of fields per business card.
pub const MAX_FIELDS: usize = 25;

/// Maximum display name length.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Maximum serialized card size in bytes (64 KB).
pub const MAX_CARD_SIZE_BYTES: usize = 65536;

/// Maximum avatar data size in bytes (32 KB, cards travel inside URLs).
pub const MAX_AVATAR_SIZE: usize = 32768;

/// Business card errors.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Display name cannot be empty")]
    EmptyDisplayName,
    #[error("Display name too long (max 100 characters)")]
    DisplayNameTooLong,
    #[error("Maximum number of fields reached (25)")]
    MaxFieldsReached,
    #[error("Field not found")]
    FieldNotFound,
    #[error("Avatar too large (max {max} bytes, got {size} bytes)")]
    AvatarTooLarge { max: usize, size: usize },
    #[error("Card too large (max {max} bytes, got {size} bytes)")]
    CardTooLarge { max: usize, size: usize },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A digital business card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCard {
    /// Unique identifier for this card.
    id: String,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(default)]
    fields: Vec<CardField>,
    /// Optional avatar image data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<Vec<u8>>,
}

impl BusinessCard {
    /// Creates a new business card with the given display name.
    pub fn new(display_name: &str) -> Self {
        let rng = ring::rand::SystemRandom::new();
        // An RNG failure only costs uniqueness of the id; fall back to a UUID.
        let id = ring::rand::generate::<[u8; 16]>(&rng)
            .map(|bytes| hex::encode(bytes.expose()))
            .unwrap_or_else(|_| uuid::Uuid::new_v4().simple().to_string());

        Self::with_id(&id, display_name)
    }

    /// Creates a business card with an explicit ID.
    pub fn with_id(id: &str, display_name: &str) -> Self {
        BusinessCard {
            id: id.to_string(),
            display_name: display_name.to_string(),
            title: None,
            company: None,
            fields: Vec::new(),
            avatar: None,
        }
    }

    /// Returns the card's unique ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Sets the display name.
    pub fn set_display_name(&mut self, name: &str) -> Result<(), CardError> {
        if name.trim().is_empty() {
            return Err(CardError::EmptyDisplayName);
        }
        if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(CardError::DisplayNameTooLong);
        }
        self.display_name = name.to_string();
        Ok(())
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = title.map(str::to_string);
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn set_company(&mut self, company: Option<&str>) {
        self.company = company.map(str::to_string);
    }

    /// Returns all fields.
    pub fn fields(&self) -> &[CardField] {
        &self.fields
    }

    /// Adds a validated field to the card.
    pub fn add_field(&mut self, field: CardField) -> Result<(), CardError> {
        if self.fields.len() >= MAX_FIELDS {
            return Err(CardError::MaxFieldsReached);
        }
        field.validate()?;
        self.fields.push(field);
        Ok(())
    }

    /// Updates a field's value by ID.
    pub fn update_field_value(&mut self, field_id: &str, value: &str) -> Result<(), CardError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id() == field_id)
            .ok_or(CardError::FieldNotFound)?;

        let previous = field.clone();
        field.set_value(value);
        if let Err(e) = field.validate() {
            *field = previous;
            return Err(e.into());
        }
        Ok(())
    }

    /// Removes a field by ID.
    pub fn remove_field(&mut self, field_id: &str) -> Result<(), CardError> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id() == field_id)
            .ok_or(CardError::FieldNotFound)?;

        self.fields.remove(index);
        Ok(())
    }

    /// Sets the avatar image data.
    pub fn set_avatar(&mut self, data: Vec<u8>) -> Result<(), CardError> {
        if data.len() > MAX_AVATAR_SIZE {
            return Err(CardError::AvatarTooLarge {
                max: MAX_AVATAR_SIZE,
                size: data.len(),
            });
        }
        self.avatar = Some(data);
        Ok(())
    }

    pub fn avatar(&self) -> Option<&[u8]> {
        self.avatar.as_deref()
    }

    pub fn clear_avatar(&mut self) {
        self.avatar = None;
    }

    /// Returns a copy of this card reduced to what the given level shares.
    ///
    /// Name, title and company are always kept. Fields are kept when their
    /// type's minimum level is at or below `level`; the avatar only at
    /// [`SharingLevel::Personal`].
    pub fn filtered(&self, level: SharingLevel) -> BusinessCard {
        BusinessCard {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
            fields: self
                .fields
                .iter()
                .filter(|f| f.is_shared_at(level))
                .cloned()
                .collect(),
            avatar: if level >= SharingLevel::Personal {
                self.avatar.clone()
            } else {
                None
            },
        }
    }

    /// Returns true if any searchable text contains `needle` (already lowercased).
    pub fn matches(&self, needle: &str) -> bool {
        let contains = |s: &str| s.to_lowercase().contains(needle);

        contains(&self.display_name)
            || self.title.as_deref().is_some_and(contains)
            || self.company.as_deref().is_some_and(contains)
            || self
                .fields
                .iter()
                .any(|f| contains(f.value()) || contains(f.label()))
    }

    /// Checks the structural limits of a card, e.g. one decoded from a link.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.display_name.trim().is_empty() {
            return Err(CardError::EmptyDisplayName);
        }
        if self.display_name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(CardError::DisplayNameTooLong);
        }
        if self.fields.len() > MAX_FIELDS {
            return Err(CardError::MaxFieldsReached);
        }
        self.validate_size()
    }

    /// Validates that the serialized card size is within the maximum limit.
    pub fn validate_size(&self) -> Result<(), CardError> {
        let json = serde_json::to_vec(self).map_err(|e| CardError::Serialization(e.to_string()))?;
        if json.len() > MAX_CARD_SIZE_BYTES {
            return Err(CardError::CardTooLarge {
                max: MAX_CARD_SIZE_BYTES,
                size: json.len(),
            });
        }
        Ok(())
    }
}
