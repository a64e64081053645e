// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Business Card Fields
//!
//! Individual entries on a business card: phone, email, website, etc.
//! Each field type has a minimum [`SharingLevel`] at which it leaves the device.

use super::{SharingLevel, ValidationError};
use crate::contact::now_timestamp;
use serde::{Deserialize, Serialize};

/// Maximum length for field values.
pub const MAX_VALUE_LENGTH: usize = 1000;

/// Type of business card field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Phone,
    Email,
    Website,
    Social,
    Address,
    Custom,
}

impl FieldType {
    /// Lowest sharing level at which fields of this type are included.
    pub fn minimum_level(self) -> SharingLevel {
        match self {
            FieldType::Website | FieldType::Social => SharingLevel::Public,
            FieldType::Email | FieldType::Phone => SharingLevel::Professional,
            FieldType::Address | FieldType::Custom => SharingLevel::Personal,
        }
    }

    /// Parses a field type name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "phone" | "tel" => Some(FieldType::Phone),
            "email" | "mail" => Some(FieldType::Email),
            "website" | "web" | "url" => Some(FieldType::Website),
            "social" => Some(FieldType::Social),
            "address" => Some(FieldType::Address),
            "custom" | "other" => Some(FieldType::Custom),
            _ => None,
        }
    }
}

/// A single business card field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    /// Unique identifier for this field.
    id: String,
    /// Type of field.
    field_type: FieldType,
    /// User-defined label (e.g., "Work", "Mobile", "LinkedIn").
    label: String,
    /// The value itself (phone number, email address, ...).
    value: String,
    /// Timestamp of the last update (Unix seconds).
    #[serde(default)]
    updated_at: u64,
}

impl CardField {
    /// Creates a new field with a generated ID.
    pub fn new(field_type: FieldType, label: &str, value: &str) -> Self {
        CardField {
            id: uuid::Uuid::new_v4().simple().to_string(),
            field_type,
            label: label.to_string(),
            value: value.to_string(),
            updated_at: now_timestamp(),
        }
    }

    /// Returns the field's unique ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the field type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the field label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sets the field label.
    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    /// Returns the field value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the field value and updates the timestamp.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.updated_at = now_timestamp();
    }

    /// Returns the timestamp of the last update (Unix seconds).
    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }

    /// Returns whether this field is shared at the given level.
    pub fn is_shared_at(&self, level: SharingLevel) -> bool {
        self.field_type.minimum_level() <= level
    }

    /// Validates the field value based on its type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.value.trim().is_empty() {
            return Err(ValidationError::EmptyValue);
        }
        if self.value.len() > MAX_VALUE_LENGTH {
            return Err(ValidationError::ValueTooLong {
                max: MAX_VALUE_LENGTH,
            });
        }

        match self.field_type {
            FieldType::Phone => validate_phone(&self.value),
            FieldType::Email => validate_email(&self.value),
            _ => Ok(()),
        }
    }
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digit_count = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count < 7 {
        return Err(ValidationError::InvalidPhone);
    }

    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+'));
    if !valid_chars {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(())
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}
