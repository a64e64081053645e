// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sharing Levels
//!
//! A sharing level decides which parts of a business card leave the device.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much of a card is shared. Levels are ordered: each one includes
/// everything the previous one shares.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SharingLevel {
    /// Name, title, company, websites and social profiles.
    #[default]
    Public,
    /// Adds phone numbers and email addresses.
    Professional,
    /// Everything, including addresses, custom fields and the avatar.
    Personal,
}

impl SharingLevel {
    /// All levels, narrowest first.
    pub const ALL: [SharingLevel; 3] = [
        SharingLevel::Public,
        SharingLevel::Professional,
        SharingLevel::Personal,
    ];

    /// Tag used in link query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            SharingLevel::Public => "public",
            SharingLevel::Professional => "professional",
            SharingLevel::Personal => "personal",
        }
    }
}

impl fmt::Display for SharingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sharing level: {0}")]
pub struct UnknownSharingLevel(pub String);

impl FromStr for SharingLevel {
    type Err = UnknownSharingLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(SharingLevel::Public),
            "professional" | "work" => Ok(SharingLevel::Professional),
            "personal" | "full" => Ok(SharingLevel::Personal),
            other => Err(UnknownSharingLevel(other.to_string())),
        }
    }
}
