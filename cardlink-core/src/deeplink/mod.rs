// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep Link Module
//!
//! Encoding of business cards into share links, decoding of incoming links,
//! and the session-level handler that turns a received link into a contact.

mod codec;
mod error;
mod handler;
mod scheme;

pub use codec::{DecodedLink, DeepLinkCodec, LinkKind, LinkOrigin};
pub use error::DeepLinkError;
pub use handler::{DeepLinkAction, DeepLinkHandler};
pub use scheme::{build_scheme_url, parse_route, AppRoute};

use crate::card::SharingLevel;

/// Default public domain for share links.
pub const DEFAULT_DOMAIN: &str = "cardlink.app";

/// Default custom URL scheme.
pub const DEFAULT_APP_SCHEME: &str = "cardlink";

/// Default lifetime of temporary links, in hours.
pub const DEFAULT_EXPIRATION_HOURS: u32 = 24;

/// Link building configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// Host used for `https` share links.
    pub domain: String,
    /// Custom scheme recognized for in-app links.
    pub app_scheme: String,
    /// Sharing level used when the caller does not pick one.
    pub default_level: SharingLevel,
    /// Lifetime of temporary links when the caller does not pick one.
    pub default_expiration_hours: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            domain: DEFAULT_DOMAIN.to_string(),
            app_scheme: DEFAULT_APP_SCHEME.to_string(),
            default_level: SharingLevel::Public,
            default_expiration_hours: DEFAULT_EXPIRATION_HOURS,
        }
    }
}

impl LinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the share link domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the custom URL scheme.
    pub fn with_app_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.app_scheme = scheme.into();
        self
    }

    pub fn with_default_level(mut self, level: SharingLevel) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_default_expiration_hours(mut self, hours: u32) -> Self {
        self.default_expiration_hours = hours;
        self
    }
}
