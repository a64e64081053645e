// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep link error types.

use thiserror::Error;

/// Deep link encoding and decoding errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkError {
    /// The link carried an `expires` timestamp that has passed.
    #[error("link expired at {expired_at}")]
    Expired { expired_at: u64 },

    /// The payload is missing, not base64, or not a valid business card.
    #[error("invalid card payload: {0}")]
    InvalidFormat(String),

    /// The URL is well formed but not one of ours.
    #[error("unsupported link: {0}")]
    UnsupportedLink(String),

    /// The text is not a URL, or a URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The card could not be serialized for sharing.
    #[error("serialization error: {0}")]
    Serialization(String),
}
