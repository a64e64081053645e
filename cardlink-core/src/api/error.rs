// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Unified error type for the CardLink API layer.

use thiserror::Error;

use crate::card::CardError;
use crate::deeplink::DeepLinkError;
use crate::qr::QrError;
use crate::repository::RepositoryError;
use crate::storage::StorageError;

/// Unified error type for CardLink operations.
#[derive(Error, Debug)]
pub enum CardLinkError {
    /// Business card validation failed.
    #[error("card error: {0}")]
    Card(#[from] CardError),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Contact repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Link encoding or decoding failed.
    #[error("deep link error: {0}")]
    DeepLink(#[from] DeepLinkError),

    /// QR rendering failed.
    #[error("qr error: {0}")]
    Qr(#[from] QrError),

    /// No own business card has been set up yet.
    #[error("own business card not set")]
    OwnCardMissing,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for CardLink operations.
pub type CardLinkResult<T> = Result<T, CardLinkError>;
