// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Contact repository errors.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A contact for this business card already exists.
    #[error("a contact for card {0} already exists")]
    Duplicate(String),

    /// No contact with this ID.
    #[error("contact not found: {0}")]
    NotFound(String),

    /// The store rejected the write; in-memory state was rolled back.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
