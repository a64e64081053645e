// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CardLink Core Library
//!
//! Digital business card exchange: received cards are kept as contacts in an
//! encrypted local store, and the user's own card is shared through deep
//! links and QR codes.
//! All cryptographic operations use audited crates (`ring`, `chacha20poly1305`).

pub mod api;
pub mod card;
pub mod contact;
pub mod crypto;
pub mod deeplink;
pub mod qr;
pub mod repository;
pub mod storage;

pub use api::{
    CallbackHandler, CardLink, CardLinkConfig, CardLinkError, CardLinkEvent, CardLinkResult,
    EventDispatcher, EventHandler,
};
pub use card::{
    BusinessCard, CardError, CardField, FieldType, SharingLevel, UnknownSharingLevel,
    ValidationError,
};
pub use contact::{Contact, ContactSource, ContactStatistics, VerificationStatus};
pub use crypto::{decrypt, encrypt, SymmetricKey};
pub use deeplink::{
    DecodedLink, DeepLinkAction, DeepLinkCodec, DeepLinkError, DeepLinkHandler, LinkConfig,
    LinkKind, LinkOrigin,
};
pub use qr::{render_qr, QrError};
pub use repository::{
    ContactRepository, EmptyQueryOrder, RepositoryConfig, RepositoryError, RepositoryResult,
};
pub use storage::{ContactStore, EncryptedStore, StorageError};
