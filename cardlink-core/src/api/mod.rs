// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CardLink API Layer
//!
//! High-level API for business card exchange.
//!
//! # Overview
//!
//! The API layer coordinates:
//! - The user's own card and how it is shared
//! - Receiving cards from links and QR codes
//! - Contact management
//! - Event handling
//!
//! # Module Structure
//!
//! - `error` - Error types for the API layer
//! - `config` - Configuration types
//! - [`events`] - Event system for callbacks
//! - `cardlink` - Main CardLink orchestrator

mod cardlink;
mod config;
mod error;
pub mod events;

// Error types
pub use error::{CardLinkError, CardLinkResult};

// Configuration
pub use config::CardLinkConfig;

// Events
pub use events::{CallbackHandler, CardLinkEvent, EventDispatcher, EventHandler};

// CardLink
pub use cardlink::{CardLink, Contacts};
