// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event System
//!
//! Callbacks for CardLink events.

use std::sync::{Arc, PoisonError, RwLock};

use crate::contact::ContactSource;

/// Events emitted by CardLink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLinkEvent {
    /// A contact was added.
    ContactAdded { contact_id: String },

    /// A contact was updated.
    ContactUpdated { contact_id: String },

    /// A contact was removed.
    ContactRemoved { contact_id: String },

    /// A card arrived through a link or scan and was stored.
    CardReceived {
        contact_id: String,
        card_id: String,
        source: ContactSource,
    },

    /// A user-visible failure.
    Error { message: String },
}

/// Event handler trait.
///
/// Implement this trait to receive CardLink events.
pub trait EventHandler: Send + Sync {
    fn on_event(&self, event: CardLinkEvent);
}

/// Simple callback-based event handler.
pub struct CallbackHandler<F>
where
    F: Fn(CardLinkEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(CardLinkEvent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(CardLinkEvent) + Send + Sync,
{
    fn on_event(&self, event: CardLinkEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
///
/// Handlers can be registered through a shared reference, so one dispatcher
/// is shared by every component that emits events.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler(&self, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    pub fn clear_handlers(&self) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: CardLinkEvent) {
        // Snapshot so handlers may register further handlers.
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for handler in handlers {
            handler.on_event(event.clone());
        }
    }
}
