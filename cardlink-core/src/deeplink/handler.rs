// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep Link Handler
//!
//! Receives links and scanned text, stores decoded cards as contacts and
//! leaves one pending action for the front end to consume.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use url::Url;

use super::{parse_route, AppRoute, DeepLinkCodec, DeepLinkError};
use crate::api::{CardLinkEvent, EventDispatcher};
use crate::card::BusinessCard;
use crate::contact::{Contact, ContactSource};
use crate::repository::{ContactRepository, RepositoryError};
use crate::storage::ContactStore;

/// What the front end should do next. Consumed once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeepLinkAction {
    ShowReceivedCard(BusinessCard),
    ShowError { message: String, retryable: bool },
    NavigateToSharing,
    NavigateToContacts,
}

#[derive(Default)]
struct LinkSession {
    last_received: Option<BusinessCard>,
    pending: Option<DeepLinkAction>,
}

/// Routes incoming links into the contact repository.
pub struct DeepLinkHandler<S: ContactStore> {
    codec: DeepLinkCodec,
    repository: Arc<ContactRepository<S>>,
    events: Arc<EventDispatcher>,
    session: Mutex<LinkSession>,
}

impl<S: ContactStore> DeepLinkHandler<S> {
    pub fn new(
        codec: DeepLinkCodec,
        repository: Arc<ContactRepository<S>>,
        events: Arc<EventDispatcher>,
    ) -> Self {
        DeepLinkHandler {
            codec,
            repository,
            events,
            session: Mutex::new(LinkSession::default()),
        }
    }

    pub fn codec(&self) -> &DeepLinkCodec {
        &self.codec
    }

    fn session(&self) -> MutexGuard<'_, LinkSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles an incoming URL.
    ///
    /// Returns true once the link passed structural and expiration checks.
    /// The contact is added before this returns, but a repository failure
    /// (such as a duplicate) still yields true and is reported through the
    /// pending action and an [`CardLinkEvent::Error`] event.
    pub fn handle_url(&self, link: &str) -> bool {
        match parse_route(link, &self.codec.config().app_scheme) {
            Some(AppRoute::Sharing) => {
                self.set_pending(DeepLinkAction::NavigateToSharing);
                return true;
            }
            Some(AppRoute::Contacts) => {
                self.set_pending(DeepLinkAction::NavigateToContacts);
                return true;
            }
            None => {}
        }

        match self.codec.decode(link) {
            Ok(decoded) => {
                self.accept(decoded.card, decoded.origin.contact_source());
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejected deep link");
                self.report(link_error_message(&e), is_retryable(&e));
                false
            }
        }
    }

    /// Handles text read from a QR code: a URL when it parses as one,
    /// otherwise a raw card payload.
    pub fn handle_scanned_text(&self, text: &str) -> bool {
        if Url::parse(text.trim()).is_ok() {
            return self.handle_url(text);
        }

        match self.codec.decode_direct(text) {
            Ok(card) => {
                self.accept(card, ContactSource::QrCode);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejected scanned text");
                self.report(link_error_message(&e), true);
                false
            }
        }
    }

    /// Removes and returns the pending action.
    pub fn take_pending_action(&self) -> Option<DeepLinkAction> {
        self.session().pending.take()
    }

    /// The card most recently stored through this handler.
    pub fn last_received_card(&self) -> Option<BusinessCard> {
        self.session().last_received.clone()
    }

    fn accept(&self, card: BusinessCard, source: ContactSource) {
        let contact = Contact::new(card.clone(), source);
        let contact_id = contact.id().to_string();

        match self.repository.add(contact) {
            Ok(()) => {
                tracing::info!(contact_id = %contact_id, %source, "received business card");
                let card_id = card.id().to_string();
                {
                    let mut session = self.session();
                    session.last_received = Some(card.clone());
                    session.pending = Some(DeepLinkAction::ShowReceivedCard(card));
                }
                self.events.dispatch(CardLinkEvent::ContactAdded {
                    contact_id: contact_id.clone(),
                });
                self.events.dispatch(CardLinkEvent::CardReceived {
                    contact_id,
                    card_id,
                    source,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "storing received card failed");
                let retryable = matches!(e, RepositoryError::Persistence(_));
                self.report(repository_error_message(&e), retryable);
            }
        }
    }

    fn set_pending(&self, action: DeepLinkAction) {
        self.session().pending = Some(action);
    }

    fn report(&self, message: String, retryable: bool) {
        self.set_pending(DeepLinkAction::ShowError {
            message: message.clone(),
            retryable,
        });
        self.events.dispatch(CardLinkEvent::Error { message });
    }
}

fn is_retryable(error: &DeepLinkError) -> bool {
    !matches!(error, DeepLinkError::Expired { .. })
}

fn link_error_message(error: &DeepLinkError) -> String {
    match error {
        DeepLinkError::Expired { .. } => "This link has expired.".into(),
        DeepLinkError::InvalidFormat(_) => "This link does not contain a valid business card.".into(),
        DeepLinkError::UnsupportedLink(_) | DeepLinkError::InvalidUrl(_) => {
            "This link is not a CardLink link.".into()
        }
        DeepLinkError::Serialization(_) => "The card could not be read.".into(),
    }
}

fn repository_error_message(error: &RepositoryError) -> String {
    match error {
        RepositoryError::Duplicate(_) => "You already have this contact.".into(),
        RepositoryError::NotFound(_) => "Contact not found.".into(),
        RepositoryError::Persistence(_) => "The contact could not be saved.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_links_are_not_retryable() {
        assert!(!is_retryable(&DeepLinkError::Expired { expired_at: 1 }));
        assert!(is_retryable(&DeepLinkError::InvalidFormat("x".into())));
    }
}
