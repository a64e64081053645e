// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for deep link encoding, decoding and handling

mod common;

use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cardlink_core::*;
use common::fixtures::{full_card, now};
use common::store::FlakyStore;

const NOW: u64 = 1_750_000_000;

fn codec() -> DeepLinkCodec {
    DeepLinkCodec::new(LinkConfig::default())
}

// ============================================================
// Encoding
// ============================================================

#[test]
fn test_share_link_format() {
    let card = BusinessCard::new("Ada");
    let link = codec()
        .encode(&card, SharingLevel::Public, LinkKind::Share)
        .unwrap();

    assert!(link.starts_with("https://cardlink.app/share?card="));
    assert!(link.contains("&level=public"));
    assert!(link.ends_with("&v=1"));
}

#[test]
fn test_app_clip_link_format() {
    let link = codec()
        .encode(
            &BusinessCard::new("Ada"),
            SharingLevel::Professional,
            LinkKind::AppClip,
        )
        .unwrap();

    assert!(link.starts_with("https://cardlink.app/clip?card="));
    assert!(link.contains("&level=professional"));
    assert!(link.ends_with("&source=qr"));
}

#[test]
fn test_temporary_link_carries_expiry() {
    let link = codec()
        .encode_at(
            &BusinessCard::new("Ada"),
            SharingLevel::Public,
            LinkKind::Temporary { hours: 2 },
            NOW,
        )
        .unwrap();

    assert!(link.starts_with("https://cardlink.app/temp?card="));
    assert!(link.ends_with(&format!("&expires={}", NOW + 2 * 3600)));
}

#[test]
fn test_custom_domain() {
    let codec = DeepLinkCodec::new(LinkConfig::new().with_domain("cards.example.org"));
    let link = codec
        .encode(&BusinessCard::new("Ada"), SharingLevel::Public, LinkKind::Share)
        .unwrap();

    assert!(link.starts_with("https://cards.example.org/share?"));
    assert!(codec.decode(&link).is_ok());
}

// ============================================================
// Round trips
// ============================================================

#[test]
fn test_round_trip_yields_filtered_card() {
    let codec = codec();
    let card = full_card("Ada Lovelace");

    for level in SharingLevel::ALL {
        let link = codec.encode(&card, level, LinkKind::Share).unwrap();
        let decoded = codec.decode(&link).unwrap();

        assert_eq!(decoded.card, card.filtered(level));
        assert_eq!(decoded.level, Some(level));
        assert_eq!(decoded.origin, LinkOrigin::ShareLink);
        assert_eq!(decoded.expires_at, None);
    }
}

#[test]
fn test_public_link_hides_contact_details() {
    let codec = codec();
    let card = full_card("Ada Lovelace");

    let decoded = codec
        .decode(&codec.encode(&card, SharingLevel::Public, LinkKind::Share).unwrap())
        .unwrap();

    let types: Vec<FieldType> = decoded.card.fields().iter().map(|f| f.field_type()).collect();
    assert_eq!(types, vec![FieldType::Website]);
    assert_eq!(decoded.card.display_name(), "Ada Lovelace");
    assert_eq!(decoded.card.company(), Some("Analytical Engines"));
}

#[test]
fn test_app_clip_round_trip() {
    let codec = codec();
    let card = full_card("Ada Lovelace");
    let link = codec
        .encode(&card, SharingLevel::Personal, LinkKind::AppClip)
        .unwrap();

    let decoded = codec.decode(&link).unwrap();
    assert_eq!(decoded.origin, LinkOrigin::AppClip);
    assert_eq!(decoded.origin.contact_source(), ContactSource::AppClip);
    assert_eq!(decoded.card, card);
}

#[test]
fn test_temporary_link_valid_before_expiry() {
    let codec = codec();
    let card = BusinessCard::new("Ada");
    let link = codec
        .encode_at(&card, SharingLevel::Public, LinkKind::Temporary { hours: 1 }, NOW)
        .unwrap();

    let decoded = codec.decode_at(&link, NOW + 3599).unwrap();
    assert_eq!(decoded.expires_at, Some(NOW + 3600));
    assert_eq!(decoded.card, card);
}

// ============================================================
// Expiration
// ============================================================

#[test]
fn test_zero_hour_link_is_expired_immediately() {
    let codec = codec();
    let link = codec
        .encode(
            &BusinessCard::new("Ada"),
            SharingLevel::Public,
            LinkKind::Temporary { hours: 0 },
        )
        .unwrap();

    assert!(matches!(
        codec.decode(&link),
        Err(DeepLinkError::Expired { .. })
    ));
}

#[test]
fn test_expired_link_fails_at_expiry_time() {
    let codec = codec();
    let link = codec
        .encode_at(
            &BusinessCard::new("Ada"),
            SharingLevel::Public,
            LinkKind::Temporary { hours: 1 },
            NOW,
        )
        .unwrap();

    assert_eq!(
        codec.decode_at(&link, NOW + 3600),
        Err(DeepLinkError::Expired {
            expired_at: NOW + 3600
        })
    );
}

#[test]
fn test_expired_link_fails_regardless_of_payload() {
    let codec = codec();
    let past = now() - 60;

    for payload in ["not-base64!!", "", "e30"] {
        let link = format!(
            "https://cardlink.app/temp?card={}&level=public&expires={}",
            payload, past
        );
        assert_eq!(
            codec.decode(&link),
            Err(DeepLinkError::Expired { expired_at: past })
        );
    }

    // No payload at all
    let link = format!("https://cardlink.app/temp?expires={}", past);
    assert!(matches!(
        codec.decode(&link),
        Err(DeepLinkError::Expired { .. })
    ));
}

#[test]
fn test_malformed_expiry_is_invalid_format() {
    let link = "https://cardlink.app/temp?card=e30&expires=tomorrow";
    assert!(matches!(
        codec().decode(link),
        Err(DeepLinkError::InvalidFormat(_))
    ));
}

// ============================================================
// Decoding failures and variants
// ============================================================

#[test]
fn test_invalid_payload_is_invalid_format() {
    let codec = codec();

    for link in [
        "https://cardlink.app/share?card=%%%%&level=public",
        // Valid base64 of "hello", not a card
        "https://cardlink.app/share?card=aGVsbG8=&level=public",
        // Valid base64 of {}, missing required card fields
        "https://cardlink.app/share?card=e30=&level=public",
        "https://cardlink.app/share?level=public",
    ] {
        assert!(
            matches!(codec.decode(link), Err(DeepLinkError::InvalidFormat(_))),
            "{}",
            link
        );
    }
}

#[test]
fn test_card_with_empty_name_rejected() {
    let json = r#"{"id":"x","display_name":"  ","fields":[]}"#;
    let link = format!(
        "https://cardlink.app/share?card={}",
        STANDARD.encode(json)
    );
    assert!(matches!(
        codec().decode(&link),
        Err(DeepLinkError::InvalidFormat(_))
    ));
}

#[test]
fn test_unrecognized_urls() {
    let codec = codec();
    assert!(matches!(
        codec.decode("https://cardlink.app/about"),
        Err(DeepLinkError::UnsupportedLink(_))
    ));
    assert!(matches!(
        codec.decode("not a url"),
        Err(DeepLinkError::InvalidUrl(_))
    ));
}

#[test]
fn test_data_parameter_on_card_path() {
    let card = BusinessCard::new("Ada");
    let payload = STANDARD.encode(serde_json::to_vec(&card).unwrap());
    let mut url = url::Url::parse("https://cardlink.app/card").unwrap();
    url.query_pairs_mut().append_pair("data", &payload);

    let decoded = codec().decode(url.as_str()).unwrap();

    assert_eq!(decoded.origin, LinkOrigin::BusinessCard);
    assert_eq!(decoded.origin.contact_source(), ContactSource::QrCode);
    assert_eq!(decoded.level, None);
    assert_eq!(decoded.card, card);
}

#[test]
fn test_unescaped_plus_in_payload() {
    // Payloads whose base64 contains '+' survive a hand-built query string.
    let mut card = BusinessCard::with_id("id", "Ada");
    card.set_title(Some(">>>>"));
    let payload = STANDARD.encode(serde_json::to_vec(&card).unwrap());
    assert!(payload.contains('+'));

    let link = format!("https://cardlink.app/share?card={}", payload);
    assert_eq!(codec().decode(&link).unwrap().card, card);
}

#[test]
fn test_unknown_level_is_ignored() {
    let card = BusinessCard::new("Ada");
    let link = codec()
        .encode(&card, SharingLevel::Public, LinkKind::Share)
        .unwrap()
        .replace("level=public", "level=secret");

    let decoded = codec().decode(&link).unwrap();
    assert_eq!(decoded.level, None);
    assert_eq!(decoded.card, card);
}

#[test]
fn test_decode_direct_json_and_base64() {
    let codec = codec();
    let card = full_card("Ada Lovelace");
    let json = serde_json::to_string(&card).unwrap();

    assert_eq!(codec.decode_direct(&json).unwrap(), card);
    assert_eq!(codec.decode_direct(&STANDARD.encode(&json)).unwrap(), card);
    assert!(matches!(
        codec.decode_direct("hello there"),
        Err(DeepLinkError::InvalidFormat(_))
    ));
}

// ============================================================
// Custom scheme
// ============================================================

#[test]
fn test_scheme_url_builder() {
    let url = deeplink::build_scheme_url("cardlink", "qr", &[("level", "public")]).unwrap();
    assert_eq!(url, "cardlink://share/qr?level=public");
}

// ============================================================
// Handler
// ============================================================

struct HandlerFixture {
    handler: DeepLinkHandler<FlakyStore>,
    repository: Arc<ContactRepository<FlakyStore>>,
    store: FlakyStore,
    events: Arc<Mutex<Vec<CardLinkEvent>>>,
}

fn handler() -> HandlerFixture {
    let store = FlakyStore::new();
    let repository = Arc::new(ContactRepository::new(store.clone()));
    let dispatcher = Arc::new(EventDispatcher::new());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    dispatcher.add_handler(Arc::new(CallbackHandler::new(move |event| {
        sink.lock().unwrap().push(event);
    })));

    HandlerFixture {
        handler: DeepLinkHandler::new(codec(), Arc::clone(&repository), dispatcher),
        repository,
        store,
        events,
    }
}

#[test]
fn test_handler_stores_received_card() {
    let fx = handler();
    let card = full_card("Ada Lovelace");
    let link = codec()
        .encode(&card, SharingLevel::Professional, LinkKind::Share)
        .unwrap();

    assert!(fx.handler.handle_url(&link));

    let filtered = card.filtered(SharingLevel::Professional);
    let contacts = fx.repository.get_all();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].business_card(), &filtered);
    assert_eq!(contacts[0].source(), ContactSource::ShareLink);
    assert_eq!(
        contacts[0].verification_status(),
        VerificationStatus::Unverified
    );

    assert_eq!(
        fx.handler.take_pending_action(),
        Some(DeepLinkAction::ShowReceivedCard(filtered.clone()))
    );
    // Consumed once
    assert_eq!(fx.handler.take_pending_action(), None);
    assert_eq!(fx.handler.last_received_card(), Some(filtered));

    let events = fx.events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            CardLinkEvent::ContactAdded {
                contact_id: contacts[0].id().to_string()
            },
            CardLinkEvent::CardReceived {
                contact_id: contacts[0].id().to_string(),
                card_id: card.id().to_string(),
                source: ContactSource::ShareLink,
            },
        ]
    );
}

#[test]
fn test_handler_duplicate_still_returns_true() {
    let fx = handler();
    let link = codec()
        .encode(&BusinessCard::new("Ada"), SharingLevel::Public, LinkKind::Share)
        .unwrap();

    assert!(fx.handler.handle_url(&link));
    fx.handler.take_pending_action();

    assert!(fx.handler.handle_url(&link));
    assert_eq!(fx.repository.len(), 1);
    assert!(matches!(
        fx.handler.take_pending_action(),
        Some(DeepLinkAction::ShowError {
            retryable: false,
            ..
        })
    ));
    assert!(matches!(
        fx.events.lock().unwrap().last(),
        Some(CardLinkEvent::Error { .. })
    ));
}

#[test]
fn test_handler_reports_persistence_failure() {
    let fx = handler();
    fx.store.fail_next_save();
    let link = codec()
        .encode(&BusinessCard::new("Ada"), SharingLevel::Public, LinkKind::AppClip)
        .unwrap();

    assert!(fx.handler.handle_url(&link));
    assert!(fx.repository.is_empty());
    assert_eq!(fx.handler.last_received_card(), None);
    assert!(matches!(
        fx.handler.take_pending_action(),
        Some(DeepLinkAction::ShowError {
            retryable: true,
            ..
        })
    ));
}

#[test]
fn test_handler_rejects_expired_link() {
    let fx = handler();
    let link = codec()
        .encode(
            &BusinessCard::new("Ada"),
            SharingLevel::Public,
            LinkKind::Temporary { hours: 0 },
        )
        .unwrap();

    assert!(!fx.handler.handle_url(&link));
    assert!(fx.repository.is_empty());
    assert_eq!(
        fx.handler.take_pending_action(),
        Some(DeepLinkAction::ShowError {
            message: "This link has expired.".into(),
            retryable: false,
        })
    );
    assert_eq!(
        *fx.events.lock().unwrap(),
        vec![CardLinkEvent::Error {
            message: "This link has expired.".into()
        }]
    );
}

#[test]
fn test_handler_navigation_links() {
    let fx = handler();

    assert!(fx.handler.handle_url("cardlink://contacts"));
    assert_eq!(
        fx.handler.take_pending_action(),
        Some(DeepLinkAction::NavigateToContacts)
    );

    assert!(fx.handler.handle_url("cardlink://sharing"));
    assert_eq!(
        fx.handler.take_pending_action(),
        Some(DeepLinkAction::NavigateToSharing)
    );
    assert!(fx.events.lock().unwrap().is_empty());
}

#[test]
fn test_handler_scanned_text() {
    let fx = handler();
    let card = BusinessCard::new("Ada");

    // Raw JSON from a QR code
    assert!(fx
        .handler
        .handle_scanned_text(&serde_json::to_string(&card).unwrap()));
    let contact = fx.repository.get_by_card_id(card.id()).unwrap();
    assert_eq!(contact.source(), ContactSource::QrCode);

    // A URL goes through link decoding
    let other = BusinessCard::new("Grace");
    let link = codec()
        .encode(&other, SharingLevel::Public, LinkKind::AppClip)
        .unwrap();
    assert!(fx.handler.handle_scanned_text(&link));
    assert_eq!(
        fx.repository.get_by_card_id(other.id()).unwrap().source(),
        ContactSource::AppClip
    );

    // Garbage
    assert!(!fx.handler.handle_scanned_text("hello there"));
    assert!(matches!(
        fx.handler.take_pending_action(),
        Some(DeepLinkAction::ShowError {
            retryable: true,
            ..
        })
    ));
}
