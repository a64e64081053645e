// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Fixtures

use std::time::{SystemTime, UNIX_EPOCH};

use cardlink_core::{BusinessCard, CardField, Contact, ContactSource, FieldType};

pub const DAY: u64 = 86_400;

pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// A card with one field for every sharing level.
pub fn full_card(name: &str) -> BusinessCard {
    let slug = name.to_lowercase().replace(' ', ".");
    let mut card = BusinessCard::new(name);
    card.set_title(Some("Engineer"));
    card.set_company(Some("Analytical Engines"));
    card.add_field(CardField::new(
        FieldType::Website,
        "Site",
        &format!("https://{}.dev", slug),
    ))
    .unwrap();
    card.add_field(CardField::new(
        FieldType::Email,
        "Work",
        &format!("{}@example.com", slug),
    ))
    .unwrap();
    card.add_field(CardField::new(FieldType::Phone, "Mobile", "+44 20 7946 0958"))
        .unwrap();
    card.add_field(CardField::new(FieldType::Address, "Home", "12 St James's Square, London"))
        .unwrap();
    card
}

pub fn contact(name: &str) -> Contact {
    Contact::new(BusinessCard::new(name), ContactSource::Manual)
}

pub fn contact_at(name: &str, source: ContactSource, received_at: u64) -> Contact {
    Contact::with_received_at(BusinessCard::new(name), source, received_at)
}

pub fn names(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.display_name()).collect()
}
