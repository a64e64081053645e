// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.

use proptest::prelude::*;

use cardlink_core::{BusinessCard, CardField, ContactSource, FieldType, SharingLevel};

/// Strategy for generating valid display names (non-empty, reasonable length).
pub fn display_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,49}"
        .prop_map(|s| s.trim().to_string())
        .prop_filter("non-empty", |s| !s.is_empty())
}

pub fn source_strategy() -> impl Strategy<Value = ContactSource> {
    prop_oneof![
        Just(ContactSource::QrCode),
        Just(ContactSource::Manual),
        Just(ContactSource::ShareLink),
        Just(ContactSource::AppClip),
        Just(ContactSource::Nfc),
    ]
}

pub fn level_strategy() -> impl Strategy<Value = SharingLevel> {
    prop_oneof![
        Just(SharingLevel::Public),
        Just(SharingLevel::Professional),
        Just(SharingLevel::Personal),
    ]
}

pub fn field_strategy() -> impl Strategy<Value = CardField> {
    prop_oneof![
        "[a-z]{3,10}".prop_map(|d| CardField::new(FieldType::Website, "Site", &format!("{}.dev", d))),
        ("[a-z]{3,10}", "[a-z]{2,8}").prop_map(|(u, d)| {
            CardField::new(FieldType::Email, "Work", &format!("{}@{}.org", u, d))
        }),
        "[0-9]{10,15}".prop_map(|n| CardField::new(FieldType::Phone, "Mobile", &format!("+{}", n))),
        "[a-zA-Z0-9 ]{1,40}".prop_map(|a| CardField::new(FieldType::Address, "Home", &format!("{} Road", a))),
        "[a-zA-Z0-9]{1,20}".prop_map(|v| CardField::new(FieldType::Custom, "Note", &v)),
    ]
}

/// Strategy for complete, valid business cards.
pub fn card_strategy() -> impl Strategy<Value = BusinessCard> {
    (
        display_name_strategy(),
        proptest::option::of("[a-zA-Z ]{1,30}"),
        proptest::collection::vec(field_strategy(), 0..8),
    )
        .prop_map(|(name, company, fields)| {
            let mut card = BusinessCard::new(&name);
            card.set_company(company.as_deref());
            for field in fields {
                card.add_field(field).unwrap();
            }
            card
        })
}

/// Repository operations for rollback properties.
#[derive(Clone, Debug)]
pub enum Op {
    Add { name: String, received_at: u64 },
    /// Updates the contact at `index % len`.
    Update { index: usize, note: String },
    /// Deletes the contact at `index % len`.
    Delete { index: usize },
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (display_name_strategy(), 0u64..1_000).prop_map(|(name, received_at)| Op::Add { name, received_at }),
        (any::<usize>(), "[a-z]{1,12}").prop_map(|(index, note)| Op::Update { index, note }),
        any::<usize>().prop_map(|index| Op::Delete { index }),
    ]
}
