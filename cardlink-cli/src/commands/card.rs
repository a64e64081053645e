// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Card Command
//!
//! Create and edit your own business card.

use anyhow::{bail, Context, Result};
use cardlink_core::{BusinessCard, CardField, CardLink, FieldType, SharingLevel};

use crate::config::CliConfig;
use crate::display;

fn own_card(cardlink: &CardLink) -> Result<BusinessCard> {
    match cardlink.own_card()? {
        Some(card) => Ok(card),
        None => bail!("No business card yet. Create one with 'cardlink card init <name>'."),
    }
}

/// Creates your business card.
pub fn init(config: &CliConfig, name: &str) -> Result<()> {
    let cardlink = config.open()?;
    if cardlink.own_card()?.is_some() {
        bail!("You already have a business card. Use 'cardlink card edit-name' to rename it.");
    }

    let card = BusinessCard::new(name);
    cardlink.set_own_card(&card)?;
    display::success(&format!("Created business card for {}", name));
    Ok(())
}

/// Shows your business card and its default sharing level.
pub fn show(config: &CliConfig) -> Result<()> {
    let cardlink = config.open()?;
    let card = own_card(&cardlink)?;

    println!();
    display::display_card(&card);
    println!("  Default sharing level: {}", cardlink.default_level()?);
    println!();
    Ok(())
}

/// Adds a field to your card.
pub fn add(config: &CliConfig, field_type: &str, label: &str, value: &str) -> Result<()> {
    let field_type = FieldType::parse(field_type).with_context(|| {
        format!(
            "Unknown field type '{}'. Use phone, email, website, social, address or custom.",
            field_type
        )
    })?;

    let cardlink = config.open()?;
    let mut card = own_card(&cardlink)?;
    card.add_field(CardField::new(field_type, label, value))?;
    cardlink.set_own_card(&card)?;

    display::success(&format!(
        "Added {} (shared from the {} level up)",
        label,
        field_type.minimum_level()
    ));
    Ok(())
}

/// Removes a field by label.
pub fn remove(config: &CliConfig, label: &str) -> Result<()> {
    let cardlink = config.open()?;
    let mut card = own_card(&cardlink)?;

    let field_id = card
        .fields()
        .iter()
        .find(|f| f.label().eq_ignore_ascii_case(label))
        .map(|f| f.id().to_string())
        .with_context(|| format!("No field labelled '{}'", label))?;

    card.remove_field(&field_id)?;
    cardlink.set_own_card(&card)?;
    display::success(&format!("Removed {}", label));
    Ok(())
}

/// Changes your display name.
pub fn edit_name(config: &CliConfig, name: &str) -> Result<()> {
    let cardlink = config.open()?;
    let mut card = own_card(&cardlink)?;
    card.set_display_name(name)?;
    cardlink.set_own_card(&card)?;
    display::success(&format!("Display name set to {}", name));
    Ok(())
}

/// Sets or clears title and company.
pub fn set_headline(config: &CliConfig, title: Option<&str>, company: Option<&str>) -> Result<()> {
    let cardlink = config.open()?;
    let mut card = own_card(&cardlink)?;

    if let Some(title) = title {
        card.set_title(non_blank(title));
    }
    if let Some(company) = company {
        card.set_company(non_blank(company));
    }

    cardlink.set_own_card(&card)?;
    display::success("Card updated");
    Ok(())
}

/// Sets the level used when sharing without `--level`.
pub fn set_level(config: &CliConfig, level: SharingLevel) -> Result<()> {
    let cardlink = config.open()?;
    cardlink.set_default_level(level)?;
    display::success(&format!("Default sharing level set to {}", level));
    Ok(())
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
