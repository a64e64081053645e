// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display Helpers
//!
//! Terminal output formatting and styling.

use console::{style, Style};
use cardlink_core::{BusinessCard, Contact, ContactStatistics, FieldType, VerificationStatus};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

fn field_icon(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Email => "mail",
        FieldType::Phone => "phone",
        FieldType::Website => "web",
        FieldType::Address => "home",
        FieldType::Social => "share",
        FieldType::Custom => "note",
    }
}

fn print_fields(card: &BusinessCard) {
    if card.fields().is_empty() {
        println!("  {}", style("(no fields)").dim());
        return;
    }

    let label_style = Style::new().dim();
    for field in card.fields() {
        println!(
            "  {:6} {:12} {}",
            field_icon(field.field_type()),
            label_style.apply_to(field.label()),
            field.value()
        );
    }
}

/// Displays a business card in a formatted box.
pub fn display_card(card: &BusinessCard) {
    let width = 40;

    println!("{}", "─".repeat(width));
    println!("  {}", style(card.display_name()).bold().cyan());
    let headline: Vec<&str> = [card.title(), card.company()].into_iter().flatten().collect();
    if !headline.is_empty() {
        println!("  {}", headline.join(" · "));
    }
    println!("{}", "─".repeat(width));
    print_fields(card);
    println!("{}", "─".repeat(width));
}

fn verification_badge(status: VerificationStatus) -> console::StyledObject<&'static str> {
    match status {
        VerificationStatus::Verified => style("✓ verified").green(),
        VerificationStatus::Failed => style("✗ verification failed").red(),
        VerificationStatus::Unverified => style("").dim(),
    }
}

/// Displays a contact in a compact format.
pub fn display_contact_summary(contact: &Contact, index: usize) {
    println!(
        "  {}. {}  {} {}",
        index,
        style(contact.display_name()).bold(),
        style(short_id(contact.id())).dim(),
        verification_badge(contact.verification_status())
    );
}

/// Displays a contact with full details.
pub fn display_contact_details(contact: &Contact) {
    println!();
    display_card(contact.business_card());
    println!("  ID:       {}", style(contact.id()).dim());
    println!("  Source:   {}", contact.source());
    println!("  Received: {}", contact.received_at());
    println!("  Status:   {}", contact.verification_status());
    if !contact.tags().is_empty() {
        let tags: Vec<&str> = contact.tags().iter().map(String::as_str).collect();
        println!("  Tags:     {}", tags.join(", "));
    }
    if let Some(notes) = contact.notes() {
        println!("  Notes:    {}", notes);
    }
    println!();
}

pub fn display_contacts(title: &str, contacts: &[Contact]) {
    println!();
    println!("{} ({}):", title, contacts.len());
    println!();
    for (i, contact) in contacts.iter().enumerate() {
        display_contact_summary(contact, i + 1);
    }
    println!();
}

pub fn display_statistics(stats: &ContactStatistics) {
    println!();
    println!("  {} {}", style("Contacts:").bold(), stats.total);
    for (source, count) in &stats.by_source {
        println!("    {:12} {}", source.to_string(), count);
    }
    println!("  {}", style("Verification:").bold());
    for (status, count) in &stats.by_verification {
        println!("    {:12} {}", status.to_string(), count);
    }
    println!("  {} {}", style("Tags:").bold(), stats.distinct_tags);
    println!();
}

/// First eight characters of an ID, enough to pick a contact on the command line.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
