// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contacts Command
//!
//! List, view, and manage received contacts.

use anyhow::{bail, Result};
use cardlink_core::api::Contacts;
use cardlink_core::{Contact, ContactSource, VerificationStatus};

use crate::config::CliConfig;
use crate::display;

/// Finds a contact by full ID, ID prefix, or name.
fn find_contact(contacts: &Contacts, query: &str) -> Result<Contact> {
    if let Ok(contact) = contacts.get(query) {
        return Ok(contact);
    }

    let all = contacts.get_all();
    let by_prefix: Vec<&Contact> = all.iter().filter(|c| c.id().starts_with(query)).collect();
    match by_prefix.as_slice() {
        [contact] => return Ok((*contact).clone()),
        [] => {}
        _ => bail!("'{}' matches several contacts, use a longer ID", query),
    }

    let needle = query.to_lowercase();
    let by_name: Vec<&Contact> = all
        .iter()
        .filter(|c| c.display_name().to_lowercase() == needle)
        .collect();
    match by_name.as_slice() {
        [contact] => Ok((*contact).clone()),
        [] => bail!("Contact '{}' not found", query),
        _ => bail!("Several contacts are named '{}', use the ID instead", query),
    }
}

fn print_list(title: &str, contacts: &[Contact], empty: &str) {
    if contacts.is_empty() {
        display::info(empty);
    } else {
        display::display_contacts(title, contacts);
    }
}

/// Lists all contacts.
pub fn list(config: &CliConfig) -> Result<()> {
    let cardlink = config.open()?;
    let contacts = cardlink.contacts().get_all();

    if contacts.is_empty() {
        display::info("No contacts yet. Receive a card with:");
        println!("  cardlink receive <link>");
        return Ok(());
    }

    display::display_contacts("Contacts", &contacts);
    Ok(())
}

/// Shows details for a specific contact.
pub fn show(config: &CliConfig, id: &str) -> Result<()> {
    let cardlink = config.open()?;
    let contact = find_contact(cardlink.contacts(), id)?;
    display::display_contact_details(&contact);
    Ok(())
}

/// Searches contacts by query.
pub fn search(config: &CliConfig, query: &str) -> Result<()> {
    let cardlink = config.open()?;
    let results = cardlink.contacts().search(query);
    print_list(
        &format!("Search results for '{}'", query),
        &results,
        &format!("No contacts matching '{}'", query),
    );
    Ok(())
}

/// Lists contacts received through one channel.
pub fn by_source(config: &CliConfig, source: ContactSource) -> Result<()> {
    let cardlink = config.open()?;
    let results = cardlink.contacts().get_by_source(source);
    print_list(
        &format!("Received via {}", source),
        &results,
        &format!("No contacts received via {}", source),
    );
    Ok(())
}

/// Lists contacts with a verification status.
pub fn by_status(config: &CliConfig, status: VerificationStatus) -> Result<()> {
    let cardlink = config.open()?;
    let results = cardlink.contacts().get_by_verification_status(status);
    print_list(
        &format!("Contacts {}", status),
        &results,
        &format!("No {} contacts", status),
    );
    Ok(())
}

/// Lists contacts received in the last `days` days.
pub fn recent(config: &CliConfig, days: u32) -> Result<()> {
    let cardlink = config.open()?;
    let results = cardlink.contacts().get_recent(days);
    print_list(
        &format!("Received in the last {} day(s)", days),
        &results,
        &format!("Nothing received in the last {} day(s)", days),
    );
    Ok(())
}

/// Removes a contact.
pub fn remove(config: &CliConfig, id: &str) -> Result<()> {
    let cardlink = config.open()?;
    let contact = find_contact(cardlink.contacts(), id)?;
    let removed = cardlink.delete_contact(contact.id())?;
    display::success(&format!("Removed contact: {}", removed.display_name()));
    Ok(())
}

/// Adds a tag to a contact.
pub fn tag(config: &CliConfig, id: &str, tag: &str) -> Result<()> {
    let cardlink = config.open()?;
    let contact = find_contact(cardlink.contacts(), id)?;

    let mut added = false;
    cardlink.modify_contact(contact.id(), |c| added = c.add_tag(tag))?;

    if added {
        display::success(&format!("Tagged {} with '{}'", contact.display_name(), tag.trim()));
    } else {
        display::warning("Tag is blank or already present");
    }
    Ok(())
}

/// Removes a tag from a contact.
pub fn untag(config: &CliConfig, id: &str, tag: &str) -> Result<()> {
    let cardlink = config.open()?;
    let contact = find_contact(cardlink.contacts(), id)?;

    if !contact.has_tag(tag.trim()) {
        display::warning(&format!("{} has no tag '{}'", contact.display_name(), tag));
        return Ok(());
    }

    cardlink.modify_contact(contact.id(), |c| {
        c.remove_tag(tag);
    })?;
    display::success(&format!("Removed tag '{}'", tag.trim()));
    Ok(())
}

/// Lists every tag in use.
pub fn tags(config: &CliConfig) -> Result<()> {
    let cardlink = config.open()?;
    let tags = cardlink.contacts().get_all_tags();

    if tags.is_empty() {
        display::info("No tags yet");
    } else {
        for tag in tags {
            println!("  {}", tag);
        }
    }
    Ok(())
}

/// Sets or clears the notes on a contact.
pub fn note(config: &CliConfig, id: &str, text: Option<&str>) -> Result<()> {
    let cardlink = config.open()?;
    let contact = find_contact(cardlink.contacts(), id)?;
    cardlink.modify_contact(contact.id(), |c| c.set_notes(text))?;
    display::success("Notes saved");
    Ok(())
}

/// Records the outcome of verifying a contact.
pub fn verify(config: &CliConfig, id: &str, status: VerificationStatus) -> Result<()> {
    let cardlink = config.open()?;
    let contact = find_contact(cardlink.contacts(), id)?;
    cardlink.modify_contact(contact.id(), |c| c.set_verification_status(status))?;
    display::success(&format!("{} marked {}", contact.display_name(), status));
    Ok(())
}

/// Prints contact statistics.
pub fn stats(config: &CliConfig) -> Result<()> {
    let cardlink = config.open()?;
    display::display_statistics(&cardlink.contacts().statistics());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardlink_core::{BusinessCard, CardLink};

    fn add(cardlink: &CardLink, name: &str) -> Contact {
        cardlink
            .add_contact(BusinessCard::new(name), ContactSource::Manual)
            .unwrap()
    }

    #[test]
    fn test_find_contact_by_id_prefix_and_name() {
        let cardlink = CardLink::in_memory().unwrap();
        let ada = add(&cardlink, "Ada Lovelace");
        add(&cardlink, "Grace Hopper");

        let contacts = cardlink.contacts();
        assert_eq!(find_contact(contacts, ada.id()).unwrap(), ada);
        assert_eq!(find_contact(contacts, &ada.id()[..8]).unwrap(), ada);
        assert_eq!(find_contact(contacts, "ada lovelace").unwrap(), ada);
        assert!(find_contact(contacts, "Alan Turing").is_err());
    }

    #[test]
    fn test_find_contact_rejects_ambiguous_names() {
        let cardlink = CardLink::in_memory().unwrap();
        add(&cardlink, "Sam");
        add(&cardlink, "Sam");

        assert!(find_contact(cardlink.contacts(), "Sam").is_err());
    }
}
