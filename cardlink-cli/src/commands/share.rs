// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Share and Receive Commands

use anyhow::{bail, Result};
use cardlink_core::{render_qr, DeepLinkAction, LinkKind, SharingLevel};
use console::style;

use crate::config::CliConfig;
use crate::display;

/// Prints a share link for your card, optionally as a QR code.
pub fn share(
    config: &CliConfig,
    level: Option<SharingLevel>,
    kind: LinkKind,
    qr: bool,
) -> Result<()> {
    let cardlink = config.open()?;
    let link = cardlink.share_link(level, kind)?;

    println!();
    if qr {
        println!("Scan this QR code with another CardLink user:");
        println!();
        println!("{}", render_qr(&link)?);
        println!();
        println!("Or share this link:");
    }
    println!("{}", style(&link).cyan());
    if let LinkKind::Temporary { hours } = kind {
        display::info(&format!("This link expires in {} hour(s).", hours));
    }
    println!();
    Ok(())
}

/// Accepts a link, raw card JSON or base64 payload and stores the card.
pub fn receive(config: &CliConfig, data: &str) -> Result<()> {
    let cardlink = config.open()?;
    cardlink.receive(data);

    match cardlink.take_pending_action() {
        Some(DeepLinkAction::ShowReceivedCard(card)) => {
            display::success(&format!("Received card from {}", card.display_name()));
            println!();
            display::display_card(&card);
        }
        Some(DeepLinkAction::ShowError { message, retryable }) => {
            if retryable {
                display::info("Check the link and try again.");
            }
            bail!(message);
        }
        Some(DeepLinkAction::NavigateToContacts) => {
            display::info("Link opens your contacts: run 'cardlink contacts list'.");
        }
        Some(DeepLinkAction::NavigateToSharing) => {
            display::info("Link opens sharing: run 'cardlink share'.");
        }
        None => {}
    }
    Ok(())
}
