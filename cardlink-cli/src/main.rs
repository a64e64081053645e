// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! CardLink CLI
//!
//! Command-line interface for CardLink - business card exchange over links and QR codes.

mod commands;
mod config;
mod display;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use cardlink_core::{ContactSource, LinkKind, SharingLevel, VerificationStatus};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use config::CliConfig;

#[derive(Parser)]
#[command(name = "cardlink")]
#[command(version, about = "Business card exchange over links and QR codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: platform data dir + /cardlink)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Domain used in share links
    #[arg(
        long,
        global = true,
        env = "CARDLINK_DOMAIN",
        default_value = "cardlink.app"
    )]
    domain: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage your business card
    #[command(subcommand)]
    Card(CardCommands),

    /// Print a link (or QR code) for your card
    Share {
        /// Sharing level (public, professional, personal); defaults to the card's level
        #[arg(long)]
        level: Option<SharingLevel>,

        /// Kind of link
        #[arg(long, value_enum, default_value_t = KindArg::Share)]
        kind: KindArg,

        /// Lifetime of temporary links in hours
        #[arg(long, default_value_t = 24)]
        hours: u32,

        /// Render the link as a QR code
        #[arg(long)]
        qr: bool,
    },

    /// Store a card from a link, card JSON or base64 payload
    Receive {
        /// The link or scanned text
        data: String,
    },

    /// Manage your contacts
    #[command(subcommand)]
    Contacts(ContactCommands),

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CardCommands {
    /// Create your business card
    Init {
        /// Your display name
        name: String,
    },

    /// Show your business card
    Show,

    /// Add a field to your card
    Add {
        /// Field type (phone, email, website, social, address, custom)
        #[arg(value_name = "TYPE")]
        field_type: String,

        /// Field label (e.g., "work", "mobile")
        label: String,

        /// Field value
        value: String,
    },

    /// Remove a field from your card
    Remove {
        /// Field label to remove
        label: String,
    },

    /// Edit your display name
    EditName {
        /// New display name
        name: String,
    },

    /// Set title and company (pass "" to clear)
    Headline {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },

    /// Set the default sharing level
    Level {
        /// public, professional or personal
        level: SharingLevel,
    },
}

#[derive(Subcommand)]
enum ContactCommands {
    /// List all contacts
    List,

    /// Show contact details
    Show {
        /// Contact ID, ID prefix or name
        id: String,
    },

    /// Search contacts
    Search {
        /// Search query
        query: String,
    },

    /// List contacts received through one channel
    Source {
        #[arg(value_enum)]
        source: SourceArg,
    },

    /// List contacts received recently
    Recent {
        /// Number of days to look back
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Remove a contact
    Remove {
        /// Contact ID, ID prefix or name
        id: String,
    },

    /// Add a tag to a contact
    Tag {
        /// Contact ID, ID prefix or name
        id: String,
        tag: String,
    },

    /// Remove a tag from a contact
    Untag {
        /// Contact ID, ID prefix or name
        id: String,
        tag: String,
    },

    /// List all tags
    Tags,

    /// Set notes on a contact (omit the text to clear)
    Note {
        /// Contact ID, ID prefix or name
        id: String,
        text: Option<String>,
    },

    /// Record a verification result
    Verify {
        /// Contact ID, ID prefix or name
        id: String,

        /// Mark verification as failed instead
        #[arg(long)]
        failed: bool,
    },

    /// List contacts by verification status
    Status {
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Show contact statistics
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Share,
    Clip,
    Temp,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Qr,
    Manual,
    Link,
    Clip,
    Nfc,
}

impl From<SourceArg> for ContactSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Qr => ContactSource::QrCode,
            SourceArg::Manual => ContactSource::Manual,
            SourceArg::Link => ContactSource::ShareLink,
            SourceArg::Clip => ContactSource::AppClip,
            SourceArg::Nfc => ContactSource::Nfc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Unverified,
    Verified,
    Failed,
}

impl From<StatusArg> for VerificationStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Unverified => VerificationStatus::Unverified,
            StatusArg::Verified => VerificationStatus::Verified,
            StatusArg::Failed => VerificationStatus::Failed,
        }
    }
}

fn link_kind(kind: KindArg, hours: u32) -> LinkKind {
    match kind {
        KindArg::Share => LinkKind::Share,
        KindArg::Clip => LinkKind::AppClip,
        KindArg::Temp => LinkKind::Temporary { hours },
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        display::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Resolve data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cardlink")
    });

    let config = CliConfig {
        data_dir,
        domain: cli.domain,
    };

    match cli.command {
        Commands::Card(cmd) => match cmd {
            CardCommands::Init { name } => commands::card::init(&config, &name)?,
            CardCommands::Show => commands::card::show(&config)?,
            CardCommands::Add {
                field_type,
                label,
                value,
            } => commands::card::add(&config, &field_type, &label, &value)?,
            CardCommands::Remove { label } => commands::card::remove(&config, &label)?,
            CardCommands::EditName { name } => commands::card::edit_name(&config, &name)?,
            CardCommands::Headline { title, company } => {
                commands::card::set_headline(&config, title.as_deref(), company.as_deref())?
            }
            CardCommands::Level { level } => commands::card::set_level(&config, level)?,
        },
        Commands::Share {
            level,
            kind,
            hours,
            qr,
        } => commands::share::share(&config, level, link_kind(kind, hours), qr)?,
        Commands::Receive { data } => commands::share::receive(&config, &data)?,
        Commands::Contacts(cmd) => match cmd {
            ContactCommands::List => commands::contacts::list(&config)?,
            ContactCommands::Show { id } => commands::contacts::show(&config, &id)?,
            ContactCommands::Search { query } => commands::contacts::search(&config, &query)?,
            ContactCommands::Source { source } => {
                commands::contacts::by_source(&config, source.into())?
            }
            ContactCommands::Recent { days } => commands::contacts::recent(&config, days)?,
            ContactCommands::Remove { id } => commands::contacts::remove(&config, &id)?,
            ContactCommands::Tag { id, tag } => commands::contacts::tag(&config, &id, &tag)?,
            ContactCommands::Untag { id, tag } => commands::contacts::untag(&config, &id, &tag)?,
            ContactCommands::Tags => commands::contacts::tags(&config)?,
            ContactCommands::Note { id, text } => {
                commands::contacts::note(&config, &id, text.as_deref())?
            }
            ContactCommands::Verify { id, failed } => {
                let status = if failed {
                    VerificationStatus::Failed
                } else {
                    VerificationStatus::Verified
                };
                commands::contacts::verify(&config, &id, status)?
            }
            ContactCommands::Status { status } => {
                commands::contacts::by_status(&config, status.into())?
            }
            ContactCommands::Stats => commands::contacts::stats(&config)?,
        },
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cardlink", &mut io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_share_arguments() {
        let cli = Cli::try_parse_from([
            "cardlink", "share", "--level", "work", "--kind", "temp", "--hours", "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Share {
                level, kind, hours, ..
            } => {
                assert_eq!(level, Some(SharingLevel::Professional));
                assert_eq!(link_kind(kind, hours), LinkKind::Temporary { hours: 2 });
            }
            _ => panic!("expected share command"),
        }
    }
}
