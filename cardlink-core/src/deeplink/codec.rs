// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deep Link Codec
//!
//! Turns a business card into a shareable URL and back.
//!
//! Link formats (`card` is the base64 JSON payload, `level` the sharing level):
//! - Share:     `https://<domain>/share?card=..&level=..&v=1`
//! - App Clip:  `https://<domain>/clip?card=..&level=..&source=qr`
//! - Temporary: `https://<domain>/temp?card=..&level=..&expires=<unix seconds>`

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use url::Url;

use super::{DeepLinkError, LinkConfig};
use crate::card::{BusinessCard, SharingLevel, MAX_CARD_SIZE_BYTES};
use crate::contact::{now_timestamp, ContactSource};

/// Link format version written into share links.
const LINK_VERSION: &str = "1";

const SECONDS_PER_HOUR: u64 = 3_600;

/// Largest base64 payload accepted before decoding.
const MAX_PAYLOAD_CHARS: usize = MAX_CARD_SIZE_BYTES / 3 * 4 + 4;

/// Which URL shape to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// Regular share link.
    Share,
    /// Entry point for the lightweight companion experience.
    AppClip,
    /// Share link that stops working after `hours`.
    Temporary { hours: u32 },
}

/// Which predicate an incoming URL matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOrigin {
    BusinessCard,
    ShareLink,
    AppClip,
}

impl LinkOrigin {
    /// Source recorded on contacts created from this kind of link.
    pub fn contact_source(self) -> ContactSource {
        match self {
            LinkOrigin::BusinessCard => ContactSource::QrCode,
            LinkOrigin::ShareLink => ContactSource::ShareLink,
            LinkOrigin::AppClip => ContactSource::AppClip,
        }
    }
}

/// A successfully decoded link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedLink {
    pub card: BusinessCard,
    pub origin: LinkOrigin,
    /// Sharing level the sender declared, if recognizable.
    pub level: Option<SharingLevel>,
    pub expires_at: Option<u64>,
}

/// Stateless encoder/decoder for card links.
#[derive(Clone, Debug)]
pub struct DeepLinkCodec {
    config: LinkConfig,
}

impl DeepLinkCodec {
    pub fn new(config: LinkConfig) -> Self {
        DeepLinkCodec { config }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    // === Encoding ===

    /// Encodes `card`, filtered for `level`, as a link of the given kind.
    pub fn encode(
        &self,
        card: &BusinessCard,
        level: SharingLevel,
        kind: LinkKind,
    ) -> Result<String, DeepLinkError> {
        self.encode_at(card, level, kind, now_timestamp())
    }

    /// Like [`encode`](Self::encode), with `now` as the base for expiration.
    pub fn encode_at(
        &self,
        card: &BusinessCard,
        level: SharingLevel,
        kind: LinkKind,
        now: u64,
    ) -> Result<String, DeepLinkError> {
        let json = serde_json::to_vec(&card.filtered(level))
            .map_err(|e| DeepLinkError::Serialization(e.to_string()))?;
        let payload = STANDARD.encode(json);

        let path = match kind {
            LinkKind::Share => "share",
            LinkKind::AppClip => "clip",
            LinkKind::Temporary { .. } => "temp",
        };
        let mut url = Url::parse(&format!("https://{}/{}", self.config.domain, path))
            .map_err(|e| DeepLinkError::InvalidUrl(e.to_string()))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("card", &payload)
                .append_pair("level", level.as_str());
            match kind {
                LinkKind::Share => {
                    query.append_pair("v", LINK_VERSION);
                }
                LinkKind::AppClip => {
                    query.append_pair("source", "qr");
                }
                LinkKind::Temporary { hours } => {
                    let expires = now.saturating_add(u64::from(hours) * SECONDS_PER_HOUR);
                    query.append_pair("expires", &expires.to_string());
                }
            }
        }

        Ok(url.into())
    }

    // === Decoding ===

    /// Decodes an incoming link into a business card.
    pub fn decode(&self, link: &str) -> Result<DecodedLink, DeepLinkError> {
        self.decode_at(link, now_timestamp())
    }

    /// Like [`decode`](Self::decode), judging expiration against `now`.
    pub fn decode_at(&self, link: &str, now: u64) -> Result<DecodedLink, DeepLinkError> {
        let url = Url::parse(link.trim()).map_err(|e| DeepLinkError::InvalidUrl(e.to_string()))?;

        let origin = self
            .classify(&url)
            .ok_or_else(|| DeepLinkError::UnsupportedLink(url.to_string()))?;

        let mut payload = None;
        let mut level = None;
        let mut expires = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "card" | "data" if payload.is_none() => payload = Some(value.into_owned()),
                "level" => level = value.parse::<SharingLevel>().ok(),
                "expires" => {
                    let ts = value.parse::<u64>().map_err(|_| {
                        DeepLinkError::InvalidFormat(format!("bad expires value: {}", value))
                    })?;
                    expires = Some(ts);
                }
                _ => {}
            }
        }

        // Expiration wins over everything about the payload.
        if let Some(expired_at) = expires {
            if expired_at <= now {
                return Err(DeepLinkError::Expired { expired_at });
            }
        }

        let payload =
            payload.ok_or_else(|| DeepLinkError::InvalidFormat("missing card parameter".into()))?;
        let card = decode_payload(&payload)?;

        Ok(DecodedLink {
            card,
            origin,
            level,
            expires_at: expires,
        })
    }

    /// Parses scanned text that is not a URL as a card payload: raw JSON,
    /// or base64-wrapped JSON.
    pub fn decode_direct(&self, raw: &str) -> Result<BusinessCard, DeepLinkError> {
        let raw = raw.trim();
        match serde_json::from_str::<BusinessCard>(raw) {
            Ok(card) => validate(card),
            Err(_) => decode_payload(raw),
        }
    }

    /// Classifies a URL. Predicates overlap; they are checked in order
    /// business card, share link, app clip, and the first match wins.
    pub fn classify(&self, url: &Url) -> Option<LinkOrigin> {
        if self.is_business_card(url) {
            Some(LinkOrigin::BusinessCard)
        } else if is_share_link(url) {
            Some(LinkOrigin::ShareLink)
        } else if is_app_clip(url) {
            Some(LinkOrigin::AppClip)
        } else {
            None
        }
    }

    fn is_business_card(&self, url: &Url) -> bool {
        let custom_card_host =
            url.scheme() == self.config.app_scheme && url.host_str() == Some("card");
        custom_card_host || url.path().contains("/card")
    }
}

fn is_share_link(url: &Url) -> bool {
    let path = url.path();
    path.contains("/share") || path.contains("/temp")
}

fn is_app_clip(url: &Url) -> bool {
    url.path().contains("/clip")
        || url
            .host_str()
            .is_some_and(|host| host.starts_with("appclip."))
}

/// Decodes a base64 JSON payload into a validated card.
fn decode_payload(payload: &str) -> Result<BusinessCard, DeepLinkError> {
    if payload.len() > MAX_PAYLOAD_CHARS {
        return Err(DeepLinkError::InvalidFormat("payload too large".into()));
    }

    // An unescaped '+' in a hand-built query string arrives as a space.
    let payload = payload.replace(' ', "+");

    let bytes = STANDARD
        .decode(&payload)
        .or_else(|_| URL_SAFE_NO_PAD.decode(&payload))
        .or_else(|_| URL_SAFE.decode(&payload))
        .map_err(|e| DeepLinkError::InvalidFormat(format!("not base64: {}", e)))?;

    let card: BusinessCard = serde_json::from_slice(&bytes)
        .map_err(|e| DeepLinkError::InvalidFormat(format!("not a business card: {}", e)))?;
    validate(card)
}

fn validate(card: BusinessCard) -> Result<BusinessCard, DeepLinkError> {
    card.validate()
        .map_err(|e| DeepLinkError::InvalidFormat(e.to_string()))?;
    Ok(card)
}
