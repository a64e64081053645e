// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Custom scheme URLs for in-app navigation.

use url::Url;

use super::DeepLinkError;

/// In-app destinations reachable through `<scheme>://<route>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Sharing,
    Contacts,
}

/// Builds `<scheme>://share/<path>?k=v&...` with a percent-encoded query.
pub fn build_scheme_url(
    scheme: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<String, DeepLinkError> {
    let mut url = Url::parse(&format!("{}://share/{}", scheme, path.trim_start_matches('/')))
        .map_err(|e| DeepLinkError::InvalidUrl(e.to_string()))?;

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter().copied());
    }

    Ok(url.into())
}

/// Recognizes navigation links like `cardlink://contacts`.
pub fn parse_route(link: &str, scheme: &str) -> Option<AppRoute> {
    let url = Url::parse(link.trim()).ok()?;
    if url.scheme() != scheme {
        return None;
    }

    match url.host_str()? {
        "sharing" => Some(AppRoute::Sharing),
        "contacts" => Some(AppRoute::Contacts),
        _ => None,
    }
}
