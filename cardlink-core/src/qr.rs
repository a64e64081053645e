// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! QR rendering for share links.

use qrcode::QrCode;
use thiserror::Error;

/// QR generation errors.
#[derive(Error, Debug)]
pub enum QrError {
    /// The data does not fit into any QR version.
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

/// Renders `data` as a QR code made of unicode blocks, one text line per module row.
pub fn render_qr(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data.as_bytes())?;

    Ok(code
        .render()
        .light_color(' ')
        .dark_color('█')
        .quiet_zone(false)
        .build())
}
