// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Shared helpers, fixtures, and utilities used across test modules.

#![allow(dead_code)]

pub mod fixtures;
pub mod store;
pub mod strategies;
