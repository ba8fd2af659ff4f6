// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-command validation and payload construction.
//!
//! Each `build` receives the canonical token sequence, command head included.

pub mod finance;
pub mod health;
pub mod nas;
pub mod note;
pub mod torrent;
pub mod youtube;

/// The token at `index`, if present.
pub(crate) fn arg<'a>(words: &[&'a str], index: usize) -> Option<&'a str> {
    words.get(index).copied()
}

/// Tokens from `index` on, joined back with single spaces.
pub(crate) fn rest(words: &[&str], index: usize) -> String {
    words.get(index..).map(|w| w.join(" ")).unwrap_or_default()
}
