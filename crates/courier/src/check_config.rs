// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier check-config` command implementation.

use courier_config::CourierConfig;
use courier_core::CourierError;

const REDACTED: &str = "[redacted]";

/// Prints the effective configuration as TOML with secrets redacted.
pub fn run_check_config(config: &CourierConfig) -> Result<(), CourierError> {
    println!("{}", render(config)?);
    Ok(())
}

fn render(config: &CourierConfig) -> Result<String, CourierError> {
    let mut shown = config.clone();
    for secret in &mut shown.server.secrets {
        *secret = REDACTED.to_string();
    }
    if shown.client.secret.is_some() {
        shown.client.secret = Some(REDACTED.to_string());
    }
    toml::to_string_pretty(&shown).map_err(|e| CourierError::Config(e.to_string()))
}
