// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/finance run|load|transactions`: brokerage sync and reports.

use courier_core::{FinanceCommand, FinanceOperation, TaskPayload};

use super::arg;
use crate::error::RouteError;
use crate::route::Route;

pub fn build(words: &[&str]) -> Result<Route, RouteError> {
    let sub = arg(words, 1).ok_or(RouteError::missing("finance", "command"))?;
    let command = match sub {
        "run" | "r" => FinanceCommand::Run,
        "load" | "l" => FinanceCommand::Load,
        "transactions" | "t" => FinanceCommand::Transactions,
        _ => return Err(RouteError::UnknownSubcommand),
    };

    Ok(Route::Enqueue {
        payload: TaskPayload::Finance(FinanceOperation { command }),
        ack: "task finance created",
    })
}
