// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the dialog and task tables.

pub mod dialogs;
pub mod tasks;
