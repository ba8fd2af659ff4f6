// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the store contract, the engine, and the pollers.
//!
//! Status and type tags travel as plain integers on the wire and in SQLite,
//! so every tag enum here converts to and from `i64` and serializes as one.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Declares a fieldless enum whose wire form is an integer code.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        $(#[$meta])*
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant
            ),+
        }

        impl $name {
            /// Integer code used on the wire and in the database.
            pub fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.code()
            }
        }

        impl TryFrom<i64> for $name {
            type Error = String;

            fn try_from(code: i64) -> Result<Self, <Self as TryFrom<i64>>::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(format!(concat!("unknown ", stringify!($name), " code {}"), other)),
                }
            }
        }
    };
}

wire_enum! {
    /// The kind of work a task carries; each poller claims exactly one kind.
    ///
    /// Code 3 belonged to a retired REST worker and is never produced.
    #[derive(Display, EnumString)]
    #[strum(serialize_all = "snake_case")]
    pub enum TaskType {
        #[default]
        Undefined = 0,
        /// Outbound chat reply, delivered by the chat bridge.
        #[strum(serialize = "msg")]
        Message = 1,
        /// Video download into the podcast feed.
        #[strum(serialize = "ytdl")]
        Youtube = 2,
        /// Git-backed notes (diary, inbox).
        Note = 4,
        /// Transmission torrent management.
        Torrent = 5,
        /// Brokerage sync and reports.
        Finance = 6,
        /// NAS download-station management.
        #[strum(serialize = "ds")]
        Nas = 7,
    }
}

impl TaskType {
    /// Every type a poller can claim.
    pub const WORKERS: [TaskType; 6] = [
        TaskType::Message,
        TaskType::Youtube,
        TaskType::Note,
        TaskType::Torrent,
        TaskType::Finance,
        TaskType::Nas,
    ];
}

wire_enum! {
    /// Lifecycle of a task: `Create -> Sended -> {Done, Error}`.
    #[derive(Display)]
    #[strum(serialize_all = "snake_case")]
    pub enum TaskStatus {
        #[default]
        Undefined = 0,
        /// Queued, waiting for a poller.
        Create = 1,
        /// The worker failed; terminal.
        Error = 2,
        /// Claimed by a poller and handed out.
        Sended = 3,
        /// The worker finished; terminal.
        Done = 4,
    }
}

impl TaskStatus {
    /// Returns true for `Done` and `Error`.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Error)
    }

    /// Whether a task in this status may move to `next`.
    ///
    /// Status only moves forward; `Undefined` and `Create` are never targets.
    pub fn can_advance_to(self, next: TaskStatus) -> bool {
        match (self, next) {
            (TaskStatus::Create, TaskStatus::Sended | TaskStatus::Done | TaskStatus::Error) => true,
            (TaskStatus::Sended, TaskStatus::Done | TaskStatus::Error) => true,
            _ => false,
        }
    }
}

wire_enum! {
    /// Lifecycle of a dialog: `Begin -> {Error, Close}`.
    #[derive(Display)]
    #[strum(serialize_all = "snake_case")]
    pub enum DialogStatus {
        #[default]
        Undefined = 0,
        Error = 1,
        Begin = 2,
        Close = 100,
    }
}

impl DialogStatus {
    /// Begin is the only non-terminal status.
    pub fn is_terminal(self) -> bool {
        !matches!(self, DialogStatus::Begin | DialogStatus::Undefined)
    }
}

wire_enum! {
    /// Direction of a chat message.
    #[derive(Display)]
    #[strum(serialize_all = "snake_case")]
    pub enum MessageType {
        #[default]
        Undefined = 0,
        User = 1,
        Bot = 2,
    }
}
