// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Allow-list of chat users the assistant answers to.

use std::collections::HashSet;

use courier_config::model::AccessConfig;

/// The set of user names allowed to issue commands.
///
/// Matching is exact and case-sensitive. An empty policy allows nobody.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    users: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &AccessConfig) -> Self {
        Self::new(config.allowed_users.iter().cloned())
    }

    pub fn allows(&self, user_name: &str) -> bool {
        self.users.contains(user_name)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
