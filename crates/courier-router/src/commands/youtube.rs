// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/y2d <link>`: queue a video download.

use courier_core::{TaskPayload, YoutubeDownload};
use url::Url;

use super::arg;
use crate::error::RouteError;
use crate::route::Route;

/// Hosts a download link may point at.
const ALLOWED_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "youtu.be"];

pub fn build(words: &[&str], user_name: &str) -> Result<Route, RouteError> {
    let link = arg(words, 1).ok_or(RouteError::missing("y2d", "a link"))?;
    Url::parse(link).map_err(|e| RouteError::InvalidUrl(e.to_string()))?;

    let host = authority_host(link);
    if !ALLOWED_HOSTS.contains(&host) {
        return Err(RouteError::NotYoutube(host.to_string()));
    }

    Ok(Route::Enqueue {
        payload: TaskPayload::Youtube(YoutubeDownload {
            link: link.to_string(),
            user_name: user_name.to_string(),
        }),
        ack: "task ytd created",
    })
}

/// The `host[:port]` part of `link` exactly as written.
///
/// `Url` lowercases the host and drops default ports, so the allow-list is
/// checked against the raw authority instead.
fn authority_host(link: &str) -> &str {
    let rest = link.split_once("://").map_or(link, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host)
}
