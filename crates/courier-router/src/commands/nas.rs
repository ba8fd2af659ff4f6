// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/ds add|list|del|help`: NAS download station.

use courier_core::{NasCategory, NasOperation, TaskPayload};

use super::arg;
use crate::error::RouteError;
use crate::help;
use crate::route::Route;

pub fn build(words: &[&str], file_url: &str) -> Result<Route, RouteError> {
    let sub = arg(words, 1).ok_or(RouteError::missing("ds", "command"))?;
    let op = match sub {
        "add" => {
            let label = arg(words, 2).ok_or(RouteError::missing("ds add", "category"))?;
            let category = category_for(label)?;
            // An explicit link wins over an attachment.
            let torrent_url = arg(words, 3).unwrap_or(file_url);
            if torrent_url.is_empty() {
                return Err(RouteError::missing(
                    "ds add",
                    "torrent url or file attachment",
                ));
            }
            NasOperation::Add {
                category,
                torrent_url: torrent_url.to_string(),
            }
        }
        "list" => {
            if words.len() != 2 {
                return Err(RouteError::ListTakesNoArguments);
            }
            NasOperation::List
        }
        "del" | "delete" => {
            let task_id = arg(words, 2)
                .filter(|id| !id.is_empty())
                .ok_or(RouteError::missing("ds del", "task id"))?;
            NasOperation::Delete {
                task_id: task_id.to_string(),
            }
        }
        "help" => return Ok(Route::reply(help::NAS)),
        _ => return Err(RouteError::UnknownSubcommand),
    };

    Ok(Route::Enqueue {
        payload: TaskPayload::Nas(op),
        ack: "task syno created",
    })
}

fn category_for(label: &str) -> Result<NasCategory, RouteError> {
    match label {
        "m" | "movie" => Ok(NasCategory::Movie),
        "c" | "cartoon" => Ok(NasCategory::Cartoon),
        "s" | "shows" => Ok(NasCategory::Shows),
        "a" | "audiobook" => Ok(NasCategory::Audiobook),
        "o" | "other" => Ok(NasCategory::Other),
        "cs" | "shows_cartoons" => Ok(NasCategory::ShowsCartoons),
        _ => Err(RouteError::UnknownCategory(label.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(words: &[&str], file_url: &str) -> NasOperation {
        match build(words, file_url) {
            Ok(Route::Enqueue {
                payload: TaskPayload::Nas(op),
                ack: "task syno created",
            }) => op,
            other => panic!("unexpected route {other:?}"),
        }
    }

    #[test]
    fn explicit_url_wins_over_attachment() {
        assert_eq!(
            op(&["/ds", "add", "o", "magnet:?xt=1"], "https://f/a.torrent"),
            NasOperation::Add {
                category: NasCategory::Other,
                torrent_url: "magnet:?xt=1".into(),
            }
        );
        assert_eq!(
            op(&["/ds", "add", "cs"], "https://f/a.torrent"),
            NasOperation::Add {
                category: NasCategory::ShowsCartoons,
                torrent_url: "https://f/a.torrent".into(),
            }
        );
    }

    #[test]
    fn add_validation() {
        let err = |w: &[&str], f: &str| build(w, f).unwrap_err().to_string();
        assert_eq!(err(&["/ds", "add"], "u"), "for ds add need category");
        assert_eq!(err(&["/ds", "add", "x"], "u"), "unknown category: x");
        assert_eq!(
            err(&["/ds", "add", "movie"], ""),
            "for ds add need torrent url or file attachment"
        );
        assert_eq!(err(&["/ds"], ""), "for ds need command");
    }

    #[test]
    fn list_and_delete() {
        assert_eq!(op(&["/ds", "list"], ""), NasOperation::List);
        assert_eq!(
            build(&["/ds", "list", "x"], "").unwrap_err(),
            RouteError::ListTakesNoArguments
        );
        assert_eq!(
            op(&["/ds", "delete", "dbid_12"], ""),
            NasOperation::Delete {
                task_id: "dbid_12".into()
            }
        );
        assert_eq!(
            build(&["/ds", "del"], "").unwrap_err().to_string(),
            "for ds del need task id"
        );
    }

    #[test]
    fn help_and_unknown() {
        assert_eq!(build(&["/ds", "help"], "").unwrap(), Route::Reply(help::NAS.into()));
        assert_eq!(build(&["/ds", "pause"], "").unwrap_err(), RouteError::UnknownSubcommand);
    }
}
