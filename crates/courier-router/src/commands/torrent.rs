// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/torrent add|del|list|help`: Transmission management.

use courier_core::{TaskPayload, TorrentFolder, TorrentOperation};

use super::arg;
use crate::error::RouteError;
use crate::help;
use crate::route::Route;

pub fn build(words: &[&str], file_url: &str) -> Result<Route, RouteError> {
    let sub = arg(words, 1).ok_or(RouteError::missing("tr", "command"))?;
    let op = match sub {
        "add" => {
            let label = arg(words, 2).ok_or(RouteError::missing("tr add", "label"))?;
            let folder_path = folder_for(label)?;
            if file_url.is_empty() {
                return Err(RouteError::missing("tr add", "torrent url"));
            }
            TorrentOperation::Add {
                folder_path,
                torrent_url: file_url.to_string(),
            }
        }
        "del" => {
            let id = arg(words, 2).ok_or(RouteError::missing("tr del", "id"))?;
            let torrent_id = id.parse::<i64>().map_err(|_| RouteError::IdNotAnInt)?;
            TorrentOperation::Del { torrent_id }
        }
        "list" => {
            if words.len() != 2 {
                return Err(RouteError::ListTakesNoArguments);
            }
            TorrentOperation::List
        }
        "help" => return Ok(Route::reply(help::TORRENT)),
        _ => return Err(RouteError::CommandNotFound),
    };

    Ok(Route::Enqueue {
        payload: TaskPayload::Torrent(op),
        ack: "task tr created",
    })
}

fn folder_for(label: &str) -> Result<TorrentFolder, RouteError> {
    match label {
        "m" | "movie" => Ok(TorrentFolder::Movie),
        "s" | "shows" => Ok(TorrentFolder::Shows),
        "c" | "cartoon" => Ok(TorrentFolder::Cartoon),
        "a" | "audiobook" => Ok(TorrentFolder::Audiobook),
        "ap" | "audiobook_p" => Ok(TorrentFolder::AudiobookP),
        "cs" | "cartoon_s" => Ok(TorrentFolder::CartoonS),
        _ => Err(RouteError::WrongLabel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(route: Route) -> TorrentOperation {
        match route {
            Route::Enqueue {
                payload: TaskPayload::Torrent(op),
                ack,
            } => {
                assert_eq!(ack, "task tr created");
                op
            }
            other => panic!("unexpected route {other:?}"),
        }
    }

    #[test]
    fn add_uses_attached_file() {
        let got = op(build(&["/torrent", "add", "ap"], "https://f/x.torrent").unwrap());
        assert_eq!(
            got,
            TorrentOperation::Add {
                folder_path: TorrentFolder::AudiobookP,
                torrent_url: "https://f/x.torrent".into(),
            }
        );
    }

    #[test]
    fn add_validation() {
        let err = |w: &[&str], f: &str| build(w, f).unwrap_err().to_string();
        assert_eq!(err(&["/torrent", "add"], "u"), "for tr add need label");
        assert_eq!(err(&["/torrent", "add", "zz"], "u"), "wrong label");
        assert_eq!(err(&["/torrent", "add", "m"], ""), "for tr add need torrent url");
    }

    #[test]
    fn del_requires_integer_id() {
        assert_eq!(
            op(build(&["/torrent", "del", "17"], "").unwrap()),
            TorrentOperation::Del { torrent_id: 17 }
        );
        assert_eq!(
            build(&["/torrent", "del"], "").unwrap_err().to_string(),
            "for tr del need id"
        );
        assert_eq!(
            build(&["/torrent", "del", "x1"], "").unwrap_err(),
            RouteError::IdNotAnInt
        );
    }

    #[test]
    fn list_takes_no_arguments() {
        assert_eq!(op(build(&["/torrent", "list"], "").unwrap()), TorrentOperation::List);
        assert_eq!(
            build(&["/torrent", "list", "all"], "").unwrap_err(),
            RouteError::ListTakesNoArguments
        );
    }

    #[test]
    fn help_and_unknown() {
        assert_eq!(
            build(&["/torrent", "help"], "").unwrap(),
            Route::Reply(help::TORRENT.into())
        );
        assert_eq!(build(&["/torrent", "pause"], "").unwrap_err(), RouteError::CommandNotFound);
        assert_eq!(
            build(&["/torrent"], "").unwrap_err().to_string(),
            "for tr need command"
        );
    }
}
