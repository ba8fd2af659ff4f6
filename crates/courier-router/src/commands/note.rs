// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/note diary|inbox|pull|help`: git-backed notes.

use courier_core::{NoteCommand, NoteOperation, TaskPayload};

use super::{arg, rest};
use crate::error::RouteError;
use crate::help;
use crate::route::Route;

pub fn build(words: &[&str]) -> Result<Route, RouteError> {
    let sub = arg(words, 1).ok_or(RouteError::missing("note", "command"))?;
    let op = match sub {
        "diary" => {
            match arg(words, 2) {
                Some("entry" | "5bx") => {}
                _ => return Err(RouteError::missing("diary", "label")),
            }
            if rest(words, 3).trim().is_empty() {
                return Err(RouteError::missing("diary", "text"));
            }
            // The label stays in the text; the notes worker files by it.
            NoteOperation {
                command: NoteCommand::AddDiary,
                add_text: rest(words, 2),
            }
        }
        "inbox" => match arg(words, 2) {
            Some("add") => {
                let text = rest(words, 3);
                if text.trim().is_empty() {
                    return Err(RouteError::missing("inbox", "text"));
                }
                NoteOperation {
                    command: NoteCommand::AddInbox,
                    add_text: text,
                }
            }
            Some("read") => NoteOperation {
                command: NoteCommand::ReadInbox,
                add_text: String::new(),
            },
            _ => return Err(RouteError::missing("inbox", "label")),
        },
        "pull" => NoteOperation {
            command: NoteCommand::Pull,
            add_text: String::new(),
        },
        "help" => return Ok(Route::reply(help::NOTE)),
        _ => return Err(RouteError::UnknownSubcommand),
    };

    Ok(Route::Enqueue {
        payload: TaskPayload::Note(op),
        ack: "task note created",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(words: &[&str]) -> NoteOperation {
        match build(words) {
            Ok(Route::Enqueue {
                payload: TaskPayload::Note(op),
                ack: "task note created",
            }) => op,
            other => panic!("unexpected route {other:?}"),
        }
    }

    #[test]
    fn diary_keeps_label_in_text() {
        let got = op(&["/note", "diary", "5bx", "chart", "3"]);
        assert_eq!(got.command, NoteCommand::AddDiary);
        assert_eq!(got.add_text, "5bx chart 3");
    }

    #[test]
    fn diary_needs_label_and_text() {
        let err = |w: &[&str]| build(w).unwrap_err().to_string();
        assert_eq!(err(&["/note", "diary"]), "for diary need label");
        assert_eq!(err(&["/note", "diary", "poem", "x"]), "for diary need label");
        assert_eq!(err(&["/note", "diary", "entry"]), "for diary need text");
        assert_eq!(err(&["/note", "diary", "entry", ""]), "for diary need text");
    }

    #[test]
    fn inbox_add_and_read() {
        let add = op(&["/note", "inbox", "add", "buy", "milk"]);
        assert_eq!(add.command, NoteCommand::AddInbox);
        assert_eq!(add.add_text, "buy milk");

        let read = op(&["/note", "inbox", "read", "ignored"]);
        assert_eq!(read.command, NoteCommand::ReadInbox);
        assert!(read.add_text.is_empty());

        assert_eq!(
            build(&["/note", "inbox", "add"]).unwrap_err().to_string(),
            "for inbox need text"
        );
        assert_eq!(
            build(&["/note", "inbox"]).unwrap_err().to_string(),
            "for inbox need label"
        );
    }

    #[test]
    fn pull_help_and_unknown() {
        assert_eq!(op(&["/note", "pull"]).command, NoteCommand::Pull);
        assert_eq!(build(&["/note", "help"]).unwrap(), Route::Reply(help::NOTE.into()));
        assert_eq!(build(&["/note", "push"]).unwrap_err(), RouteError::UnknownSubcommand);
        assert_eq!(
            build(&["/note"]).unwrap_err().to_string(),
            "for note need command"
        );
    }
}
