// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alias expansion.
//!
//! Chat users type short forms (`y`, `nd`, `dsm`). Every alias is rewritten
//! here into the canonical token sequence of its full command, so dispatch
//! only ever sees canonical heads.

/// Rewrites the head of `tokens` into canonical form.
///
/// Tokens after the expanded prefix are kept unchanged, except for the
/// download-station list shortcut, which drops them. Unknown heads pass
/// through untouched.
pub fn normalize<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let Some((head, rest)) = tokens.split_first() else {
        return Vec::new();
    };

    let prefix: &[&'static str] = match *head {
        "/help" | "h" | "H" => &["/help"],
        "/ping" | "ping" | "Ping" => &["/ping"],
        "/y2d" | "y" | "Y" => &["/y2d"],
        "/torrent" | "torrent" | "t" | "T" => &["/torrent"],

        "/note" | "note" | "n" | "N" => &["/note"],
        "nd" | "Nd" => &["/note", "diary", "entry"],
        "n5" | "N5" => &["/note", "diary", "5bx"],
        "ni" | "Ni" => &["/note", "inbox", "add"],
        "nir" | "Nir" => &["/note", "inbox", "read"],

        "/ds" => &["/ds"],
        "dsm" | "Dsm" => &["/ds", "add", "movie"],
        "dsc" | "Dsc" => &["/ds", "add", "cartoon"],
        "dss" | "Dss" => &["/ds", "add", "shows"],
        "dsa" | "Dsa" => &["/ds", "add", "audiobook"],
        "dso" | "Dso" => &["/ds", "add", "other"],
        "dscs" | "Dscs" => &["/ds", "add", "shows_cartoons"],
        "dsl" | "Dsl" => return vec!["/ds", "list"],

        "/finance" | "finance" | "f" | "F" => &["/finance"],
        "/health" => &["/health"],

        _ => return tokens.to_vec(),
    };

    let mut canonical = Vec::with_capacity(prefix.len() + rest.len());
    canonical.extend_from_slice(prefix);
    canonical.extend_from_slice(rest);
    canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(text: &str) -> Vec<&str> {
        let tokens: Vec<&str> = text.split(' ').collect();
        normalize(&tokens)
    }

    #[test]
    fn single_word_aliases_map_to_command() {
        assert_eq!(norm("Y https://youtu.be/x"), ["/y2d", "https://youtu.be/x"]);
        assert_eq!(norm("T list"), ["/torrent", "list"]);
        assert_eq!(norm("F run"), ["/finance", "run"]);
        assert_eq!(norm("H"), ["/help"]);
    }

    #[test]
    fn note_shortcuts_expand_to_full_form() {
        assert_eq!(
            norm("nd went running"),
            ["/note", "diary", "entry", "went", "running"]
        );
        assert_eq!(norm("N5 done"), ["/note", "diary", "5bx", "done"]);
        assert_eq!(norm("Ni buy milk"), ["/note", "inbox", "add", "buy", "milk"]);
        assert_eq!(norm("nir"), ["/note", "inbox", "read"]);
    }

    #[test]
    fn ds_shortcuts_expand_to_add_with_category() {
        assert_eq!(
            norm("dscs magnet:?x"),
            ["/ds", "add", "shows_cartoons", "magnet:?x"]
        );
        assert_eq!(norm("Dsm"), ["/ds", "add", "movie"]);
    }

    #[test]
    fn ds_list_shortcut_drops_trailing_tokens() {
        assert_eq!(norm("dsl extra tokens"), ["/ds", "list"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(norm("PING"), ["PING"]);
        assert_eq!(norm("DSM"), ["DSM"]);
    }

    #[test]
    fn empty_tokens_are_preserved() {
        assert_eq!(norm("t  list"), ["/torrent", "", "list"]);
        assert!(normalize(&[]).is_empty());
    }
}
