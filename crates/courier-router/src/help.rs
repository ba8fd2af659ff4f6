// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Help texts returned as direct replies.

pub const COMMON: &str = " My commands:
- /help
- /ping
- /y2d <youtube link>
- /torrent
- /note
- /ds
- /finance
- /health <worker>
";

pub const TORRENT: &str = " This is help for /torrent command
start words: /torrent, torrent, t, T
next words:
- \"add\" + category: \"movie/m\", \"shows/s\", \"cartoon/c\", \"cartoon_s/cs\", \"audiobook/a\", \"audiobook_p/ap\" - add the attached torrent file in category
- \"list\" - list torrents in action
- \"del #\" - where # is the torrent id
";

pub const NOTE: &str = " This is help for /note command
start words: /note, note, n, N
next words:
- \"diary entry <text>\" - add a diary entry (shortcut: nd)
- \"diary 5bx <text>\" - add a 5bx record (shortcut: n5)
- \"inbox add <text>\" - add a line to the inbox (shortcut: ni)
- \"inbox read\" - read the inbox (shortcut: nir)
- \"pull\" - pull the notes repository
";

pub const NAS: &str = "This is help for /ds (Download Station) commands:
- /ds add <category> [url] - add torrent/magnet link or the attached torrent file.
  Categories: movie/m, cartoon/c, shows/s, audiobook/a, other/o, shows_cartoons/cs
  Example: /ds add movie https://example.com/file.torrent
  Shortcuts: dsm, dsc, dss, dsa, dso, dscs
- /ds list - show active downloads (shortcut: dsl)
- /ds del <id> - delete download task by id
- /ds help - show this help
";
