//! A simple PGN (Portable Game Notation) parser.
//!
//! ```
//! let games = pgnparser::loads("[Event \"E\"]\n[Site \"S\"]\n\n1. e4 e5 2. Nf3 Nc6 3. Bb5 1-0").unwrap();
//! assert_eq!(games[0].moves, vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "1-0"]);
//!
//! let text = pgnparser::dumps(&games);
//! assert!(text.ends_with("1. e4 e5 2. Nf3 Nc6 3. Bb5 1-0"));
//! ```

mod error;
mod game;
mod iter;
mod log;
mod options;
mod reader;
mod writer;


pub use error::{PgnError, Result};
pub use game::{Game, Tag, TagName};
pub use iter::{open_games, GameChunks, Games};
pub use options::{ParseOptions, UnknownTagPolicy};
pub use reader::{
    loads, loads_with, next_token, normalize_lines, parse_tag, split_moves, Token, Tokens,
};
pub use writer::{dumps, is_annotation};
