mod lexer;
mod normalizer;
mod parser;

pub use self::lexer::{next_token, Token, Tokens};
pub use self::normalizer::normalize_lines;
pub use self::parser::{parse_tag, split_moves};

use crate::error::Result;
use crate::game::Game;
use crate::options::ParseOptions;
use parser::Assembler;

/// Parses PGN text into games, rejecting tags outside the roster.
pub fn loads(text: &str) -> Result<Vec<Game>> {
    loads_with(text, &ParseOptions::default())
}

pub fn loads_with(text: &str, options: &ParseOptions) -> Result<Vec<Game>> {
    let lines = normalize_lines(text);
    let mut assembler = Assembler::new(options);

    for token in Tokens::new(&lines) {
        assembler.token(token)?;
    }

    Ok(assembler.finish())
}
