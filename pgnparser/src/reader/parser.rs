use crate::error::{PgnError, Result};
use crate::game::{Game, Tag, TagName};
use crate::log;
use crate::options::{ParseOptions, UnknownTagPolicy};
use crate::reader::lexer::Token;

use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{recognize, rest, verify};
use nom::multi::many1;
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;

fn tag_key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn tag_line(input: &str) -> IResult<&str, (&str, &str)> {
    pair(
        preceded(char('['), tag_key),
        preceded(multispace0, verify(rest, |s: &str| !s.is_empty())),
    )(input)
}

// `12.` or `12...`, with the surrounding whitespace
fn move_number(input: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        terminated(recognize(tuple((digit1, many1(char('.'))))), multispace0),
    )(input)
}

fn split_tag(token: &str) -> Result<(&str, &str)> {
    let (_, (key, remainder)) = tag_line(token).map_err(|_| PgnError::MalformedTag {
        token: token.to_string(),
    })?;

    let value =
        remainder.trim_matches(|c: char| c == '"' || c == '[' || c == ']' || c.is_whitespace());

    Ok((key, value))
}

/// Parses a `[Key "Value"]` token into its lower-cased key and bare value.
pub fn parse_tag(token: &str) -> Result<(String, String)> {
    let (key, value) = split_tag(token)?;
    Ok((key.to_lowercase(), value.to_string()))
}

/// Splits move text into move units, dropping move numbers and keeping
/// `{...}` annotations whole.
pub fn split_moves(token: &str) -> Result<Vec<String>> {
    let mut moves = Vec::new();
    let mut input = token;

    loop {
        input = match move_number(input) {
            Ok((remaining, _number)) => remaining,
            Err(_) => input.trim_start(),
        };

        if input.is_empty() {
            break;
        }

        let end = if input.starts_with('{') {
            match input.find('}') {
                Some(close) => close + 1,
                None => {
                    return Err(PgnError::UnterminatedAnnotation {
                        text: input.to_string(),
                    })
                }
            }
        } else {
            input
                .find(|c: char| c.is_whitespace() || c == '{')
                .unwrap_or(input.len())
        };

        moves.push(input[..end].to_string());
        input = &input[end..];
    }

    Ok(moves)
}

/// Folds a token stream into games.
///
/// A tag opens a new game when there is none yet, or when the current one
/// already has its moves.
pub(crate) struct Assembler<'o> {
    options: &'o ParseOptions,
    games: Vec<Game>,
}

impl<'o> Assembler<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Assembler {
            options,
            games: Vec::new(),
        }
    }

    fn current_mut(&mut self, starting_tag: bool) -> &mut Game {
        let start_new = match self.games.last() {
            None => true,
            Some(current) => starting_tag && !current.moves.is_empty(),
        };

        if start_new {
            log::debug(format!("Starting game #{}", self.games.len() + 1));
            self.games.push(Game::default());
        }

        let last = self.games.len() - 1;
        &mut self.games[last]
    }

    fn tag(&mut self, token: &str) -> Result<()> {
        let (key, value) = split_tag(token)?;
        let policy = self.options.unknown_tags;
        let game = self.current_mut(true);

        match TagName::from_key(key) {
            Some(name) => game.set_tag(name, value),
            None => match policy {
                UnknownTagPolicy::Reject => {
                    return Err(PgnError::UnknownTag {
                        key: key.to_lowercase(),
                    })
                }
                UnknownTagPolicy::Ignore => {
                    log::warn(format!("Ignoring unknown tag {}", token));
                }
                UnknownTagPolicy::Keep => {
                    log::debug(format!("Keeping unknown tag {}", token));
                    game.extra_tags.push(Tag {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
            },
        }

        Ok(())
    }

    fn moves(&mut self, token: &str) -> Result<()> {
        let moves = split_moves(token)?;
        self.current_mut(false).moves = moves;
        Ok(())
    }

    pub fn token(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Tag(tag) => self.tag(tag),
            Token::Moves(moves) => self.moves(&moves),
        }
    }

    pub fn finish(self) -> Vec<Game> {
        self.games
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag() {
        let (key, value) = parse_tag("[Site \"Belgrade, Serbia Yugoslavia|JUG\"]").unwrap();
        assert_eq!(key, "site");
        assert_eq!(value, "Belgrade, Serbia Yugoslavia|JUG");

        let (key, value) = parse_tag("[PlyCount    \"3\" ]").unwrap();
        assert_eq!(key, "plycount");
        assert_eq!(value, "3");

        let (key, value) = parse_tag("[Event \"\"]").unwrap();
        assert_eq!(key, "event");
        assert_eq!(value, "");
    }

    #[test]
    fn tag_value_with_quotes() {
        let (_, value) = parse_tag("[Annotator \"The \"Great\" One\"]").unwrap();
        assert_eq!(value, "The \"Great\" One");
    }

    #[test]
    fn malformed_tags() {
        for token in ["[ \"no key\"]", "[]", "[Event", "Event \"x\"]"] {
            assert!(
                matches!(parse_tag(token), Err(PgnError::MalformedTag { .. })),
                "{} should be rejected",
                token
            );
        }
    }

    #[test]
    fn moves() {
        let moves = split_moves("1. e4 e5 2. Nf3 Nc6 3. Bb5 1/2-1/2").unwrap();
        assert_eq!(moves, vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "1/2-1/2"]);
    }

    #[test]
    fn moves_with_annotations() {
        let token = "{start comment}1. e4{middlecomment}e5 2. {dunno}Nf3 Nc6 3. Bb5 1/2-1/2{end}";
        let moves = split_moves(token).unwrap();
        assert_eq!(
            moves,
            vec![
                "{start comment}",
                "e4",
                "{middlecomment}",
                "e5",
                "{dunno}",
                "Nf3",
                "Nc6",
                "Bb5",
                "1/2-1/2",
                "{end}"
            ]
        );
    }

    #[test]
    fn black_move_numbers_and_trailing_number() {
        let moves = split_moves("12. Nf3 {book} 12... Nc6 13.").unwrap();
        assert_eq!(moves, vec!["Nf3", "{book}", "Nc6"]);
    }

    #[test]
    fn unterminated_annotation() {
        assert!(matches!(
            split_moves("1. e4 {never closed e5"),
            Err(PgnError::UnterminatedAnnotation { text }) if text == "{never closed e5"
        ));
    }

    #[test]
    fn unknown_tags() {
        let reject = ParseOptions::default();
        let mut assembler = Assembler::new(&reject);
        assert!(matches!(
            assembler.token(Token::Tag("[ECO \"C60\"]")),
            Err(PgnError::UnknownTag { key }) if key == "eco"
        ));

        let ignore = ParseOptions::with_unknown_tags(UnknownTagPolicy::Ignore);
        let mut assembler = Assembler::new(&ignore);
        assembler.token(Token::Tag("[ECO \"C60\"]")).unwrap();
        assembler.token(Token::Tag("[Event \"E\"]")).unwrap();
        let games = assembler.finish();
        assert_eq!(games.len(), 1);
        assert!(games[0].extra_tags.is_empty());
        assert_eq!(games[0].event.as_deref(), Some("E"));

        let keep = ParseOptions::with_unknown_tags(UnknownTagPolicy::Keep);
        let mut assembler = Assembler::new(&keep);
        assembler.token(Token::Tag("[WhiteElo \"2785\"]")).unwrap();
        let games = assembler.finish();
        assert_eq!(
            games[0].extra_tags,
            vec![Tag {
                key: "WhiteElo".to_string(),
                value: "2785".to_string()
            }]
        );
    }

    #[test]
    fn new_game_after_moves() {
        let options = ParseOptions::default();
        let mut assembler = Assembler::new(&options);
        assembler.token(Token::Tag("[Event \"First\"]")).unwrap();
        assembler.token(Token::Tag("[Site \"Here\"]")).unwrap();
        assembler.token(Token::Moves("1. e4 1-0".to_string())).unwrap();
        assembler.token(Token::Tag("[Event \"Second\"]")).unwrap();

        let games = assembler.finish();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].site.as_deref(), Some("Here"));
        assert_eq!(games[0].moves, vec!["e4", "1-0"]);
        assert_eq!(games[1].event.as_deref(), Some("Second"));
        assert_eq!(games[1].site, None);
        assert!(games[1].moves.is_empty());
    }

    #[test]
    fn moves_without_tags() {
        let options = ParseOptions::default();
        let mut assembler = Assembler::new(&options);
        assembler.token(Token::Moves("1. d4 d5".to_string())).unwrap();

        let games = assembler.finish();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].event, None);
        assert_eq!(games[0].moves, vec!["d4", "d5"]);
    }
}
