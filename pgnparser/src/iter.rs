use crate::error::Result;
use crate::game::Game;
use crate::log;
use crate::options::ParseOptions;
use crate::reader::{loads_with, parse_tag};

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

// Only an exact `Event` key counts: `[EventDate ...]` belongs to the current game
fn starts_game(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('[') && matches!(parse_tag(line), Ok((key, _)) if key == "event")
}

/// Groups physical lines into one text chunk per game, splitting before
/// line holding an `Event` tag.
pub struct GameChunks<I> {
    lines: I,
    pending: Option<String>,
    done: bool,
}

impl<I> GameChunks<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        GameChunks {
            lines,
            pending: None,
            done: false,
        }
    }

    fn next_chunk(&mut self) -> Option<Result<String>> {
        let mut chunk = self.pending.take().unwrap_or_default();

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
                None => {
                    self.done = true;
                    return Some(Ok(chunk));
                }
            };

            if starts_game(&line) && !chunk.trim().is_empty() {
                self.pending = Some(format!("{}\n", line));
                return Some(Ok(chunk));
            }

            chunk.push_str(&line);
            chunk.push('\n');
        }
    }
}

impl<I> Iterator for GameChunks<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.next_chunk()? {
                Ok(chunk) if chunk.trim().is_empty() => {
                    log::debug("Skipping empty chunk");
                }
                result => return Some(result),
            }
        }
        None
    }
}

/// Iterator over the games of a line source, parsed one chunk at a time.
///
/// A chunk that fails to parse yields its error once; iteration then goes
/// on with the next chunk.
pub struct Games<I> {
    chunks: GameChunks<I>,
    options: ParseOptions,
    parsed: VecDeque<Game>,
}

impl<I> Games<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, options: &ParseOptions) -> Self {
        Games {
            chunks: GameChunks::new(lines),
            options: *options,
            parsed: VecDeque::new(),
        }
    }
}

impl<I> Iterator for Games<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Game>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(game) = self.parsed.pop_front() {
                return Some(Ok(game));
            }

            let chunk = match self.chunks.next()? {
                Ok(chunk) => chunk,
                Err(err) => return Some(Err(err)),
            };

            match loads_with(&chunk, &self.options) {
                Ok(games) => self.parsed.extend(games),
                Err(err) => {
                    log::debug(format!("Chunk failed to parse: {}", err));
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Opens a PGN file and iterates over its games.
pub fn open_games<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<Games<io::Lines<BufReader<File>>>> {
    let file = File::open(path)?;
    Ok(Games::new(BufReader::new(file).lines(), options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PgnError;
    use crate::options::UnknownTagPolicy;

    fn lines(text: &str) -> impl Iterator<Item = io::Result<String>> + '_ {
        text.lines().map(|line| Ok(line.to_string()))
    }

    const TWO_GAMES: &str = "[Event \"One\"]
[Site \"A\"]

1. e4 e5 1-0

[Event \"Two\"]
[Site \"B\"]

1. d4 d5 0-1
";

    #[test]
    fn chunks_split_at_event() {
        let chunks: Vec<String> = GameChunks::new(lines(TWO_GAMES))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].starts_with("[Event \"One\"]\n"));
        assert!(chunks[0].contains("1. e4 e5 1-0"));
        assert!(chunks[1].starts_with("[Event \"Two\"]\n"));
        assert!(chunks[1].ends_with("1. d4 d5 0-1\n"));
    }

    #[test]
    fn event_date_does_not_split() {
        let text = "[Event \"One\"]\n[EventDate \"2024.01.01\"]\n[Site \"A\"]\n\n1. e4 e5 1-0\n\
                    [event \"Two\"]\n1. d4 0-1\n";

        let chunks: Vec<String> = GameChunks::new(lines(text))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].contains("[EventDate"));

        let keep = ParseOptions::with_unknown_tags(UnknownTagPolicy::Keep);
        let games: Vec<Game> = Games::new(lines(text), &keep)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(games, loads_with(text, &keep).unwrap());
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].event.as_deref(), Some("One"));
        assert_eq!(games[0].site.as_deref(), Some("A"));
        assert_eq!(games[0].moves, vec!["e4", "e5", "1-0"]);
        assert_eq!(games[0].extra_tags[0].key, "EventDate");
    }

    #[test]
    fn empty_source() {
        assert_eq!(GameChunks::new(lines("")).count(), 0);
        assert_eq!(GameChunks::new(lines("\n  \n")).count(), 0);
    }

    #[test]
    fn games() {
        let games: Vec<Game> = Games::new(lines(TWO_GAMES), &ParseOptions::default())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].event.as_deref(), Some("One"));
        assert_eq!(games[0].moves, vec!["e4", "e5", "1-0"]);
        assert_eq!(games[1].site.as_deref(), Some("B"));
        assert_eq!(games[1].moves, vec!["d4", "d5", "0-1"]);
    }

    #[test]
    fn bad_chunk_does_not_stop_iteration() {
        let text = "[Event \"One\"]\n[ECO \"C60\"]\n1. e4 1-0\n[Event \"Two\"]\n1. d4 0-1\n";

        let results: Vec<Result<Game>> =
            Games::new(lines(text), &ParseOptions::default()).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(PgnError::UnknownTag { .. })));
        assert!(matches!(&results[1], Ok(game) if game.event.as_deref() == Some("Two")));

        let keep = ParseOptions::with_unknown_tags(UnknownTagPolicy::Keep);
        let games: Vec<Game> = Games::new(lines(text), &keep)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(games[0].extra_tags.len(), 1);
    }

    #[test]
    fn read_errors_are_reported() {
        let source = vec![
            Ok("[Event \"One\"]".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad bytes")),
        ];

        let results: Vec<Result<Game>> =
            Games::new(source.into_iter(), &ParseOptions::default()).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(PgnError::Io(_))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            open_games("/nonexistent/games.pgn", &ParseOptions::default()),
            Err(PgnError::Io(_))
        ));
    }
}
