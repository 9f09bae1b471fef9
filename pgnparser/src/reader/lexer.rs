/// A unit of normalized PGN text: a single tag line, or the joined move text that follows.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    Tag(&'a str),
    Moves(String),
}

/// Returns the token starting at `position` and the position right after it,
/// or `None` once all lines have been consumed.
pub fn next_token<S: AsRef<str>>(lines: &[S], position: usize) -> Option<(Token<'_>, usize)> {
    let first = lines.get(position)?.as_ref().trim();

    if first.starts_with('[') {
        return Some((Token::Tag(first), position + 1));
    }

    let mut moves = first.to_string();
    let mut next = position + 1;
    while let Some(line) = lines.get(next) {
        let line = line.as_ref().trim();
        if line.starts_with('[') {
            break;
        }
        moves.push(' ');
        moves.push_str(line);
        next += 1;
    }

    Some((Token::Moves(moves.trim().to_string()), next))
}

/// Iterator over the tokens of a line sequence. The lines are only borrowed,
/// so the same input can be tokenized any number of times.
pub struct Tokens<'a, S> {
    lines: &'a [S],
    position: usize,
}

impl<'a, S: AsRef<str>> Tokens<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Tokens { lines, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a, S: AsRef<str>> Iterator for Tokens<'a, S> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (token, next) = next_token(self.lines, self.position)?;
        self.position = next;
        Some(token)
    }
}
