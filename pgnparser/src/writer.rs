use crate::game::{Game, TagName};

const GAME_SEPARATOR: &str = "\n\n\n";

/// True for `{...}` annotation units, which take no move number.
pub fn is_annotation(unit: &str) -> bool {
    unit.starts_with('{')
}

fn write_tags(game: &Game, output: &mut String) {
    for name in TagName::ALL {
        match game.tag(name) {
            Some(value) => output.push_str(&format!("[{} \"{}\"]\n", name, value)),
            None if name.is_required() => output.push_str(&format!("[{} \"?\"]\n", name)),
            None => (),
        }
    }
}

fn write_moves(game: &Game, output: &mut String) {
    let mut half_moves = 0usize;

    for unit in &game.moves {
        if !is_annotation(unit) {
            if half_moves % 2 == 0 {
                output.push_str(&format!("{}. ", half_moves / 2 + 1));
            }
            half_moves += 1;
        }

        output.push_str(unit);
        output.push(' ');
    }
}

fn write_game(game: &Game) -> String {
    let mut output = String::new();

    write_tags(game, &mut output);
    output.push('\n');
    write_moves(game, &mut output);

    output.trim().to_string()
}

/// Renders games as PGN text, separated by two blank lines.
///
/// Accepts anything that yields game references: `[&game]` for a single
/// game, `&games` for a vector or slice.
pub fn dumps<'a, I>(games: I) -> String
where
    I: IntoIterator<Item = &'a Game>,
{
    games
        .into_iter()
        .map(write_game)
        .collect::<Vec<String>>()
        .join(GAME_SEPARATOR)
}
