use pgnparser::{dumps, open_games, Game, ParseOptions, UnknownTagPolicy};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Canonical PGN
    Pgn,
    /// YAML list of games
    Yaml,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnknownTags {
    Reject,
    Ignore,
    Keep,
}

impl From<UnknownTags> for UnknownTagPolicy {
    fn from(value: UnknownTags) -> Self {
        match value {
            UnknownTags::Reject => UnknownTagPolicy::Reject,
            UnknownTags::Ignore => UnknownTagPolicy::Ignore,
            UnknownTags::Keep => UnknownTagPolicy::Keep,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PGN file
    file: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pgn)]
    format: Format,

    /// Path of the output file (if not specified, PGN goes to stdout and YAML
    /// next to the PGN file with the extension changed)
    #[arg(short, long)]
    output: Option<String>,

    /// What to do with tags other than the fourteen known ones
    #[arg(short, long, value_enum, default_value_t = UnknownTags::Reject)]
    unknown_tags: UnknownTags,
}

fn read_games(pgn_path: &Path, options: &ParseOptions) -> Result<Vec<Game>> {
    let games = open_games(pgn_path, options).context(format!(
        "Could not open file {}",
        pgn_path.to_string_lossy()
    ))?;

    let mut parsed = Vec::new();
    for (index, game) in games.enumerate() {
        parsed.push(game.context(format!("Unable to parse game #{}", index + 1))?);
    }
    Ok(parsed)
}

fn write_yaml(yaml_path: &PathBuf, games: &[Game]) -> Result<()> {
    let output = std::fs::File::create(yaml_path).context(format!(
        "Could not open file {} for writing",
        yaml_path.to_string_lossy()
    ))?;

    serde_yaml::to_writer(output, games).context(format!(
        "Error writing YAML data to {}",
        yaml_path.to_string_lossy()
    ))
}

fn write_pgn(pgn_path: &PathBuf, games: &[Game]) -> Result<()> {
    std::fs::write(pgn_path, dumps(games) + "\n").context(format!(
        "Could not write PGN data to {}",
        pgn_path.to_string_lossy()
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let pgn_path = PathBuf::from(cli.file);
    let options = ParseOptions::with_unknown_tags(cli.unknown_tags.into());

    let games = read_games(&pgn_path, &options).context("Unable to parse PGN file")?;

    match (cli.format, cli.output) {
        (Format::Pgn, None) => println!("{}", dumps(&games)),
        (Format::Pgn, Some(output)) => write_pgn(&PathBuf::from(output), &games)?,
        (Format::Yaml, output) => {
            let yaml_path = output.map_or(
                {
                    let mut path = pgn_path;
                    path.set_extension("yaml");
                    path
                },
                PathBuf::from,
            );
            println!("Writing YAML file to {}", yaml_path.to_string_lossy());
            write_yaml(&yaml_path, &games)?;
        }
    }

    Ok(())
}
