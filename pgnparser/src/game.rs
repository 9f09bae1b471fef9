use crate::writer;

use serde::ser::SerializeMap;
use serde::Serialize;
use std::fmt;

/// The fourteen recognized tag names, in the order they are rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TagName {
    Event,
    Site,
    Date,
    Round,
    White,
    Black,
    Result,
    Annotator,
    PlyCount,
    TimeControl,
    Time,
    Termination,
    Mode,
    Fen,
}

impl TagName {
    pub const ALL: [TagName; 14] = [
        TagName::Event,
        TagName::Site,
        TagName::Date,
        TagName::Round,
        TagName::White,
        TagName::Black,
        TagName::Result,
        TagName::Annotator,
        TagName::PlyCount,
        TagName::TimeControl,
        TagName::Time,
        TagName::Termination,
        TagName::Mode,
        TagName::Fen,
    ];

    /// Canonical casing, as written in PGN output.
    pub fn name(&self) -> &'static str {
        match self {
            TagName::Event => "Event",
            TagName::Site => "Site",
            TagName::Date => "Date",
            TagName::Round => "Round",
            TagName::White => "White",
            TagName::Black => "Black",
            TagName::Result => "Result",
            TagName::Annotator => "Annotator",
            TagName::PlyCount => "PlyCount",
            TagName::TimeControl => "TimeControl",
            TagName::Time => "Time",
            TagName::Termination => "Termination",
            TagName::Mode => "Mode",
            TagName::Fen => "FEN",
        }
    }

    /// Case-insensitive lookup of a tag key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "event" => Some(TagName::Event),
            "site" => Some(TagName::Site),
            "date" => Some(TagName::Date),
            "round" => Some(TagName::Round),
            "white" => Some(TagName::White),
            "black" => Some(TagName::Black),
            "result" => Some(TagName::Result),
            "annotator" => Some(TagName::Annotator),
            "plycount" => Some(TagName::PlyCount),
            "timecontrol" => Some(TagName::TimeControl),
            "time" => Some(TagName::Time),
            "termination" => Some(TagName::Termination),
            "mode" => Some(TagName::Mode),
            "fen" => Some(TagName::Fen),
            _ => None,
        }
    }

    /// The seven-tag roster, always rendered (with `?` when unset).
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            TagName::Event
                | TagName::Site
                | TagName::Date
                | TagName::Round
                | TagName::White
                | TagName::Black
                | TagName::Result
        )
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A tag outside the roster, kept verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A single chess game: its tags and its move units.
///
/// Move units are either moves (`e4`, `Nf3`, `1-0`) or brace-delimited
/// annotations (`{a comment}`). Move numbers are not stored, they are
/// regenerated when the game is written back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Game {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    pub annotator: Option<String>,
    pub ply_count: Option<String>,
    pub time_control: Option<String>,
    pub time: Option<String>,
    pub termination: Option<String>,
    pub mode: Option<String>,
    pub fen: Option<String>,

    pub moves: Vec<String>,
    pub extra_tags: Vec<Tag>,
}

impl Game {
    fn field(&self, name: TagName) -> &Option<String> {
        match name {
            TagName::Event => &self.event,
            TagName::Site => &self.site,
            TagName::Date => &self.date,
            TagName::Round => &self.round,
            TagName::White => &self.white,
            TagName::Black => &self.black,
            TagName::Result => &self.result,
            TagName::Annotator => &self.annotator,
            TagName::PlyCount => &self.ply_count,
            TagName::TimeControl => &self.time_control,
            TagName::Time => &self.time,
            TagName::Termination => &self.termination,
            TagName::Mode => &self.mode,
            TagName::Fen => &self.fen,
        }
    }

    fn field_mut(&mut self, name: TagName) -> &mut Option<String> {
        match name {
            TagName::Event => &mut self.event,
            TagName::Site => &mut self.site,
            TagName::Date => &mut self.date,
            TagName::Round => &mut self.round,
            TagName::White => &mut self.white,
            TagName::Black => &mut self.black,
            TagName::Result => &mut self.result,
            TagName::Annotator => &mut self.annotator,
            TagName::PlyCount => &mut self.ply_count,
            TagName::TimeControl => &mut self.time_control,
            TagName::Time => &mut self.time,
            TagName::Termination => &mut self.termination,
            TagName::Mode => &mut self.mode,
            TagName::Fen => &mut self.fen,
        }
    }

    /// Value of a tag, if set to something non-empty.
    pub fn tag(&self, name: TagName) -> Option<&str> {
        self.field(name).as_deref().filter(|value| !value.is_empty())
    }

    pub fn set_tag(&mut self, name: TagName, value: impl Into<String>) {
        *self.field_mut(name) = Some(value.into());
    }

    pub fn dumps(&self) -> String {
        writer::dumps([self])
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.dumps())
    }
}

struct SerializedTags<'a>(&'a Game);

impl<'a> Serialize for SerializedTags<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let set_tags: Vec<(TagName, &str)> = TagName::ALL
            .iter()
            .filter_map(|name| self.0.tag(*name).map(|value| (*name, value)))
            .collect();

        let mut map = serializer.serialize_map(Some(set_tags.len()))?;
        for (name, value) in set_tags {
            map.serialize_entry(name.name(), value)?;
        }
        map.end()
    }
}

struct SerializedExtraTags<'a>(&'a Vec<Tag>);

impl<'a> Serialize for SerializedExtraTags<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for tag in self.0 {
            map.serialize_entry(&tag.key, &tag.value)?;
        }
        map.end()
    }
}

impl Serialize for Game {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let entries = if self.extra_tags.is_empty() { 2 } else { 3 };
        let mut map = serializer.serialize_map(Some(entries))?;

        map.serialize_entry("tags", &SerializedTags(self))?;
        if !self.extra_tags.is_empty() {
            map.serialize_entry("extra_tags", &SerializedExtraTags(&self.extra_tags))?;
        }
        map.serialize_entry("moves", &self.moves)?;

        map.end()
    }
}
