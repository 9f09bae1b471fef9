use lazy_static::lazy_static;
use std::env;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Level {
    Error = 0,
    Warn = 1,
    Debug = 2,
}

impl Level {
    fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "error" | "err" => Self::Error,
            _ => Self::Error,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Debug => "DEBUG",
        }
    }
}

lazy_static! {
    // Read once, the first time something is logged
    static ref PGNPARSER_LOG: Level = env::var("PGNPARSER_LOG")
        .map(|s| Level::from_str(&s))
        .unwrap_or(Level::Error);
}

fn emit(level: Level, msg: impl AsRef<str>) {
    if *PGNPARSER_LOG >= level {
        eprintln!("{}: {}", level.prefix(), msg.as_ref());
    }
}

pub(crate) fn warn(msg: impl AsRef<str>) {
    emit(Level::Warn, msg);
}

pub(crate) fn debug(msg: impl AsRef<str>) {
    emit(Level::Debug, msg);
}
