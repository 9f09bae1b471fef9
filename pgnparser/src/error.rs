use thiserror::Error;

/// Errors raised while reading PGN text.
#[derive(Error, Debug)]
pub enum PgnError {
    /// A line starting with `[` that is not a `[Key "Value"]` tag
    #[error("Malformed tag: {token}")]
    MalformedTag { token: String },

    /// A tag key outside the fourteen-tag roster, rejected by the parse options
    #[error("Unknown tag: {key}")]
    UnknownTag { key: String },

    /// An annotation opened with `{` and never closed
    #[error("Unterminated annotation: {text}")]
    UnterminatedAnnotation { text: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PgnError>;
