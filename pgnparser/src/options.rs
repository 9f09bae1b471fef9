/// What to do with a tag whose key is not one of the fourteen roster names.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Fail the parse with `PgnError::UnknownTag`
    #[default]
    Reject,
    /// Drop the tag, logging a warning
    Ignore,
    /// Store the tag in `Game::extra_tags`
    Keep,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct ParseOptions {
    pub unknown_tags: UnknownTagPolicy,
}

impl ParseOptions {
    pub fn with_unknown_tags(unknown_tags: UnknownTagPolicy) -> Self {
        ParseOptions { unknown_tags }
    }
}
