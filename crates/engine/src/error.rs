use std::fmt;

#[derive(Debug)]
pub enum MatchError {
    /// JSON parse error in a dictionary payload.
    DictionaryParse(String),
    /// Dictionary structure error (missing bone_regions, wrong value types).
    DictionaryValidation(String),
    /// IO error (file read/write).
    Io(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DictionaryParse(msg) => write!(f, "dictionary parse error: {msg}"),
            Self::DictionaryValidation(msg) => write!(f, "dictionary validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}
