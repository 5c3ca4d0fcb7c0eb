use serde_json::error::Category;
use std::fmt::Display;
use thiserror::Error;

/// What went wrong while reading a record from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not syntactically valid JSON.
    Syntax,
    /// Input is valid JSON but a field has the wrong type or a
    /// malformed timestamp.
    Data,
    /// Input ended in the middle of a value.
    Eof,
    /// Failed to read from the underlying reader.
    Io,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Syntax => f.write_str("syntax error"),
            ErrorKind::Data => f.write_str("invalid data"),
            ErrorKind::Eof => f.write_str("unexpected end of input"),
            ErrorKind::Io => f.write_str("I/O error"),
        }
    }
}

/// Input failed to deserialize into a record. No partially filled
/// record is ever produced alongside this error.
#[derive(Debug, Error)]
#[error("Failed to deserialize user record ({kind}): {source}")]
pub struct DeserializationError {
    kind: ErrorKind,
    #[source]
    source: serde_json::Error,
}

impl DeserializationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// One-based line of the offending input, `0` if the error did not
    /// come from parsing text.
    #[must_use]
    pub fn line(&self) -> usize {
        self.source.line()
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.source.column()
    }
}

impl From<serde_json::Error> for DeserializationError {
    fn from(source: serde_json::Error) -> Self {
        let kind = match source.classify() {
            Category::Syntax => ErrorKind::Syntax,
            Category::Data => ErrorKind::Data,
            Category::Eof => ErrorKind::Eof,
            Category::Io => ErrorKind::Io,
        };
        Self { kind, source }
    }
}
