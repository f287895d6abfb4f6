//! Library error types.
//!
//! The library has exactly one failure surface: name lookup. Tokenization
//! is total over arbitrary UTF-8 input and never errors; an unclassifiable
//! code point becomes a `TokenCategory::Error` token instead.

use thiserror::Error;

/// Errors returned by registry lookups and everything built on them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested language is not registered under any name or alias.
    #[error("unknown language: {0:?}")]
    UnknownLanguage(String),

    /// The requested formatter is not registered under any name or alias.
    #[error("unknown formatter: {0:?}")]
    UnknownFormatter(String),
}

/// Result type alias for rosettes operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_the_offending_name() {
        let err = Error::UnknownLanguage("klingon".into());
        assert_eq!(err.to_string(), "unknown language: \"klingon\"");
        let err = Error::UnknownFormatter("latex".into());
        assert_eq!(err.to_string(), "unknown formatter: \"latex\"");
    }
}
