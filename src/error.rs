use std::fmt;

use thiserror::Error;

/// Classifies a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidToken,
    InvalidNumber,
    UnexpectedCharacter,
    UnexpectedToken,
    UnterminatedString,
    UnterminatedArray,
    UnterminatedObject,
    UnclosedComment,
    IncompleteKeyValuePair,
    MissingComma,
    EmptyJsonString,
    EmptyElement,
    Io,
    Deserialize,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidToken => "invalid token",
            ErrorKind::InvalidNumber => "invalid number",
            ErrorKind::UnexpectedCharacter => "unexpected character",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::UnterminatedString => "unterminated string",
            ErrorKind::UnterminatedArray => "unterminated array",
            ErrorKind::UnterminatedObject => "unterminated object",
            ErrorKind::UnclosedComment => "unclosed comment",
            ErrorKind::IncompleteKeyValuePair => "incomplete key-value pair",
            ErrorKind::MissingComma => "missing comma",
            ErrorKind::EmptyJsonString => "empty input",
            ErrorKind::EmptyElement => "empty element",
            ErrorKind::Io => "io error",
            ErrorKind::Deserialize => "deserialize error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of the offending character. `row` and `col` are 1-indexed;
/// `offset` is the byte offset into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub row: usize,
    pub col: usize,
}

/// A decode failure with its kind, a human-readable message, and the
/// position it was detected at.
///
/// Syntax errors always carry `Some(location)`; errors raised outside
/// the parser proper (`Io`, `Deserialize`) carry `None`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render(.kind, .message, .location))]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

fn render(kind: &ErrorKind, message: &str, location: &Option<Location>) -> String {
    match location {
        Some(loc) => format!("{kind}: {message} at {}:{}", loc.row, loc.col),
        None => format!("{kind}: {message}"),
    }
}

impl Error {
    pub(crate) fn syntax(kind: ErrorKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: Some(location),
        }
    }

    pub(crate) fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            message: message.into(),
            location: None,
        }
    }

    pub(crate) fn deserialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Deserialize,
            message: message.into(),
            location: None,
        }
    }

    /// 1-indexed row of the offending character, if the error is positional.
    pub fn row(&self) -> Option<usize> {
        self.location.map(|loc| loc.row)
    }

    /// 1-indexed column of the offending character, if the error is positional.
    pub fn col(&self) -> Option<usize> {
        self.location.map(|loc| loc.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_display_includes_position() {
        let err = Error::syntax(
            ErrorKind::EmptyElement,
            Location {
                offset: 4,
                row: 1,
                col: 5,
            },
            "expected a value before ','",
        );
        assert_eq!(
            err.to_string(),
            "empty element: expected a value before ',' at 1:5"
        );
        assert_eq!(err.row(), Some(1));
        assert_eq!(err.col(), Some(5));
    }

    #[rstest::rstest]
    fn test_display_without_position() {
        let err = Error::deserialize("missing field `name`");
        assert_eq!(err.to_string(), "deserialize error: missing field `name`");
        assert_eq!(err.row(), None);
    }
}
