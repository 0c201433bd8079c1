//! Decode entry points: JSONC text in, [`Document`] or typed value out.

mod cursor;
mod parser;

use std::io::Read;

use memchr::memchr_iter;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Location};
use crate::value::Document;
use crate::Result;

/// Parses a JSONC document from text.
pub fn parse_str(input: &str) -> Result<Document> {
    parser::parse_document(input)
}

/// Parses a JSONC document from bytes, validating UTF-8 first.
pub fn parse_slice(input: &[u8]) -> Result<Document> {
    let text = std::str::from_utf8(input).map_err(|err| {
        Error::syntax(
            ErrorKind::UnexpectedCharacter,
            location_of_offset(input, err.valid_up_to()),
            "input is not valid UTF-8",
        )
    })?;
    parse_str(text)
}

/// Decodes JSONC text into any deserializable type.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    let doc = parse_str(input)?;
    serde_json::from_value(doc.to_json()).map_err(|err| Error::deserialize(err.to_string()))
}

/// Decodes a JSONC byte slice into any deserializable type.
pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    let doc = parse_slice(input)?;
    serde_json::from_value(doc.to_json()).map_err(|err| Error::deserialize(err.to_string()))
}

/// Reads a stream to its end into one in-memory buffer, then decodes
/// it. Parsing never starts before the whole input is available.
pub fn from_reader<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<T> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|err| Error::io(format!("read failed: {err}")))?;
    from_str(&buf)
}

/// Parses JSONC text and deep-copies the tree into a
/// [`serde_json::Value`].
pub fn to_json(input: &str) -> Result<serde_json::Value> {
    Ok(parse_str(input)?.to_json())
}

/// 1-indexed row/col of a byte offset, for errors raised before a
/// cursor exists.
fn location_of_offset(input: &[u8], offset: usize) -> Location {
    let prefix = &input[..offset];
    let mut newlines = 0usize;
    let mut line_start = 0usize;
    for idx in memchr_iter(b'\n', prefix) {
        newlines += 1;
        line_start = idx + 1;
    }
    // The prefix is valid UTF-8 by construction (`valid_up_to`), so the
    // lossy conversion never substitutes anything.
    let col = String::from_utf8_lossy(&prefix[line_start..]).chars().count() + 1;
    Location {
        offset,
        row: newlines + 1,
        col,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_parse_slice_rejects_invalid_utf8() {
        let err = parse_slice(b"[\n\"a\xff\"]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
        let loc = err.location.unwrap();
        assert_eq!((loc.row, loc.col), (2, 3));
    }

    #[rstest::rstest]
    fn test_to_json_round_trip() {
        let value = to_json("[1, 2, 3]").unwrap();
        assert_eq!(value, serde_json::json!([1, 2, 3]));
    }
}
