//! Single-pass recursive-descent JSONC parser.
//!
//! Scanning and tree construction are fused: there is no token stream,
//! each builder consumes exactly the bytes of its value straight off the
//! cursor. Every builder returns with the cursor one past the last byte
//! it consumed, so container loops never need corrective stepping.

use std::collections::HashMap;

use memchr::{memchr, memmem};
use smallvec::SmallVec;
use smol_str::SmolStr;

use super::cursor::Cursor;
use crate::arena::{Arena, Pair};
use crate::error::{Error, ErrorKind, Location};
use crate::value::Document;
use crate::Result;

pub(crate) fn parse_document(input: &str) -> Result<Document> {
    let mut parser = Parser::new(input);
    let root = parser.parse_root()?;
    Ok(Document {
        arena: parser.arena,
        root,
    })
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: Arena,
    key_lookup: HashMap<SmolStr, usize>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            arena: Arena::new(),
            key_lookup: HashMap::new(),
        }
    }

    fn err(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::syntax(kind, self.cursor.location(), message)
    }

    fn err_at(&self, kind: ErrorKind, location: Location, message: impl Into<String>) -> Error {
        Error::syntax(kind, location, message)
    }

    fn parse_root(&mut self) -> Result<usize> {
        if self.cursor.is_eof() {
            return Err(self.err(ErrorKind::EmptyJsonString, "input is empty"));
        }
        let root = self.parse_value()?;
        self.skip_whitespace();
        if !self.cursor.is_eof() {
            return Err(self.err(
                ErrorKind::UnexpectedToken,
                "trailing content after top-level value",
            ));
        }
        Ok(root)
    }

    /// Value dispatcher: skips bare whitespace (comments are handled by
    /// the container loops, not here), then routes on the next
    /// significant character.
    fn parse_value(&mut self) -> Result<usize> {
        self.skip_whitespace();
        let Some(ch) = self.cursor.peek() else {
            return Err(self.err(ErrorKind::EmptyJsonString, "no value found"));
        };
        match ch {
            'n' => {
                self.expect_literal("null")?;
                Ok(self.arena.push_null())
            }
            't' => {
                self.expect_literal("true")?;
                Ok(self.arena.push_bool(true))
            }
            'f' => {
                self.expect_literal("false")?;
                Ok(self.arena.push_bool(false))
            }
            '"' => {
                let text = self.parse_string()?;
                Ok(self.arena.push_string(text))
            }
            '[' => self.parse_array(),
            '{' => self.parse_object(),
            '0'..='9' | '-' | 'e' | '.' => self.parse_number(),
            other => Err(self.err(
                ErrorKind::UnexpectedCharacter,
                format!("unexpected character '{other}'"),
            )),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.cursor.advance();
        }
    }

    /// Consumes whitespace and full `//` / `/* */` comments. Only the
    /// array and object builders call this; the top level does not, so
    /// a comment outside any container is not recognized.
    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            match self.cursor.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.cursor.advance();
                }
                Some('/') => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        let open = self.cursor.location();
        let rest = self.cursor.rest();
        if let Some(body) = rest.strip_prefix("//") {
            // Runs to (but not including) the newline, or to end of input.
            let len = match memchr(b'\n', body.as_bytes()) {
                Some(idx) => 2 + idx,
                None => rest.len(),
            };
            self.cursor.advance_span(len);
            Ok(())
        } else if let Some(body) = rest.strip_prefix("/*") {
            match memmem::find(body.as_bytes(), b"*/") {
                Some(idx) => {
                    self.cursor.advance_span(2 + idx + 2);
                    Ok(())
                }
                None => Err(self.err_at(
                    ErrorKind::UnclosedComment,
                    open,
                    "block comment is never closed",
                )),
            }
        } else {
            Err(self.err_at(
                ErrorKind::UnexpectedCharacter,
                open,
                "expected '//' or '/*' to begin a comment",
            ))
        }
    }

    /// Exact-spelling literal match; no partial or longest-match search.
    fn expect_literal(&mut self, expected: &'static str) -> Result<()> {
        if !self.cursor.rest().starts_with(expected) {
            return Err(self.err(ErrorKind::InvalidToken, format!("expected '{expected}'")));
        }
        self.cursor.advance_span(expected.len());
        Ok(())
    }

    /// Parses a string starting on its opening quote; returns with the
    /// cursor one past the closing quote.
    fn parse_string(&mut self) -> Result<String> {
        let open = self.cursor.location();
        self.cursor.advance();
        let mut buf = String::new();
        let mut prev = open;
        loop {
            let Some(ch) = self.cursor.peek() else {
                return Err(self.err_at(
                    ErrorKind::UnterminatedString,
                    open,
                    "string is never closed",
                ));
            };
            match ch {
                '"' => {
                    self.cursor.advance();
                    return Ok(buf);
                }
                '\n' | '\r' => {
                    return Err(self.err_at(
                        ErrorKind::UnterminatedString,
                        prev,
                        "line break inside string",
                    ));
                }
                '\\' => {
                    self.cursor.advance();
                    let Some(escaped) = self.cursor.peek() else {
                        return Err(self.err_at(
                            ErrorKind::UnterminatedString,
                            open,
                            "string is never closed",
                        ));
                    };
                    match escaped {
                        '"' => buf.push('"'),
                        '\\' => buf.push('\\'),
                        '/' => buf.push('/'),
                        'n' => buf.push('\n'),
                        't' => buf.push('\t'),
                        'r' => buf.push('\r'),
                        // Unrecognized escapes (including \u) pass
                        // through verbatim, backslash and all.
                        other => {
                            buf.push('\\');
                            buf.push(other);
                        }
                    }
                    prev = self.cursor.location();
                    self.cursor.advance();
                }
                other => {
                    buf.push(other);
                    prev = self.cursor.location();
                    self.cursor.advance();
                }
            }
        }
    }

    /// Greedy maximal-run number scan, then numeric conversion. A `.` or
    /// exponent in the run selects a float, otherwise a signed integer.
    fn parse_number(&mut self) -> Result<usize> {
        let start = self.cursor.location();
        let begin = self.cursor.byte_offset();
        let mut saw_digit = false;
        let mut saw_dot = false;
        let mut saw_exp = false;
        let mut prev_exp = false;
        while let Some(ch) = self.cursor.peek() {
            let accept = match ch {
                '0'..='9' => {
                    saw_digit = true;
                    true
                }
                '-' => self.cursor.byte_offset() == begin || prev_exp,
                '+' => prev_exp,
                '.' => {
                    if saw_dot || saw_exp {
                        false
                    } else {
                        saw_dot = true;
                        true
                    }
                }
                'e' | 'E' => {
                    if saw_exp || !saw_digit {
                        false
                    } else {
                        saw_exp = true;
                        true
                    }
                }
                _ => false,
            };
            if !accept {
                break;
            }
            prev_exp = matches!(ch, 'e' | 'E');
            self.cursor.advance();
        }
        let run = self.cursor.slice_from(begin);
        if run.is_empty() {
            return Err(self.err_at(ErrorKind::InvalidNumber, start, "expected a number"));
        }
        if saw_dot || saw_exp {
            let value: f64 = run.parse().map_err(|_| {
                self.err_at(
                    ErrorKind::InvalidNumber,
                    start,
                    format!("'{run}' is not a valid float"),
                )
            })?;
            Ok(self.arena.push_float(value))
        } else {
            let value: i64 = run.parse().map_err(|_| {
                self.err_at(
                    ErrorKind::InvalidNumber,
                    start,
                    format!("'{run}' is not a valid integer"),
                )
            })?;
            Ok(self.arena.push_integer(value))
        }
    }

    fn parse_array(&mut self) -> Result<usize> {
        let open = self.cursor.location();
        self.cursor.advance();
        let mut items: SmallVec<[usize; 16]> = SmallVec::new();
        // A comma is only legal once an element precedes it.
        let mut comma_ok = false;
        loop {
            let Some(ch) = self.cursor.peek() else {
                return Err(self.err_at(
                    ErrorKind::UnterminatedArray,
                    open,
                    "array is never closed",
                ));
            };
            match ch {
                ']' => {
                    self.cursor.advance();
                    return Ok(self.arena.push_array(&items));
                }
                ' ' | '\t' | '\r' | '\n' | '/' => self.skip_whitespace_and_comments()?,
                ',' => {
                    if !comma_ok {
                        return Err(self.err(
                            ErrorKind::EmptyElement,
                            "expected a value before ','",
                        ));
                    }
                    comma_ok = false;
                    self.cursor.advance();
                }
                _ => {
                    let item = self.parse_value()?;
                    items.push(item);
                    comma_ok = true;
                }
            }
        }
    }

    fn parse_object(&mut self) -> Result<usize> {
        let open = self.cursor.location();
        self.cursor.advance();
        let mut entries: SmallVec<[Pair; 8]> = SmallVec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let Some(ch) = self.cursor.peek() else {
                return Err(self.unterminated_object(open));
            };
            match ch {
                '}' => {
                    self.cursor.advance();
                    break;
                }
                ',' => {
                    return Err(self.err(ErrorKind::EmptyElement, "expected a key before ','"));
                }
                '"' => {}
                other => {
                    return Err(self.err(
                        ErrorKind::IncompleteKeyValuePair,
                        format!("expected '\"' to begin a key, found '{other}'"),
                    ));
                }
            }
            let key = self.parse_string()?;
            self.skip_whitespace_and_comments()?;
            match self.cursor.peek() {
                Some(':') => {
                    self.cursor.advance();
                }
                Some(other) => {
                    return Err(self.err(
                        ErrorKind::IncompleteKeyValuePair,
                        format!("expected ':' after key, found '{other}'"),
                    ));
                }
                None => return Err(self.unterminated_object(open)),
            }
            self.skip_whitespace_and_comments()?;
            let value = self.parse_value()?;
            self.insert_entry(&mut entries, key, value);
            self.skip_whitespace_and_comments()?;
            match self.cursor.peek() {
                Some(',') => {
                    self.cursor.advance();
                }
                Some('}') => {
                    self.cursor.advance();
                    break;
                }
                Some(other) => {
                    return Err(self.err(
                        ErrorKind::MissingComma,
                        format!("expected ',' or '}}' after value, found '{other}'"),
                    ));
                }
                None => return Err(self.unterminated_object(open)),
            }
        }
        Ok(self.arena.push_object(&entries))
    }

    fn unterminated_object(&self, open: Location) -> Error {
        self.err_at(ErrorKind::UnterminatedObject, open, "object is never closed")
    }

    /// Duplicate keys are not policed: the last write wins, keeping the
    /// position of the first occurrence.
    fn insert_entry(&mut self, entries: &mut SmallVec<[Pair; 8]>, key: String, value: usize) {
        let key_id = self.intern_key(key);
        match entries.iter_mut().find(|pair| pair.key == key_id) {
            Some(pair) => pair.value = value,
            None => entries.push(Pair { key: key_id, value }),
        }
    }

    fn intern_key(&mut self, key: String) -> usize {
        let key = SmolStr::from(key);
        if let Some(&id) = self.key_lookup.get(&key) {
            return id;
        }
        let id = self.arena.keys.len();
        self.arena.keys.push(key.clone());
        self.key_lookup.insert(key, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeKind;

    fn parse(input: &str) -> Result<Document> {
        parse_document(input)
    }

    #[rstest::rstest]
    #[case("0", 0)]
    #[case("-12", -12)]
    #[case("9223372036854775807", i64::MAX)]
    #[case("007", 7)]
    fn test_integer_runs(#[case] input: &str, #[case] expected: i64) {
        let doc = parse(input).unwrap();
        assert_eq!(doc.root().as_i64(), Some(expected));
    }

    #[rstest::rstest]
    #[case("0.14", 0.14)]
    #[case(".5", 0.5)]
    #[case("2.", 2.0)]
    #[case("1e3", 1000.0)]
    #[case("1E3", 1000.0)]
    #[case("-2.5e-2", -0.025)]
    #[case("1e+2", 100.0)]
    fn test_float_runs(#[case] input: &str, #[case] expected: f64) {
        let doc = parse(input).unwrap();
        assert_eq!(doc.root().as_f64(), Some(expected));
        assert_eq!(doc.root().kind(), NodeKind::Float);
    }

    #[rstest::rstest]
    #[case("e5")]
    #[case(".")]
    #[case("-")]
    #[case("9223372036854775808")]
    #[case("1e")]
    #[case("1e+-2")]
    fn test_bad_numbers(#[case] input: &str) {
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidNumber);
    }

    #[rstest::rstest]
    fn test_number_run_stops_at_terminator() {
        let doc = parse("[1,2]").unwrap();
        let root = doc.root();
        assert_eq!(root.len(), 2);
        assert_eq!(root.get_index(1).unwrap().as_i64(), Some(2));
    }

    #[rstest::rstest]
    fn test_exponent_selects_float() {
        let doc = parse("10e1").unwrap();
        assert_eq!(doc.root().kind(), NodeKind::Float);
        assert_eq!(doc.root().as_f64(), Some(100.0));
    }

    #[rstest::rstest]
    fn test_key_interning_shares_ids() {
        let doc = parse(r#"[{"a": 1}, {"a": 2}]"#).unwrap();
        // Both objects resolve "a"; the arena stores the key once.
        assert_eq!(doc.arena.keys.len(), 1);
    }
}
