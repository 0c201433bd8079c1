use memchr::memchr_iter;

use crate::error::Location;

/// Byte cursor over the input with incremental 1-indexed line/column
/// tracking.
///
/// `position` is the byte offset of the character currently under the
/// cursor. Every forward step keeps `line`/`col` consistent: passing a
/// `\n` bumps the line and resets the column.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    col: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn byte_offset(&self) -> usize {
        self.position
    }

    pub fn location(&self) -> Location {
        Location {
            offset: self.position,
            row: self.line,
            col: self.col,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Input between `start` and the current offset.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.position]
    }

    pub fn peek(&self) -> Option<char> {
        let bytes = self.input.as_bytes();
        match bytes.get(self.position) {
            Some(&byte) if byte.is_ascii() => Some(byte as char),
            Some(_) => self.input[self.position..].chars().next(),
            None => None,
        }
    }

    pub fn advance(&mut self) -> Option<char> {
        let bytes = self.input.as_bytes();
        match bytes.get(self.position) {
            Some(&byte) if byte.is_ascii() => {
                self.position += 1;
                self.bump(byte as char);
                Some(byte as char)
            }
            Some(_) => {
                let ch = self.input[self.position..].chars().next()?;
                self.position += ch.len_utf8();
                self.bump(ch);
                Some(ch)
            }
            None => None,
        }
    }

    /// Steps over `len` bytes at once, recomputing line/column in bulk.
    /// `len` must end on a character boundary.
    pub fn advance_span(&mut self, len: usize) {
        let end = (self.position + len).min(self.input.len());
        let span = &self.input[self.position..end];
        let mut newlines = 0usize;
        let mut last = None;
        for idx in memchr_iter(b'\n', span.as_bytes()) {
            newlines += 1;
            last = Some(idx);
        }
        match last {
            Some(idx) => {
                self.line += newlines;
                self.col = span[idx + 1..].chars().count() + 1;
            }
            None => self.col += span.chars().count(),
        }
        self.position = end;
    }

    fn bump(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}
