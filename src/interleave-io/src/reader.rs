use std::{
    io::{self, BufRead},
    str,
};

use thiserror::Error;

// Upper bound for the offending text kept in a `Malformed` error.
const MAX_FOUND: usize = 32;

/// Errors that may occur when reading characters off an input.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying reader failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// A line held more than one character.
    ///
    /// `found` holds the start of the offending line, cut short for
    /// long lines.
    #[error("expected a single character on line {line}, found '{found}'")]
    Malformed { line: usize, found: String },

    /// A line was not valid UTF-8.
    #[error("line {line} is not valid UTF-8")]
    Utf8 { line: usize },
}

/// A reader which yields the characters of an input in the
/// one-character-per-line format.
///
/// Whitespace is discarded around every character, which makes both
/// `\n` and `\r\n` terminators work and skips lines that hold nothing
/// else. The last line does not need a terminator.
#[derive(Debug)]
pub struct CharReader<R> {
    inner: R,
    line: usize,
}

#[inline]
fn is_space(b: u8) -> bool {
    // Same set as C's isspace(), which includes vertical tab.
    b.is_ascii_whitespace() || b == 0x0B
}

impl<R: BufRead> CharReader<R> {
    /// Creates a new reader over `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    /// Gets the number of line terminators consumed so far.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Reads the next character from the input.
    ///
    /// Returns [`None`] when the end of input is reached. Once that
    /// happened, subsequent calls keep returning [`None`].
    pub fn read_char(&mut self) -> Result<Option<char>, ReadError> {
        self.skip_space(true)?;

        let Some(lead) = self.peek()? else {
            return Ok(None);
        };
        self.inner.consume(1);
        let c = self.decode(lead)?;

        // The rest of the line may only hold whitespace.
        self.skip_space(false)?;
        match self.peek()? {
            None => {}
            Some(b'\n') => {
                self.inner.consume(1);
                self.line += 1;
            }
            Some(_) => return Err(self.malformed(c)),
        }

        Ok(Some(c))
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    // Skips whitespace, stopping in front of a line terminator unless
    // `newlines` is set.
    fn skip_space(&mut self, newlines: bool) -> io::Result<()> {
        while let Some(b) = self.peek()? {
            match b {
                b'\n' if !newlines => break,
                b'\n' => self.line += 1,
                b if is_space(b) => {}
                _ => break,
            }
            self.inner.consume(1);
        }

        Ok(())
    }

    fn decode(&mut self, lead: u8) -> Result<char, ReadError> {
        let line = self.line + 1;
        let invalid = move || ReadError::Utf8 { line };

        let len = match lead {
            0x00..=0x7F => return Ok(lead as char),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(invalid()),
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in &mut buf[1..len] {
            match self.peek()? {
                Some(b @ 0x80..=0xBF) => {
                    *slot = b;
                    self.inner.consume(1);
                }
                _ => return Err(invalid()),
            }
        }

        // Catches overlong encodings and surrogates.
        str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(invalid)
    }

    // Builds the error for a second character on the line, keeping at
    // most `MAX_FOUND` bytes of the line.
    fn malformed(&mut self, first: char) -> ReadError {
        let mut found = first.to_string().into_bytes();
        while found.len() < MAX_FOUND {
            match self.peek() {
                Ok(Some(b)) if b != b'\n' && b != b'\r' => {
                    found.push(b);
                    self.inner.consume(1);
                }
                _ => break,
            }
        }

        ReadError::Malformed {
            line: self.line + 1,
            found: String::from_utf8_lossy(&found).into_owned(),
        }
    }
}

impl<R: BufRead> Iterator for CharReader<R> {
    type Item = Result<char, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_char().transpose()
    }
}
