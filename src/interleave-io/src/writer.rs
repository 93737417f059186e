use std::io::{self, Write};

/// A writer which emits characters in the one-character-per-line
/// format.
///
/// Every character is handed to the underlying writer as soon as it
/// is written; buffering is left to the caller's choice of `W`.
#[derive(Debug)]
pub struct CharWriter<W: Write> {
    inner: W,
    lines: usize,
}

impl<W: Write> CharWriter<W> {
    /// Creates a new writer over `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner, lines: 0 }
    }

    /// Gets the number of lines written so far.
    #[inline]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Writes `c` followed by a line terminator.
    pub fn write_char(&mut self, c: char) -> io::Result<()> {
        // Four bytes for the largest UTF-8 sequence, one for '\n'.
        let mut buf = [0; 5];
        let len = c.encode_utf8(&mut buf).len();
        buf[len] = b'\n';

        self.inner.write_all(&buf[..=len])?;
        self.lines += 1;

        Ok(())
    }

    /// Flushes all written lines and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
