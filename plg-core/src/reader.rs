/// Line reader that hides comments and blank lines from the PLG grammar
use std::io::{self, BufRead};

/// Longest physical line read in one go, terminator included
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

/// Yields logical lines: trimmed, comment-stripped and never empty.
///
/// Physical lines longer than `max_line_length - 1` bytes are split, and the
/// remainder is read as the next physical line. Once a comment marker has been
/// read, the rest of its physical line is discarded instead.
pub struct LineReader<R> {
    inner: R,
    max_line_length: usize,
    line_number: usize,
    at_line_start: bool,
    raw: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, max_line_length: usize) -> Self {
        let max_line_length = max_line_length.max(2);
        Self {
            inner,
            max_line_length,
            line_number: 0,
            at_line_start: true,
            raw: Vec::with_capacity(max_line_length),
        }
    }

    /// Physical line number of the most recently read line (1-based)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the next non-empty logical line, or `None` at end of input
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if !self.read_physical()? {
                return Ok(None);
            }

            let text = String::from_utf8_lossy(&self.raw);
            let stripped = strip_comment(&text);
            if !stripped.is_empty() {
                return Ok(Some(stripped.to_string()));
            }

            log::trace!("skipping empty line {}", self.line_number);
        }
    }

    /// Fill `raw` with one bounded physical line. Returns false at end of input.
    fn read_physical(&mut self) -> io::Result<bool> {
        self.raw.clear();
        let limit = self.max_line_length - 1;

        while self.raw.len() < limit {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let window = &available[..available.len().min(limit - self.raw.len())];
            let (taken, done) = match window.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (window.len(), false),
            };
            self.raw.extend_from_slice(&window[..taken]);
            self.inner.consume(taken);
            if done {
                break;
            }
        }

        if self.raw.is_empty() {
            return Ok(false);
        }

        if self.at_line_start {
            self.line_number += 1;
        }
        self.at_line_start = self.raw.ends_with(b"\n");

        if !self.at_line_start && self.raw.iter().any(|&b| is_comment_marker(b)) {
            self.skip_rest_of_line()?;
            self.at_line_start = true;
        }
        Ok(true)
    }

    /// Consume input through the next newline, or to end of input
    fn skip_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let available = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(());
            }

            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.inner.consume(pos + 1);
                    return Ok(());
                }
                None => {
                    let taken = available.len();
                    self.inner.consume(taken);
                }
            }
        }
    }
}

fn is_comment_marker(b: u8) -> bool {
    matches!(b, b'#' | b';' | b'\0')
}

/// Trim a raw line and cut it at the first `#`, `;` or NUL
pub fn strip_comment(line: &str) -> &str {
    let line = line.trim_start();
    let end = line
        .find(|c: char| c.is_ascii() && is_comment_marker(c as u8))
        .unwrap_or(line.len());
    line[..end].trim_end()
}
