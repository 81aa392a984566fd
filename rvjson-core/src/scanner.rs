//! Character-level scanning primitives.
//!
//! The scanner knows nothing about grammar position. It moves a cursor over
//! the input, skips separator whitespace, matches literal keywords and
//! delimits string payloads. The end of the slice is the sentinel: bytes
//! past it do not exist, and a NUL byte inside the slice is an ordinary byte.

use std::ops::Range;

/// A cursor over a fully resident input buffer.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Scanner positioned at the first byte of `input`.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    #[inline]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Byte under the cursor, if any.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Move the cursor to `pos`, clamped to the end of input.
    #[inline]
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Move past the byte under the cursor. No-op at end of input.
    #[inline]
    pub fn bump(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    /// Consume `byte` if it is under the cursor.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip space, tab, LF and CR.
    #[inline]
    pub fn skip_spaces(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Match `lit` byte-for-byte at the cursor.
    ///
    /// On a full match the cursor moves past it. On mismatch (including a
    /// truncated match at end of input) the cursor does not move.
    #[inline]
    pub fn keyword(&mut self, lit: &[u8]) -> bool {
        if self.input[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    /// Delimit a string starting at the `"` under the cursor.
    ///
    /// Returns the byte range between the quotes and leaves the cursor just
    /// past the closing quote. A backslash protects the following byte,
    /// whatever it is, from ending the string; escapes are not validated or
    /// decoded.
    ///
    /// If the input ends before an unprotected `"`, the cursor moves to the
    /// end of input and its offset is returned as the error.
    pub fn string_span(&mut self) -> Result<Range<usize>, usize> {
        debug_assert_eq!(self.peek(), Some(b'"'));
        let start = self.pos + 1;
        let mut at = start;
        while let Some(found) = memchr::memchr2(b'"', b'\\', &self.input[at..]) {
            let idx = at + found;
            if self.input[idx] == b'"' {
                self.pos = idx + 1;
                return Ok(start..idx);
            }
            // Backslash: the next byte is payload even if it is a quote.
            at = idx + 2;
            if at > self.input.len() {
                break;
            }
        }
        self.pos = self.input.len();
        Err(self.pos)
    }
}
