//! Recursive-descent parser.
//!
//! One routine per grammar production: [`Parser::object`],
//! [`Parser::array`] and [`Parser::value`] call each other through checked
//! recursion, with depth bounded by [`Limits`]. The first failure anywhere
//! unwinds the whole descent through `?`; there is no recovery and no
//! aggregation, and the sink hears nothing after it.
//!
//! The accepted language is a single top-level object. Bytes after its
//! closing `}` are never inspected.
//!
//! Offsets always point at the first byte that could not satisfy the
//! current expectation, after skipping separator whitespace there. Sink
//! refusals are reported at the cursor when the sink was consulted; for
//! names and string values that is the closing quote.

use std::ops::Range;

use crate::error::{ErrorKind, ParseError};
use crate::event::{Event, EventSink};
use crate::limits::Limits;
use crate::number::scan_number;
use crate::scanner::Scanner;
use crate::sink::{Sink, Validator};

type Result<T> = std::result::Result<T, ParseError>;

/// Drives a [`Sink`] over one input buffer.
///
/// The sink is taken by value; pass `&mut sink` to keep access to it
/// after the parse.
pub struct Parser<'a, S> {
    scanner: Scanner<'a>,
    sink: S,
    limits: Limits,
    depth: usize,
}

impl<'a, S: Sink<'a>> Parser<'a, S> {
    pub fn new(input: &'a [u8], sink: S) -> Self {
        Self {
            scanner: Scanner::new(input),
            sink,
            limits: Limits::default(),
            depth: 0,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse the whole document.
    pub fn parse(mut self) -> Result<()> {
        self.scanner.skip_spaces();
        if self.scanner.peek() != Some(b'{') {
            return Err(self.error(ErrorKind::Object));
        }
        self.object()
    }

    #[inline]
    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.scanner.position())
    }

    /// Account for one more open container; the cursor is on its bracket.
    #[inline]
    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.limits.max_depth {
            return Err(self.error(ErrorKind::DepthLimit));
        }
        self.depth += 1;
        Ok(())
    }

    /// Object production. The cursor is on `{`.
    fn object(&mut self) -> Result<()> {
        self.enter()?;
        self.scanner.bump();
        if !self.sink.begin_object() {
            return Err(self.error(ErrorKind::Object));
        }

        self.scanner.skip_spaces();
        if !self.scanner.eat(b'}') {
            loop {
                self.member()?;
                self.scanner.skip_spaces();
                match self.scanner.peek() {
                    Some(b',') => {
                        self.scanner.bump();
                        self.scanner.skip_spaces();
                    }
                    Some(b'}') => {
                        self.scanner.bump();
                        break;
                    }
                    Some(_) => return Err(self.error(ErrorKind::Comma)),
                    None => return Err(self.error(ErrorKind::ObjectEnd)),
                }
            }
        }

        self.sink.end_object();
        self.depth -= 1;
        Ok(())
    }

    /// One `"name" : value` pair. The cursor is past separator whitespace.
    fn member(&mut self) -> Result<()> {
        match self.scanner.peek() {
            Some(b'"') => {}
            Some(_) => return Err(self.error(ErrorKind::StringBegin)),
            None => return Err(self.error(ErrorKind::ObjectEnd)),
        }
        let span = self.string()?;
        let name = &self.scanner.input()[span.clone()];
        if !self.sink.set_name(name) {
            return Err(ParseError::new(ErrorKind::Name, span.end));
        }

        self.scanner.skip_spaces();
        if !self.scanner.eat(b':') {
            return Err(self.error(ErrorKind::Colon));
        }
        self.value()
    }

    /// Array production. The cursor is on `[`.
    fn array(&mut self) -> Result<()> {
        self.enter()?;
        self.scanner.bump();
        if !self.sink.begin_array() {
            return Err(self.error(ErrorKind::Array));
        }

        self.scanner.skip_spaces();
        if !self.scanner.eat(b']') {
            loop {
                self.value()?;
                self.scanner.skip_spaces();
                match self.scanner.peek() {
                    Some(b',') => self.scanner.bump(),
                    Some(b']') => {
                        self.scanner.bump();
                        break;
                    }
                    Some(_) => return Err(self.error(ErrorKind::Comma)),
                    None => return Err(self.error(ErrorKind::ArrayEnd)),
                }
            }
        }

        self.sink.end_array();
        self.depth -= 1;
        Ok(())
    }

    /// Value production.
    ///
    /// Dispatch order: array, object, string, the three keywords, and
    /// finally number, so any unrecognized byte is reported by the number
    /// grammar.
    fn value(&mut self) -> Result<()> {
        self.scanner.skip_spaces();
        match self.scanner.peek() {
            Some(b'[') => self.array(),
            Some(b'{') => self.object(),
            Some(b'"') => {
                let span = self.string()?;
                let value = &self.scanner.input()[span.clone()];
                if !self.sink.set_string(value) {
                    return Err(ParseError::new(ErrorKind::String, span.end));
                }
                Ok(())
            }
            _ => {
                let (accepted, kind) = if self.scanner.keyword(b"true") {
                    (self.sink.set_bool(true), ErrorKind::True)
                } else if self.scanner.keyword(b"false") {
                    (self.sink.set_bool(false), ErrorKind::False)
                } else if self.scanner.keyword(b"null") {
                    (self.sink.set_null(), ErrorKind::Null)
                } else {
                    return self.number();
                };
                if !accepted {
                    return Err(self.error(kind));
                }
                Ok(())
            }
        }
    }

    fn number(&mut self) -> Result<()> {
        let number = scan_number(self.scanner.input(), self.scanner.position())
            .map_err(|e| ParseError::new(e.kind, e.offset))?;
        self.scanner.seek(number.end);
        if !self.sink.set_number(number.value) {
            return Err(self.error(ErrorKind::Number));
        }
        Ok(())
    }

    /// Scan a string; the cursor is on its opening quote.
    #[inline]
    fn string(&mut self) -> Result<Range<usize>> {
        self.scanner
            .string_span()
            .map_err(|end| ParseError::new(ErrorKind::StringEnd, end))
    }
}

/// Parse `input` into `sink` with default [`Limits`].
pub fn parse<'a, S: Sink<'a>>(input: &'a [u8], sink: S) -> Result<()> {
    parse_with_limits(input, sink, Limits::default())
}

/// Parse `input` into `sink` with custom limits.
pub fn parse_with_limits<'a, S: Sink<'a>>(
    input: &'a [u8],
    sink: S,
    limits: Limits,
) -> Result<()> {
    Parser::new(input, sink).with_limits(limits).parse()
}

/// Debug-log a failed parse of `input` and pass the result through.
pub(crate) fn logged<T>(input: &[u8], result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        tracing::debug!(
            kind = %err.kind(),
            offset = err.offset(),
            len = input.len(),
            "json parse failed"
        );
    }
    result
}

/// Check that `input` is one valid JSON object with unique member names.
pub fn validate(input: &[u8]) -> Result<()> {
    logged(input, parse(input, Validator::new()))
}

/// Parse `input`, handing each event to `callback`.
///
/// Returning `false` from the callback refuses the event; see
/// [`EventSink`].
pub fn parse_events<'a, F>(input: &'a [u8], callback: F) -> Result<()>
where
    F: FnMut(Event<'a>) -> bool,
{
    logged(input, parse(input, EventSink::new(callback)))
}
