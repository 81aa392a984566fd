//! rvjson Core Parser
//!
//! Recursive-descent parser for JSON object documents. The parser owns no
//! result representation: it reports structure and scalar values to a
//! caller-supplied [`Sink`], which may refuse any of them. The first error
//! stops the parse and is returned with its kind and byte offset.
//!
//! # Architecture
//!
//! - **scanner.rs** - Byte cursor, whitespace, keywords, string spans
//! - **number.rs** - Number grammar and decimal-to-binary conversion
//! - **parser.rs** - Object/array/value productions over a Sink
//! - **sink.rs** - Sink trait and the duplicate-key Validator
//! - **event.rs** - Event enum and closure adapter
//! - **document.rs** - Arena-backed document tree built from a parse
//! - **error.rs** - Error kinds and ParseError
//! - **span.rs** - Line/column locations
//! - **limits.rs** - Nesting depth limits
//!
//! # Example
//!
//! ```
//! use rvjson_core::{parse_events, ErrorKind, Event};
//!
//! let mut names = Vec::new();
//! parse_events(br#"{"a" : 1, "b" : [true]}"#, |event| {
//!     if let Event::Name(name) = event {
//!         names.push(name);
//!     }
//!     true
//! })
//! .unwrap();
//! assert_eq!(names, vec![&b"a"[..], &b"b"[..]]);
//!
//! let err = rvjson_core::validate(br#"{"a" : 1, "a" : 2}"#).unwrap_err();
//! assert_eq!((err.kind(), err.offset()), (ErrorKind::Name, 12));
//! ```

pub mod document;
pub mod error;
pub mod event;
pub mod limits;
pub mod number;
pub mod parser;
pub mod scanner;
pub mod sink;
pub mod span;

pub use document::{
    ArrayId, ArrayRef, Document, DocumentBuilder, Member, ObjectId, ObjectRef, StringId, Value,
    ValueRef,
};
pub use error::{ErrorKind, ParseError, UnknownErrorKind};
pub use event::{Event, EventSink};
pub use limits::{Limits, DEFAULT_MAX_DEPTH};
pub use number::{scan_number, Number, NumberError};
pub use parser::{parse, parse_events, parse_with_limits, validate, Parser};
pub use scanner::Scanner;
pub use sink::{Sink, Validator};
pub use span::Location;
