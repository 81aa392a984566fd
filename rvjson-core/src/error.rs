//! Error kinds and the first-failure error record.
//!
//! The taxonomy is closed: one kind per grammar token the parser expected
//! but did not find, the four number sub-stages, and one kind per sink
//! refusal. The parser produces at most one [`ParseError`] per run and
//! never overwrites it.
//!
//! Kinds carry no prose. Formatting a message for a human (or converting
//! the offset to a line/column with [`Location`]) is left to the caller.

use std::fmt;
use std::str::FromStr;

use crate::span::Location;

/// What the parser expected at the failing offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ErrorKind {
    /// Expected `{` at the top level, or the sink refused `begin_object`.
    Object = 1,
    /// Input ended inside an object.
    ObjectEnd,
    /// The sink refused `begin_array`.
    Array,
    /// Input ended inside an array.
    ArrayEnd,
    /// Expected the opening `"` of a member name.
    StringBegin,
    /// Input ended before the closing `"` of a string.
    StringEnd,
    /// Expected `:` after a member name.
    Colon,
    /// Expected `,` or the closing bracket after a value.
    Comma,
    /// The sink refused a member name.
    Name,
    /// No integer digits where a number was expected.
    NumberSignificand,
    /// A `.` without digits on one side.
    NumberDecimal,
    /// An exponent marker without digits.
    NumberExp,
    /// Sign stage of the number production. Part of the closed taxonomy;
    /// the scanner reports a `-` without digits as `NumberSignificand`.
    NumberSign,
    /// The sink refused a number.
    Number,
    /// The sink refused `null`.
    Null,
    /// The sink refused `true`.
    True,
    /// The sink refused `false`.
    False,
    /// The sink refused a string value.
    String,
    /// Opening one more object or array would exceed [`Limits::max_depth`].
    ///
    /// [`Limits::max_depth`]: crate::Limits::max_depth
    DepthLimit,
}

static KINDS_BY_NAME: phf::Map<&'static str, ErrorKind> = phf::phf_map! {
    "Object" => ErrorKind::Object,
    "ObjectEnd" => ErrorKind::ObjectEnd,
    "Array" => ErrorKind::Array,
    "ArrayEnd" => ErrorKind::ArrayEnd,
    "StringBegin" => ErrorKind::StringBegin,
    "StringEnd" => ErrorKind::StringEnd,
    "Colon" => ErrorKind::Colon,
    "Comma" => ErrorKind::Comma,
    "Name" => ErrorKind::Name,
    "NumberSignificand" => ErrorKind::NumberSignificand,
    "NumberDecimal" => ErrorKind::NumberDecimal,
    "NumberExp" => ErrorKind::NumberExp,
    "NumberSign" => ErrorKind::NumberSign,
    "Number" => ErrorKind::Number,
    "Null" => ErrorKind::Null,
    "True" => ErrorKind::True,
    "False" => ErrorKind::False,
    "String" => ErrorKind::String,
    "DepthLimit" => ErrorKind::DepthLimit,
};

impl ErrorKind {
    /// Symbolic name of the kind, identical to the variant name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::ObjectEnd => "ObjectEnd",
            Self::Array => "Array",
            Self::ArrayEnd => "ArrayEnd",
            Self::StringBegin => "StringBegin",
            Self::StringEnd => "StringEnd",
            Self::Colon => "Colon",
            Self::Comma => "Comma",
            Self::Name => "Name",
            Self::NumberSignificand => "NumberSignificand",
            Self::NumberDecimal => "NumberDecimal",
            Self::NumberExp => "NumberExp",
            Self::NumberSign => "NumberSign",
            Self::Number => "Number",
            Self::Null => "Null",
            Self::True => "True",
            Self::False => "False",
            Self::String => "String",
            Self::DepthLimit => "DepthLimit",
        }
    }

    /// True for the four grammar sub-stages of the number production.
    #[inline]
    pub fn is_number_grammar(self) -> bool {
        matches!(
            self,
            Self::NumberSignificand | Self::NumberDecimal | Self::NumberExp | Self::NumberSign
        )
    }

    /// True for kinds that can only come from a sink refusal.
    #[inline]
    pub fn is_refusal(self) -> bool {
        matches!(
            self,
            Self::Array
                | Self::Name
                | Self::Number
                | Self::Null
                | Self::True
                | Self::False
                | Self::String
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`ErrorKind::from_str`] for names outside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error kind `{0}`")]
pub struct UnknownErrorKind(pub String);

impl FromStr for ErrorKind {
    type Err = UnknownErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KINDS_BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| UnknownErrorKind(s.to_owned()))
    }
}

/// The first grammar violation (or sink refusal) of a parse.
///
/// `offset` is a 0-based byte index into the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    kind: ErrorKind,
    offset: usize,
}

impl ParseError {
    #[inline]
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line and column of the offset within `input`.
    pub fn location(&self, input: &[u8]) -> Location {
        Location::from_offset(input, self.offset)
    }
}
