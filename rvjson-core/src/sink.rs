//! The sink contract between the parser and whatever consumes a parse.
//!
//! The parser owns no result representation. It reports each structural
//! step and each scanned value to a [`Sink`], exactly once and in input
//! order. Any call returning `bool` may refuse; a refusal is the only way
//! semantic rules outside the grammar (duplicate keys, size caps, ...)
//! reach the parser, which turns it into the error kind of the production
//! it was reporting:
//!
//! | call            | refusal kind        |
//! |-----------------|---------------------|
//! | `begin_object`  | `ErrorKind::Object` |
//! | `begin_array`   | `ErrorKind::Array`  |
//! | `set_name`      | `ErrorKind::Name`   |
//! | `set_null`      | `ErrorKind::Null`   |
//! | `set_bool`      | `ErrorKind::True` / `ErrorKind::False` |
//! | `set_number`    | `ErrorKind::Number` |
//! | `set_string`    | `ErrorKind::String` |
//!
//! After a refusal or a grammar error the parser makes no further calls.
//! What the sink accumulated up to that point has no defined final state
//! and should be discarded.
//!
//! Key uniqueness is a sink capability, not a grammar rule. Any sink that
//! materializes objects is expected to refuse a repeated name; see
//! [`Validator`] and [`DocumentBuilder`](crate::DocumentBuilder).

use std::collections::HashSet;

/// Receives parse events. Byte slices borrow the input buffer.
pub trait Sink<'a> {
    fn begin_object(&mut self) -> bool;
    fn end_object(&mut self);
    fn begin_array(&mut self) -> bool;
    fn end_array(&mut self);
    /// Called once per member, after the name is scanned and before its
    /// value is parsed. `name` is the raw span between the quotes.
    fn set_name(&mut self, name: &'a [u8]) -> bool;
    fn set_null(&mut self) -> bool;
    fn set_bool(&mut self, value: bool) -> bool;
    fn set_number(&mut self, value: f64) -> bool;
    /// `value` is the raw span between the quotes, escapes undecoded.
    fn set_string(&mut self, value: &'a [u8]) -> bool;
}

impl<'a, S: Sink<'a> + ?Sized> Sink<'a> for &mut S {
    #[inline]
    fn begin_object(&mut self) -> bool {
        (**self).begin_object()
    }

    #[inline]
    fn end_object(&mut self) {
        (**self).end_object()
    }

    #[inline]
    fn begin_array(&mut self) -> bool {
        (**self).begin_array()
    }

    #[inline]
    fn end_array(&mut self) {
        (**self).end_array()
    }

    #[inline]
    fn set_name(&mut self, name: &'a [u8]) -> bool {
        (**self).set_name(name)
    }

    #[inline]
    fn set_null(&mut self) -> bool {
        (**self).set_null()
    }

    #[inline]
    fn set_bool(&mut self, value: bool) -> bool {
        (**self).set_bool(value)
    }

    #[inline]
    fn set_number(&mut self, value: f64) -> bool {
        (**self).set_number(value)
    }

    #[inline]
    fn set_string(&mut self, value: &'a [u8]) -> bool {
        (**self).set_string(value)
    }
}

/// Stores nothing, refuses duplicate member names.
///
/// Names are compared as raw bytes, so `"a"` and `"\u0061"` are distinct.
#[derive(Debug, Default)]
pub struct Validator<'a> {
    /// One key set per open container; arrays push an empty placeholder so
    /// `end_array` can pop symmetrically.
    scopes: Vec<HashSet<&'a [u8]>>,
    /// Reused key sets, so deep or wide documents do not reallocate.
    spare: Vec<HashSet<&'a [u8]>>,
}

impl<'a> Validator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&mut self) {
        let scope = self.spare.pop().unwrap_or_default();
        self.scopes.push(scope);
    }

    fn close(&mut self) {
        if let Some(mut scope) = self.scopes.pop() {
            scope.clear();
            self.spare.push(scope);
        }
    }
}

impl<'a> Sink<'a> for Validator<'a> {
    fn begin_object(&mut self) -> bool {
        self.open();
        true
    }

    fn end_object(&mut self) {
        self.close();
    }

    fn begin_array(&mut self) -> bool {
        self.open();
        true
    }

    fn end_array(&mut self) {
        self.close();
    }

    fn set_name(&mut self, name: &'a [u8]) -> bool {
        match self.scopes.last_mut() {
            Some(keys) => keys.insert(name),
            None => false,
        }
    }

    fn set_null(&mut self) -> bool {
        true
    }

    fn set_bool(&mut self, _value: bool) -> bool {
        true
    }

    fn set_number(&mut self, _value: f64) -> bool {
        true
    }

    fn set_string(&mut self, _value: &'a [u8]) -> bool {
        true
    }
}
