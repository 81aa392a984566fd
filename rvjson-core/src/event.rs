//! Parser events - a value-level view of the sink protocol.
//!
//! Each sink call maps to one event. Structure is represented by
//! begin/end pairs; a member name is followed by exactly one value, which
//! is either a scalar event or a balanced begin/end group.
//!
//! ```text
//! {"a" : [1, true]}
//!
//! BeginObject
//! Name("a")
//! BeginArray
//! Number(1.0)
//! Bool(true)
//! EndArray
//! EndObject
//! ```

use crate::sink::Sink;

/// One sink call.
///
/// The lifetime `'a` refers to the input buffer - byte slices are
/// zero-copy references into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    /// Member name, raw bytes between the quotes.
    Name(&'a [u8]),
    Null,
    Bool(bool),
    Number(f64),
    /// String value, raw bytes between the quotes (escapes undecoded).
    String(&'a [u8]),
}

impl<'a> Event<'a> {
    /// Check if this event starts or is a value.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Event::BeginObject
                | Event::BeginArray
                | Event::Null
                | Event::Bool(_)
                | Event::Number(_)
                | Event::String(_)
        )
    }

    /// Check if this is a structure start event (has matching end).
    pub fn is_structure_start(&self) -> bool {
        matches!(self, Event::BeginObject | Event::BeginArray)
    }

    /// Check if this is a structure end event.
    pub fn is_structure_end(&self) -> bool {
        matches!(self, Event::EndObject | Event::EndArray)
    }

    /// Replay this event as the matching call on `sink`.
    ///
    /// End events cannot be refused and always return `true`.
    pub fn forward<S: Sink<'a> + ?Sized>(self, sink: &mut S) -> bool {
        match self {
            Event::BeginObject => sink.begin_object(),
            Event::EndObject => {
                sink.end_object();
                true
            }
            Event::BeginArray => sink.begin_array(),
            Event::EndArray => {
                sink.end_array();
                true
            }
            Event::Name(name) => sink.set_name(name),
            Event::Null => sink.set_null(),
            Event::Bool(value) => sink.set_bool(value),
            Event::Number(value) => sink.set_number(value),
            Event::String(value) => sink.set_string(value),
        }
    }
}

/// Adapts a closure into a [`Sink`].
///
/// The closure sees every event in order. Returning `false` from a
/// refusable event (anything but the two end events) rejects it; the
/// return value for end events is ignored.
pub struct EventSink<F> {
    callback: F,
}

impl<F> EventSink<F> {
    pub fn new(callback: F) -> Self {
        Self { callback }
    }

    pub fn into_inner(self) -> F {
        self.callback
    }
}

impl<'a, F> Sink<'a> for EventSink<F>
where
    F: FnMut(Event<'a>) -> bool,
{
    fn begin_object(&mut self) -> bool {
        (self.callback)(Event::BeginObject)
    }

    fn end_object(&mut self) {
        (self.callback)(Event::EndObject);
    }

    fn begin_array(&mut self) -> bool {
        (self.callback)(Event::BeginArray)
    }

    fn end_array(&mut self) {
        (self.callback)(Event::EndArray);
    }

    fn set_name(&mut self, name: &'a [u8]) -> bool {
        (self.callback)(Event::Name(name))
    }

    fn set_null(&mut self) -> bool {
        (self.callback)(Event::Null)
    }

    fn set_bool(&mut self, value: bool) -> bool {
        (self.callback)(Event::Bool(value))
    }

    fn set_number(&mut self, value: f64) -> bool {
        (self.callback)(Event::Number(value))
    }

    fn set_string(&mut self, value: &'a [u8]) -> bool {
        (self.callback)(Event::String(value))
    }
}
