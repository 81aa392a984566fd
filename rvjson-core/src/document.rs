//! Tree representation for parsed JSON documents.
//!
//! A [`DocumentBuilder`] is a [`Sink`] that materializes the parse into
//! index-addressed pools instead of individually allocated nodes:
//!
//! - `strings`: raw spans borrowed from the input
//! - `elements`: every array element, each array a contiguous run
//! - `members`: every object member, each object a contiguous run
//!
//! A [`Value`] is a small `Copy` tag plus pool index, so the whole document
//! can be moved or cloned without pointer fix-ups and is released by
//! dropping the pools. Children are collected on a scratch stack while
//! their container is open and moved into the pool when it closes, which
//! keeps each container's run contiguous.
//!
//! # Example
//!
//! ```
//! use rvjson_core::Document;
//!
//! let doc = Document::parse(br#"{"name" : "rvjson", "tags" : [1, 2]}"#).unwrap();
//! let root = doc.root();
//!
//! assert_eq!(root.get("name").and_then(|v| v.as_str()), Some("rvjson"));
//! assert_eq!(root.get("tags").and_then(|v| v.as_array()).map(|a| a.len()), Some(2));
//! ```

use std::fmt;

use crate::error::{ErrorKind, ParseError};
use crate::limits::Limits;
use crate::sink::{Sink, Validator};

// ============================================================================
// Core Types
// ============================================================================

/// Index of a string in the document's string pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringId(u32);

/// Index of an array in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayId(u32);

/// Index of an object in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u32);

/// Pools are addressed with `u32`; a builder refuses input that would
/// outgrow them.
const MAX_POOL_LEN: usize = u32::MAX as usize;

/// A value stored in a [`Document`].
///
/// Payload-carrying variants hold pool indices, so comparing two `Value`s
/// directly would compare identities. Use [`ValueRef`] for structural
/// equality.
#[derive(Debug, Clone, Copy)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(StringId),
    Array(ArrayId),
    Object(ObjectId),
}

/// One `name : value` pair of an object.
#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub name: StringId,
    pub value: Value,
}

/// A contiguous run inside a pool.
#[derive(Debug, Clone, Copy)]
struct Run {
    start: u32,
    len: u32,
}

impl Run {
    fn range(self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed JSON document.
///
/// The lifetime `'a` refers to the input buffer: strings are raw spans of
/// it, with escapes left undecoded.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    strings: Vec<&'a [u8]>,
    elements: Vec<Value>,
    arrays: Vec<Run>,
    members: Vec<Member>,
    objects: Vec<Run>,
    root: ObjectId,
}

impl<'a> Document<'a> {
    /// Parse input bytes into a document with default [`Limits`].
    ///
    /// Duplicate member names are rejected with [`ErrorKind::Name`].
    pub fn parse(input: &'a [u8]) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, Limits::default())
    }

    pub fn parse_with_limits(input: &'a [u8], limits: Limits) -> Result<Self, ParseError> {
        let mut builder = DocumentBuilder::new();
        let result = crate::parser::parse_with_limits(input, &mut builder, limits);
        crate::parser::logged(input, result)?;
        // A successful parse always closes the top-level object.
        builder
            .finish()
            .ok_or_else(|| ParseError::new(ErrorKind::Object, 0))
    }

    /// The top-level object.
    pub fn root(&self) -> ObjectRef<'_, 'a> {
        ObjectRef {
            doc: self,
            id: self.root,
        }
    }

    /// Navigation handle for a value of this document.
    pub fn value(&self, value: Value) -> ValueRef<'_, 'a> {
        ValueRef { doc: self, value }
    }

    /// Raw bytes of a pooled string.
    pub fn string(&self, id: StringId) -> Option<&'a [u8]> {
        self.strings.get(id.0 as usize).copied()
    }

    pub fn array(&self, id: ArrayId) -> Option<ArrayRef<'_, 'a>> {
        (self.arrays.len() > id.0 as usize).then_some(ArrayRef { doc: self, id })
    }

    pub fn object(&self, id: ObjectId) -> Option<ObjectRef<'_, 'a>> {
        (self.objects.len() > id.0 as usize).then_some(ObjectRef { doc: self, id })
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn array_count(&self) -> usize {
        self.arrays.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn elements_of(&self, id: ArrayId) -> &[Value] {
        &self.elements[self.arrays[id.0 as usize].range()]
    }

    fn members_of(&self, id: ObjectId) -> &[Member] {
        &self.members[self.objects[id.0 as usize].range()]
    }
}

impl PartialEq for Document<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

// ============================================================================
// Navigation handles
// ============================================================================

/// A value plus the document it lives in.
#[derive(Clone, Copy)]
pub struct ValueRef<'doc, 'a> {
    doc: &'doc Document<'a>,
    value: Value,
}

impl<'doc, 'a> ValueRef<'doc, 'a> {
    /// The pooled value this handle points at.
    pub fn value(&self) -> Value {
        self.value
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Raw string bytes, escapes undecoded.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self.value {
            Value::String(id) => self.doc.string(id),
            _ => None,
        }
    }

    /// Raw string as `&str`, if it is valid UTF-8. Escapes are not decoded.
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_array(&self) -> Option<ArrayRef<'doc, 'a>> {
        match self.value {
            Value::Array(id) => Some(ArrayRef { doc: self.doc, id }),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<ObjectRef<'doc, 'a>> {
        match self.value {
            Value::Object(id) => Some(ObjectRef { doc: self.doc, id }),
            _ => None,
        }
    }
}

impl<'d2, 'a2> PartialEq<ValueRef<'d2, 'a2>> for ValueRef<'_, '_> {
    fn eq(&self, other: &ValueRef<'d2, 'a2>) -> bool {
        match (self.value, other.value) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(_), Value::String(_)) => self.as_bytes() == other.as_bytes(),
            (Value::Array(a), Value::Array(b)) => {
                ArrayRef { doc: self.doc, id: a } == ArrayRef { doc: other.doc, id: b }
            }
            (Value::Object(a), Value::Object(b)) => {
                ObjectRef { doc: self.doc, id: a } == ObjectRef { doc: other.doc, id: b }
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ValueRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n:?}"),
            Value::String(_) => {
                write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes().unwrap_or_default()))
            }
            Value::Array(id) => fmt::Debug::fmt(&ArrayRef { doc: self.doc, id }, f),
            Value::Object(id) => fmt::Debug::fmt(&ObjectRef { doc: self.doc, id }, f),
        }
    }
}

/// An array of a document.
#[derive(Clone, Copy)]
pub struct ArrayRef<'doc, 'a> {
    doc: &'doc Document<'a>,
    id: ArrayId,
}

impl<'doc, 'a> ArrayRef<'doc, 'a> {
    pub fn id(&self) -> ArrayId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.doc.elements_of(self.id).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<ValueRef<'doc, 'a>> {
        let doc = self.doc;
        doc.elements_of(self.id)
            .get(index)
            .map(|&value| ValueRef { doc, value })
    }

    /// Elements in input order.
    pub fn iter(&self) -> impl Iterator<Item = ValueRef<'doc, 'a>> + 'doc {
        let doc = self.doc;
        doc.elements_of(self.id)
            .iter()
            .map(move |&value| ValueRef { doc, value })
    }
}

impl<'d2, 'a2> PartialEq<ArrayRef<'d2, 'a2>> for ArrayRef<'_, '_> {
    fn eq(&self, other: &ArrayRef<'d2, 'a2>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for ArrayRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An object of a document.
#[derive(Clone, Copy)]
pub struct ObjectRef<'doc, 'a> {
    doc: &'doc Document<'a>,
    id: ObjectId,
}

impl<'doc, 'a> ObjectRef<'doc, 'a> {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.doc.members_of(self.id).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of the member whose raw name equals `name`.
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<ValueRef<'doc, 'a>> {
        let name = name.as_ref();
        self.members().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// `(raw name, value)` pairs in input order.
    pub fn members(&self) -> impl Iterator<Item = (&'a [u8], ValueRef<'doc, 'a>)> + 'doc {
        let doc = self.doc;
        doc.members_of(self.id).iter().map(move |m| {
            let name = doc.string(m.name).unwrap_or_default();
            (name, ValueRef { doc, value: m.value })
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a [u8]> + 'doc {
        self.members().map(|(name, _)| name)
    }
}

impl<'d2, 'a2> PartialEq<ObjectRef<'d2, 'a2>> for ObjectRef<'_, '_> {
    /// Members compare pairwise in order.
    fn eq(&self, other: &ObjectRef<'d2, 'a2>) -> bool {
        self.len() == other.len()
            && self
                .members()
                .zip(other.members())
                .all(|((na, va), (nb, vb))| na == nb && va == vb)
    }
}

impl fmt::Debug for ObjectRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.members()
                    .map(|(name, value)| (String::from_utf8_lossy(name), value)),
            )
            .finish()
    }
}

// ============================================================================
// DocumentBuilder (sink)
// ============================================================================

/// An open container.
#[derive(Debug)]
struct Frame {
    is_object: bool,
    /// Where this container's children start on the scratch stack.
    start: usize,
    /// Member name under which the container hangs in its parent object.
    name: Option<StringId>,
}

/// Materializes parse events into a [`Document`].
///
/// Refuses duplicate member names (raw byte comparison) and input whose
/// pools would outgrow `u32` indices.
#[derive(Debug, Default)]
pub struct DocumentBuilder<'a> {
    strings: Vec<&'a [u8]>,
    elements: Vec<Value>,
    arrays: Vec<Run>,
    members: Vec<Member>,
    objects: Vec<Run>,
    root: Option<ObjectId>,

    stack: Vec<Frame>,
    pending_elements: Vec<Value>,
    pending_members: Vec<Member>,
    pending_name: Option<StringId>,
    keys: Validator<'a>,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished document, or `None` if no top-level object was closed.
    pub fn finish(self) -> Option<Document<'a>> {
        let root = self.root?;
        Some(Document {
            strings: self.strings,
            elements: self.elements,
            arrays: self.arrays,
            members: self.members,
            objects: self.objects,
            root,
        })
    }

    fn has_room(&self) -> bool {
        self.strings.len() < MAX_POOL_LEN
            && self.arrays.len() + self.stack.len() < MAX_POOL_LEN
            && self.objects.len() + self.stack.len() < MAX_POOL_LEN
            && self.elements.len() + self.pending_elements.len() < MAX_POOL_LEN
            && self.members.len() + self.pending_members.len() < MAX_POOL_LEN
    }

    fn intern(&mut self, bytes: &'a [u8]) -> StringId {
        let id = StringId(self.strings.len() as u32);
        self.strings.push(bytes);
        id
    }

    fn open(&mut self, is_object: bool) -> bool {
        if !self.has_room() || (self.stack.is_empty() && self.root.is_some()) {
            return false;
        }
        // Only the top-level container may open without an enclosing frame.
        if self.stack.is_empty() && !is_object {
            return false;
        }
        let start = if is_object {
            self.pending_members.len()
        } else {
            self.pending_elements.len()
        };
        self.stack.push(Frame {
            is_object,
            start,
            name: self.pending_name.take(),
        });
        true
    }

    /// Attach a finished value to the innermost open container.
    fn attach(&mut self, value: Value, name: Option<StringId>) -> bool {
        match self.stack.last() {
            Some(frame) if frame.is_object => match name {
                Some(name) => {
                    self.pending_members.push(Member { name, value });
                    true
                }
                None => false,
            },
            Some(_) => {
                self.pending_elements.push(value);
                true
            }
            None => match value {
                Value::Object(id) => {
                    self.root = Some(id);
                    true
                }
                _ => false,
            },
        }
    }

    fn scalar(&mut self, value: Value) -> bool {
        if !self.has_room() {
            return false;
        }
        let name = self.pending_name.take();
        self.attach(value, name)
    }
}

impl<'a> Sink<'a> for DocumentBuilder<'a> {
    fn begin_object(&mut self) -> bool {
        self.open(true) && self.keys.begin_object()
    }

    fn end_object(&mut self) {
        self.keys.end_object();
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let start = self.members.len() as u32;
        self.members.extend(self.pending_members.drain(frame.start..));
        let len = self.members.len() as u32 - start;
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(Run { start, len });
        let attached = self.attach(Value::Object(id), frame.name);
        debug_assert!(attached, "object closed outside a container");
    }

    fn begin_array(&mut self) -> bool {
        self.open(false) && self.keys.begin_array()
    }

    fn end_array(&mut self) {
        self.keys.end_array();
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let start = self.elements.len() as u32;
        self.elements.extend(self.pending_elements.drain(frame.start..));
        let len = self.elements.len() as u32 - start;
        let id = ArrayId(self.arrays.len() as u32);
        self.arrays.push(Run { start, len });
        let attached = self.attach(Value::Array(id), frame.name);
        debug_assert!(attached, "array closed outside a container");
    }

    fn set_name(&mut self, name: &'a [u8]) -> bool {
        if !self.has_room() {
            return false;
        }
        if !self.keys.set_name(name) {
            tracing::trace!(name = %String::from_utf8_lossy(name), "duplicate member name");
            return false;
        }
        self.pending_name = Some(self.intern(name));
        true
    }

    fn set_null(&mut self) -> bool {
        self.scalar(Value::Null)
    }

    fn set_bool(&mut self, value: bool) -> bool {
        self.scalar(Value::Bool(value))
    }

    fn set_number(&mut self, value: f64) -> bool {
        self.scalar(Value::Number(value))
    }

    fn set_string(&mut self, value: &'a [u8]) -> bool {
        if !self.has_room() {
            return false;
        }
        let id = self.intern(value);
        self.scalar(Value::String(id))
    }
}

// ============================================================================
// Tests
// ============================================================================
