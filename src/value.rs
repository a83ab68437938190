use std::borrow::Cow;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::Tag;

/// The bytes of an NBT string. The length prefix in the format counts bytes,
/// and nothing guarantees the bytes are valid unicode, so they are kept raw.
/// Use [`NbtString::to_str_lossy`] to get text.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct NbtString(Vec<u8>);

impl NbtString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode as Java's modified UTF-8, falling back to replacing invalid
    /// sequences if the bytes are not valid CESU-8 either.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        match cesu8::from_java_cesu8(&self.0) {
            Ok(s) => s,
            Err(_) => String::from_utf8_lossy(&self.0),
        }
    }
}

impl From<Vec<u8>> for NbtString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for NbtString {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl PartialEq<str> for NbtString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for NbtString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl std::fmt::Debug for NbtString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}

impl std::fmt::Display for NbtString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl Serialize for NbtString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_str_lossy())
    }
}

/// A homogeneous NBT list. Every element has the tag given by
/// [`List::element_tag`]. An empty list may declare [`Tag::End`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    element: Tag,
    values: Vec<Value>,
}

impl List {
    pub(crate) fn new(element: Tag, values: Vec<Value>) -> Self {
        Self { element, values }
    }

    pub fn element_tag(&self) -> Tag {
        self.element
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Value is a complete NBT value. It owns its data.
///
/// Integers are held unsigned, exactly as they were read. Compounds keep their
/// entries in the order they appeared in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Byte(u8),
    Short(u16),
    Int(u32),
    Long(u64),
    Float(f32),
    Double(f64),
    ByteArray(#[serde(with = "serde_bytes")] Vec<u8>),
    String(NbtString),
    List(List),
    Compound(Vec<NamedTag>),
}

impl Value {
    /// The tag this value would be written with.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
        }
    }

    /// The value of a Byte, Short, Int or Long widened to u64. `None` for
    /// any other tag.
    pub fn as_integer(&self) -> Option<u64> {
        match *self {
            Value::Byte(v) => Some(v.into()),
            Value::Short(v) => Some(v.into()),
            Value::Int(v) => Some(v.into()),
            Value::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            Value::ByteArray(bs) => Some(bs),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&[NamedTag]> {
        match self {
            Value::Compound(entries) => Some(entries),
            _ => None,
        }
    }
}

/// A value together with the name it was stored under in a compound. The
/// root of an NBT tree is also named, usually `Schematic` for schematics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedTag {
    pub name: NbtString,
    pub value: Value,
}

impl NamedTag {
    pub fn new(name: impl Into<NbtString>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn tag(&self) -> Tag {
        self.value.tag()
    }

    /// Find the first tag called `name`, searching depth first from this tag
    /// and through every compound below it. Children are visited in the order
    /// they were read, so when several tags share a name the one met first
    /// wins. Lists are not searched since their elements have no names.
    ///
    /// ```
    /// use sch2bob::{NamedTag, Value};
    ///
    /// let root = NamedTag::new(
    ///     "Schematic",
    ///     Value::Compound(vec![
    ///         NamedTag::new(
    ///             "Inner",
    ///             Value::Compound(vec![NamedTag::new("Width", Value::Short(3))]),
    ///         ),
    ///         NamedTag::new("Width", Value::Short(5)),
    ///     ]),
    /// );
    ///
    /// assert_eq!(root.find("Width").unwrap().value, Value::Short(3));
    /// assert!(root.find("Height").is_none());
    /// ```
    pub fn find(&self, name: &str) -> Option<&NamedTag> {
        let mut stack = vec![self];

        while let Some(tag) = stack.pop() {
            if tag.name == name {
                return Some(tag);
            }

            if let Value::Compound(entries) = &tag.value {
                // reversed so the first entry is popped first.
                stack.extend(entries.iter().rev());
            }
        }

        None
    }

    /// The integer held by this tag, see [`Value::as_integer`]. Errors with
    /// the tag's name if it is not one of the integer tags.
    pub fn as_integer(&self) -> Result<u64> {
        self.value
            .as_integer()
            .ok_or_else(|| Error::not_numeric(self.name.to_string(), self.tag()))
    }
}
