use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::coerce;
use crate::kind::Kind;

/// Key of a `Mapping`. Scripts may key maps by booleans, integers or text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::Int(n) => write!(f, "{n}"),
            MapKey::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::Text(s.to_string())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::Text(s)
    }
}

impl From<i64> for MapKey {
    fn from(n: i64) -> Self {
        MapKey::Int(n)
    }
}

/// Opaque native data handed back to scripts.
///
/// Byte and rune sequences are not script-level variants of their own; they
/// only appear as the result of a coercion or a native call and travel
/// through the runtime inside this handle.
#[derive(Debug, Clone, PartialEq)]
pub enum Handle {
    Bytes(Vec<u8>),
    Runes(Vec<char>),
    Bools(Vec<bool>),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Texts(Vec<String>),
    /// An error value produced by a native library (e.g. `errors.new`).
    Error(String),
}

impl Handle {
    pub fn kind(&self) -> Kind {
        match self {
            Handle::Bytes(_) => Kind::Bytes,
            Handle::Runes(_) => Kind::Runes,
            Handle::Bools(_) => Kind::BoolSlice,
            Handle::Ints(_) => Kind::IntSlice,
            Handle::Floats(_) => Kind::FloatSlice,
            Handle::Texts(_) => Kind::TextSlice,
            Handle::Error(_) => Kind::Error,
        }
    }

    /// Number of elements for slice-like handles, `None` for errors.
    pub fn len(&self) -> Option<usize> {
        match self {
            Handle::Bytes(v) => Some(v.len()),
            Handle::Runes(v) => Some(v.len()),
            Handle::Bools(v) => Some(v.len()),
            Handle::Ints(v) => Some(v.len()),
            Handle::Floats(v) => Some(v.len()),
            Handle::Texts(v) => Some(v.len()),
            Handle::Error(_) => None,
        }
    }
}

/// The runtime representation of every script value.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Rc<RefCell<Vec<Value>>>),
    Mapping(Rc<RefCell<HashMap<MapKey, Value>>>),
    /// Signed count of nanoseconds.
    Duration(i64),
    Native(Handle),
}

impl Value {
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Rc::new(RefCell::new(items)))
    }

    pub fn mapping(entries: HashMap<MapKey, Value>) -> Self {
        Value::Mapping(Rc::new(RefCell::new(entries)))
    }

    pub fn empty_mapping() -> Self {
        Value::mapping(HashMap::new())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Native(Handle::Error(message.into()))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Text(_) => Kind::Text,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
            Value::Duration(_) => Kind::Duration,
            Value::Native(handle) => handle.kind(),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => {
                // Compare by reference first, then by value
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Mapping(a), Value::Mapping(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Address of a shared container, `None` for every other variant.
    fn container_ptr(&self) -> Option<*const ()> {
        match self {
            Value::Sequence(items) => Some(Rc::as_ptr(items) as *const ()),
            Value::Mapping(entries) => Some(Rc::as_ptr(entries) as *const ()),
            _ => None,
        }
    }
}

/// A value paired with the containers enclosing it, so that a container
/// reached again through itself is cut short instead of recursed into.
struct Nested<'a> {
    value: &'a Value,
    enclosing: &'a RefCell<Vec<*const ()>>,
}

impl Nested<'_> {
    fn child<'b>(&'b self, value: &'b Value) -> Nested<'b> {
        Nested {
            value,
            enclosing: self.enclosing,
        }
    }

    /// Runs `f` with this value's container marked as open. Returns `None`
    /// when it is already open further up.
    fn enter<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        let ptr = self.value.container_ptr()?;
        if self.enclosing.borrow().contains(&ptr) {
            return None;
        }
        self.enclosing.borrow_mut().push(ptr);
        let result = f();
        self.enclosing.borrow_mut().pop();
        Some(result)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enclosing = RefCell::new(Vec::new());
        Nested {
            value: self,
            enclosing: &enclosing,
        }
        .fmt(f)
    }
}

impl fmt::Display for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Nil => write!(f, "<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // Rust's float formatting is already the shortest round-trip form
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Sequence(items) => self
                .enter(|| write_spaced(f, items.borrow().iter().map(|item| self.child(item))))
                .unwrap_or_else(|| write!(f, "[...]")),
            Value::Mapping(entries) => self
                .enter(|| {
                    write!(f, "{{")?;
                    for (i, (key, val)) in entries.borrow().iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{key}: {}", self.child(val))?;
                    }
                    write!(f, "}}")
                })
                .unwrap_or_else(|| write!(f, "{{...}}")),
            Value::Duration(nanos) => write!(f, "{}", coerce::format_duration(*nanos)),
            Value::Native(handle) => match handle {
                Handle::Bytes(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
                Handle::Runes(runes) => write!(f, "{}", runes.iter().collect::<String>()),
                Handle::Bools(v) => write_spaced(f, v.iter()),
                Handle::Ints(v) => write_spaced(f, v.iter()),
                Handle::Floats(v) => write_spaced(f, v.iter()),
                Handle::Texts(v) => write_spaced(f, v.iter()),
                Handle::Error(message) => write!(f, "{message}"),
            },
        }
    }
}

fn write_spaced<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let enclosing = RefCell::new(Vec::new());
        Nested {
            value: self,
            enclosing: &enclosing,
        }
        .serialize(serializer)
    }
}

/// Containers that hold themselves have no finite JSON form.
impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cyclic = || S::Error::custom("cannot serialize a container that contains itself");
        match self.value {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) | Value::Duration(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Sequence(items) => self
                .enter(|| {
                    let borrowed = items.borrow();
                    let mut seq = serializer.serialize_seq(Some(borrowed.len()))?;
                    for item in borrowed.iter() {
                        seq.serialize_element(&self.child(item))?;
                    }
                    seq.end()
                })
                .unwrap_or_else(|| Err(cyclic())),
            Value::Mapping(entries) => self
                .enter(|| {
                    let borrowed = entries.borrow();
                    let mut map = serializer.serialize_map(Some(borrowed.len()))?;
                    for (key, val) in borrowed.iter() {
                        map.serialize_entry(&key.to_string(), &self.child(val))?;
                    }
                    map.end()
                })
                .unwrap_or_else(|| Err(cyclic())),
            Value::Native(handle) => match handle {
                Handle::Bytes(v) => v.serialize(serializer),
                Handle::Runes(v) => v
                    .iter()
                    .map(|c| *c as u32)
                    .collect::<Vec<_>>()
                    .serialize(serializer),
                Handle::Bools(v) => v.serialize(serializer),
                Handle::Ints(v) => v.serialize(serializer),
                Handle::Floats(v) => v.serialize(serializer),
                Handle::Texts(v) => v.serialize(serializer),
                Handle::Error(message) => serializer.serialize_str(message),
            },
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (MapKey::Text(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::sequence(items)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Native(Handle::Bytes(bytes))
    }
}

impl From<Vec<char>> for Value {
    fn from(runes: Vec<char>) -> Self {
        Value::Native(Handle::Runes(runes))
    }
}

impl From<Vec<bool>> for Value {
    fn from(v: Vec<bool>) -> Self {
        Value::Native(Handle::Bools(v))
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::Native(Handle::Ints(v))
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Native(Handle::Floats(v))
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Native(Handle::Texts(v))
    }
}
