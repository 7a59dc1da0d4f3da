//! # Event data carried through the mediator.
//!
//! An event is identified by its **name** (exact string match) and carries two optional,
//! opaque parts:
//! - [`Sender`]: the object that triggered the event, never interpreted by the mediator;
//! - [`Payload`]: a string-keyed map of [`Value`]s, passed through unchanged.
//!
//! Every publish is recorded as a [`RecordedEvent`] for the current tick so that late
//! subscribers can be replayed (see [`FrameEvents`](super::FrameEvents)).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tickbus::{payload, Sender, Value};
//!
//! struct Pill;
//!
//! let prefab: Sender = Arc::new(Pill);
//! let args = payload! {
//!     "objectToSpawn" => Value::Object(prefab),
//!     "count" => 3,
//! };
//!
//! assert_eq!(args["count"].as_int(), Some(3));
//! assert!(args["objectToSpawn"].object::<Pill>().is_some());
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::MediatorError;

/// Opaque reference to the object that triggered an event.
pub type Sender = Arc<dyn Any + Send + Sync>;

/// String-keyed event arguments.
pub type Payload = HashMap<String, Value>;

/// Dynamically-typed payload value.
#[derive(Clone)]
pub enum Value {
    /// Explicit "no value".
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(Payload),
    /// Any shared object (prefabs, entities, handles...).
    Object(Sender),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64`, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Payload> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Downcasts an [`Value::Object`] to a concrete type.
    pub fn object<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(o) => o.as_ref().downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(l) => f.debug_tuple("List").field(l).finish(),
            Value::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Value::Object(o) => write!(f, "Object({:p})", Arc::as_ptr(o) as *const ()),
        }
    }
}

/// Objects compare by identity, everything else by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => same_object(a, b),
            _ => false,
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident as $cast:ty),+ $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $cast)
                }
            }
        )+
    };
}

value_from!(
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
);

/// Unsigned widths that may not fit an `i64`: out-of-range values become `Float`.
macro_rules! value_from_wide {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
                }
            }
        )+
    };
}

value_from_wide!(u64, usize);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Payload> for Value {
    fn from(v: Payload) -> Self {
        Value::Map(v)
    }
}

impl From<Sender> for Value {
    fn from(v: Sender) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Builds a [`Payload`] from `key => value` pairs.
///
/// Values go through `Into<Value>`.
#[macro_export]
macro_rules! payload {
    () => {
        $crate::Payload::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Payload::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        map
    }};
}

/// Returns `true` if both senders point at the same object.
pub fn same_object(a: &Sender, b: &Sender) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// One publish, as remembered by the tick buffer.
///
/// The payload is shared, so every subscriber (live or replayed) sees the same map.
#[derive(Clone, Default)]
pub struct RecordedEvent {
    pub sender: Option<Sender>,
    pub payload: Option<Arc<Payload>>,
}

impl RecordedEvent {
    pub fn new(sender: Option<Sender>, payload: Option<Payload>) -> Self {
        Self {
            sender,
            payload: payload.map(Arc::new),
        }
    }

    #[inline]
    pub fn sender(&self) -> Option<&Sender> {
        self.sender.as_ref()
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_deref()
    }
}

impl fmt::Debug for RecordedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedEvent")
            .field(
                "sender",
                &self.sender.as_ref().map(|s| Arc::as_ptr(s) as *const ()),
            )
            .field("payload", &self.payload)
            .finish()
    }
}

/// Rejects empty event names.
pub(crate) fn check_name(name: &str, op: &'static str) -> Result<(), MediatorError> {
    if name.is_empty() {
        return Err(MediatorError::EmptyEventName { op });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pill;

    #[test]
    fn test_payload_macro_converts_values() {
        let p = payload! {
            "stringkey" => "stringValue",
            "intkey" => 1,
            "flag" => true,
            "missing" => None::<i64>,
        };
        assert_eq!(p.len(), 4);
        assert_eq!(p["stringkey"].as_str(), Some("stringValue"));
        assert_eq!(p["intkey"].as_int(), Some(1));
        assert_eq!(p["intkey"].as_float(), Some(1.0));
        assert_eq!(p["flag"].as_bool(), Some(true));
        assert!(p["missing"].is_null());

        let empty: Payload = payload!();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_integer_widths() {
        let p = payload! {
            "u8" => 7u8,
            "i16" => -3i16,
            "usize" => 5usize,
            "u64" => 42u64,
            "huge" => u64::MAX,
        };
        assert_eq!(p["u8"].as_int(), Some(7));
        assert_eq!(p["i16"].as_int(), Some(-3));
        assert_eq!(p["usize"].as_int(), Some(5));
        assert_eq!(p["u64"].as_int(), Some(42));
        assert_eq!(p["huge"].as_int(), None);
        assert_eq!(p["huge"].as_float(), Some(u64::MAX as f64));
    }

    #[test]
    fn test_object_identity_equality() {
        let a: Sender = Arc::new(Pill);
        let b: Sender = Arc::new(Pill);

        assert_eq!(Value::Object(a.clone()), Value::Object(a.clone()));
        assert_ne!(Value::Object(a.clone()), Value::Object(b));
        assert!(Value::Object(a).object::<Pill>().is_some());
        assert!(Value::Int(1).object::<Pill>().is_none());
    }

    #[test]
    fn test_recorded_event_shares_payload() {
        let ev = RecordedEvent::new(None, Some(payload! { "k" => 1 }));
        let copy = ev.clone();
        assert!(Arc::ptr_eq(
            ev.payload.as_ref().unwrap(),
            copy.payload.as_ref().unwrap()
        ));
        assert!(copy.sender().is_none());
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("Spawn", "publish").is_ok());
        let err = check_name("", "publish").unwrap_err();
        assert_eq!(err.as_label(), "empty_event_name");
    }
}
