//! Typed key/value attributes attached to log records and handler context
//!
//! This module provides:
//! - `Attr`: a key paired with a `Value`
//! - `Value`: one arm per supported value kind
//! - `AnyValue`: opaque values with explicit capabilities
//! - `LogValuer` / `MarshalJson`: traits for deferred and self-serializing values

use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Error type returned by [`MarshalJson`] implementations
pub type MarshalError = Box<dyn StdError + Send + Sync>;

/// A value that is computed only when a record is actually rendered.
///
/// Resolution happens once per attribute. Returning another `Value::Lazy`
/// is a contract violation and aborts rendering.
pub trait LogValuer: Send + Sync {
    fn log_value(&self) -> Value;
}

impl<F> LogValuer for F
where
    F: Fn() -> Value + Send + Sync,
{
    fn log_value(&self) -> Value {
        self()
    }
}

/// A value that produces its own serialized bytes.
pub trait MarshalJson: Send + Sync {
    fn marshal_json(&self) -> Result<Vec<u8>, MarshalError>;
}

/// Opaque attribute value with an explicit capability
#[derive(Clone)]
pub enum AnyValue {
    /// Rendered as its error description
    Error(Arc<dyn StdError + Send + Sync>),
    /// Rendered as the bytes it serializes itself to
    Marshal(Arc<dyn MarshalJson>),
    /// Rendered through its `Display` implementation
    Display(Arc<dyn fmt::Display + Send + Sync>),
    /// Structured value, kept as-is for the renderer
    Json(serde_json::Value),
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyValue::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            AnyValue::Marshal(_) => f.write_str("Marshal(..)"),
            AnyValue::Display(d) => f.debug_tuple("Display").field(&d.to_string()).finish(),
            AnyValue::Json(v) => f.debug_tuple("Json").field(v).finish(),
        }
    }
}

/// Value type for attributes
#[derive(Clone, Default)]
pub enum Value {
    /// The zero value. Paired with an empty key it marks an absent attribute.
    #[default]
    Null,
    String(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Duration(Duration),
    Time(DateTime<Utc>),
    Group(Vec<Attr>),
    Lazy(Arc<dyn LogValuer>),
    Any(AnyValue),
}

impl Value {
    /// Resolve a lazy value once. Non-lazy values are returned unchanged.
    #[must_use]
    pub fn resolve(self) -> Value {
        match self {
            Value::Lazy(valuer) => valuer.log_value(),
            other => other,
        }
    }

    /// Short name of the value's kind, used in diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::Time(_) => "time",
            Value::Group(_) => "group",
            Value::Lazy(_) => "lazy",
            Value::Any(_) => "any",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            Value::Duration(d) => f.debug_tuple("Duration").field(d).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::Group(attrs) => f.debug_tuple("Group").field(attrs).finish(),
            Value::Lazy(_) => f.write_str("Lazy(..)"),
            Value::Any(any) => f.debug_tuple("Any").field(any).finish(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Any(AnyValue::Json(v))
    }
}

/// A key/value pair
#[derive(Debug, Clone, Default)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, Value::Time(value))
    }

    /// Group of nested attributes. An empty key inlines them into the parent.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    pub fn lazy(key: impl Into<String>, valuer: impl LogValuer + 'static) -> Self {
        Self::new(key, Value::Lazy(Arc::new(valuer)))
    }

    pub fn error(key: impl Into<String>, err: impl StdError + Send + Sync + 'static) -> Self {
        Self::new(key, Value::Any(AnyValue::Error(Arc::new(err))))
    }

    /// Value rendered through `Display`.
    ///
    /// Text output writes it verbatim and unquoted, so the rendered string
    /// must stay on one line. Use `Attr::string` for arbitrary text.
    pub fn display(key: impl Into<String>, value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self::new(key, Value::Any(AnyValue::Display(Arc::new(value))))
    }

    pub fn marshal(key: impl Into<String>, value: impl MarshalJson + 'static) -> Self {
        Self::new(key, Value::Any(AnyValue::Marshal(Arc::new(value))))
    }

    pub fn json(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self::new(key, Value::Any(AnyValue::Json(value)))
    }

    pub fn any(key: impl Into<String>, value: AnyValue) -> Self {
        Self::new(key, Value::Any(value))
    }

    /// Whether this is the canonical absent attribute: empty key, zero value.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.key.is_empty() && matches!(self.value, Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_absent() {
        assert!(Attr::default().is_absent());
        assert!(!Attr::new("key", Value::Null).is_absent());
        assert!(!Attr::int("", 0).is_absent());
    }

    #[test]
    fn test_conversions() {
        assert!(matches!(Value::from("x"), Value::String(ref s) if s == "x"));
        assert!(matches!(Value::from(3_i32), Value::Int(3)));
        assert!(matches!(Value::from(3_u32), Value::Uint(3)));
        assert!(matches!(Value::from(true), Value::Bool(true)));
        assert!(matches!(Value::from(serde_json::json!([1])), Value::Any(AnyValue::Json(_))));
    }

    #[test]
    fn test_resolve_lazy_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let attr = Attr::lazy("k", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::Int(7)
        });

        let resolved = attr.value.resolve();
        assert!(matches!(resolved, Value::Int(7)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Attr::group("g", vec![]).value.kind(), "group");
        assert_eq!(Attr::duration("d", Duration::from_secs(1)).value.kind(), "duration");
    }
}
