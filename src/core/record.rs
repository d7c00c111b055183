//! Record tree assembled for a single log event
//!
//! A `RecordTree` is a sorted map from key to either a scalar or another
//! tree. Attributes are normalized into scalars as they are appended, empty
//! groups and absent attributes never enter the tree, and `clean` removes any
//! sub-tree that ended up empty.

use super::attr::{AnyValue, Attr, Value};
use super::timestamp::{format_duration, TimestampFormat};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::sync::Arc;

/// Normalized leaf value
#[derive(Clone)]
pub enum Scalar {
    Null,
    String(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    /// Value rendered through `Display`; JSON gets it as a string, text unquoted
    Display(Arc<dyn fmt::Display + Send + Sync>),
    /// Structured value; JSON nests it, text prints it as compact JSON
    Json(serde_json::Value),
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("Null"),
            Scalar::String(s) => f.debug_tuple("String").field(s).finish(),
            Scalar::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Scalar::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Scalar::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Scalar::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            Scalar::Display(d) => f.debug_tuple("Display").field(&d.to_string()).finish(),
            Scalar::Json(v) => f.debug_tuple("Json").field(v).finish(),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Uint(a), Scalar::Uint(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Display(a), Scalar::Display(b)) => a.to_string() == b.to_string(),
            (Scalar::Json(a), Scalar::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Int(i64::from(i))
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Entry of a record tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Tree(RecordTree),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTree(BTreeMap<String, Node>);

impl RecordTree {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Node> {
        self.0.iter()
    }

    pub fn insert_scalar(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.0.insert(key.into(), Node::Scalar(value.into()));
    }

    /// Insert a sub-tree unless it is empty.
    pub fn insert_tree(&mut self, key: impl Into<String>, tree: RecordTree) {
        if !tree.is_empty() {
            self.0.insert(key.into(), Node::Tree(tree));
        }
    }

    /// The sub-tree at `key`, created if missing.
    ///
    /// An existing scalar at `key` is replaced by an empty tree.
    pub fn subtree_mut(&mut self, key: impl Into<String>) -> &mut RecordTree {
        let node = self
            .0
            .entry(key.into())
            .or_insert_with(|| Node::Tree(RecordTree::new()));
        if let Node::Scalar(_) = node {
            *node = Node::Tree(RecordTree::new());
        }
        match node {
            Node::Tree(tree) => tree,
            Node::Scalar(_) => unreachable!("scalar replaced by tree above"),
        }
    }

    /// Normalize `attr` and insert it at this level.
    ///
    /// Lazy values are resolved once. The absent attribute and empty groups are
    /// dropped. A group with an empty key is spliced into this level, a named
    /// group replaces whatever was at its key with a fresh sub-tree.
    ///
    /// # Panics
    ///
    /// Panics if a lazy value resolves to another lazy value.
    pub fn append(&mut self, attr: Attr, time_format: TimestampFormat) {
        let Attr { key, value } = attr;
        let value = value.resolve();

        if key.is_empty() && matches!(value, Value::Null) {
            return;
        }

        match value {
            Value::Group(attrs) => {
                if attrs.is_empty() {
                    return;
                }
                if key.is_empty() {
                    for attr in attrs {
                        self.append(attr, time_format);
                    }
                } else {
                    let mut group = RecordTree::new();
                    for attr in attrs {
                        group.append(attr, time_format);
                    }
                    self.0.insert(key, Node::Tree(group));
                }
            }
            other => {
                let scalar = normalize_value(other, time_format);
                self.0.insert(key, Node::Scalar(scalar));
            }
        }
    }

    /// Remove every empty sub-tree, depth first.
    ///
    /// A tree whose children were all removed becomes empty and is removed
    /// from its parent in turn.
    pub fn clean(&mut self) {
        self.0.retain(|_, node| match node {
            Node::Tree(tree) => {
                tree.clean();
                !tree.is_empty()
            }
            Node::Scalar(_) => true,
        });
    }
}

/// Convert a resolved, non-group value into a scalar.
///
/// # Panics
///
/// Panics on an unresolved lazy value or a group; both mean the caller broke
/// the normalization contract.
pub fn normalize_value(value: Value, time_format: TimestampFormat) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::String(s) => Scalar::String(s),
        Value::Bool(b) => Scalar::Bool(b),
        Value::Int(i) => Scalar::Int(i),
        Value::Uint(u) => Scalar::Uint(u),
        Value::Float(f) => Scalar::Float(f),
        Value::Duration(d) => Scalar::String(format_duration(d)),
        Value::Time(t) => Scalar::String(time_format.format(&t)),
        Value::Any(any) => normalize_any(any),
        bad @ (Value::Lazy(_) | Value::Group(_)) => {
            panic!("bad kind: {}", bad.kind())
        }
    }
}

fn normalize_any(any: AnyValue) -> Scalar {
    match any {
        AnyValue::Error(err) => Scalar::String(err.to_string()),
        AnyValue::Marshal(value) => match value.marshal_json() {
            Ok(bytes) => Scalar::String(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => Scalar::String(err.to_string()),
        },
        AnyValue::Display(value) => Scalar::Display(value),
        AnyValue::Json(value) => Scalar::Json(value),
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Uint(u) => serializer.serialize_u64(*u),
            Scalar::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Scalar::Float(f) => Err(S::Error::custom(format!("unsupported value: {}", f))),
            Scalar::Display(d) => serializer.collect_str(d),
            Scalar::Json(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Tree(tree) => tree.serialize(serializer),
        }
    }
}

impl Serialize for RecordTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, node) in &self.0 {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn append(tree: &mut RecordTree, attr: Attr) {
        tree.append(attr, TimestampFormat::default());
    }

    fn tree_of(entries: Vec<(&str, Node)>) -> RecordTree {
        let mut tree = RecordTree::new();
        for (key, node) in entries {
            tree.0.insert(key.to_string(), node);
        }
        tree
    }

    #[test]
    fn test_clean_removes_empty_subtree() {
        let mut tree = tree_of(vec![("foo", Node::Tree(RecordTree::new()))]);
        tree.clean();
        assert!(!tree.contains_key("foo"), "the sub-record should have been removed");
    }

    #[test]
    fn test_clean_keeps_non_empty_subtree() {
        let inner = tree_of(vec![
            ("bar", Node::Scalar("baz".into())),
            ("qux", Node::Tree(RecordTree::new())),
        ]);
        let mut tree = tree_of(vec![("foo", Node::Tree(inner))]);
        tree.clean();

        match tree.get("foo") {
            Some(Node::Tree(foo)) => {
                assert!(foo.contains_key("bar"));
                assert!(!foo.contains_key("qux"), "the sub-record should have been removed");
            }
            other => panic!("expected sub-record, got {:?}", other),
        }
    }

    #[test]
    fn test_clean_collapses_nested_empty_trees() {
        let c = tree_of(vec![("d", Node::Tree(RecordTree::new()))]);
        let b = tree_of(vec![("c", Node::Tree(c))]);
        let a = tree_of(vec![("b", Node::Tree(b))]);
        let mut tree = tree_of(vec![("a", Node::Tree(a)), ("keep", Node::Scalar(1.into()))]);

        tree.clean();
        assert_eq!(tree, tree_of(vec![("keep", Node::Scalar(1.into()))]));

        let snapshot = tree.clone();
        tree.clean();
        assert_eq!(tree, snapshot);
    }

    #[test]
    fn test_append_empty_group() {
        let mut tree = RecordTree::new();
        append(&mut tree, Attr::group("foo", vec![]));
        append(&mut tree, Attr::group("", vec![]));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_append_anonymous_group_is_inlined() {
        let mut tree = RecordTree::new();
        append(&mut tree, Attr::group("", vec![Attr::string("foo", "bar")]));
        assert_eq!(tree, tree_of(vec![("foo", Node::Scalar("bar".into()))]));
    }

    #[test]
    fn test_append_named_group_nests() {
        let mut tree = RecordTree::new();
        append(
            &mut tree,
            Attr::group("g", vec![Attr::int("a", 1), Attr::group("h", vec![Attr::bool("b", true)])]),
        );

        let h = tree_of(vec![("b", Node::Scalar(Scalar::Bool(true)))]);
        let g = tree_of(vec![("a", Node::Scalar(1.into())), ("h", Node::Tree(h))]);
        assert_eq!(tree, tree_of(vec![("g", Node::Tree(g))]));
    }

    #[test]
    fn test_append_absent_attr_dropped() {
        let mut tree = RecordTree::new();
        append(&mut tree, Attr::default());
        append(&mut tree, Attr::group("g", vec![Attr::default()]));
        tree.clean();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_append_resolves_lazy() {
        let mut tree = RecordTree::new();
        append(&mut tree, Attr::lazy("k", || Value::String("resolved".into())));
        append(
            &mut tree,
            Attr::lazy("g", || Value::Group(vec![Attr::int("inner", 2)])),
        );

        assert_eq!(tree.get("k"), Some(&Node::Scalar("resolved".into())));
        assert_eq!(
            tree.get("g"),
            Some(&Node::Tree(tree_of(vec![("inner", Node::Scalar(2.into()))])))
        );
    }

    #[test]
    #[should_panic(expected = "bad kind: lazy")]
    fn test_append_nested_lazy_panics() {
        let mut tree = RecordTree::new();
        append(
            &mut tree,
            Attr::lazy("k", || Value::Lazy(Arc::new(|| Value::Int(1)))),
        );
    }

    #[test]
    fn test_normalize_time_and_duration() {
        let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().expect("valid");
        let mut tree = RecordTree::new();
        append(&mut tree, Attr::time("t", time));
        append(&mut tree, Attr::duration("d", Duration::from_millis(1500)));

        assert_eq!(tree.get("t"), Some(&Node::Scalar("2025-01-08T10:30:45.000000000Z".into())));
        assert_eq!(tree.get("d"), Some(&Node::Scalar("1s 500ms".into())));
    }

    #[derive(Debug)]
    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    struct Raw(&'static str);

    impl crate::core::attr::MarshalJson for Raw {
        fn marshal_json(&self) -> Result<Vec<u8>, crate::core::attr::MarshalError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct Broken;

    impl crate::core::attr::MarshalJson for Broken {
        fn marshal_json(&self) -> Result<Vec<u8>, crate::core::attr::MarshalError> {
            Err(Box::new(Boom))
        }
    }

    #[test]
    fn test_normalize_any_capabilities() {
        let mut tree = RecordTree::new();
        append(&mut tree, Attr::error("err", Boom));
        append(&mut tree, Attr::marshal("raw", Raw("{\"a\":1}")));
        append(&mut tree, Attr::marshal("broken", Broken));
        append(&mut tree, Attr::json("json", serde_json::json!({"x": [1, 2]})));

        assert_eq!(tree.get("err"), Some(&Node::Scalar("boom".into())));
        assert_eq!(tree.get("raw"), Some(&Node::Scalar("{\"a\":1}".into())));
        assert_eq!(tree.get("broken"), Some(&Node::Scalar("boom".into())));
        assert_eq!(
            tree.get("json"),
            Some(&Node::Scalar(Scalar::Json(serde_json::json!({"x": [1, 2]}))))
        );
    }

    #[test]
    fn test_subtree_mut_reuses_and_replaces() {
        let mut tree = RecordTree::new();
        tree.subtree_mut("g").insert_scalar("a", 1);
        tree.subtree_mut("g").insert_scalar("b", 2);
        tree.insert_scalar("s", "scalar");
        tree.subtree_mut("s").insert_scalar("c", 3);

        match tree.get("g") {
            Some(Node::Tree(g)) => assert_eq!(g.len(), 2),
            other => panic!("expected tree, got {:?}", other),
        }
        assert!(matches!(tree.get("s"), Some(Node::Tree(_))));
    }

    #[test]
    fn test_last_write_wins() {
        let mut tree = RecordTree::new();
        append(&mut tree, Attr::int("k", 1));
        append(&mut tree, Attr::int("k", 2));
        assert_eq!(tree.get("k"), Some(&Node::Scalar(2.into())));
    }
}
