//! Module for the generic value tree
//!
//! [`Value`] is what the [parser](crate::reader) produces and what the [writer](crate::writer)
//! consumes. It does not interpret scalar tokens: numbers and booleans are kept as the text
//! which appeared in the JSON document, see [`Value::Scalar`]. Converting them to typed
//! values is the job of the [typed adapter](crate::typed).

use indexmap::IndexMap;

/// Type of a [`Value`]
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum ValueType {
    /// JSON `null`
    Null,
    /// Quoted JSON string
    String,
    /// Unquoted literal token, for example a number or a boolean
    Scalar,
    /// JSON object: `{ ... }`
    Object,
    /// JSON array: `[ ... ]`
    Array,
}

/// Generic JSON value
///
/// # Examples
/// ```
/// # use bracejson::{ObjectMap, Value};
/// let mut object = ObjectMap::new();
/// object.insert("id", Value::from("x"));
/// object.insert("count", Value::Scalar("3".to_owned()));
/// object.insert("parent", Value::Null);
///
/// assert_eq!(
///     r#"{"id":"x","count":3,"parent":null}"#,
///     bracejson::writer::serialize_object(&object)?
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value {
    /// The unquoted literal `null`
    Null,
    /// A quoted string, without the surrounding quotes and with escape sequences resolved
    ///
    /// The quoted string `"null"` is a `String`, it is never confused with [`Value::Null`].
    String(String),
    /// An unquoted token other than `null`, exactly as it appeared in the JSON document
    ///
    /// The parser does not validate or interpret these tokens, so `1.5`, `true` and
    /// `-0e+1` are all stored as their literal text.
    Scalar(String),
    /// A JSON object
    Object(ObjectMap),
    /// A JSON array
    Array(Vec<Value>),
}

impl Value {
    /// Gets the type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::String(_) => ValueType::String,
            Value::Scalar(_) => ValueType::Scalar,
            Value::Object(_) => ValueType::Object,
            Value::Array(_) => ValueType::Array,
        }
    }

    /// Whether this value is [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Gets the string content if this is a [`Value::String`]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Gets the text of either a [`Value::String`] or a [`Value::Scalar`]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Gets the members if this is a [`Value::Object`]
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Gets the items if this is a [`Value::Array`]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Short human readable description, used in error messages
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("string \"{s}\""),
            Value::Scalar(s) => format!("scalar '{s}'"),
            Value::Object(o) => format!("object with {} members", o.len()),
            Value::Array(a) => format!("array with {} items", a.len()),
            Value::Null => "null".to_owned(),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<ObjectMap> for Value {
    fn from(v: ObjectMap) -> Self {
        Value::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

/// Members of a JSON object
///
/// Members are kept in insertion order so that serialization is deterministic. Inserting
/// a name which already exists replaces the value but keeps the original position.
///
/// Equality does not depend on member order: two maps are equal if they have the same
/// names and the values for each name are equal.
#[derive(Clone, Default, Debug)]
pub struct ObjectMap {
    members: IndexMap<String, Value>,
}

impl ObjectMap {
    /// Creates an empty map
    pub fn new() -> Self {
        ObjectMap {
            members: IndexMap::new(),
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the map has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Gets the value of the member with the given name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    /// Gets a mutable reference to the value of the member with the given name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.members.get_mut(name)
    }

    /// Whether a member with the given name exists
    pub fn contains_key(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Inserts a member, returning the previous value if the name already existed
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.members.insert(name.into(), value)
    }

    /// Removes a member, preserving the order of the remaining members
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.members.shift_remove(name)
    }

    /// Iterates over the members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterates over the member names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }
}

impl PartialEq for ObjectMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .members
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for ObjectMap {}

impl<K: Into<String>> FromIterator<(K, Value)> for ObjectMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = ObjectMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl IntoIterator for ObjectMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position() {
        let mut map = ObjectMap::new();
        assert_eq!(None, map.insert("a", Value::from("1")));
        map.insert("b", Value::from("2"));
        assert_eq!(Some(Value::from("1")), map.insert("a", Value::from("3")));

        assert_eq!(vec!["a", "b"], map.keys().collect::<Vec<_>>());
        assert_eq!(Some(&Value::from("3")), map.get("a"));
    }

    #[test]
    fn remove_preserves_order() {
        let mut map: ObjectMap = [("a", Value::Null), ("b", Value::Null), ("c", Value::Null)]
            .into_iter()
            .collect();
        assert_eq!(Some(Value::Null), map.remove("b"));
        assert_eq!(None, map.remove("b"));
        assert_eq!(vec!["a", "c"], map.keys().collect::<Vec<_>>());
    }

    #[test]
    fn equality_ignores_order() {
        let a: ObjectMap = [("x", Value::from("1")), ("y", Value::Null)]
            .into_iter()
            .collect();
        let b: ObjectMap = [("y", Value::Null), ("x", Value::from("1"))]
            .into_iter()
            .collect();
        assert_eq!(a, b);

        let c: ObjectMap = [("x", Value::from("1"))].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn wide_object() {
        let count = 50_000;
        let map: ObjectMap = (0..count)
            .map(|i| (format!("k{i}"), Value::Scalar(i.to_string())))
            .collect();
        assert_eq!(count, map.len());
        assert_eq!(Some(&Value::Scalar("49999".to_owned())), map.get("k49999"));
        assert_eq!(Some("k0"), map.keys().next());
    }

    #[test]
    fn null_and_quoted_null_differ() {
        assert_ne!(Value::Null, Value::from("null"));
        assert_ne!(Value::Scalar("null".to_owned()), Value::from("null"));
        assert_eq!(ValueType::Null, Value::Null.value_type());
        assert_eq!("String", Value::from("null").value_type().to_string());
    }
}
