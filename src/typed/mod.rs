//! Module for converting between generic values and typed values
//!
//! The [parser](crate::reader) only produces a generic [`Value`] tree in which numbers and
//! booleans are still unparsed text. This module coerces such trees into typed values and
//! converts typed values back into trees for the [writer](crate::writer):
//!
//! - [`FromJsonValue`] coerces a [`Value`] into a typed value
//! - [`ToJsonValue`] converts a typed value into a [`Value`]
//! - [`JsonObject`] is implemented by structured types and describes their fields
//!
//! Implementations exist for integers, floating point numbers, `bool`, `String`, `Option`,
//! `Vec`, `HashMap`, `BTreeMap`, [`time::Date`] (`yyyy-MM-dd`) and [`time::OffsetDateTime`]
//! (RFC 3339). Structured types are declared with the [`json_object!`](crate::json_object)
//! macro, other text-coded types such as identifiers can be registered with
//! [`json_text_value!`](crate::json_text_value).
//!
//! # Examples
//! ```
//! bracejson::json_object! {
//!     #[derive(PartialEq, Debug)]
//!     pub struct Product {
//!         pub name: Option<String>,
//!         pub price: Option<f64>,
//!         pub tags: Vec<String>,
//!     }
//! }
//!
//! let product: Product = bracejson::from_json(r#"{"name":"tea","price":2.5,"tags":["hot"]}"#)?;
//! assert_eq!(
//!     Product {
//!         name: Some("tea".to_owned()),
//!         price: Some(2.5),
//!         tags: vec!["hot".to_owned()],
//!     },
//!     product
//! );
//!
//! let unnamed = Product { name: None, price: None, tags: Vec::new() };
//! assert_eq!(r#"{"name":null,"price":null,"tags":[]}"#, bracejson::to_json(&unnamed)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

use crate::{
    json_number::is_valid_json_number,
    value::{ObjectMap, Value},
    writer::WriterError,
};

mod impls;
mod macros;

/// Semantic type of a field, used in [`FieldDescriptor`] and [`TypeMismatch`]
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum FieldKind {
    /// Integer number
    Integer,
    /// Floating point number
    Float,
    /// `true` or `false`
    Boolean,
    /// Text
    Text,
    /// Text-coded identifier, see [`json_text_value!`](crate::json_text_value)
    Identifier,
    /// Calendar date, `yyyy-MM-dd`
    Date,
    /// Date and time with offset, RFC 3339
    DateTime,
    /// Structured object with named fields
    Object,
    /// Ordered collection
    List,
    /// Keyed collection
    Map,
    /// Any JSON value
    Any,
}

/// Describes a field of a [`JsonObject`]
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct FieldDescriptor {
    /// Name of the JSON object member the field is stored in
    pub name: &'static str,
    /// Semantic type of the field
    pub kind: FieldKind,
}

/// A piece of the path to a value within a JSON document
///
/// A piece can either represent the index of a JSON array item or the name of a JSON object member.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum PathPiece {
    /// Index (starting at 0) of a JSON array item
    ArrayItem(usize),
    /// Name of a JSON object member
    ObjectMember(String),
}

/// Creates a [`PathPiece::ArrayItem`] with the number as index
impl From<usize> for PathPiece {
    fn from(v: usize) -> Self {
        PathPiece::ArrayItem(v)
    }
}

/// Creates a [`PathPiece::ObjectMember`] with the string as member name
impl From<String> for PathPiece {
    fn from(v: String) -> Self {
        PathPiece::ObjectMember(v)
    }
}

/// Creates a [`PathPiece::ObjectMember`] with the string as member name
impl From<&str> for PathPiece {
    fn from(v: &str) -> Self {
        PathPiece::ObjectMember(v.to_owned())
    }
}

/// Formats the path in dot-notation, for example `$.orders[1].id`
pub(crate) fn format_abs_path(path: &[PathPiece]) -> String {
    "$".to_owned()
        + path
            .iter()
            .map(|p| match p {
                PathPiece::ArrayItem(index) => format!("[{index}]"),
                PathPiece::ObjectMember(name) => format!(".{name}"),
            })
            .collect::<String>()
            .as_str()
}

/// Error which occurred while coercing a [`Value`] into a typed value
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("type mismatch at '{}': expected {} but found {}", format_abs_path(.path), .expected, .found)]
pub struct TypeMismatch {
    /// Path of the value which could not be coerced, relative to the value passed to
    /// [`FromJsonValue::from_json_value`]
    pub path: Vec<PathPiece>,
    /// The semantic type the value should have been coerced to
    pub expected: FieldKind,
    /// Description of the value which was found instead
    pub found: String,
}

impl TypeMismatch {
    /// Creates an error for a value which cannot be coerced to the expected kind
    pub fn new(expected: FieldKind, found: &Value) -> Self {
        TypeMismatch {
            path: Vec::new(),
            expected,
            found: found.describe(),
        }
    }

    /// Creates an error for an object member which is absent
    pub fn missing(expected: FieldKind) -> Self {
        TypeMismatch {
            path: Vec::new(),
            expected,
            found: "missing member".to_owned(),
        }
    }

    /// Prepends a piece to the path, used when propagating the error out of a container
    pub fn within(mut self, piece: impl Into<PathPiece>) -> Self {
        self.path.insert(0, piece.into());
        self
    }
}

/// Type which can be coerced from a generic [`Value`]
pub trait FromJsonValue: Sized {
    /// Semantic type of this type
    const KIND: FieldKind;

    /// Coerces the value
    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch>;

    /// Creates the value for an absent object member
    ///
    /// By default absent members are an error; `Option` overrides this to return `None`.
    fn from_missing() -> Result<Self, TypeMismatch> {
        Err(TypeMismatch::missing(Self::KIND))
    }
}

/// Type which can be converted to a generic [`Value`]
pub trait ToJsonValue {
    /// Converts this value
    ///
    /// Fails with [`WriterError::UnsupportedType`] if the value has no JSON encoding, for
    /// example a NaN floating point number.
    fn to_json_value(&self) -> Result<Value, WriterError>;
}

/// Structured type with named fields
///
/// Normally implemented with the [`json_object!`](crate::json_object) macro, which also
/// implements [`FromJsonValue`] and [`ToJsonValue`] for the type.
pub trait JsonObject: Sized {
    /// Describes the fields, in declaration order
    fn fields() -> &'static [FieldDescriptor];

    /// Converts this value to an object with one member per field
    fn to_object(&self) -> Result<ObjectMap, WriterError>;

    /// Coerces the object members into the fields
    ///
    /// Members which do not belong to any field are ignored.
    fn from_object(object: &ObjectMap) -> Result<Self, TypeMismatch>;
}

/// Reads the member with the given name and coerces it
///
/// Absent members are handled by [`FromJsonValue::from_missing`]. Errors have the member
/// name prepended to their path.
pub fn read_member<T: FromJsonValue>(object: &ObjectMap, name: &str) -> Result<T, TypeMismatch> {
    match object.get(name) {
        Some(value) => T::from_json_value(value),
        None => T::from_missing(),
    }
    .map_err(|e| e.within(name))
}

/// Gets the text of a [`Value::String`] or [`Value::Scalar`]
///
/// Fails with a [`TypeMismatch`] for the `expected` kind for all other values.
pub fn text_of(value: &Value, expected: FieldKind) -> Result<&str, TypeMismatch> {
    value
        .as_text()
        .ok_or_else(|| TypeMismatch::new(expected, value))
}

/// Gets the text of a value which has to be a valid JSON number
fn number_text(value: &Value, expected: FieldKind) -> Result<&str, TypeMismatch> {
    let text = text_of(value, expected)?.trim();
    if is_valid_json_number(text) {
        Ok(text)
    } else {
        Err(TypeMismatch::new(expected, value))
    }
}
