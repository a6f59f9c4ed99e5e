#![warn(missing_docs)]
#![forbid(unsafe_code)]
// Allow needless `return` because that makes it sometimes more obvious that
// an expression is the result of the function
#![allow(clippy::needless_return)]
// Allow `assert_eq!(true, ...)` because in some cases it is used to check a bool
// value and not a 'flag' / 'state', and `assert_eq!` makes that more explicit
#![allow(clippy::bool_assert_comparison)]
// Enable 'unused' warnings for doc tests (are disabled by default)
#![doc(test(no_crate_inject))]
#![doc(test(attr(warn(unused))))]
// Fail on warnings in doc tests
#![doc(test(attr(deny(warnings))))]
// When `docsrs` configuration flag is set enable banner for features in documentation
// See https://stackoverflow.com/q/61417452
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Bracejson is a self-contained JSON codec converting between JSON text and in-memory
//! object graphs.
//!
//! It consists of three layers:
//!
//! - the [parser](reader) turns JSON text whose top-level value is an object into a generic
//!   [`Value`] tree; containers are delimited by counting bracket depth, and number and
//!   boolean tokens are kept as unparsed [`Value::Scalar`] text
//! - the [serializer](writer) turns a generic [`Value`] tree into compact JSON text
//! - the [typed adapter](typed) coerces generic trees into typed values and back; structured
//!   types are declared with the [`json_object!`] macro
//!
//! The functions [`from_json`] and [`to_json`] chain these layers.
//!
//! # Terminology
//!
//! This crate uses the same terminology as the JSON specification:
//!
//! - *object*: `{ ... }`
//!   - *member*: Entry in an object. For example the JSON object `{"a": 1}` has the member
//!     `"a": 1` where `"a"` is the member *name* and `1` is the member *value*.
//! - *array*: `[ ... ]`
//! - *scalar*: unquoted token such as `true` or `123.4e+10`
//! - *string*: string value, for example `"text in \"quotes\""`
//!
//! # Usage examples
//!
//! ## Typed values
//! ```
//! bracejson::json_object! {
//!     #[derive(PartialEq, Debug)]
//!     pub struct Order {
//!         pub id: String,
//!         pub quantities: Vec<u32>,
//!         pub note: Option<String>,
//!     }
//! }
//!
//! let order: Order = bracejson::from_json(r#"{"id": "o-1", "quantities": [1, 2]}"#)?;
//! assert_eq!(
//!     Order {
//!         id: "o-1".to_owned(),
//!         quantities: vec![1, 2],
//!         note: None,
//!     },
//!     order
//! );
//!
//! let json = bracejson::to_json(&order)?;
//! assert_eq!(r#"{"id":"o-1","quantities":[1,2],"note":null}"#, json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Generic values
//! ```
//! # use bracejson::Value;
//! let mut object = bracejson::reader::parse(r#"{"a": [1, true], "b": null}"#)?;
//! assert_eq!(Some(&Value::Null), object.get("b"));
//!
//! object.insert("c", Value::from("text"));
//! let json = bracejson::writer::serialize_object(&object)?;
//! assert_eq!(r#"{"a":[1,true],"b":null,"c":"text"}"#, json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Serde integration
//! Optional integration with [Serde](https://docs.rs/serde/latest/serde/) exists, allowing the
//! generic [`Value`] and [`ObjectMap`] to be serialized and deserialized by any Serde data format.
//! See the documentation of the [`serde` module](crate::serde) for more information.

use thiserror::Error;

use crate::{
    reader::ParseError,
    typed::{JsonObject, ToJsonValue, TypeMismatch},
    writer::WriterError,
};

mod json_number;
pub mod reader;
pub mod typed;
mod value;
pub mod writer;

#[cfg(feature = "serde")]
pub mod serde;

pub use value::{ObjectMap, Value, ValueType};

/// Error which occurred while converting between JSON text and a typed value
#[derive(Error, Debug)]
pub enum CodecError {
    /// The JSON text could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// The value could not be written as JSON
    #[error("writer error: {0}")]
    Write(#[from] WriterError),
    /// The parsed JSON value does not match the structure of the typed value
    #[error("{0}")]
    TypeMismatch(#[from] TypeMismatch),
}

/// Parses JSON text into a structured type
///
/// The text is first [parsed](reader::parse) into a generic object, whose members are then
/// coerced into the fields of `T` by [`JsonObject::from_object`].
pub fn from_json<T: JsonObject>(json: &str) -> Result<T, CodecError> {
    let object = reader::parse(json)?;
    let value = T::from_object(&object)
        .map_err(log_rejection("parsed JSON does not match typed value"))?;
    Ok(value)
}

/// Writes a typed value as compact JSON text
///
/// The value is first converted to a generic [`Value`] by [`ToJsonValue::to_json_value`],
/// which is then [serialized](writer::serialize).
pub fn to_json<T: ToJsonValue + ?Sized>(value: &T) -> Result<String, CodecError> {
    let value = value.to_json_value()?;
    Ok(writer::serialize(&value)?)
}

/// Creates a `map_err` function which logs the error at debug level and returns it unchanged
pub(crate) fn log_rejection<E: std::fmt::Display>(
    message: &'static str,
) -> impl FnOnce(E) -> E {
    move |e| {
        tracing::debug!(error = %e, "{message}");
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        reader::MalformedKind,
        typed::{FieldKind, PathPiece},
        writer::UnsupportedKind,
    };

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    crate::json_object! {
        #[derive(PartialEq, Debug)]
        struct Reading {
            label: Option<String>,
            value: f64,
        }
    }

    #[test]
    fn round_trip() -> TestResult {
        let reading = Reading {
            label: Some("null".to_owned()),
            value: -0.5,
        };
        let json = to_json(&reading)?;
        assert_eq!(r#"{"label":"null","value":-0.5}"#, json);
        assert_eq!(reading, from_json(&json)?);
        Ok(())
    }

    #[test]
    fn log_rejection_returns_error_unchanged() {
        let error = WriterError::StructureTooDeep { max_depth: 3 };
        assert_eq!(error.clone(), log_rejection("rejected")(error));
    }

    #[test]
    fn errors() {
        match from_json::<Reading>(r#"{"value": 1"#) {
            Err(CodecError::Parse(ParseError::MalformedInput { kind, .. })) => {
                assert_eq!(MalformedKind::MissingOuterBraces, kind)
            }
            r => panic!("Unexpected result: {r:?}"),
        }

        match from_json::<Reading>(r#"{"value": "abc"}"#) {
            Err(CodecError::TypeMismatch(e)) => {
                assert_eq!(vec![PathPiece::from("value")], e.path);
                assert_eq!(FieldKind::Float, e.expected);
            }
            r => panic!("Unexpected result: {r:?}"),
        }

        let reading = Reading {
            label: None,
            value: f64::NAN,
        };
        match to_json(&reading) {
            Err(CodecError::Write(WriterError::UnsupportedType { kind, .. })) => {
                assert_eq!(UnsupportedKind::NonFiniteNumber, kind)
            }
            r => panic!("Unexpected result: {r:?}"),
        }
    }
}
