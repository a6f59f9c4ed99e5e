//! Module for writing JSON text
//!
//! [`JsonSerializer`] converts a [`Value`] or an [`ObjectMap`] to compact JSON text without
//! any whitespace. The convenience functions [`serialize`] and [`serialize_object`] use the
//! default [`WriterSettings`].
//!
//! String values and member names are written with only `"` and `\` escaped. All other
//! characters, including control characters, are written as they are. The parser of this
//! crate reads such strings back unchanged.
//!
//! # Examples
//! ```
//! # use bracejson::{ObjectMap, Value};
//! let mut object = ObjectMap::new();
//! object.insert("text", Value::from("say \"hi\""));
//! object.insert("items", Value::Array(vec![
//!     Value::Scalar("1".to_owned()),
//!     Value::Scalar("true".to_owned()),
//!     Value::Null,
//! ]));
//!
//! let json = bracejson::writer::serialize_object(&object)?;
//! assert_eq!(r#"{"text":"say \"hi\"","items":[1,true,null]}"#, json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

use crate::{
    json_number::is_valid_scalar,
    log_rejection,
    value::{ObjectMap, Value},
};

/// Describes why a value cannot be written as JSON
#[non_exhaustive]
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum UnsupportedKind {
    /// A [`Value::Scalar`] token is neither `true`, `false` nor a valid JSON number
    ///
    /// This is only checked if [`WriterSettings::validate_scalars`] is enabled.
    InvalidScalar,
    /// A floating point number is NaN or Infinity, which JSON cannot represent
    NonFiniteNumber,
    /// A key of a keyed collection is not encoded as text
    NonTextKey,
    /// A key of a keyed collection has leading or trailing whitespace
    ///
    /// The parser trims member names, so such a key would not be read back unchanged.
    PaddedKey,
    /// A date or date-time value has no textual representation, for example because its
    /// year is outside of the range supported by the format
    UnformattableDateTime,
}

/// Error which occurred while writing JSON text
///
/// Any error aborts writing; no partial output is returned.
#[non_exhaustive]
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum WriterError {
    /// A value has no defined JSON encoding
    #[error("unsupported value {kind}: {value}")]
    UnsupportedType {
        /// Describes why the value is unsupported
        kind: UnsupportedKind,
        /// Text representation of the unsupported value
        value: String,
    },
    /// Objects and arrays are nested deeper than [`WriterSettings::max_nesting_depth`]
    #[error("JSON structure exceeds maximum nesting depth {max_depth}")]
    StructureTooDeep {
        /// The maximum nesting depth which was exceeded
        max_depth: usize,
    },
}

impl WriterError {
    pub(crate) fn unsupported(kind: UnsupportedKind, value: impl ToString) -> Self {
        WriterError::UnsupportedType {
            kind,
            value: value.to_string(),
        }
    }
}

/// Settings to customize the JSON serializer behavior
///
/// These settings are used by [`JsonSerializer::new_custom`]. To avoid repeating the
/// default values for unchanged settings `..Default::default()` can be used:
/// ```
/// # use bracejson::writer::WriterSettings;
/// WriterSettings {
///     validate_scalars: false,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug)]
pub struct WriterSettings {
    /// Maximum nesting depth of objects and arrays
    ///
    /// The outermost object or array has depth 1. Values nested deeper are rejected with
    /// [`WriterError::StructureTooDeep`].
    pub max_nesting_depth: usize,

    /// Whether to verify that [`Value::Scalar`] tokens are valid JSON
    ///
    /// When enabled, scalar tokens must be `true`, `false` or a valid JSON number, otherwise
    /// [`WriterError::UnsupportedType`] is returned. When disabled, scalar tokens are written
    /// as they are, which can produce invalid JSON.
    pub validate_scalars: bool,
}

impl Default for WriterSettings {
    /// Creates the default JSON serializer settings
    ///
    /// - max nesting depth: 512
    /// - validate scalars: true
    fn default() -> Self {
        WriterSettings {
            max_nesting_depth: 512,
            validate_scalars: true,
        }
    }
}

/// Serializer producing compact JSON text
#[derive(Clone, Debug, Default)]
pub struct JsonSerializer {
    settings: WriterSettings,
}

impl JsonSerializer {
    /// Creates a serializer with default settings
    pub fn new() -> Self {
        JsonSerializer::new_custom(WriterSettings::default())
    }

    /// Creates a serializer with custom settings
    pub fn new_custom(settings: WriterSettings) -> Self {
        JsonSerializer { settings }
    }

    /// Serializes the value
    pub fn serialize(&self, value: &Value) -> Result<String, WriterError> {
        tracing::trace!(value_type = %value.value_type(), "serializing JSON value");
        let mut emitter = Emitter::new(&self.settings);
        emitter
            .write_value(value, 0)
            .map_err(log_rejection("rejected value for serialization"))?;
        Ok(emitter.out)
    }

    /// Serializes the members as JSON object
    pub fn serialize_object(&self, object: &ObjectMap) -> Result<String, WriterError> {
        tracing::trace!(members = object.len(), "serializing JSON object");
        let mut emitter = Emitter::new(&self.settings);
        emitter
            .write_object(object, 1)
            .map_err(log_rejection("rejected value for serialization"))?;
        Ok(emitter.out)
    }
}

/// Serializes the value using the default [`WriterSettings`]
///
/// See [`JsonSerializer::serialize`].
pub fn serialize(value: &Value) -> Result<String, WriterError> {
    JsonSerializer::new().serialize(value)
}

/// Serializes the members as JSON object using the default [`WriterSettings`]
///
/// See [`JsonSerializer::serialize_object`].
pub fn serialize_object(object: &ObjectMap) -> Result<String, WriterError> {
    JsonSerializer::new().serialize_object(object)
}

/// Output being built by one serialization call
struct Emitter<'s> {
    out: String,
    settings: &'s WriterSettings,
}

impl<'s> Emitter<'s> {
    fn new(settings: &'s WriterSettings) -> Self {
        Emitter {
            out: String::new(),
            settings,
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), WriterError> {
        if depth > self.settings.max_nesting_depth {
            Err(WriterError::StructureTooDeep {
                max_depth: self.settings.max_nesting_depth,
            })
        } else {
            Ok(())
        }
    }

    /// Writes the value; `depth` is the depth of the enclosing container
    fn write_value(&mut self, value: &Value, depth: usize) -> Result<(), WriterError> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::String(s) => self.write_string(s),
            Value::Scalar(token) => {
                if self.settings.validate_scalars && !is_valid_scalar(token) {
                    return Err(WriterError::unsupported(UnsupportedKind::InvalidScalar, token));
                }
                self.out.push_str(token);
            }
            Value::Array(items) => self.write_array(items, depth + 1)?,
            Value::Object(object) => self.write_object(object, depth + 1)?,
        }
        Ok(())
    }

    fn write_array(&mut self, items: &[Value], depth: usize) -> Result<(), WriterError> {
        self.check_depth(depth)?;
        self.out.push('[');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            self.write_value(item, depth)?;
        }
        self.out.push(']');
        Ok(())
    }

    fn write_object(&mut self, object: &ObjectMap, depth: usize) -> Result<(), WriterError> {
        self.check_depth(depth)?;
        self.out.push('{');
        for (index, (name, value)) in object.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            self.write_string(name);
            self.out.push(':');
            self.write_value(value, depth)?;
        }
        self.out.push('}');
        Ok(())
    }

    fn write_string(&mut self, value: &str) {
        self.out.push('"');
        let mut next_to_write_index = 0;

        for (index, c) in value.char_indices() {
            if matches!(c, '"' | '\\') {
                self.out.push_str(&value[next_to_write_index..index]);
                self.out.push('\\');
                self.out.push(c);
                next_to_write_index = index + 1;
            }
        }
        // Write remaining text
        self.out.push_str(&value[next_to_write_index..]);
        self.out.push('"');
    }
}
