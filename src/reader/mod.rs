//! Module for parsing JSON text
//!
//! [`JsonParser`] parses a JSON document whose top-level value is an object into an
//! [`ObjectMap`]. The convenience function [`parse`] uses the default [`ReaderSettings`].
//!
//! The parser is a recursive descent over a front-consuming cursor. Containers are not
//! parsed token by token; instead the bracket closing a container is located first by
//! counting the bracket depth, and the text in between is then parsed recursively. Scalar
//! tokens are not interpreted, see [`Value::Scalar`].
//!
//! # Examples
//! ```
//! # use bracejson::Value;
//! let object = bracejson::reader::parse(r#"{"id": "x", "items": [{"k": 1}, {"k": 2}]}"#)?;
//!
//! assert_eq!(Some(&Value::from("x")), object.get("id"));
//! let items = object.get("items").and_then(Value::as_array).unwrap();
//! assert_eq!(2, items.len());
//! assert_eq!(
//!     Some(&Value::Scalar("1".to_owned())),
//!     items[0].as_object().unwrap().get("k")
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

use crate::value::{ObjectMap, Value};

mod cursor;
use cursor::Cursor;

/// Describes why the JSON input is considered malformed
#[non_exhaustive]
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
pub enum MalformedKind {
    /// The trimmed input does not start with `{` and end with `}`
    MissingOuterBraces,
    /// There is data after the bracket closing the top-level object, for example `{}{}`
    TrailingData,
    /// An opening `{` or `[` has no matching closing bracket
    UnmatchedBracket,
    /// A closing bracket was encountered where a `,` or the end of the container was expected
    UnexpectedClosingBracket,
    /// A quoted member name was expected
    ExpectingMemberName,
    /// A quoted string has no closing quote
    UnterminatedString,
    /// A colon (`:`) is missing between member name and member value
    MissingColon,
    /// A member value or array item is missing, for example `{"a":}` or `[1,,2]`
    MissingValue,
    /// A comma (`,`) is missing between array items or object members
    MissingComma,
    /// A trailing comma (for example in `[1,]`) was used, but trailing commas are not enabled in the [`ReaderSettings`]
    TrailingComma,
    /// An unknown or malformed escape sequence (`\...`) was encountered in a quoted string
    InvalidEscapeSequence,
}

/// Error which occurred while parsing JSON text
///
/// Any error aborts parsing of the complete document; no partial result is returned.
#[non_exhaustive]
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum ParseError {
    /// The JSON text is malformed
    #[error("malformed JSON input {kind} at byte {position}")]
    MalformedInput {
        /// Describes why the input is malformed
        kind: MalformedKind,
        /// Byte offset within the input where the error was detected
        position: usize,
    },
    /// Objects and arrays are nested deeper than [`ReaderSettings::max_nesting_depth`]
    #[error("JSON structure exceeds maximum nesting depth {max_depth} at byte {position}")]
    StructureTooDeep {
        /// The maximum nesting depth which was exceeded
        max_depth: usize,
        /// Byte offset of the bracket which exceeded the maximum depth
        position: usize,
    },
}

/// Settings to customize the JSON parser behavior
///
/// These settings are used by [`JsonParser::new_custom`]. To avoid repeating the
/// default values for unchanged settings `..Default::default()` can be used:
/// ```
/// # use bracejson::reader::ReaderSettings;
/// ReaderSettings {
///     allow_trailing_comma: true,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug)]
pub struct ReaderSettings {
    /// Maximum nesting depth of objects and arrays
    ///
    /// The top-level object has depth 1. Each object or array nested in it increments the
    /// depth by one. Documents exceeding this depth are rejected with
    /// [`ParseError::StructureTooDeep`] instead of risking a stack overflow, because parsing
    /// recurses once per nesting level.
    pub max_nesting_depth: usize,

    /// Whether to allow an optional trailing comma in JSON arrays or objects
    ///
    /// The JSON specification requires that there must not be a trailing comma (`,`) after the
    /// last item of a JSON array or the last member of a JSON object, for example `[1,]`.
    pub allow_trailing_comma: bool,
}

impl Default for ReaderSettings {
    /// Creates the default JSON parser settings
    ///
    /// - max nesting depth: 512
    /// - allow trailing comma: false
    fn default() -> Self {
        ReaderSettings {
            max_nesting_depth: 512,
            allow_trailing_comma: false,
        }
    }
}

/// Parser for JSON documents with an object as top-level value
///
/// The parser holds no state besides its settings, a single instance can be used for any
/// number of documents, also concurrently from multiple threads.
#[derive(Clone, Debug, Default)]
pub struct JsonParser {
    settings: ReaderSettings,
}

impl JsonParser {
    /// Creates a parser with default settings
    pub fn new() -> Self {
        JsonParser::new_custom(ReaderSettings::default())
    }

    /// Creates a parser with custom settings
    pub fn new_custom(settings: ReaderSettings) -> Self {
        JsonParser { settings }
    }

    /// Parses the JSON document
    ///
    /// Leading and trailing whitespace is ignored. The document must be a JSON object; if
    /// after trimming it does not start with `{` and end with the matching `}` a
    /// [`ParseError::MalformedInput`] is returned.
    pub fn parse(&self, json: &str) -> Result<ObjectMap, ParseError> {
        tracing::trace!(len = json.len(), "parsing JSON document");
        self.parse_document(json)
            .map_err(crate::log_rejection("rejected JSON document"))
    }

    fn parse_document(&self, json: &str) -> Result<ObjectMap, ParseError> {
        let trimmed_start = json.trim_start();
        let leading_whitespace = json.len() - trimmed_start.len();
        let trimmed = trimmed_start.trim_end();

        let mut cursor = Cursor::new(trimmed, leading_whitespace);
        if cursor.peek() != Some(b'{') || !trimmed.ends_with('}') {
            return Err(cursor.error(MalformedKind::MissingOuterBraces));
        }

        let close = cursor.find_closing(b'{', b'}')?;
        let mut members = cursor.take_enclosed(close);
        if !cursor.is_empty() {
            return Err(cursor.error(MalformedKind::TrailingData));
        }
        self.parse_members(&mut members, 1)
    }

    fn check_depth(&self, cursor: &Cursor<'_>, depth: usize) -> Result<(), ParseError> {
        if depth > self.settings.max_nesting_depth {
            // The content cursor starts right after the opening bracket
            Err(ParseError::StructureTooDeep {
                max_depth: self.settings.max_nesting_depth,
                position: cursor.position().saturating_sub(1),
            })
        } else {
            Ok(())
        }
    }

    /// Parses the members of an object, `cursor` covering the text between its braces
    fn parse_members(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<ObjectMap, ParseError> {
        self.check_depth(cursor, depth)?;
        let mut object = ObjectMap::new();

        cursor.skip_whitespace();
        while !cursor.is_empty() {
            let name = self.extract_name(cursor)?;
            let value = self.extract_value(cursor, depth)?;
            object.insert(name, value);
            self.consume_separator(cursor)?;
        }
        Ok(object)
    }

    /// Parses the items of an array, `cursor` covering the text between its brackets
    fn parse_items(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Vec<Value>, ParseError> {
        self.check_depth(cursor, depth)?;
        let mut items = Vec::new();

        cursor.skip_whitespace();
        while !cursor.is_empty() {
            items.push(self.extract_value(cursor, depth)?);
            self.consume_separator(cursor)?;
        }
        Ok(items)
    }

    fn extract_name(&self, cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
        cursor.skip_whitespace();
        if cursor.peek() != Some(b'"') {
            return Err(cursor.error(MalformedKind::ExpectingMemberName));
        }
        let name = cursor.read_string()?;

        cursor.skip_whitespace();
        if !cursor.consume_if(b':') {
            return Err(cursor.error(MalformedKind::MissingColon));
        }
        let trimmed = name.trim();
        Ok(if trimmed.len() == name.len() {
            name
        } else {
            trimmed.to_owned()
        })
    }

    /// Extracts the next value; `depth` is the depth of the enclosing container
    fn extract_value(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, ParseError> {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b'[') => {
                let close = cursor.find_closing(b'[', b']')?;
                let mut items = cursor.take_enclosed(close);
                self.parse_items(&mut items, depth + 1).map(Value::Array)
            }
            Some(b'{') => {
                let close = cursor.find_closing(b'{', b'}')?;
                let mut members = cursor.take_enclosed(close);
                self.parse_members(&mut members, depth + 1).map(Value::Object)
            }
            Some(b'"') => cursor.read_string().map(Value::String),
            _ => {
                let end = cursor.find_token_end()?;
                let token = cursor.remaining()[..end].trim();
                if token.is_empty() {
                    return Err(cursor.error(MalformedKind::MissingValue));
                }
                let value = if token == "null" {
                    Value::Null
                } else {
                    Value::Scalar(token.to_owned())
                };
                cursor.advance(end);
                Ok(value)
            }
        }
    }

    /// Consumes the `,` after a member or item, if any
    fn consume_separator(&self, cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => Ok(()),
            Some(b',') => {
                cursor.advance(1);
                cursor.skip_whitespace();
                if cursor.is_empty() && !self.settings.allow_trailing_comma {
                    Err(cursor.error(MalformedKind::TrailingComma))
                } else {
                    Ok(())
                }
            }
            Some(b'}' | b']') => Err(cursor.error(MalformedKind::UnexpectedClosingBracket)),
            Some(_) => Err(cursor.error(MalformedKind::MissingComma)),
        }
    }
}

/// Parses the JSON document using the default [`ReaderSettings`]
///
/// See [`JsonParser::parse`].
pub fn parse(json: &str) -> Result<ObjectMap, ParseError> {
    JsonParser::new().parse(json)
}
