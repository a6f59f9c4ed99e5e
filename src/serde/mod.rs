//! Provides integration with [Serde](https://docs.rs/serde/latest/serde/)
//!
//! This module implements [`Serialize`](serde::ser::Serialize) and [`Deserialize`](serde::de::Deserialize)
//! for the generic [`Value`](crate::Value) and [`ObjectMap`](crate::ObjectMap), so that values
//! parsed by this crate can be handed to any Serde data format, and values produced by a Serde
//! data format can be written by this crate.
//!
//! Because the parser does not interpret scalar tokens, serializing a [`Value::Scalar`](crate::Value::Scalar)
//! interprets it: `true` and `false` become booleans, numbers become integers if they fit into `u64`
//! or `i64` and floating point numbers otherwise. Scalars which are neither cause an error. When
//! deserializing, booleans and numbers become scalars holding their text form.
//!
//! This module is _not_ intended as replacement for [Serde JSON](https://docs.rs/serde_json/latest/serde_json/index.html);
//! the codec of this crate does not depend on Serde.
//!
//! To enable this optional integration, specify the `serde` feature in your `Cargo.toml` file
//! for the dependency on this crate:
//! ```toml
//! [dependencies]
//! bracejson = { version = "...", features = ["serde"] }
//! ```
//!
//! # Usage examples
//!
//! ## Serialization
//! ```
//! let object = bracejson::reader::parse(r#"{"a": [1, -2.5, true], "b": "text"}"#)?;
//!
//! let json = serde_json::to_string(&object)?;
//! assert_eq!(r#"{"a":[1,-2.5,true],"b":"text"}"#, json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Deserialization
//! ```
//! # use bracejson::{ObjectMap, Value};
//! let object: ObjectMap = serde_json::from_str(r#"{"a": [1, null], "b": false}"#)?;
//!
//! assert_eq!(
//!     Some(&Value::Array(vec![Value::Scalar("1".to_owned()), Value::Null])),
//!     object.get("a")
//! );
//! assert_eq!(r#"{"a":[1,null],"b":false}"#, bracejson::writer::serialize_object(&object)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Only trait implementations, nothing to re-export
mod de;
mod ser;
