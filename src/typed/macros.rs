//! Macros generating [`JsonObject`](super::JsonObject) and text value implementations

/// Declares a struct and implements [`JsonObject`](crate::typed::JsonObject),
/// [`FromJsonValue`](crate::typed::FromJsonValue) and [`ToJsonValue`](crate::typed::ToJsonValue) for it
///
/// Every field type has to implement `FromJsonValue` and `ToJsonValue`. By default a field
/// is stored in the JSON object member named like the field; a different member name can be
/// specified with `=> "name"` after the field type. Members are written in field declaration
/// order.
///
/// # Examples
/// ```
/// # use bracejson::typed::{FieldDescriptor, FieldKind, JsonObject};
/// bracejson::json_object! {
///     #[derive(Default, PartialEq, Debug)]
///     pub struct Customer {
///         pub id: Option<String>,
///         pub first_name: Option<String> => "firstName",
///         pub tags: Option<Vec<String>>,
///     }
/// }
///
/// assert_eq!(
///     &[
///         FieldDescriptor { name: "id", kind: FieldKind::Text },
///         FieldDescriptor { name: "firstName", kind: FieldKind::Text },
///         FieldDescriptor { name: "tags", kind: FieldKind::List },
///     ],
///     Customer::fields()
/// );
/// assert_eq!(
///     r#"{"id":null,"firstName":null,"tags":null}"#,
///     bracejson::to_json(&Customer::default())?
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! json_object {
    (
        $(#[$struct_attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $member_name:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$struct_attr])*
        $vis struct $name {
            $(
                $(#[$field_attr])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::typed::JsonObject for $name {
            fn fields() -> &'static [$crate::typed::FieldDescriptor] {
                const FIELDS: &[$crate::typed::FieldDescriptor] = &[
                    $(
                        $crate::typed::FieldDescriptor {
                            name: $crate::__json_member_name!($field $(, $member_name)?),
                            kind: <$ty as $crate::typed::FromJsonValue>::KIND,
                        },
                    )*
                ];
                FIELDS
            }

            fn to_object(&self) -> ::std::result::Result<$crate::ObjectMap, $crate::writer::WriterError> {
                #[allow(unused_mut)]
                let mut object = $crate::ObjectMap::new();
                $(
                    object.insert(
                        $crate::__json_member_name!($field $(, $member_name)?),
                        $crate::typed::ToJsonValue::to_json_value(&self.$field)?,
                    );
                )*
                ::std::result::Result::Ok(object)
            }

            #[allow(unused_variables)]
            fn from_object(object: &$crate::ObjectMap) -> ::std::result::Result<Self, $crate::typed::TypeMismatch> {
                ::std::result::Result::Ok($name {
                    $(
                        $field: $crate::typed::read_member::<$ty>(
                            object,
                            $crate::__json_member_name!($field $(, $member_name)?),
                        )?,
                    )*
                })
            }
        }

        impl $crate::typed::ToJsonValue for $name {
            fn to_json_value(&self) -> ::std::result::Result<$crate::Value, $crate::writer::WriterError> {
                $crate::typed::JsonObject::to_object(self).map($crate::Value::Object)
            }
        }

        impl $crate::typed::FromJsonValue for $name {
            const KIND: $crate::typed::FieldKind = $crate::typed::FieldKind::Object;

            fn from_json_value(value: &$crate::Value) -> ::std::result::Result<Self, $crate::typed::TypeMismatch> {
                match value {
                    $crate::Value::Object(object) => $crate::typed::JsonObject::from_object(object),
                    _ => ::std::result::Result::Err($crate::typed::TypeMismatch::new(
                        <Self as $crate::typed::FromJsonValue>::KIND,
                        value,
                    )),
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __json_member_name {
    ($field:ident) => {
        ::std::stringify!($field)
    };
    ($field:ident, $member_name:literal) => {
        $member_name
    };
}

/// Implements [`FromJsonValue`](crate::typed::FromJsonValue) and [`ToJsonValue`](crate::typed::ToJsonValue)
/// for a type which is written as JSON string
///
/// The type has to implement [`FromStr`](std::str::FromStr) and [`Display`](std::fmt::Display).
/// The optional second argument is the [`FieldKind`](crate::typed::FieldKind) reported for the
/// type, by default [`FieldKind::Identifier`](crate::typed::FieldKind::Identifier).
///
/// # Examples
/// ```
/// # use std::{fmt, str::FromStr};
/// # use bracejson::{typed::{FromJsonValue, ToJsonValue}, Value};
/// #[derive(PartialEq, Debug)]
/// struct Sku(u32);
///
/// impl FromStr for Sku {
///     type Err = std::num::ParseIntError;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.trim_start_matches("SKU-").parse().map(Sku)
///     }
/// }
///
/// impl fmt::Display for Sku {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "SKU-{}", self.0)
///     }
/// }
///
/// bracejson::json_text_value!(Sku);
///
/// assert_eq!(Sku(7), Sku::from_json_value(&Value::from("SKU-7"))?);
/// assert_eq!(Value::from("SKU-7"), Sku(7).to_json_value()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! json_text_value {
    ($ty:ty) => {
        $crate::json_text_value!($ty, $crate::typed::FieldKind::Identifier);
    };
    ($ty:ty, $kind:expr) => {
        impl $crate::typed::ToJsonValue for $ty {
            fn to_json_value(&self) -> ::std::result::Result<$crate::Value, $crate::writer::WriterError> {
                ::std::result::Result::Ok($crate::Value::String(::std::string::ToString::to_string(self)))
            }
        }

        impl $crate::typed::FromJsonValue for $ty {
            const KIND: $crate::typed::FieldKind = $kind;

            fn from_json_value(value: &$crate::Value) -> ::std::result::Result<Self, $crate::typed::TypeMismatch> {
                let kind = <Self as $crate::typed::FromJsonValue>::KIND;
                $crate::typed::text_of(value, kind)?
                    .trim()
                    .parse()
                    .map_err(|_| $crate::typed::TypeMismatch::new(kind, value))
            }
        }
    };
}
