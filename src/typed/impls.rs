//! [`FromJsonValue`] and [`ToJsonValue`] implementations for standard library and `time` types

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use duplicate::duplicate_item;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

use super::{number_text, text_of, FieldKind, FromJsonValue, PathPiece, ToJsonValue, TypeMismatch};
use crate::{
    value::{ObjectMap, Value},
    writer::{UnsupportedKind, WriterError},
};

// Use `duplicate` crate to avoid repeating code for all supported types, see https://stackoverflow.com/a/61467564
#[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize])]
impl FromJsonValue for type_template {
    const KIND: FieldKind = FieldKind::Integer;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        // Fails for fractions, exponents and out of range values
        number_text(value, Self::KIND)?
            .parse()
            .map_err(|_| TypeMismatch::new(Self::KIND, value))
    }
}

#[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize])]
impl ToJsonValue for type_template {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        Ok(Value::Scalar(self.to_string()))
    }
}

#[duplicate_item(type_template; [f32]; [f64])]
impl FromJsonValue for type_template {
    const KIND: FieldKind = FieldKind::Float;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        number_text(value, Self::KIND)?
            .parse()
            .map_err(|_| TypeMismatch::new(Self::KIND, value))
    }
}

#[duplicate_item(type_template; [f32]; [f64])]
impl ToJsonValue for type_template {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        if self.is_finite() {
            Ok(Value::Scalar(self.to_string()))
        } else {
            Err(WriterError::unsupported(UnsupportedKind::NonFiniteNumber, self))
        }
    }
}

impl FromJsonValue for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        match text_of(value, Self::KIND)?.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(TypeMismatch::new(Self::KIND, value)),
        }
    }
}

impl ToJsonValue for bool {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        Ok(Value::Scalar(self.to_string()))
    }
}

impl FromJsonValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        text_of(value, Self::KIND).map(str::to_owned)
    }
}

impl ToJsonValue for String {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        Ok(Value::String(self.clone()))
    }
}

impl ToJsonValue for str {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        Ok(Value::String(self.to_owned()))
    }
}

impl<T: ToJsonValue + ?Sized> ToJsonValue for &T {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        (**self).to_json_value()
    }
}

impl<T: FromJsonValue> FromJsonValue for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Null => Ok(None),
            _ => T::from_json_value(value).map(Some),
        }
    }

    fn from_missing() -> Result<Self, TypeMismatch> {
        Ok(None)
    }
}

impl<T: ToJsonValue> ToJsonValue for Option<T> {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        match self {
            Some(v) => v.to_json_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: FromJsonValue> FromJsonValue for Vec<T> {
    const KIND: FieldKind = FieldKind::List;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    T::from_json_value(item).map_err(|e| e.within(PathPiece::ArrayItem(index)))
                })
                .collect(),
            _ => Err(TypeMismatch::new(Self::KIND, value)),
        }
    }
}

impl<T: ToJsonValue> ToJsonValue for [T] {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        self.iter()
            .map(ToJsonValue::to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl<T: ToJsonValue> ToJsonValue for Vec<T> {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        self.as_slice().to_json_value()
    }
}

/// Coerces all members of an object, using the member names as keys
fn entries_from_object<K: FromJsonValue, V: FromJsonValue>(
    value: &Value,
) -> Result<impl Iterator<Item = Result<(K, V), TypeMismatch>> + '_, TypeMismatch> {
    let object = match value {
        Value::Object(object) => object,
        _ => return Err(TypeMismatch::new(FieldKind::Map, value)),
    };

    Ok(object.iter().map(|(name, member_value)| {
        let key = K::from_json_value(&Value::String(name.to_owned())).map_err(|e| e.within(name))?;
        let member_value = V::from_json_value(member_value).map_err(|e| e.within(name))?;
        Ok((key, member_value))
    }))
}

/// Converts map entries to an object; keys have to convert to text without surrounding whitespace
fn entries_to_object<'a, K: ToJsonValue + 'a, V: ToJsonValue + 'a>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Result<Value, WriterError> {
    let mut object = ObjectMap::new();
    for (key, value) in entries {
        let name = match key.to_json_value()? {
            Value::String(s) | Value::Scalar(s) => s,
            other => {
                return Err(WriterError::unsupported(
                    UnsupportedKind::NonTextKey,
                    other.describe(),
                ))
            }
        };
        if name.trim().len() != name.len() {
            return Err(WriterError::unsupported(UnsupportedKind::PaddedKey, name));
        }
        object.insert(name, value.to_json_value()?);
    }
    Ok(Value::Object(object))
}

impl<K, V, S> FromJsonValue for HashMap<K, V, S>
where
    K: FromJsonValue + Eq + Hash,
    V: FromJsonValue,
    S: BuildHasher + Default,
{
    const KIND: FieldKind = FieldKind::Map;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        entries_from_object(value)?.collect()
    }
}

impl<K: ToJsonValue, V: ToJsonValue, S> ToJsonValue for HashMap<K, V, S> {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        entries_to_object(self.iter())
    }
}

impl<K: FromJsonValue + Ord, V: FromJsonValue> FromJsonValue for BTreeMap<K, V> {
    const KIND: FieldKind = FieldKind::Map;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        entries_from_object(value)?.collect()
    }
}

impl<K: ToJsonValue, V: ToJsonValue> ToJsonValue for BTreeMap<K, V> {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        entries_to_object(self.iter())
    }
}

impl FromJsonValue for Date {
    const KIND: FieldKind = FieldKind::Date;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        let text = text_of(value, Self::KIND)?;
        Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
            .map_err(|_| TypeMismatch::new(Self::KIND, value))
    }
}

impl ToJsonValue for Date {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        self.format(format_description!("[year]-[month]-[day]"))
            .map(Value::String)
            .map_err(|_| WriterError::unsupported(UnsupportedKind::UnformattableDateTime, self))
    }
}

impl FromJsonValue for OffsetDateTime {
    const KIND: FieldKind = FieldKind::DateTime;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        let text = text_of(value, Self::KIND)?;
        OffsetDateTime::parse(text.trim(), &Rfc3339).map_err(|_| TypeMismatch::new(Self::KIND, value))
    }
}

impl ToJsonValue for OffsetDateTime {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        self.format(&Rfc3339)
            .map(Value::String)
            .map_err(|_| WriterError::unsupported(UnsupportedKind::UnformattableDateTime, self))
    }
}

impl FromJsonValue for Value {
    const KIND: FieldKind = FieldKind::Any;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        Ok(value.clone())
    }

    fn from_missing() -> Result<Self, TypeMismatch> {
        Ok(Value::Null)
    }
}

impl ToJsonValue for Value {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        Ok(self.clone())
    }
}

impl FromJsonValue for ObjectMap {
    const KIND: FieldKind = FieldKind::Object;

    fn from_json_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| TypeMismatch::new(Self::KIND, value))
    }
}

impl ToJsonValue for ObjectMap {
    fn to_json_value(&self) -> Result<Value, WriterError> {
        Ok(Value::Object(self.clone()))
    }
}
