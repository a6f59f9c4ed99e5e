use serde::ser::{Error, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{json_number::is_valid_json_number, ObjectMap, Value};

/// Serializes the scalar token as bool or number
fn serialize_scalar<S: Serializer>(token: &str, serializer: S) -> Result<S::Ok, S::Error> {
    match token {
        "true" => return serializer.serialize_bool(true),
        "false" => return serializer.serialize_bool(false),
        _ => {}
    }
    if !is_valid_json_number(token) {
        return Err(S::Error::custom(format!(
            "scalar '{token}' is neither a boolean nor a number"
        )));
    }

    if let Ok(n) = token.parse::<u64>() {
        serializer.serialize_u64(n)
    } else if let Ok(n) = token.parse::<i64>() {
        serializer.serialize_i64(n)
    } else {
        match token.parse::<f64>() {
            Ok(n) if n.is_finite() => serializer.serialize_f64(n),
            _ => Err(S::Error::custom(format!(
                "number '{token}' is out of range"
            ))),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Scalar(token) => serialize_scalar(token, serializer),
            Value::Object(object) => object.serialize(serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for ObjectMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::reader::parse;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn scalar(s: &str) -> Value {
        Value::Scalar(s.to_owned())
    }

    #[test]
    fn scalars() -> TestResult {
        assert_eq!("true", serde_json::to_string(&scalar("true"))?);
        assert_eq!("18446744073709551615", serde_json::to_string(&scalar("18446744073709551615"))?);
        assert_eq!("-9223372036854775808", serde_json::to_string(&scalar("-9223372036854775808"))?);
        assert_eq!("1.5", serde_json::to_string(&scalar("1.5"))?);
        assert_eq!("1200.0", serde_json::to_string(&scalar("1.2e3"))?);
        assert_eq!("null", serde_json::to_string(&Value::Null)?);
        assert_eq!(r#""null""#, serde_json::to_string(&Value::from("null"))?);

        for token in ["abc", "NaN", "1e400"] {
            match serde_json::to_string(&scalar(token)) {
                Err(e) => assert!(e.to_string().contains(token), "Unexpected error: {e}"),
                r => panic!("Unexpected result for {token}: {r:?}"),
            }
        }
        Ok(())
    }

    #[test]
    fn object() -> TestResult {
        let object = parse(r#"{"b": [1, {"c": "x\"y"}], "a": null, "d": {}}"#)?;
        assert_eq!(
            r#"{"b":[1,{"c":"x\"y"}],"a":null,"d":{}}"#,
            serde_json::to_string(&object)?
        );
        assert_eq!(
            serde_json::json!({"b": [1, {"c": "x\"y"}], "a": null, "d": {}}),
            serde_json::to_value(Value::Object(object))?
        );
        Ok(())
    }
}
