use std::error::Error;

use bracejson::{
    reader,
    writer::{JsonSerializer, UnsupportedKind, WriterError, WriterSettings},
    ObjectMap, Value,
};

type TestResult = Result<(), Box<dyn Error>>;

fn scalar(s: &str) -> Value {
    Value::Scalar(s.to_owned())
}

fn nested_arrays(depth: usize) -> Value {
    let mut value = scalar("1");
    for _ in 0..depth {
        value = Value::Array(vec![value]);
    }
    value
}

duplicate::duplicate! {
    [
        test_name serialize_fn;
        [serialize_with_function] [bracejson::writer::serialize];
        [serialize_with_serializer] [(|value: &Value| JsonSerializer::new().serialize(value))];
    ]
    #[test]
    fn test_name() -> TestResult {
        assert_eq!("null", serialize_fn(&Value::Null)?);
        assert_eq!("-1.5e3", serialize_fn(&scalar("-1.5e3"))?);
        assert_eq!(r#""null""#, serialize_fn(&Value::from("null"))?);
        assert_eq!("{}", serialize_fn(&Value::Object(ObjectMap::new()))?);
        assert_eq!("[]", serialize_fn(&Value::Array(Vec::new()))?);

        let object: ObjectMap = [
            ("z", scalar("true")),
            ("a", Value::Array(vec![scalar("1"), Value::from("b"), Value::Null])),
            ("m", Value::Object([("k", scalar("0"))].into_iter().collect())),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            r#"{"z":true,"a":[1,"b",null],"m":{"k":0}}"#,
            serialize_fn(&Value::Object(object))?
        );
        Ok(())
    }
}

#[test]
fn escaping() -> TestResult {
    let mut object = ObjectMap::new();
    object.insert("say \"hi\"", Value::from(r#"C:\dir "quoted""#));
    object.insert("control", Value::from("tab\tline\n/"));

    let json = bracejson::writer::serialize_object(&object)?;
    assert_eq!(
        "{\"say \\\"hi\\\"\":\"C:\\\\dir \\\"quoted\\\"\",\"control\":\"tab\tline\n/\"}",
        json
    );
    // Parser reads the escaped text back unchanged
    assert_eq!(object, reader::parse(&json)?);
    Ok(())
}

#[test]
fn invalid_scalar() -> TestResult {
    for token in ["", "abc", "True", "01", "1.", "NaN", "null"] {
        match bracejson::writer::serialize(&scalar(token)) {
            Err(WriterError::UnsupportedType { kind, value }) => {
                assert_eq!(UnsupportedKind::InvalidScalar, kind);
                assert_eq!(token, value);
            }
            r => panic!("Unexpected result for {token:?}: {r:?}"),
        }
    }

    let serializer = JsonSerializer::new_custom(WriterSettings {
        validate_scalars: false,
        ..Default::default()
    });
    assert_eq!("[abc]", serializer.serialize(&Value::Array(vec![scalar("abc")]))?);
    Ok(())
}

#[test]
fn max_nesting_depth() -> TestResult {
    let serializer = JsonSerializer::new_custom(WriterSettings {
        max_nesting_depth: 2,
        ..Default::default()
    });
    assert_eq!("[[1]]", serializer.serialize(&nested_arrays(2))?);
    assert_eq!(
        Err(WriterError::StructureTooDeep { max_depth: 2 }),
        serializer.serialize(&nested_arrays(3))
    );

    bracejson::writer::serialize(&nested_arrays(512))?;
    assert_eq!(
        Err(WriterError::StructureTooDeep { max_depth: 512 }),
        bracejson::writer::serialize(&nested_arrays(513))
    );
    Ok(())
}

#[test]
fn round_trip() -> TestResult {
    let json = r#"{"id":"x","items":[{"k":"1"},{"k":2.5e-3}],"empty":{},"n":null,"deep":[[1,2],[3,[4,5]]]}"#;
    let object = reader::parse(json)?;
    assert_eq!(json, bracejson::writer::serialize_object(&object)?);
    Ok(())
}
