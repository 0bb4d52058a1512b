use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_superjson::{
    deserialize, parse, parse_with_config, serialize, stringify, stringify_with_config, value,
    Availability, BigIntHandler, BigNumber, Config, Envelope, Error, HandlerKind, Map,
    StringHandler, TypeTag, Value,
};
use std::collections::BTreeMap;
use std::sync::Arc;

const NO_BACKENDS: Availability = Availability {
    integer: false,
    decimal: false,
};

fn date(text: &str) -> Value {
    Value::Date(DateTime::parse_from_rfc3339(text).unwrap())
}

#[test]
fn test_scenario_date_at_top_level_key() {
    let input = r#"{"json":{"created":"2024-01-01T00:00:00.000Z"},"meta":{"values":{"created":["Date"]},"v":1}}"#;
    let value = parse(input).unwrap();

    let created = value.get("created").and_then(Value::as_date).unwrap();
    assert_eq!(created, &Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[cfg(feature = "num-bigint")]
#[test]
fn test_scenario_bigint_with_integer_handler() {
    let input = r#"{"json":{"count":"-9007199254741992"},"meta":{"values":{"count":["bigint"]},"v":1}}"#;
    let value = parse(input).unwrap();

    match value.get("count") {
        Some(Value::BigInt(BigNumber::Integer(n))) => {
            assert_eq!(n.to_string(), "-9007199254741992");
        }
        other => panic!("expected num-bigint value, got {:?}", other),
    }
}

#[test]
fn test_scenario_nested_sequence_index() {
    let input = r#"{"json":{"dates":["2024-01-01T00:00:00.000Z","x"]},"meta":{"values":{"dates.0":["Date"]},"v":1}}"#;
    let value = parse(input).unwrap();

    let dates = value.get("dates").and_then(Value::as_array).unwrap();
    assert!(dates[0].is_date());
    assert_eq!(dates[1], Value::from("x"));
}

#[test]
fn test_no_meta_returns_tree_unchanged() {
    let plain = parse(r#"{"json":{"a":{"b":[1,"2",null]}}}"#).unwrap();
    let empty = parse(r#"{"json":{"a":{"b":[1,"2",null]}},"meta":{"values":{},"v":1}}"#).unwrap();
    let null_meta = parse(r#"{"json":{"a":{"b":[1,"2",null]}},"meta":null}"#).unwrap();

    let expected = value!({ "a": { "b": [1, "2", null] } });
    assert_eq!(plain, expected);
    assert_eq!(empty, expected);
    assert_eq!(null_meta, expected);
}

#[test]
fn test_unannotated_huge_integer_is_lossy() {
    let value = parse(r#"{"json":{"id":18446744073709551615}}"#).unwrap();
    let id = value.get("id").unwrap();
    assert!(id.is_number());
    assert!(!id.is_bigint());
    assert_eq!(id.as_f64(), Some(18446744073709551615u64 as f64));
}

#[test]
fn test_unknown_path_is_noop() {
    let with_meta =
        parse(r#"{"json":{"a":1,"b":[true]},"meta":{"values":{"x.y.z":["Date"]},"v":1}}"#)
            .unwrap();
    let without_meta = parse(r#"{"json":{"a":1,"b":[true]}}"#).unwrap();
    assert_eq!(with_meta, without_meta);
    assert_eq!(
        serde_json::to_string(&with_meta).unwrap(),
        serde_json::to_string(&without_meta).unwrap()
    );
}

#[test]
fn test_out_of_range_index_is_noop() {
    let value =
        parse(r#"{"json":{"dates":["x"]},"meta":{"values":{"dates.5":["Date"]},"v":1}}"#).unwrap();
    assert_eq!(value, value!({ "dates": ["x"] }));
}

#[test]
fn test_numeric_key_in_object() {
    let input = r#"{"json":{"0":"2024-01-01T00:00:00.000Z"},"meta":{"values":{"0":["Date"]},"v":1}}"#;
    let value = parse(input).unwrap();
    assert!(value.get("0").unwrap().is_date());
    assert!(value.is_object());
}

#[test]
fn test_unknown_tag_is_identity() {
    let input = r#"{"json":{"pattern":"/ab+c/"},"meta":{"values":{"pattern":["regexp"]},"v":1}}"#;
    assert_eq!(parse(input).unwrap(), value!({ "pattern": "/ab+c/" }));
}

#[test]
fn test_invalid_json_text() {
    assert!(matches!(parse("not json"), Err(Error::InvalidJson(_))));
    assert!(matches!(parse(""), Err(Error::InvalidJson(_))));
}

#[test]
fn test_payload_must_be_object() {
    let err = parse("[1,2,3]").unwrap_err();
    assert!(matches!(err, Error::InvalidJson(_)));
    assert!(err.to_string().starts_with("Invalid JSON"));
}

#[test]
fn test_missing_json_key() {
    let err = parse(r#"{"meta":{"v":1}}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidMeta(_)));
    assert!(err.to_string().contains("Missing \"json\" key"));
}

#[test]
fn test_invalid_date_annotation() {
    let err = parse(r#"{"json":{"d":"not-a-date"},"meta":{"values":{"d":["Date"]},"v":1}}"#)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidMeta(_)));

    let err = parse(r#"{"json":{"d":12},"meta":{"values":{"d":["Date"]},"v":1}}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidMeta(_)));
}

#[test]
fn test_bigint_annotation_on_number_fails() {
    let err = parse(r#"{"json":{"n":12},"meta":{"values":{"n":["bigint"]},"v":1}}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidMeta(_)));
}

#[test]
fn test_bad_annotation_aborts_whole_call() {
    let input = r#"{"json":{"ok":"2024-01-01T00:00:00.000Z","bad":"nope"},"meta":{"values":{"ok":["Date"],"bad":["Date"]},"v":1}}"#;
    assert!(parse(input).is_err());
}

#[test]
fn test_unsupported_version() {
    let err = parse(r#"{"json":1,"meta":{"v":2}}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidMeta(_)));
}

#[test]
fn test_string_handler_keeps_digits() {
    let config = Config::new().with_availability(NO_BACKENDS);
    let input = r#"{"json":{"n":"12345678901234567890"},"meta":{"values":{"n":["bigint"]},"v":1}}"#;
    let value = parse_with_config(input, &config).unwrap();
    assert_eq!(value, value!({ "n": "12345678901234567890" }));
}

#[test]
fn test_strict_mode_without_backends() {
    let config = Config::new()
        .with_availability(NO_BACKENDS)
        .with_strict_big_int(true);
    let input = r#"{"json":{"n":"1"},"meta":{"values":{"n":["bigint"]},"v":1}}"#;
    let err = parse_with_config(input, &config).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
}

#[test]
fn test_strict_mode_only_matters_for_bigints() {
    let config = Config::new()
        .with_availability(NO_BACKENDS)
        .with_strict_big_int(true);
    let input = r#"{"json":{"d":"2024-01-01T00:00:00.000Z"},"meta":{"values":{"d":["Date"]},"v":1}}"#;
    assert!(parse_with_config(input, &config).is_ok());
}

#[cfg(feature = "bigdecimal")]
#[test]
fn test_decimal_backend_when_integer_unavailable() {
    let config = Config::new().with_availability(Availability {
        integer: false,
        decimal: true,
    });
    assert_eq!(config.big_int_handler().unwrap().kind(), HandlerKind::Decimal);

    let input = r#"{"json":{"n":"-9007199254741992"},"meta":{"values":{"n":["bigint"]},"v":1}}"#;
    let value = parse_with_config(input, &config).unwrap();
    let n = value.get("n").and_then(Value::as_bigint).unwrap();
    assert_eq!(n.backend_name(), "bigdecimal");
    assert_eq!(n.to_string(), "-9007199254741992");
}

#[cfg(all(feature = "num-bigint", feature = "bigdecimal"))]
#[test]
fn test_backend_mismatch_is_an_error() {
    let decimal = Config::new().with_big_int_handler(Arc::new(serde_superjson::DecimalHandler));
    let input = r#"{"json":{"n":"42"},"meta":{"values":{"n":["bigint"]},"v":1}}"#;
    let value = parse(input).unwrap();

    let err = stringify_with_config(&value, &decimal).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
}

#[test]
fn test_custom_handler_override() {
    #[derive(Debug)]
    struct Reversed;

    impl BigIntHandler for Reversed {
        fn kind(&self) -> HandlerKind {
            HandlerKind::String
        }

        fn parse(&self, digits: &str) -> serde_superjson::Result<Value> {
            Ok(Value::String(digits.chars().rev().collect()))
        }

        fn stringify(&self, value: &Value) -> serde_superjson::Result<String> {
            StringHandler.stringify(value)
        }

        fn is_available() -> bool {
            true
        }
    }

    let config = Config::new().with_big_int_handler(Arc::new(Reversed));
    let input = r#"{"json":{"n":"123"},"meta":{"values":{"n":["bigint"]},"v":1}}"#;
    assert_eq!(
        parse_with_config(input, &config).unwrap(),
        value!({ "n": "321" })
    );
}

#[test]
fn test_tag_chain_applies_left_to_right() {
    let config = Config::new().with_big_int_handler(Arc::new(StringHandler));

    let forward = r#"{"json":{"d":"2024-01-01T00:00:00.000Z"},"meta":{"values":{"d":["bigint","Date"]},"v":1}}"#;
    let value = parse_with_config(forward, &config).unwrap();
    assert!(value.get("d").unwrap().is_date());

    let backward = r#"{"json":{"d":"2024-01-01T00:00:00.000Z"},"meta":{"values":{"d":["Date","bigint"]},"v":1}}"#;
    assert!(matches!(
        parse_with_config(backward, &config),
        Err(Error::InvalidMeta(_))
    ));
}

#[test]
fn test_undefined_marker_default_creates_null_key() {
    let value =
        parse(r#"{"json":{"a":1},"meta":{"values":{"b":["undefined"]},"v":1}}"#).unwrap();
    assert_eq!(value, value!({ "a": 1, "b": null }));
}

#[test]
fn test_undefined_marker_removes_key_when_disabled() {
    let config = Config::new().with_create_undefined_keys(false);
    let value = parse_with_config(
        r#"{"json":{"a":1,"b":null},"meta":{"values":{"b":["undefined"]},"v":1}}"#,
        &config,
    )
    .unwrap();
    assert_eq!(value, value!({ "a": 1 }));
}

#[test]
fn test_null_to_undefined_round_trip() {
    let config = Config::new()
        .with_null_to_undefined(true)
        .with_create_undefined_keys(false);
    let tree = value!({ "keep": 1, "drop": null });

    let text = stringify_with_config(&tree, &config).unwrap();
    assert_eq!(
        text,
        r#"{"json":{"keep":1,"drop":null},"meta":{"values":{"drop":["undefined"]},"v":1}}"#
    );
    assert_eq!(parse_with_config(&text, &config).unwrap(), value!({ "keep": 1 }));
}

#[test]
fn test_emission_of_dates() {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::from("launch"));
    map.insert("at".to_string(), date("2024-03-10T12:30:45.250+01:00"));
    map.insert(
        "history".to_string(),
        Value::Array(vec![date("2023-01-01T00:00:00Z"), Value::from("n/a")]),
    );
    let tree = Value::Object(map);

    let text = stringify(&tree).unwrap();
    assert_eq!(
        text,
        r#"{"json":{"name":"launch","at":"2024-03-10T11:30:45.250Z","history":["2023-01-01T00:00:00.000Z","n/a"]},"meta":{"values":{"at":["Date"],"history.0":["Date"]},"v":1}}"#
    );
    assert_eq!(parse(&text).unwrap(), tree);
}

#[cfg(feature = "num-bigint")]
#[test]
fn test_emission_of_bigints() {
    let n: num_bigint::BigInt = "123456789012345678901234567890".parse().unwrap();
    let tree = Value::Array(vec![Value::from(n), Value::from(7)]);

    let envelope = serialize(&tree).unwrap();
    assert_eq!(
        envelope.json,
        value!(["123456789012345678901234567890", 7])
    );
    let meta = envelope.meta.clone().unwrap();
    assert_eq!(meta.values["0"], vec![TypeTag::BigInt]);
    assert_eq!(meta.values.len(), 1);

    assert_eq!(envelope.restore(&Config::new()).unwrap(), tree);
}

#[test]
fn test_emission_escapes_dotted_keys() {
    let mut inner = Map::new();
    inner.insert("release.date".to_string(), date("2024-01-01T00:00:00Z"));
    let mut outer = Map::new();
    outer.insert("a\\b".to_string(), Value::Object(inner));
    let tree = Value::Object(outer);

    let envelope = serialize(&tree).unwrap();
    let paths: Vec<_> = envelope.meta.clone().unwrap().values.keys().cloned().collect();
    assert_eq!(paths, vec!["a\\\\b.release\\.date"]);
    assert_eq!(envelope.restore(&Config::new()).unwrap(), tree);
}

#[test]
fn test_root_date_round_trip() {
    let tree = date("1999-12-31T23:59:59.999Z");
    let text = stringify(&tree).unwrap();
    assert_eq!(
        text,
        r#"{"json":"1999-12-31T23:59:59.999Z","meta":{"values":{"":["Date"]},"v":1}}"#
    );
    assert_eq!(parse(&text).unwrap(), tree);
}

#[test]
fn test_empty_top_level_key_with_date_is_not_emitted() {
    let mut map = Map::new();
    map.insert(String::new(), date("2024-01-01T00:00:00Z"));
    map.insert("other".to_string(), Value::from(1));
    let tree = Value::Object(map);

    assert!(matches!(stringify(&tree), Err(Error::UnsupportedType(_))));
    assert!(matches!(serialize(&tree), Err(Error::UnsupportedType(_))));
}

#[test]
fn test_empty_top_level_key_with_plain_value_round_trips() {
    let tree = value!({ "": "plain", "other": 1 });
    let text = stringify(&tree).unwrap();
    assert_eq!(text, r#"{"json":{"":"plain","other":1},"meta":{"v":1}}"#);
    assert_eq!(parse(&text).unwrap(), tree);
}

#[test]
fn test_five_digit_year_is_not_emitted() {
    let far = chrono::NaiveDate::from_ymd_opt(12000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut map = Map::new();
    map.insert("at".to_string(), Utc.from_utc_datetime(&far).into());
    assert!(matches!(serialize(&Value::Object(map)), Err(Error::UnsupportedType(_))));

    let tree = Value::from(Utc.from_utc_datetime(&far));
    assert!(matches!(stringify(&tree), Err(Error::UnsupportedType(_))));
}

#[test]
fn test_expanded_year_form_is_rejected_on_parse() {
    let input = r#"{"json":"+12000-01-01T00:00:00.000Z","meta":{"values":{"":["Date"]},"v":1}}"#;
    assert!(matches!(parse(input), Err(Error::InvalidMeta(_))));
}

#[test]
fn test_boundary_years_round_trip() {
    for text in ["0000-01-01T00:00:00.000Z", "9999-12-31T23:59:59.999Z"] {
        let mut map = Map::new();
        map.insert("at".to_string(), date(text));
        let tree = Value::Object(map);
        assert_eq!(parse(&stringify(&tree).unwrap()).unwrap(), tree);
    }
}

#[test]
fn test_envelope_into_value() {
    let envelope = Envelope::emit(&date("2024-01-01T00:00:00Z"), &Config::new()).unwrap();
    assert_eq!(
        envelope.into_value(),
        value!({
            "json": "2024-01-01T00:00:00.000Z",
            "meta": { "values": { "": ["Date"] }, "v": 1 }
        })
    );
}

#[test]
fn test_deserialize_from_serde_json_value() {
    let upstream: serde_json::Value = serde_json::from_str(
        r#"{"json":{"dates":{"0":"2024-01-01T00:00:00.000Z","1":"x"},"empty":{}},"meta":{"values":{"dates.0":["Date"]},"v":1}}"#,
    )
    .unwrap();

    let value = deserialize(&upstream).unwrap();
    let dates = value.get("dates").and_then(Value::as_array).unwrap();
    assert!(dates[0].is_date());
    assert_eq!(dates[1], Value::from("x"));
    assert_eq!(value.get("empty"), Some(&value!({})));
}

#[test]
fn test_deserialize_from_struct() {
    #[derive(Serialize)]
    struct Meta {
        values: BTreeMap<String, Vec<String>>,
        v: u32,
    }

    #[derive(Serialize)]
    struct Payload {
        json: BTreeMap<String, String>,
        meta: Meta,
    }

    let mut json = BTreeMap::new();
    json.insert("when".to_string(), "2024-01-01T00:00:00.000Z".to_string());
    let mut values = BTreeMap::new();
    values.insert("when".to_string(), vec!["Date".to_string()]);

    let payload = Payload {
        json,
        meta: Meta { values, v: 1 },
    };
    let value = deserialize(&payload).unwrap();
    assert!(value.get("when").unwrap().is_date());
}

#[test]
fn test_deserialize_missing_json() {
    let upstream = serde_json::json!({ "meta": { "v": 1 } });
    assert!(matches!(deserialize(&upstream), Err(Error::InvalidMeta(_))));
}
