//! End-to-end checks through the public API only.

use flatjson::{parse, AllocationStrategy, Document, ErrorCode, ValueKind};

fn parse_all(input: &str, check: impl Fn(&Document<'_>)) {
    check(&parse(AllocationStrategy::Single, input));
    check(&parse(AllocationStrategy::Dynamic, input));
    let mut words = vec![0u32; 8096];
    check(&parse(AllocationStrategy::Bounded(&mut words), input));
}

#[test]
fn empty_array_root() {
    parse_all("[]", |doc| {
        let root = doc.root().unwrap();
        assert_eq!(root.kind(), ValueKind::Array);
        assert_eq!(root.length(), 0);
    });
}

#[test]
fn eleven_integers() {
    parse_all("[0,1,2,3,4,5,6,7,8,9,10]", |doc| {
        let root = doc.root().unwrap();
        let array = root.as_array().unwrap();
        assert_eq!(array.len(), 11);
        for (i, element) in array.iter().enumerate() {
            assert_eq!(element.kind(), ValueKind::Integer);
            assert_eq!(element.integer_value(), Some(i as i32));
        }
    });
}

#[test]
fn int32_boundaries() {
    parse_all("[-2147483648, 2147483647, -2147483649, 2147483648]", |doc| {
        let root = doc.root().unwrap();
        let array = root.as_array().unwrap();
        assert_eq!(array.get(0).unwrap().integer_value(), Some(i32::MIN));
        assert_eq!(array.get(1).unwrap().integer_value(), Some(i32::MAX));
        assert_eq!(
            array.get(2).unwrap().double_value(),
            Some(f64::from(i32::MIN) - 1.0)
        );
        assert_eq!(
            array.get(3).unwrap().double_value(),
            Some(f64::from(i32::MAX) + 1.0)
        );
    });
}

#[test]
fn length_then_bytes_key_index() {
    parse_all(" { \"b\" : 1 , \"aa\" : 0 } ", |doc| {
        let root = doc.root().unwrap();
        let object = root.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object.find_key("b"), 0);
        assert_eq!(object.find_key("aa"), 1);
        assert_eq!(object.find_key("c"), 2);
        assert_eq!(object.find_key("ccc"), 2);
    });
}

#[test]
fn surrogate_pair_decodes_to_four_bytes() {
    parse_all("[\"\\ud950\\uDf21\"]", |doc| {
        let root = doc.root().unwrap();
        let array = root.as_array().unwrap();
        assert_eq!(array.len(), 1);
        let element = array.get(0).unwrap();
        assert_eq!(element.kind(), ValueKind::String);
        assert_eq!(element.length(), 4);
        assert_eq!(
            element.as_str().unwrap().as_bytes(),
            &[0xF1, 0xA4, 0x8C, 0xA1]
        );
    });
}

#[test]
fn exponent_overflow_saturates_without_error() {
    parse_all("[0e9999990066, 1e9999990066, 1e-9999990066]", |doc| {
        assert!(doc.is_valid());
        let root = doc.root().unwrap();
        let array = root.as_array().unwrap();
        assert_eq!(array.get(0).unwrap().double_value(), Some(0.0));
        assert_eq!(array.get(1).unwrap().double_value(), Some(f64::INFINITY));
        assert_eq!(array.get(2).unwrap().double_value(), Some(0.0));
    });
}

#[test]
fn leading_zero_reads_as_missing_comma() {
    parse_all("[01]", |doc| {
        assert!(!doc.is_valid());
        let error = doc.error().unwrap();
        assert_eq!(error.code, ErrorCode::ExpectedComma);
        assert_eq!((error.line, error.column), (1, 3));
    });
}

#[test]
fn object_with_missing_value() {
    parse_all("{\"x\":}", |doc| {
        assert!(!doc.is_valid());
        let error = doc.error().unwrap();
        assert_eq!(error.code, ErrorCode::ExpectedValue);
        assert_eq!((error.line, error.column), (1, 6));
    });
}

#[test]
fn empty_input() {
    parse_all("", |doc| {
        assert!(!doc.is_valid());
        let error = doc.error().unwrap();
        assert_eq!(error.code, ErrorCode::MissingRootElement);
        assert_eq!((error.line, error.column), (1, 1));
    });
}

#[test]
fn scalar_root_is_rejected() {
    parse_all("0", |doc| {
        assert!(!doc.is_valid());
        let error = doc.error().unwrap();
        assert_eq!(error.code, ErrorCode::BadRoot);
        assert_eq!((error.line, error.column), (1, 1));
    });
}

#[test]
fn navigate_and_reserialize() {
    let text = r#"{
        "server": {"host": "127.0.0.1", "port": 8080},
        "retries": [1, 2, 5],
        "tls": false
    }"#;
    parse_all(text, |doc| {
        let root = doc.root().unwrap();
        let config = root.as_object().unwrap();

        let server = config.value_of_key("server").as_object().unwrap();
        assert_eq!(server.value_of_key("host").as_str(), Some("127.0.0.1"));
        assert_eq!(server.value_of_key("port").integer_value(), Some(8080));
        assert_eq!(config.value_of_key("tls").boolean_value(), Some(false));

        let compact = flatjson::to_string(&root);
        // Key order is the sorted index: length first, then bytes.
        assert_eq!(
            compact,
            r#"{"tls":false,"server":{"host":"127.0.0.1","port":8080},"retries":[1,2,5]}"#
        );

        let pretty = flatjson::to_string_pretty(&root);
        let reparsed = parse(AllocationStrategy::Dynamic, pretty);
        assert!(reparsed.is_valid());
        assert_eq!(flatjson::to_string(&reparsed.root().unwrap()), compact);
    });
}
