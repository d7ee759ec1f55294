use alloc::vec;

use crate::{parse, AllocationStrategy, Document, ErrorCode, Value, ValueKind};

/// Runs `check` against the same input parsed under all three allocation
/// strategies; the bounded buffer is comfortably oversized.
pub(crate) fn for_each_strategy(input: &str, check: impl Fn(&Document<'_>)) {
    for_each_strategy_bytes(input.as_bytes(), check);
}

pub(crate) fn for_each_strategy_bytes(input: &[u8], check: impl Fn(&Document<'_>)) {
    check(&parse(AllocationStrategy::Single, input));
    check(&parse(AllocationStrategy::Dynamic, input));
    let mut words = vec![0u32; 8096];
    check(&parse(AllocationStrategy::Bounded(&mut words), input));
}

/// Asserts the input is valid everywhere and hands the root to `check`.
pub(crate) fn with_root(input: &str, check: impl Fn(Value<'_>)) {
    for_each_strategy(input, |doc| {
        assert!(
            doc.is_valid(),
            "{input:?} failed to parse: {:?}",
            doc.error()
        );
        check(doc.root().unwrap());
    });
}

pub(crate) fn expect_error(input: &str, code: ErrorCode, line: usize, column: usize) {
    for_each_strategy(input, |doc| {
        assert!(!doc.is_valid(), "{input:?} unexpectedly parsed");
        let error = doc.error().unwrap();
        assert_eq!(error.code, code, "wrong code for {input:?}");
        assert_eq!(
            (error.line, error.column),
            (line, column),
            "wrong position for {input:?}"
        );
    });
}

pub(crate) fn expect_error_code(input: &str, code: ErrorCode) {
    for_each_strategy(input, |doc| {
        assert!(!doc.is_valid(), "{input:?} unexpectedly parsed");
        assert_eq!(doc.error().unwrap().code, code, "wrong code for {input:?}");
    });
}

pub(crate) fn expect_error_code_bytes(input: &[u8], code: ErrorCode) {
    for_each_strategy_bytes(input, |doc| {
        assert!(!doc.is_valid(), "{input:?} unexpectedly parsed");
        assert_eq!(doc.error().unwrap().code, code, "wrong code for {input:?}");
    });
}

/// Deep structural equality: same tree of kinds, lengths, keys, and values.
pub(crate) fn structurally_equal(a: &Value<'_>, b: &Value<'_>) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    match a.kind() {
        ValueKind::Null | ValueKind::False | ValueKind::True => true,
        ValueKind::Integer => a.integer_value() == b.integer_value(),
        ValueKind::Double => a.double_value() == b.double_value(),
        ValueKind::String => a.as_str() == b.as_str(),
        ValueKind::Array => {
            let (a, b) = (a.as_array().unwrap(), b.as_array().unwrap());
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| structurally_equal(&x, &y))
        }
        ValueKind::Object => {
            let (a, b) = (a.as_object().unwrap(), b.as_object().unwrap());
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && structurally_equal(&va, &vb))
        }
    }
}

/// Agreement with serde_json's reading of the same document.
pub(crate) fn matches_serde(value: &Value<'_>, expected: &serde_json::Value) -> bool {
    match expected {
        serde_json::Value::Null => value.is_null(),
        serde_json::Value::Bool(b) => value.boolean_value() == Some(*b),
        serde_json::Value::Number(n) => value.number_value() == n.as_f64(),
        serde_json::Value::String(s) => value.as_str() == Some(s.as_str()),
        serde_json::Value::Array(items) => match value.as_array() {
            Some(array) => {
                array.len() == items.len()
                    && array
                        .iter()
                        .zip(items)
                        .all(|(v, expected)| matches_serde(&v, expected))
            }
            None => false,
        },
        serde_json::Value::Object(map) => match value.as_object() {
            Some(object) => {
                object.len() == map.len()
                    && map
                        .iter()
                        .all(|(key, expected)| matches_serde(&object.value_of_key(key), expected))
            }
            None => false,
        },
    }
}
