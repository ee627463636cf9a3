//! Lenient field extraction for recommender responses.
//!
//! Responses are decoded from a `serde_json::Value` instead of a derived
//! struct so that a missing or wrong-typed field degrades to an empty
//! collection rather than failing the whole payload.

use serde_json::{Map, Value};

/// Object field, or `None` if absent / not an object.
pub(crate) fn object<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

/// Array of strings, or `None` if the field is absent / not an array.
/// Non-string elements are skipped.
pub(crate) fn string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    value.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    })
}

/// Array whose elements keep their positions: each non-string element
/// becomes `None`. `None` overall if the field is absent / not an array.
pub(crate) fn string_slots(value: &Value, key: &str) -> Option<Vec<Option<String>>> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|v| v.as_str().map(str::to_string)).collect())
}

/// Finite number, or `None` for null / non-numeric / NaN-like input.
pub(crate) fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Optional finite number field.
pub(crate) fn number_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(finite_number)
}

/// Optional string field.
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
