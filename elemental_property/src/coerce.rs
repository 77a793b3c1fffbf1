// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute string → property value coercion.

use alloc::string::String;

use crate::value::{Value, format_number, number_value};

/// Parses an attribute string into a property value.
///
/// Rules are tried in order:
///
/// 1. The empty string is `true` (a present boolean attribute).
/// 2. A string that survives a trip through a double and back unchanged is
///    that number: `"22"` and `"75.29"` convert, `"01"`, `"1e3"` and `" 1"` do not.
/// 3. A string shaped like a JSON record (`{...}`) or list (`[...]`) is parsed
///    as JSON. Malformed JSON falls through silently.
/// 4. Anything else stays the raw string.
///
/// `"true"` and `"false"` are not special: they stay strings.
///
/// ```rust
/// use elemental_property::{Value, parse_attribute_value};
/// use serde_json::json;
///
/// assert_eq!(parse_attribute_value(""), Value::Bool(true));
/// assert_eq!(parse_attribute_value("22"), json!(22));
/// assert_eq!(parse_attribute_value(r#"{"a":1}"#), json!({"a": 1}));
/// assert_eq!(parse_attribute_value("{oops"), json!("{oops"));
/// assert_eq!(parse_attribute_value("false"), json!("false"));
/// ```
#[must_use]
pub fn parse_attribute_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Bool(true);
    }
    if let Some(number) = parse_round_trip_number(raw) {
        return number;
    }
    if looks_like_json(raw) {
        if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
            return parsed;
        }
    }
    Value::String(String::from(raw))
}

/// Parses an optional attribute string.
///
/// A removed attribute (`None`) becomes `null` without going through the
/// coercion rules.
#[must_use]
pub fn parse_optional_attribute(raw: Option<&str>) -> Value {
    raw.map_or(Value::Null, parse_attribute_value)
}

fn parse_round_trip_number(raw: &str) -> Option<Value> {
    let n: f64 = raw.parse().ok()?;
    if format_number(n) != raw {
        return None;
    }
    number_value(n)
}

fn looks_like_json(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    matches!(
        (bytes.first(), bytes.last()),
        (Some(b'{'), Some(b'}')) | (Some(b'['), Some(b']'))
    )
}
