// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property values and their attribute string forms.
//!
//! Property values use [`serde_json::Value`], which covers every shape a
//! declared default can take: `null`, booleans, numbers, strings, ordered
//! lists and key/value records. A missing value (a deleted or never-declared
//! property) is modelled as `None` by the APIs that read values.

use alloc::format;
use alloc::string::String;
use serde_json::Number;

pub use serde_json::{Map, Value};

/// Largest integer a double can represent exactly (`2^53 - 1`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Returns `true` if `value` is primitive and so can round-trip through an attribute.
///
/// Only `null`, booleans, numbers and strings are attribute-observable. Lists and
/// records are not, regardless of what they contain.
///
/// ```rust
/// use elemental_property::{Value, is_observable};
///
/// assert!(is_observable(&Value::Null));
/// assert!(is_observable(&Value::from("a")));
/// assert!(!is_observable(&Value::Array(Vec::new())));
/// ```
#[must_use]
pub fn is_observable(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

/// Structural equality used for change detection.
///
/// Numbers are compared by their `f64` value so that an integer default and the
/// same number parsed from an attribute compare equal. Lists and records are
/// compared element by element.
#[must_use]
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, v)| y.get(key).is_some_and(|w| same_value(v, w)))
        }
        _ => a == b,
    }
}

/// Builds a number value, preferring the integer representation when exact.
///
/// Returns `None` for non-finite input, which has no JSON number form.
#[must_use]
pub fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "range-checked against MAX_SAFE_INTEGER, and the round trip rejects fractions"
    )]
    let int = n as i64;
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&n) && int as f64 == n {
        Some(Value::from(int))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}

/// Formats a number the way an HTML attribute would receive it.
///
/// This is the ECMAScript `Number::toString` layout: shortest round-trip digits,
/// plain notation for decimal exponents in `-7 < e < 21`, exponent notation
/// with an explicit sign otherwise, and `"0"` for both zeros.
///
/// ```rust
/// use elemental_property::format_number;
///
/// assert_eq!(format_number(22.0), "22");
/// assert_eq!(format_number(75.29), "75.29");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(0.000_000_1), "1e-7");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return String::from("NaN");
    }
    if n.is_infinite() {
        return String::from(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return String::from("0");
    }

    let scientific = format!("{n:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    #[expect(clippy::cast_possible_truncation, reason = "at most 17 significant digits")]
    let k = digits.len() as i32;
    let n_pos = exponent + 1;

    let mut out = String::new();
    if mantissa.starts_with('-') {
        out.push('-');
    }
    if k <= n_pos && n_pos <= 21 {
        out.push_str(&digits);
        out.push_str(&"0".repeat((n_pos - k) as usize));
    } else if 0 < n_pos && n_pos <= 21 {
        let (int, frac) = digits.split_at(n_pos as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < n_pos && n_pos <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat((-n_pos) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let e = n_pos - 1;
        out.push('e');
        out.push(if e >= 0 { '+' } else { '-' });
        out.push_str(&format!("{}", e.unsigned_abs()));
    }
    out
}

/// Returns the attribute string a default value reflects to, if any.
///
/// Strings reflect as-is, numbers in their [`format_number`] form and `true` as
/// the empty string. `false`, `null`, lists and records are never written.
#[must_use]
pub fn reflected_attribute(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(format_number),
        Value::Bool(true) => Some(String::new()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn observability_follows_value_kind() {
        assert!(is_observable(&json!(null)));
        assert!(is_observable(&json!(false)));
        assert!(is_observable(&json!(0)));
        assert!(is_observable(&json!("")));
        assert!(!is_observable(&json!([1, 2, 3])));
        assert!(!is_observable(&json!({})));
    }

    #[test]
    fn same_value_ignores_number_representation() {
        assert!(same_value(&json!(22), &number_value(22.0).unwrap()));
        assert!(same_value(&json!(1.0), &json!(1)));
        assert!(!same_value(&json!(1), &json!("1")));
        assert!(same_value(&json!({"a": [1, 2.0]}), &json!({"a": [1.0, 2]})));
        assert!(!same_value(&json!([1, 2]), &json!([1, 2, 3])));
        assert!(!same_value(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn number_value_prefers_integers() {
        assert_eq!(number_value(13.0), Some(json!(13)));
        assert_eq!(number_value(-4.0), Some(json!(-4)));
        assert_eq!(number_value(-0.0), Some(json!(0)));
        assert_eq!(number_value(81.353), Some(json!(81.353)));
        assert_eq!(number_value(f64::INFINITY), None);
        assert_eq!(number_value(f64::NAN), None);
        assert!(number_value(1e300).unwrap().is_f64());
    }

    #[test]
    fn format_number_layouts() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(123.0), "123");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1.5e21), "1.5e+21");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn reflection_strings() {
        assert_eq!(reflected_attribute(&json!(true)), Some(String::new()));
        assert_eq!(reflected_attribute(&json!(123)), Some(String::from("123")));
        assert_eq!(reflected_attribute(&json!(0)), Some(String::from("0")));
        assert_eq!(reflected_attribute(&json!("abc")), Some(String::from("abc")));
        assert_eq!(reflected_attribute(&json!("")), Some(String::new()));
        assert_eq!(reflected_attribute(&json!(false)), None);
        assert_eq!(reflected_attribute(&json!(null)), None);
        assert_eq!(reflected_attribute(&json!([])), None);
        assert_eq!(reflected_attribute(&json!({})), None);
    }
}
