//! Field converters.
//!
//! Each converter takes a [`Raw`] value and produces the declared field type. Models pass these
//! to [`Content::assign`](crate::content::Content) one field at a time.

use crate::content::{Raw, ShellValue};
use crate::error::ConversionError;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Text coercion. Numbers render in decimal, booleans as `True` / `False`.
pub fn to_string(raw: Raw<'_>) -> Result<String, ConversionError> {
    match raw.as_value() {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(number_text(n)),
        Some(Value::Bool(true)) => Ok("True".to_string()),
        Some(Value::Bool(false)) => Ok("False".to_string()),
        _ => Err(ConversionError::coercion("string", raw)),
    }
}

/// Integral floats drop their fraction: `1.0` reads as `"1"`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// 32-bit integer coercion.
///
/// Fractional numbers round half to even; strings are parsed after trimming.
pub fn to_i32(raw: Raw<'_>) -> Result<i32, ConversionError> {
    let fail = || ConversionError::coercion("int32", raw);
    match raw.as_value() {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).map_err(|_| fail())
            } else {
                let rounded = n.as_f64().map(f64::round_ties_even).ok_or_else(fail)?;
                if rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
                    Ok(rounded as i32)
                } else {
                    Err(fail())
                }
            }
        }
        Some(Value::String(s)) => s.trim().parse().map_err(|_| fail()),
        Some(Value::Bool(b)) => Ok(i32::from(*b)),
        _ => Err(fail()),
    }
}

pub fn to_bool(raw: Raw<'_>) -> Result<bool, ConversionError> {
    let fail = || ConversionError::coercion("boolean", raw);
    match raw.as_value() {
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).ok_or_else(fail),
        _ => Err(fail()),
    }
}

/// Untyped payloads (`any` in the service schema) are kept as JSON.
///
/// A top-level `null` never reaches this converter: [`Content::assign`](crate::Content)
/// treats it as an absent field, so models keep such payloads unset.
pub fn to_any(raw: Raw<'_>) -> Result<Value, ConversionError> {
    Ok(match raw {
        Raw::Wire(value) | Raw::Dictionary(value) => value.clone(),
        Raw::Shell(value) => value.to_json(),
    })
}

/// String-to-string maps such as resource tags.
pub fn to_string_map(raw: Raw<'_>) -> Result<BTreeMap<String, String>, ConversionError> {
    let entries: Vec<(&str, Raw<'_>)> = match raw {
        Raw::Wire(Value::Object(map)) => map.iter().map(|(k, v)| (k.as_str(), Raw::Wire(v))).collect(),
        Raw::Dictionary(Value::Object(map)) | Raw::Shell(ShellValue::Value(Value::Object(map))) => {
            map.iter().map(|(k, v)| (k.as_str(), Raw::Dictionary(v))).collect()
        }
        Raw::Shell(ShellValue::Object(object)) => object
            .properties
            .iter()
            .map(|p| (p.name.as_str(), Raw::Shell(&p.value)))
            .collect(),
        other => return Err(ConversionError::coercion("map of string", other)),
    };

    entries
        .into_iter()
        .map(|(key, value)| {
            to_string(value)
                .map(|v| (key.to_string(), v))
                .map_err(|e| e.in_property(key))
        })
        .collect()
}

/// Converts every element of a sequence with `convert`, preserving order.
///
/// The first failing element aborts the whole sequence.
pub fn select_to_vec<T>(
    raw: Raw<'_>,
    convert: impl Fn(Raw<'_>) -> Result<T, ConversionError>,
) -> Result<Vec<T>, ConversionError> {
    raw.elements()
        .into_iter()
        .enumerate()
        .map(|(index, item)| convert(item).map_err(|e| e.in_element(index)))
        .collect()
}

/// Lifts an element converter into a converter for arrays of that element.
pub fn array_of<T>(
    convert: impl Fn(Raw<'_>) -> Result<T, ConversionError>,
) -> impl Fn(Raw<'_>) -> Result<Vec<T>, ConversionError> {
    move |raw: Raw<'_>| select_to_vec(raw, &convert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_accept_scalars() {
        assert_eq!(to_string(Raw::Wire(&json!("abc"))).unwrap(), "abc");
        assert_eq!(to_string(Raw::Wire(&json!(42))).unwrap(), "42");
        assert_eq!(to_string(Raw::Wire(&json!(true))).unwrap(), "True");
        assert_eq!(to_string(Raw::Wire(&json!(1.0))).unwrap(), "1");
        assert_eq!(to_string(Raw::Wire(&json!(-20.0))).unwrap(), "-20");
        assert_eq!(to_string(Raw::Wire(&json!(2.5))).unwrap(), "2.5");
        assert!(to_string(Raw::Wire(&json!({"a": 1}))).is_err());
    }

    #[test]
    fn integers_coerce_like_the_shell() {
        assert_eq!(to_i32(Raw::Wire(&json!(7))).unwrap(), 7);
        assert_eq!(to_i32(Raw::Dictionary(&json!(" 12 "))).unwrap(), 12);
        assert_eq!(to_i32(Raw::Wire(&json!(2.5))).unwrap(), 2);
        assert_eq!(to_i32(Raw::Wire(&json!(3.5))).unwrap(), 4);
        assert_eq!(to_i32(Raw::Wire(&json!(true))).unwrap(), 1);
    }

    #[test]
    fn integers_reject_bad_input() {
        let err = to_i32(Raw::Wire(&json!("abc"))).unwrap_err();
        assert!(matches!(err, ConversionError::Coercion { expected: "int32", .. }));
        assert!(to_i32(Raw::Wire(&json!(4_294_967_296_i64))).is_err());
        assert!(to_i32(Raw::Wire(&json!([1]))).is_err());
    }

    #[test]
    fn booleans() {
        assert!(to_bool(Raw::Wire(&json!("TRUE"))).unwrap());
        assert!(!to_bool(Raw::Wire(&json!(0))).unwrap());
        assert!(to_bool(Raw::Wire(&json!("yes"))).is_err());
    }

    #[test]
    fn string_map_from_object_and_shell() {
        let tags = to_string_map(Raw::Wire(&json!({"env": "prod", "tier": 2}))).unwrap();
        assert_eq!(tags.get("env").map(String::as_str), Some("prod"));
        assert_eq!(tags.get("tier").map(String::as_str), Some("2"));

        let shell = ShellValue::Object(crate::ShellObject::new().with_property("owner", "ops"));
        let tags = to_string_map(Raw::Shell(&shell)).unwrap();
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn failing_element_aborts_the_array() {
        let value = json!([1, "two", 3]);
        let err = select_to_vec(Raw::Wire(&value), to_i32).unwrap_err();
        assert!(matches!(err, ConversionError::Element { index: 1, .. }));
        assert!(err.is_coercion());
    }

    #[test]
    fn array_of_preserves_order() {
        let value = json!(["3", 1, 2]);
        let numbers = array_of(to_i32)(Raw::Dictionary(&value)).unwrap();
        assert_eq!(numbers, vec![3, 1, 2]);
    }
}
