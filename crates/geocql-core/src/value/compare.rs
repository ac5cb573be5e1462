use crate::value::{
    Value,
    coercion::{format_number, parse_bool, parse_number},
    parse_wkt,
};
use std::cmp::Ordering;

/// Equality under the comparison coercion rules.
///
/// Returns `None` when the pair is not comparable at all: either side is
/// Absent or Null, or the kinds cannot be reconciled. Callers treat `None`
/// as "no operator holds", including `<>`.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Geometry(a), Value::Geometry(b)) => Some(a == b),
        (Value::Geometry(geometry), Value::Text(text))
        | (Value::Text(text), Value::Geometry(geometry)) => {
            parse_wkt(text).ok().map(|parsed| &parsed == geometry)
        }
        _ => compare_order(left, right).map(Ordering::is_eq),
    }
}

/// Ordering under the comparison coercion rules.
///
/// Geometries have no order. NaN never orders.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Absent | Value::Null, _) | (_, Value::Absent | Value::Null) => None,
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Number(n), Value::Text(text)) => number_text_order(*n, text),
        (Value::Text(text), Value::Number(n)) => {
            number_text_order(*n, text).map(Ordering::reverse)
        }
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Bool(b), Value::Text(text)) => Some(b.cmp(&parse_bool(text)?)),
        (Value::Text(text), Value::Bool(b)) => Some(parse_bool(text)?.cmp(b)),
        _ => None,
    }
}

// Numeric when the text parses; otherwise the number's canonical text is
// compared against the text.
fn number_text_order(n: f64, text: &str) -> Option<Ordering> {
    match parse_number(text) {
        Some(parsed) => n.partial_cmp(&parsed),
        None => Some(format_number(n).as_str().cmp(text)),
    }
}
