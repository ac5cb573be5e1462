use crate::value::{Value, parse_wkt};
use geo_types::Geometry;
use std::borrow::Cow;

///
/// Coercions
///
/// Each accessor is total: it either yields the value in the requested
/// shape or `None`. Absent and Null never coerce to anything.
///

impl Value {
    /// Numeric view. Text must parse, once trimmed, as a finite number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => parse_number(text),
            _ => None,
        }
    }

    /// Text view. Numbers render canonically, so `5.0` reads as `5`.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Self::Number(n) => Some(Cow::Owned(format_number(*n))),
            Self::Bool(true) => Some(Cow::Borrowed("true")),
            Self::Bool(false) => Some(Cow::Borrowed("false")),
            _ => None,
        }
    }

    /// Geometry view. Text is read as WKT.
    #[must_use]
    pub fn as_geometry(&self) -> Option<Cow<'_, Geometry<f64>>> {
        match self {
            Self::Geometry(geometry) => Some(Cow::Borrowed(geometry)),
            Self::Text(text) => parse_wkt(text).ok().map(Cow::Owned),
            _ => None,
        }
    }

    /// Owning variant of [`Value::as_geometry`].
    #[must_use]
    pub fn into_geometry(self) -> Option<Geometry<f64>> {
        match self {
            Self::Geometry(geometry) => Some(geometry),
            Self::Text(text) => parse_wkt(&text).ok(),
            _ => None,
        }
    }

    /// Boolean view. Text accepts `true`/`false` in any ASCII case.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(text) => parse_bool(text),
            _ => None,
        }
    }
}

/// Canonical decimal rendering shared by text coercion and CQL printing.
///
/// Uses the shortest representation that reads back to the same `f64`;
/// negative zero renders as `0`.
#[must_use]
pub fn format_number(n: f64) -> String {
    let rendered = n.to_string();
    if rendered == "-0" {
        "0".to_string()
    } else {
        rendered
    }
}

pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let n = text.trim().parse::<f64>().ok()?;

    n.is_finite().then_some(n)
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
