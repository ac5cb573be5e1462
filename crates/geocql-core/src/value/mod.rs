mod coercion;
mod compare;
mod geometry;
mod tag;


use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use coercion::format_number;
pub use compare::{compare_eq, compare_order};
pub use geometry::{MAX_WKT_DEPTH, has_finite_coords, parse_wkt, to_wkt};
pub use tag::ValueTag;

///
/// Value
///
/// Runtime value produced by expression evaluation and held by records.
///
/// `Absent` and `Null` are distinct: `Absent` is the answer for an attribute
/// the record does not carry, `Null` is an attribute that exists but holds
/// nothing.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum Value {
    #[default]
    Absent,
    Null,
    Number(f64),
    Text(String),
    Bool(bool),
    Geometry(Geometry<f64>),
}

impl Value {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for `Absent` and `Null`, the two "nothing here" states.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Absent | Self::Null)
    }

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        match self {
            Self::Absent => ValueTag::Absent,
            Self::Null => ValueTag::Null,
            Self::Number(_) => ValueTag::Number,
            Self::Text(_) => ValueTag::Text,
            Self::Bool(_) => ValueTag::Bool,
            Self::Geometry(_) => ValueTag::Geometry,
        }
    }

    /// Build a text value.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("<absent>"),
            Self::Null => f.write_str("NULL"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(text) => f.write_str(text),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Geometry(geometry) => f.write_str(&to_wkt(geometry)),
        }
    }
}

///
/// CONVERSIONS
///

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Geometry<f64>> for Value {
    fn from(value: Geometry<f64>) -> Self {
        Self::Geometry(value)
    }
}

impl From<geo_types::Point<f64>> for Value {
    fn from(value: geo_types::Point<f64>) -> Self {
        Self::Geometry(Geometry::Point(value))
    }
}

impl From<geo_types::Polygon<f64>> for Value {
    fn from(value: geo_types::Polygon<f64>) -> Self {
        Self::Geometry(Geometry::Polygon(value))
    }
}

impl From<geo_types::LineString<f64>> for Value {
    fn from(value: geo_types::LineString<f64>) -> Self {
        Self::Geometry(Geometry::LineString(value))
    }
}

// NOTE: `None` maps to Null, not Absent; an optional field that exists is
// still present on the record.
impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
