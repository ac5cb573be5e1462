use crate::error::GeometryError;
use geo::CoordsIter;
use geo_types::Geometry;
use std::str::FromStr;
use wkt::{ToWkt, Wkt};

/// Deepest parenthesis nesting accepted in WKT text.
pub const MAX_WKT_DEPTH: usize = 64;

/// Parse WKT text into a geometry.
///
/// Text nested deeper than [`MAX_WKT_DEPTH`] and geometries with NaN or
/// infinite coordinates are rejected.
pub fn parse_wkt(text: &str) -> Result<Geometry<f64>, GeometryError> {
    let text = text.trim();
    if nesting_depth(text) > MAX_WKT_DEPTH {
        return Err(GeometryError::TooDeep {
            limit: MAX_WKT_DEPTH,
        });
    }

    let parsed =
        Wkt::<f64>::from_str(text).map_err(|err| GeometryError::Parse(err.to_string()))?;
    let geometry =
        Geometry::try_from(parsed).map_err(|err| GeometryError::Convert(format!("{err:?}")))?;

    if !has_finite_coords(&geometry) {
        return Err(GeometryError::NonFinite);
    }

    Ok(geometry)
}

/// Render a geometry as WKT.
#[must_use]
pub fn to_wkt(geometry: &Geometry<f64>) -> String {
    geometry.wkt_string()
}

/// True when every coordinate of the geometry is a finite number.
#[must_use]
pub fn has_finite_coords(geometry: &Geometry<f64>) -> bool {
    geometry
        .coords_iter()
        .all(|coord| coord.x.is_finite() && coord.y.is_finite())
}

fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}
