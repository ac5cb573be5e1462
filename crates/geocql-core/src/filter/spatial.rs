use crate::value::has_finite_coords;
use geo::Relate;
use geo_types::Geometry;

///
/// SpatialOp
///
/// Topological predicates over two geometries, decided from their DE-9IM
/// intersection matrix. Operand order matters for `Within` and `Contains`:
/// the left geometry is the subject.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SpatialOp {
    BBox,
    Contains,
    Crosses,
    Disjoint,
    Equals,
    Intersects,
    Overlaps,
    Touches,
    Within,
}

impl SpatialOp {
    pub const ALL: [Self; 9] = [
        Self::BBox,
        Self::Contains,
        Self::Crosses,
        Self::Disjoint,
        Self::Equals,
        Self::Intersects,
        Self::Overlaps,
        Self::Touches,
        Self::Within,
    ];

    /// CQL function name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BBox => "BBOX",
            Self::Contains => "CONTAINS",
            Self::Crosses => "CROSSES",
            Self::Disjoint => "DISJOINT",
            Self::Equals => "EQUALS",
            Self::Intersects => "INTERSECTS",
            Self::Overlaps => "OVERLAPS",
            Self::Touches => "TOUCHES",
            Self::Within => "WITHIN",
        }
    }

    /// Resolve a CQL function name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }

    /// Decide the predicate for `left` against `right`.
    ///
    /// No predicate holds when either side has a NaN or infinite coordinate.
    #[must_use]
    pub fn holds(self, left: &Geometry<f64>, right: &Geometry<f64>) -> bool {
        if !has_finite_coords(left) || !has_finite_coords(right) {
            return false;
        }

        let matrix = left.relate(right);

        match self {
            Self::BBox | Self::Intersects => matrix.is_intersects(),
            Self::Contains => matrix.is_contains(),
            Self::Crosses => matrix.is_crosses(),
            Self::Disjoint => matrix.is_disjoint(),
            Self::Equals => matrix.is_equal_topo(),
            Self::Overlaps => matrix.is_overlaps(),
            Self::Touches => matrix.is_touches(),
            Self::Within => matrix.is_within(),
        }
    }
}
