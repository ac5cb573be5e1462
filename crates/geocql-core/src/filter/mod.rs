mod eval;
mod like;
mod spatial;

#[cfg(test)]
mod tests;

use crate::{
    error::PatternError,
    expr::Expression,
    value::{Value, compare_eq, compare_order},
};
use derive_more::{Deref, IntoIterator};
use geo_types::{Coord, Geometry, Rect};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    ops::{BitAnd, BitOr, Not},
};

pub use like::LikePattern;
pub use spatial::SpatialOp;

///
/// Filter
///
/// Boolean node of a compiled filter tree. Applying any node to any record
/// yields a definite answer; data-shape problems (missing attributes,
/// un-coercible kinds) resolve to `false` rather than errors.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Accepts every record.
    Include,

    /// Rejects every record.
    Exclude,

    Comparison {
        op: CompareOp,
        left: Expression,
        right: Expression,
    },

    Logic {
        op: LogicOp,
        operands: Vec<Self>,
    },

    In {
        expr: Expression,
        candidates: Vec<Expression>,
        negated: bool,
    },

    Like {
        expr: Expression,
        pattern: LikePattern,
        negated: bool,
    },

    IsNull {
        attribute: String,
        negated: bool,
    },

    Spatial {
        op: SpatialOp,
        left: Expression,
        right: Expression,
    },

    /// Feature-id membership.
    Id { ids: Vec<Value> },
}

impl Filter {
    #[must_use]
    pub const fn compare(op: CompareOp, left: Expression, right: Expression) -> Self {
        Self::Comparison { op, left, right }
    }

    #[must_use]
    pub const fn eq(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    #[must_use]
    pub const fn ne(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Ne, left, right)
    }

    #[must_use]
    pub const fn lt(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Lt, left, right)
    }

    #[must_use]
    pub const fn le(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Le, left, right)
    }

    #[must_use]
    pub const fn gt(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Gt, left, right)
    }

    #[must_use]
    pub const fn ge(left: Expression, right: Expression) -> Self {
        Self::compare(CompareOp::Ge, left, right)
    }

    /// Conjunction. No operands is `Include` and a single operand is
    /// returned as is.
    #[must_use]
    pub fn and(operands: Vec<Self>) -> Self {
        Self::logic(LogicOp::And, operands, Self::Include)
    }

    /// Disjunction. No operands is `Exclude` and a single operand is
    /// returned as is.
    #[must_use]
    pub fn or(operands: Vec<Self>) -> Self {
        Self::logic(LogicOp::Or, operands, Self::Exclude)
    }

    fn logic(op: LogicOp, mut operands: Vec<Self>, empty: Self) -> Self {
        match operands.len() {
            0 => empty,
            1 => operands.pop().unwrap_or(empty),
            _ => Self::Logic { op, operands },
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(filter: Self) -> Self {
        Self::Logic {
            op: LogicOp::Not,
            operands: vec![filter],
        }
    }

    #[must_use]
    pub const fn in_(expr: Expression, candidates: Vec<Expression>) -> Self {
        Self::In {
            expr,
            candidates,
            negated: false,
        }
    }

    #[must_use]
    pub const fn not_in(expr: Expression, candidates: Vec<Expression>) -> Self {
        Self::In {
            expr,
            candidates,
            negated: true,
        }
    }

    /// Pattern match; `relaxed` accepts a match anywhere in the value.
    pub fn like(expr: Expression, pattern: &str, relaxed: bool) -> Result<Self, PatternError> {
        Ok(Self::Like {
            expr,
            pattern: LikePattern::new(pattern, relaxed)?,
            negated: false,
        })
    }

    pub fn not_like(expr: Expression, pattern: &str, relaxed: bool) -> Result<Self, PatternError> {
        Ok(Self::Like {
            expr,
            pattern: LikePattern::new(pattern, relaxed)?,
            negated: true,
        })
    }

    pub fn is_null(attribute: impl Into<String>) -> Self {
        Self::IsNull {
            attribute: attribute.into(),
            negated: false,
        }
    }

    pub fn is_not_null(attribute: impl Into<String>) -> Self {
        Self::IsNull {
            attribute: attribute.into(),
            negated: true,
        }
    }

    #[must_use]
    pub const fn spatial(op: SpatialOp, left: Expression, right: Expression) -> Self {
        Self::Spatial { op, left, right }
    }

    /// Bounding-box test of `expr` against an axis-aligned rectangle.
    #[must_use]
    pub fn bbox(expr: Expression, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let rect = Rect::new(
            Coord { x: min_x, y: min_y },
            Coord { x: max_x, y: max_y },
        );

        Self::Spatial {
            op: SpatialOp::BBox,
            left: expr,
            right: Expression::Literal(Value::Geometry(Geometry::Rect(rect))),
        }
    }

    /// `expr BETWEEN low AND high`, expanded to `expr >= low AND expr <= high`.
    #[must_use]
    pub fn between(expr: Expression, low: Expression, high: Expression) -> Self {
        Self::and(vec![Self::ge(expr.clone(), low), Self::le(expr, high)])
    }

    /// `expr NOT BETWEEN low AND high`, expanded to `expr < low OR expr > high`.
    #[must_use]
    pub fn not_between(expr: Expression, low: Expression, high: Expression) -> Self {
        Self::or(vec![Self::lt(expr.clone(), low), Self::gt(expr, high)])
    }

    #[must_use]
    pub const fn id(ids: Vec<Value>) -> Self {
        Self::Id { ids }
    }

    /// Attribute names this filter reads, sorted and deduplicated.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        let mut names = BTreeSet::new();
        self.collect_attributes(&mut names);

        AttributeSet(names)
    }

    fn collect_attributes(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Include | Self::Exclude | Self::Id { .. } => {}
            Self::Comparison { left, right, .. } | Self::Spatial { left, right, .. } => {
                left.collect_attributes(out);
                right.collect_attributes(out);
            }
            Self::Logic { operands, .. } => {
                for operand in operands {
                    operand.collect_attributes(out);
                }
            }
            Self::In {
                expr, candidates, ..
            } => {
                expr.collect_attributes(out);
                for candidate in candidates {
                    candidate.collect_attributes(out);
                }
            }
            Self::Like { expr, .. } => expr.collect_attributes(out),
            Self::IsNull { attribute, .. } => {
                out.insert(attribute.clone());
            }
        }
    }
}

impl BitAnd for Filter {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(vec![self, rhs])
    }
}

impl BitAnd for &Filter {
    type Output = Filter;

    fn bitand(self, rhs: Self) -> Self::Output {
        Filter::and(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Filter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::or(vec![self, rhs])
    }
}

impl BitOr for &Filter {
    type Output = Filter;

    fn bitor(self, rhs: Self) -> Self::Output {
        Filter::or(vec![self.clone(), rhs.clone()])
    }
}

impl Not for Filter {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::not(self)
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// CQL operator symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Decide the comparison for two evaluated operands.
    ///
    /// Pairs that do not compare (absent, null, mismatched kinds, NaN)
    /// fail every operator, `Ne` included.
    #[must_use]
    pub fn holds(self, left: &Value, right: &Value) -> bool {
        match self {
            Self::Eq => compare_eq(left, right) == Some(true),
            Self::Ne => compare_eq(left, right) == Some(false),
            Self::Lt => compare_order(left, right) == Some(Ordering::Less),
            Self::Le => matches!(
                compare_order(left, right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::Gt => compare_order(left, right) == Some(Ordering::Greater),
            Self::Ge => matches!(
                compare_order(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

///
/// LogicOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LogicOp {
    And,
    Or,
    Not,
}

impl LogicOp {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

///
/// AttributeSet
///
/// Sorted, deduplicated attribute names read by a filter.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct AttributeSet(BTreeSet<String>);
