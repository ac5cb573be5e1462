mod eval;


use crate::value::Value;
use std::collections::BTreeSet;

///
/// Expression
///
/// Value-producing node of a filter tree. Expressions are immutable once
/// built and evaluate without side effects.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Literal(Value),
    Attribute(String),

    /// The record's default geometry, `geometry()` in CQL.
    DefaultGeometry,

    Arithmetic {
        op: ArithmeticOp,
        left: Box<Self>,
        right: Box<Self>,
    },
}

impl Expression {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute(name.into())
    }

    #[must_use]
    pub fn arithmetic(op: ArithmeticOp, left: Self, right: Self) -> Self {
        Self::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn add(left: Self, right: Self) -> Self {
        Self::arithmetic(ArithmeticOp::Add, left, right)
    }

    #[must_use]
    pub fn sub(left: Self, right: Self) -> Self {
        Self::arithmetic(ArithmeticOp::Sub, left, right)
    }

    #[must_use]
    pub fn mul(left: Self, right: Self) -> Self {
        Self::arithmetic(ArithmeticOp::Mul, left, right)
    }

    #[must_use]
    pub fn div(left: Self, right: Self) -> Self {
        Self::arithmetic(ArithmeticOp::Div, left, right)
    }

    /// Add every attribute name this expression reads to `out`.
    pub fn collect_attributes(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Literal(_) | Self::DefaultGeometry => {}
            Self::Attribute(name) => {
                out.insert(name.clone());
            }
            Self::Arithmetic { left, right, .. } => {
                left.collect_attributes(out);
                right.collect_attributes(out);
            }
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

///
/// ArithmeticOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    /// CQL operator symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Apply the operator to two evaluated operands.
    ///
    /// Anything that is not a finite number on both sides, a zero divisor,
    /// or a non-finite result yields `Absent`.
    #[must_use]
    pub fn apply(self, left: &Value, right: &Value) -> Value {
        let (Some(left), Some(right)) = (left.as_number(), right.as_number()) else {
            return Value::Absent;
        };

        let result = match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => {
                if right == 0.0 {
                    return Value::Absent;
                }
                left / right
            }
        };

        if result.is_finite() {
            Value::Number(result)
        } else {
            Value::Absent
        }
    }
}
