use crate::{
    cql::token::TokenKind,
    expr::Expression,
    filter::{Filter, LogicOp, SpatialOp},
    value::{Value, format_number, to_wkt},
};
use geo_types::Geometry;
use std::fmt::{self, Display, Write};

// Any tree the parser can build prints as CQL that parses back to an equal
// tree; other trees print as CQL that filters the same way. Arithmetic and
// logic nodes are always parenthesized so no precedence reasoning is needed
// on the way back in.

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write_literal(f, value),
            Self::Attribute(name) => write_attribute(f, name),
            Self::DefaultGeometry => f.write_str("geometry()"),
            Self::Arithmetic { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("INCLUDE"),
            Self::Exclude => f.write_str("EXCLUDE"),
            Self::Comparison { op, left, right } => write!(f, "{left} {} {right}", op.symbol()),
            Self::Logic { op, operands } => write_logic(f, *op, operands),
            Self::In {
                expr,
                candidates,
                negated,
            } => {
                write!(f, "{expr} {}IN (", not_prefix(*negated))?;
                write_list(f, candidates)?;
                f.write_char(')')
            }
            Self::Like {
                expr,
                pattern,
                negated,
            } => {
                write!(f, "{expr} {}LIKE ", not_prefix(*negated))?;
                write_text(f, pattern.source())
            }
            Self::IsNull { attribute, negated } => {
                write_attribute(f, attribute)?;
                write!(f, " IS {}NULL", not_prefix(*negated))
            }
            Self::Spatial { op, left, right } => write_spatial(f, *op, left, right),
            Self::Id { ids } => {
                f.write_str("IN (")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_literal(f, id)?;
                }
                f.write_char(')')
            }
        }
    }
}

const fn not_prefix(negated: bool) -> &'static str {
    if negated { "NOT " } else { "" }
}

fn write_logic(f: &mut fmt::Formatter<'_>, op: LogicOp, operands: &[Filter]) -> fmt::Result {
    match (op, operands) {
        (LogicOp::And, []) => f.write_str("INCLUDE"),
        (LogicOp::Or, []) => f.write_str("EXCLUDE"),
        (LogicOp::Not, [operand]) => write!(f, "NOT ({operand})"),
        (LogicOp::Not, _) => {
            f.write_str("NOT ")?;
            write_logic(f, LogicOp::And, operands)
        }
        _ => {
            f.write_char('(')?;
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op.keyword())?;
                }
                write!(f, "{operand}")?;
            }
            f.write_char(')')
        }
    }
}

fn write_spatial(
    f: &mut fmt::Formatter<'_>,
    op: SpatialOp,
    left: &Expression,
    right: &Expression,
) -> fmt::Result {
    if op == SpatialOp::BBox
        && let Expression::Literal(Value::Geometry(Geometry::Rect(rect))) = right
    {
        let (min, max) = (rect.min(), rect.max());
        return write!(
            f,
            "BBOX({left}, {}, {}, {}, {})",
            format_number(min.x),
            format_number(min.y),
            format_number(max.x),
            format_number(max.y)
        );
    }

    write!(f, "{}({left}, {right})", op.name())
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }

    Ok(())
}

// NOTE: Absent has no literal syntax; it prints as NULL, which compares the
// same way (never equal, never ordered).
fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Absent | Value::Null => f.write_str("NULL"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::Text(text) => write_text(f, text),
        Value::Bool(true) => f.write_str("TRUE"),
        Value::Bool(false) => f.write_str("FALSE"),
        Value::Geometry(geometry) => f.write_str(&to_wkt(geometry)),
    }
}

fn write_text(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    write!(f, "'{}'", text.replace('\'', "''"))
}

fn write_attribute(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_identifier(name) {
        f.write_str(name)
    } else {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    }
}

// Names that lex back as a single identifier token.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':'))
        && !TokenKind::is_reserved(name)
}
