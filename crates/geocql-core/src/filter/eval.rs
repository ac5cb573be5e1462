use crate::{
    filter::{Filter, LogicOp},
    record::Record,
    value::{Value, compare_eq},
};

impl Filter {
    /// Decide whether `record` passes this filter.
    #[must_use]
    pub fn apply<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Include => true,
            Self::Exclude => false,

            Self::Comparison { op, left, right } => {
                let left = left.eval(record);
                let right = right.eval(record);

                op.holds(&left, &right)
            }

            Self::Logic { op, operands } => match op {
                LogicOp::And => operands.iter().all(|operand| operand.apply(record)),
                LogicOp::Or => operands.iter().any(|operand| operand.apply(record)),
                LogicOp::Not => !operands.iter().all(|operand| operand.apply(record)),
            },

            Self::In {
                expr,
                candidates,
                negated,
            } => {
                let value = expr.eval(record);
                if value.is_absent() {
                    return false;
                }

                let found = candidates
                    .iter()
                    .any(|candidate| compare_eq(&value, &candidate.eval(record)) == Some(true));

                found != *negated
            }

            Self::Like {
                expr,
                pattern,
                negated,
            } => {
                let value = expr.eval(record);

                value
                    .as_text()
                    .is_some_and(|text| pattern.is_match(&text) != *negated)
            }

            Self::IsNull { attribute, negated } => match record.lookup(attribute).as_ref() {
                Value::Absent => false,
                Value::Null => !negated,
                _ => *negated,
            },

            Self::Spatial { op, left, right } => {
                let (Some(left), Some(right)) =
                    (left.eval_geometry(record), right.eval_geometry(record))
                else {
                    return false;
                };

                op.holds(&left, &right)
            }

            Self::Id { ids } => record.id().is_some_and(|id| {
                ids.iter()
                    .any(|candidate| candidate.as_text().is_some_and(|text| text == id))
            }),
        }
    }
}
