use crate::{expr::Expression, record::Record, value::Value};
use geo_types::Geometry;
use std::borrow::Cow;

impl Expression {
    /// Evaluate against one record.
    #[must_use]
    pub fn evaluate<R: Record + ?Sized>(&self, record: &R) -> Value {
        self.eval(record).into_owned()
    }

    // Borrowing evaluator; literals and stored attributes are never cloned.
    pub(crate) fn eval<'a, R: Record + ?Sized>(&'a self, record: &'a R) -> Cow<'a, Value> {
        match self {
            Self::Literal(value) => Cow::Borrowed(value),
            Self::Attribute(name) => record.lookup(name),
            Self::DefaultGeometry => Cow::Owned(
                record
                    .geometry()
                    .map_or(Value::Absent, |geometry| Value::Geometry(geometry.clone())),
            ),
            Self::Arithmetic { op, left, right } => {
                let left = left.eval(record);
                let right = right.eval(record);

                Cow::Owned(op.apply(&left, &right))
            }
        }
    }

    // Geometry operand for spatial predicates. Avoids cloning the record's
    // default geometry.
    pub(crate) fn eval_geometry<'a, R: Record + ?Sized>(
        &'a self,
        record: &'a R,
    ) -> Option<Cow<'a, Geometry<f64>>> {
        if matches!(self, Self::DefaultGeometry) {
            return record.geometry().map(Cow::Borrowed);
        }

        match self.eval(record) {
            Cow::Borrowed(value) => value.as_geometry(),
            Cow::Owned(value) => value.into_geometry().map(Cow::Owned),
        }
    }
}
