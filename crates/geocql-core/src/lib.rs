//! Core runtime for geocql: values, expressions, filters, the CQL parser,
//! and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cql;
pub mod cursor;
pub mod error;
pub mod expr;
pub mod filter;
pub mod obs;
pub mod record;
pub mod value;

pub use cql::{ParseOptions, parse, parse_with};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or parser options are re-exported here.
///

pub mod prelude {
    pub use crate::{
        expr::{ArithmeticOp, Expression},
        filter::{CompareOp, Filter, LogicOp, SpatialOp},
        record::{BasicRecord, Record},
        value::Value,
    };
}
