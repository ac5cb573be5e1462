//! ## Crate layout
//! - `core`: value model, expressions, filters, the CQL parser, cursors,
//!   and observability.
//! - `error`: the public error type that folds every core failure into one
//!   `kind` + `origin` taxonomy.
//!
//! Most callers only need [`parse`] and the `prelude`.

pub use geocql_core as core;

pub mod error;


//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{ParseOptions, cursor::FilterCursor, obs};
pub use error::{Error, ErrorKind, ErrorOrigin};

/// Parse CQL text with default options.
pub fn parse(source: &str) -> Result<core::filter::Filter, Error> {
    core::parse(source).map_err(Error::from)
}

/// Parse CQL text with explicit options.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<core::filter::Filter, Error> {
    core::parse_with(source, options).map_err(Error::from)
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        expr::{ArithmeticOp, Expression},
        filter::{AttributeSet, CompareOp, Filter, LikePattern, LogicOp, SpatialOp},
        record::{BasicRecord, Record},
        value::{Value, ValueTag},
    };
    pub use serde::{Deserialize, Serialize};
}
