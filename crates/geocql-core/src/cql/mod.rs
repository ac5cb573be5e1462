//! CQL text compiled into filter trees.
//!
//! The grammar, loosest binding first:
//!
//! ```text
//! filter     := and ( OR and )*
//! and        := not ( AND not )*
//! not        := NOT not | predicate
//! predicate  := INCLUDE | EXCLUDE | IN list | spatial | '(' filter ')'
//!             | additive ( cmp additive | [NOT] IN list | [NOT] LIKE text
//!                        | [NOT] BETWEEN additive AND additive | IS [NOT] NULL )
//! additive   := multiplicative ( ('+' | '-') multiplicative )*
//! multiplicative := unary ( ('*' | '/') unary )*
//! unary      := '-' unary | primary
//! primary    := number | text | TRUE | FALSE | NULL | wkt | name
//!             | geometry '(' ')' | '(' additive ')'
//! ```

mod lexer;
mod parser;
mod print;
mod stream;
mod token;


use crate::{
    error::SyntaxError,
    filter::Filter,
    obs::sink::{self, MetricsEvent},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

///
/// ParseOptions
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest nesting of parentheses, NOT and unary minus accepted.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse CQL text with default options.
pub fn parse(source: &str) -> Result<Filter, SyntaxError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse CQL text.
///
/// Parsing is a single pass with no state kept between calls; the first
/// error aborts and no partial tree is returned.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Filter, SyntaxError> {
    let result = parser::parse_filter(source, options);
    sink::record(MetricsEvent::Parse { ok: result.is_ok() });

    result
}

impl FromStr for Filter {
    type Err = SyntaxError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse(source)
    }
}
