use std::fmt;
use thiserror::Error as ThisError;

///
/// SyntaxError
///
/// Structural failure raised while compiling CQL text.
/// Parsing aborts on the first error; no partial tree is ever returned.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("syntax error at offset {offset}{}: {kind}", TokenSuffix(.token.as_deref()))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,

    /// Byte offset into the source text.
    pub offset: usize,

    /// Source text of the offending token, when there is one.
    pub token: Option<String>,
}

impl SyntaxError {
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, offset: usize, token: Option<String>) -> Self {
        Self {
            kind,
            offset,
            token,
        }
    }

    /// Construct an error that points at a position rather than a token.
    #[must_use]
    pub fn at(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self::new(kind, offset, None)
    }
}

// Renders ` near 'tok'` when a token is known.
struct TokenSuffix<'a>(Option<&'a str>);

impl fmt::Display for TokenSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(token) => write!(f, " near '{token}'"),
            None => Ok(()),
        }
    }
}

///
/// SyntaxErrorKind
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SyntaxErrorKind {
    #[error("expression nests deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("empty filter expression")]
    EmptyInput,

    #[error("{function} takes {expected} argument(s), found {found}")]
    InvalidArity {
        function: String,
        expected: &'static str,
        found: usize,
    },

    #[error("unexpected character '{0}'")]
    InvalidCharacter(char),

    #[error("invalid geometry literal: {0}")]
    InvalidGeometry(String),

    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("invalid LIKE pattern: {0}")]
    InvalidPattern(String),

    #[error("IS NULL requires an attribute name on its left")]
    NullTestOnExpression,

    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("unterminated quoted text")]
    UnterminatedString,
}

///
/// PatternError
///
/// A LIKE pattern the matching engine refused to compile.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("LIKE pattern '{pattern}' cannot be compiled: {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }
}

///
/// GeometryError
///
/// WKT text that could not be turned into a geometry.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum GeometryError {
    #[error("malformed WKT: {0}")]
    Parse(String),

    #[error("unsupported WKT geometry: {0}")]
    Convert(String),

    #[error("WKT nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("WKT coordinate is not a finite number")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_message_includes_offset_and_token() {
        let err = SyntaxError::new(
            SyntaxErrorKind::UnknownFunction("frobnicate".to_string()),
            4,
            Some("frobnicate".to_string()),
        );

        assert_eq!(
            err.to_string(),
            "syntax error at offset 4 near 'frobnicate': unknown function 'frobnicate'"
        );
    }

    #[test]
    fn syntax_error_without_token_omits_suffix() {
        let err = SyntaxError::at(
            SyntaxErrorKind::UnexpectedEnd {
                expected: "expression",
            },
            7,
        );

        assert_eq!(
            err.to_string(),
            "syntax error at offset 7: unexpected end of input, expected expression"
        );
    }
}
