use derive_more::Display;
use geocql_core::error::{GeometryError, PatternError, SyntaxError, SyntaxErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable class + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Byte offset of a syntax error, if this is one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::Syntax { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        let origin = match err.kind {
            SyntaxErrorKind::InvalidCharacter(_)
            | SyntaxErrorKind::InvalidNumber(_)
            | SyntaxErrorKind::UnterminatedString => ErrorOrigin::Lexer,
            SyntaxErrorKind::InvalidGeometry(_) => ErrorOrigin::Geometry,
            SyntaxErrorKind::InvalidPattern(_) => ErrorOrigin::Pattern,
            _ => ErrorOrigin::Parser,
        };
        let class = SyntaxClass::from(&err.kind);

        Self::new(
            ErrorKind::Syntax {
                class,
                offset: err.offset,
            },
            origin,
            err.to_string(),
        )
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Self::new(ErrorKind::InvalidPattern, ErrorOrigin::Pattern, err.to_string())
    }
}

impl From<GeometryError> for Error {
    fn from(err: GeometryError) -> Self {
        Self::new(ErrorKind::InvalidGeometry, ErrorOrigin::Geometry, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// CQL text could not be compiled.
    Syntax { class: SyntaxClass, offset: usize },

    /// A LIKE pattern built outside the parser was rejected.
    InvalidPattern,

    /// WKT outside CQL text failed to parse.
    InvalidGeometry,
}

///
/// SyntaxClass
/// Coarse grouping of syntax failures.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum SyntaxClass {
    /// Malformed or unknown tokens.
    Token,

    /// Token sequence does not fit the grammar.
    Structure,

    /// Function name or argument count is wrong.
    Function,

    /// A literal could not be built (geometry, pattern, number).
    Literal,

    /// Nesting exceeded the configured limit.
    Limit,
}

impl From<&SyntaxErrorKind> for SyntaxClass {
    fn from(kind: &SyntaxErrorKind) -> Self {
        match kind {
            SyntaxErrorKind::InvalidCharacter(_) | SyntaxErrorKind::UnterminatedString => {
                Self::Token
            }
            SyntaxErrorKind::EmptyInput
            | SyntaxErrorKind::NullTestOnExpression
            | SyntaxErrorKind::UnbalancedParenthesis
            | SyntaxErrorKind::UnexpectedEnd { .. }
            | SyntaxErrorKind::UnexpectedToken { .. } => Self::Structure,
            SyntaxErrorKind::InvalidArity { .. } | SyntaxErrorKind::UnknownFunction(_) => {
                Self::Function
            }
            SyntaxErrorKind::InvalidGeometry(_)
            | SyntaxErrorKind::InvalidNumber(_)
            | SyntaxErrorKind::InvalidPattern(_) => Self::Literal,
            SyntaxErrorKind::DepthExceeded { .. } => Self::Limit,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Geometry,
    Lexer,
    Parser,
    Pattern,
}
