///
/// Token
///
/// Lexical unit with its byte span in the source text.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Token {
    pub(crate) const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub(crate) const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

///
/// TokenKind
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    // literals and names
    Ident(String),
    QuotedIdent(String),
    Number(f64),
    Text(String),
    /// Complete WKT geometry literal, as written.
    Wkt(String),

    // keywords
    And,
    Between,
    Exclude,
    False,
    In,
    Include,
    Is,
    Like,
    Not,
    Null,
    Or,
    True,

    // punctuation
    LParen,
    RParen,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,

    // comparison operators
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    Eof,
}

impl TokenKind {
    /// Resolve a bare word to its keyword, ignoring ASCII case.
    pub(crate) fn keyword(word: &str) -> Option<Self> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "AND" => Self::And,
            "BETWEEN" => Self::Between,
            "EXCLUDE" => Self::Exclude,
            "FALSE" => Self::False,
            "IN" => Self::In,
            "INCLUDE" => Self::Include,
            "IS" => Self::Is,
            "LIKE" => Self::Like,
            "NOT" => Self::Not,
            "NULL" => Self::Null,
            "OR" => Self::Or,
            "TRUE" => Self::True,
            _ => return None,
        };

        Some(kind)
    }

    /// True when `word` would lex as a keyword and so needs quoting as an
    /// attribute name.
    pub(crate) fn is_reserved(word: &str) -> bool {
        Self::keyword(word).is_some() || is_geometry_type(word)
    }
}

/// WKT geometry type names that introduce a geometry literal.
pub(crate) const GEOMETRY_TYPES: [&str; 7] = [
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

pub(crate) fn is_geometry_type(word: &str) -> bool {
    GEOMETRY_TYPES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(word))
}
