use crate::cql::token::{Token, TokenKind};
use std::mem;

///
/// TokenStream
///
/// Cursor over lexed tokens. Reads past the end keep returning the
/// trailing `Eof`.
///

pub(crate) struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl TokenStream {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(0, |token| token.end);

        Self {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, end, end),
        }
    }

    pub(crate) fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Look `n` tokens ahead without consuming.
    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    /// True when the current token has the same variant as `kind`.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.peek().kind) == mem::discriminant(kind)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
        }

        token
    }

    /// Consume the current token if it matches `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.peek().is_eof()
    }
}
