use crate::{
    cql::token::{Token, TokenKind, is_geometry_type},
    error::{SyntaxError, SyntaxErrorKind},
};
use winnow::{
    LocatingSlice, ModalResult, Parser,
    ascii::{Caseless, digit0, digit1, multispace0},
    combinator::{alt, opt},
    error::{ContextError, ErrMode},
    stream::Location,
    token::{any, literal, one_of, take_while},
};

/// Input type for the lexer; tracks byte offsets for spans.
pub(crate) type Input<'a> = LocatingSlice<&'a str>;

/// Split CQL text into tokens, ending with `Eof`.
///
/// Fails on the first lexical error.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut input = LocatingSlice::new(source);

    loop {
        let _: ModalResult<&str> = multispace0.parse_next(&mut input);

        let start = input.current_token_start();
        if input.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, start, start));
            return Ok(tokens);
        }

        match next_token(&mut input) {
            Ok(kind) => {
                let end = input.current_token_start();
                tokens.push(Token::new(kind, start, end));
            }
            Err(_) => return Err(lex_error(source, start)),
        }
    }
}

// Classify a failure by the character that started the bad token.
fn lex_error(source: &str, offset: usize) -> SyntaxError {
    let rest = source.get(offset..).unwrap_or_default();
    let Some(first) = rest.chars().next() else {
        return SyntaxError::at(
            SyntaxErrorKind::UnexpectedEnd { expected: "token" },
            offset,
        );
    };

    let word: String = rest
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    let kind = match first {
        '\'' | '"' => SyntaxErrorKind::UnterminatedString,
        c if c.is_ascii_digit() => SyntaxErrorKind::InvalidNumber(word.clone()),
        c if c.is_alphabetic() => SyntaxErrorKind::UnbalancedParenthesis,
        c => SyntaxErrorKind::InvalidCharacter(c),
    };

    SyntaxError::new(kind, offset, Some(word))
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        lex_text,
        lex_quoted_ident,
        lex_number,
        lex_word,
        lex_operator,
        lex_punctuation,
    ))
    .parse_next(input)
}

// Quoted content with the quote doubled as its own escape.
fn lex_quoted(input: &mut Input<'_>, mut quote: char) -> ModalResult<String> {
    quote.parse_next(input)?;

    let mut text = String::new();
    loop {
        let chunk: &str = take_while(0.., |c: char| c != quote).parse_next(input)?;
        text.push_str(chunk);

        if input.is_empty() {
            return Err(ErrMode::Cut(ContextError::new()));
        }
        quote.parse_next(input)?;

        if input.starts_with(quote) {
            quote.parse_next(input)?;
            text.push(quote);
        } else {
            return Ok(text);
        }
    }
}

/// `'text'` with `''` escaping a quote.
fn lex_text(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    lex_quoted(input, '\'').map(TokenKind::Text)
}

/// `"name"` with `""` escaping a quote.
fn lex_quoted_ident(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    lex_quoted(input, '"').map(TokenKind::QuotedIdent)
}

fn lex_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;

    // overflow to infinity is rejected like any other malformed number
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(TokenKind::Number)
        .ok_or_else(|| ErrMode::Cut(ContextError::new()))
}

fn lex_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let word: &str = (
        one_of(|c: char| c.is_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_alphanumeric() || matches!(c, '_' | '.' | ':')
        }),
    )
        .take()
        .parse_next(input)?;

    if is_geometry_type(word) {
        let tail: Option<&str> = opt(wkt_tail).parse_next(input)?;
        if let Some(tail) = tail {
            return Ok(TokenKind::Wkt(format!("{word}{tail}")));
        }
    }

    Ok(TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Ident(word.to_string())))
}

// Everything after a geometry type name: optional dimension marker, then a
// balanced coordinate body or `EMPTY`.
fn wkt_tail<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (
        multispace0,
        opt((
            alt((
                literal(Caseless("ZM")),
                literal(Caseless("Z")),
                literal(Caseless("M")),
            )),
            multispace0,
        )),
        alt((balanced_parens, literal(Caseless("EMPTY")).void())),
    )
        .take()
        .parse_next(input)
}

// Once the opening parenthesis is seen the literal is committed; running out
// of input before it closes is a hard error.
fn balanced_parens(input: &mut Input<'_>) -> ModalResult<()> {
    '('.parse_next(input)?;

    let mut depth = 1usize;
    while depth > 0 {
        let _: &str = take_while(0.., |c: char| c != '(' && c != ')').parse_next(input)?;

        let next: ModalResult<char> = any.parse_next(input);
        match next {
            Ok('(') => depth += 1,
            Ok(_) => depth -= 1,
            Err(_) => return Err(ErrMode::Cut(ContextError::new())),
        }
    }

    Ok(())
}

fn lex_operator(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        "<=".value(TokenKind::Le),
        ">=".value(TokenKind::Ge),
        "<>".value(TokenKind::Ne),
        "!=".value(TokenKind::Ne),
        "=".value(TokenKind::Eq),
        "<".value(TokenKind::Lt),
        ">".value(TokenKind::Gt),
    ))
    .parse_next(input)
}

fn lex_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c: char| match c {
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        ',' => Some(TokenKind::Comma),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        _ => None,
    })
    .parse_next(input)
}
