use crate::{
    cql::{
        ParseOptions,
        lexer::tokenize,
        stream::TokenStream,
        token::{Token, TokenKind},
    },
    error::{SyntaxError, SyntaxErrorKind},
    expr::{ArithmeticOp, Expression},
    filter::{CompareOp, Filter, LikePattern, SpatialOp},
    value::{Value, parse_wkt},
};

type ParseResult<T> = Result<T, SyntaxError>;

///
/// Operand
///
/// What a predicate position produced. A parenthesis at predicate start may
/// open either a grouped filter or an arithmetic expression; the caller
/// decides once it sees what follows the closing parenthesis.
///

enum Operand {
    Filter(Filter),
    Expr(Expression),
}

/// Compile CQL text into a filter tree.
pub(crate) fn parse_filter(source: &str, options: &ParseOptions) -> ParseResult<Filter> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(source, tokens, options.max_depth);

    if parser.stream.is_eof() {
        return Err(SyntaxError::at(SyntaxErrorKind::EmptyInput, 0));
    }

    let operand = parser.parse_or()?;
    let filter = parser.require_filter(operand)?;
    parser.expect_end()?;

    Ok(filter)
}

///
/// Parser
///
/// Recursive descent over the token stream, one method per precedence
/// level. Nesting through parentheses, NOT and unary minus is bounded by
/// `max_depth`.
///

struct Parser<'s> {
    source: &'s str,
    stream: TokenStream,
    depth: usize,
    max_depth: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str, tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            source,
            stream: TokenStream::new(tokens),
            depth: 0,
            max_depth,
        }
    }

    // ------------------------------------------------------------------
    // Boolean levels
    // ------------------------------------------------------------------

    fn parse_or(&mut self) -> ParseResult<Operand> {
        let first = self.parse_and()?;
        if !self.stream.check(&TokenKind::Or) {
            return Ok(first);
        }

        let mut operands = vec![self.require_filter(first)?];
        while self.stream.eat(&TokenKind::Or) {
            let next = self.parse_and()?;
            operands.push(self.require_filter(next)?);
        }

        Ok(Operand::Filter(Filter::or(operands)))
    }

    fn parse_and(&mut self) -> ParseResult<Operand> {
        let first = self.parse_not()?;
        if !self.stream.check(&TokenKind::And) {
            return Ok(first);
        }

        let mut operands = vec![self.require_filter(first)?];
        while self.stream.eat(&TokenKind::And) {
            let next = self.parse_not()?;
            operands.push(self.require_filter(next)?);
        }

        Ok(Operand::Filter(Filter::and(operands)))
    }

    fn parse_not(&mut self) -> ParseResult<Operand> {
        if !self.stream.eat(&TokenKind::Not) {
            return self.parse_predicate();
        }

        let operand = self.nested(Self::parse_not)?;
        let filter = self.require_filter(operand)?;

        Ok(Operand::Filter(Filter::not(filter)))
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    fn parse_predicate(&mut self) -> ParseResult<Operand> {
        let head = self.stream.peek().clone();

        match &head.kind {
            TokenKind::Include => {
                self.stream.advance();
                Ok(Operand::Filter(Filter::Include))
            }
            TokenKind::Exclude => {
                self.stream.advance();
                Ok(Operand::Filter(Filter::Exclude))
            }
            TokenKind::In => self.parse_id_filter().map(Operand::Filter),
            TokenKind::LParen => self.parse_group(),
            TokenKind::Ident(name) if self.stream.peek_nth(1).kind == TokenKind::LParen => {
                match SpatialOp::from_name(name) {
                    Some(op) => self.parse_spatial(op, &head).map(Operand::Filter),
                    None => self.parse_expression_predicate(),
                }
            }
            _ => self.parse_expression_predicate(),
        }
    }

    // `(` at predicate start: grouped filter or parenthesized expression.
    fn parse_group(&mut self) -> ParseResult<Operand> {
        let open = self.stream.advance();
        let inner = self.nested(Self::parse_or)?;
        self.expect_close(&open)?;

        match inner {
            Operand::Filter(filter) => {
                if self.continues_expression() {
                    return Err(self.unexpected("AND, OR or ')'"));
                }
                Ok(Operand::Filter(filter))
            }
            Operand::Expr(expr) => {
                let expr = self.parse_additive_from(expr)?;
                self.parse_predicate_tail(expr, open.start)
            }
        }
    }

    fn parse_expression_predicate(&mut self) -> ParseResult<Operand> {
        let start = self.stream.peek().start;
        let left = self.parse_additive()?;

        self.parse_predicate_tail(left, start)
    }

    // Whatever follows a complete left-hand expression.
    fn parse_predicate_tail(&mut self, left: Expression, start: usize) -> ParseResult<Operand> {
        let compare = match self.stream.peek().kind {
            TokenKind::Eq => Some(CompareOp::Eq),
            TokenKind::Ne => Some(CompareOp::Ne),
            TokenKind::Lt => Some(CompareOp::Lt),
            TokenKind::Le => Some(CompareOp::Le),
            TokenKind::Gt => Some(CompareOp::Gt),
            TokenKind::Ge => Some(CompareOp::Ge),
            _ => None,
        };
        if let Some(op) = compare {
            self.stream.advance();
            let right = self.parse_additive()?;

            return Ok(Operand::Filter(Filter::compare(op, left, right)));
        }

        let filter = match self.stream.peek().kind {
            TokenKind::In => {
                self.stream.advance();
                self.parse_in(left, false)?
            }
            TokenKind::Like => {
                self.stream.advance();
                self.parse_like(left, false)?
            }
            TokenKind::Between => {
                self.stream.advance();
                self.parse_between(left, false)?
            }
            TokenKind::Is => {
                self.stream.advance();
                self.parse_null_test(left, start)?
            }
            TokenKind::Not => {
                self.stream.advance();
                match self.stream.peek().kind {
                    TokenKind::In => {
                        self.stream.advance();
                        self.parse_in(left, true)?
                    }
                    TokenKind::Like => {
                        self.stream.advance();
                        self.parse_like(left, true)?
                    }
                    TokenKind::Between => {
                        self.stream.advance();
                        self.parse_between(left, true)?
                    }
                    _ => return Err(self.unexpected("IN, LIKE or BETWEEN")),
                }
            }
            _ => return Ok(Operand::Expr(left)),
        };

        Ok(Operand::Filter(filter))
    }

    fn parse_in(&mut self, expr: Expression, negated: bool) -> ParseResult<Filter> {
        let open = self.expect(&TokenKind::LParen, "'('")?;
        let mut candidates = vec![self.parse_additive()?];
        while self.stream.eat(&TokenKind::Comma) {
            candidates.push(self.parse_additive()?);
        }
        self.expect_close(&open)?;

        Ok(Filter::In {
            expr,
            candidates,
            negated,
        })
    }

    fn parse_like(&mut self, expr: Expression, negated: bool) -> ParseResult<Filter> {
        let token = self.stream.advance();
        let TokenKind::Text(source) = &token.kind else {
            return Err(self.expected_at(&token, "quoted LIKE pattern"));
        };

        let pattern = LikePattern::new(source, false).map_err(|err| {
            self.error_at(&token, SyntaxErrorKind::InvalidPattern(err.message))
        })?;

        Ok(Filter::Like {
            expr,
            pattern,
            negated,
        })
    }

    fn parse_between(&mut self, expr: Expression, negated: bool) -> ParseResult<Filter> {
        let low = self.parse_additive()?;
        self.expect(&TokenKind::And, "AND")?;
        let high = self.parse_additive()?;

        Ok(if negated {
            Filter::not_between(expr, low, high)
        } else {
            Filter::between(expr, low, high)
        })
    }

    fn parse_null_test(&mut self, expr: Expression, start: usize) -> ParseResult<Filter> {
        let negated = self.stream.eat(&TokenKind::Not);
        self.expect(&TokenKind::Null, "NULL")?;

        match expr {
            Expression::Attribute(attribute) => Ok(Filter::IsNull { attribute, negated }),
            _ => Err(SyntaxError::at(
                SyntaxErrorKind::NullTestOnExpression,
                start,
            )),
        }
    }

    // `IN (...)` with no left operand selects by feature id.
    fn parse_id_filter(&mut self) -> ParseResult<Filter> {
        self.stream.advance();
        let open = self.expect(&TokenKind::LParen, "'('")?;

        let mut ids = Vec::new();
        loop {
            let token = self.stream.peek().clone();
            match self.parse_unary()? {
                Expression::Literal(value) => ids.push(value),
                _ => return Err(self.expected_at(&token, "literal feature id")),
            }

            if !self.stream.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_close(&open)?;

        Ok(Filter::id(ids))
    }

    fn parse_spatial(&mut self, op: SpatialOp, name: &Token) -> ParseResult<Filter> {
        self.stream.advance();
        let open = self.stream.advance();
        let args = self.parse_arguments(&open)?;
        let found = args.len();

        let arity = |expected| {
            self.error_at(
                name,
                SyntaxErrorKind::InvalidArity {
                    function: op.name().to_string(),
                    expected,
                    found,
                },
            )
        };
        let expected = if op == SpatialOp::BBox { "2 or 5" } else { "2" };

        match found {
            2 => {
                let [(_, left), (_, right)]: [(Token, Expression); 2] =
                    args.try_into().map_err(|_| arity(expected))?;

                Ok(Filter::spatial(op, left, right))
            }
            5 if op == SpatialOp::BBox => {
                let [(_, subject), min_x, min_y, max_x, max_y]: [(Token, Expression); 5] =
                    args.try_into().map_err(|_| arity(expected))?;

                Ok(Filter::bbox(
                    subject,
                    self.coordinate(min_x)?,
                    self.coordinate(min_y)?,
                    self.coordinate(max_x)?,
                    self.coordinate(max_y)?,
                ))
            }
            _ => Err(arity(expected)),
        }
    }

    fn coordinate(&self, (token, expr): (Token, Expression)) -> ParseResult<f64> {
        match expr {
            Expression::Literal(Value::Number(n)) => Ok(n),
            _ => Err(self.expected_at(&token, "numeric coordinate")),
        }
    }

    // Comma-separated arguments after an already consumed `(`, each paired
    // with its first token for error reporting.
    fn parse_arguments(&mut self, open: &Token) -> ParseResult<Vec<(Token, Expression)>> {
        let mut args = Vec::new();
        if self.stream.eat(&TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            let token = self.stream.peek().clone();
            args.push((token, self.parse_additive()?));

            if !self.stream.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_close(open)?;

        Ok(args)
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let first = self.parse_unary()?;

        self.parse_additive_from(first)
    }

    fn parse_additive_from(&mut self, first: Expression) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative_from(first)?;

        loop {
            let op = match self.stream.peek().kind {
                TokenKind::Plus => ArithmeticOp::Add,
                TokenKind::Minus => ArithmeticOp::Sub,
                _ => return Ok(left),
            };
            self.stream.advance();

            let first = self.parse_unary()?;
            let right = self.parse_multiplicative_from(first)?;
            left = Expression::arithmetic(op, left, right);
        }
    }

    fn parse_multiplicative_from(&mut self, first: Expression) -> ParseResult<Expression> {
        let mut left = first;

        loop {
            let op = match self.stream.peek().kind {
                TokenKind::Star => ArithmeticOp::Mul,
                TokenKind::Slash => ArithmeticOp::Div,
                _ => return Ok(left),
            };
            self.stream.advance();

            let right = self.parse_unary()?;
            left = Expression::arithmetic(op, left, right);
        }
    }

    // Negated number literals fold into the literal.
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if !self.stream.eat(&TokenKind::Minus) {
            return self.parse_primary();
        }

        let operand = self.nested(Self::parse_unary)?;

        Ok(match operand {
            Expression::Literal(Value::Number(n)) => Expression::Literal(Value::Number(-n)),
            other => Expression::mul(Expression::literal(-1), other),
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let token = self.stream.advance();

        match &token.kind {
            TokenKind::Number(n) => Ok(Expression::Literal(Value::Number(*n))),
            TokenKind::Text(text) => Ok(Expression::Literal(Value::Text(text.clone()))),
            TokenKind::True => Ok(Expression::Literal(Value::Bool(true))),
            TokenKind::False => Ok(Expression::Literal(Value::Bool(false))),
            TokenKind::Null => Ok(Expression::Literal(Value::Null)),
            TokenKind::Wkt(source) => self.geometry_literal(&token, source),
            TokenKind::QuotedIdent(name) => Ok(Expression::Attribute(name.clone())),
            TokenKind::Ident(name) => {
                if self.stream.check(&TokenKind::LParen) {
                    self.parse_function(&token, name)
                } else {
                    Ok(Expression::Attribute(name.clone()))
                }
            }
            TokenKind::LParen => {
                let inner = self.nested(Self::parse_additive)?;
                self.expect_close(&token)?;

                Ok(inner)
            }
            _ => Err(self.expected_at(&token, "expression")),
        }
    }

    // Function call in value position; only `geometry()` produces a value.
    fn parse_function(&mut self, token: &Token, name: &str) -> ParseResult<Expression> {
        if !name.eq_ignore_ascii_case("geometry") {
            let kind = if SpatialOp::from_name(name).is_some() {
                SyntaxErrorKind::UnexpectedToken {
                    expected: "expression",
                    found: name.to_string(),
                }
            } else {
                SyntaxErrorKind::UnknownFunction(name.to_string())
            };

            return Err(self.error_at(token, kind));
        }

        let open = self.stream.advance();
        let args = self.parse_arguments(&open)?;
        if !args.is_empty() {
            return Err(self.error_at(
                token,
                SyntaxErrorKind::InvalidArity {
                    function: name.to_string(),
                    expected: "0",
                    found: args.len(),
                },
            ));
        }

        Ok(Expression::DefaultGeometry)
    }

    fn geometry_literal(&self, token: &Token, source: &str) -> ParseResult<Expression> {
        parse_wkt(&source.to_ascii_uppercase())
            .map(|geometry| Expression::Literal(Value::Geometry(geometry)))
            .map_err(|err| self.error_at(token, SyntaxErrorKind::InvalidGeometry(err.to_string())))
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            let token = self.stream.peek().clone();
            return Err(self.error_at(
                &token,
                SyntaxErrorKind::DepthExceeded {
                    limit: self.max_depth,
                },
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;

        result
    }

    // A bare expression where a predicate is required.
    fn require_filter(&self, operand: Operand) -> ParseResult<Filter> {
        match operand {
            Operand::Filter(filter) => Ok(filter),
            Operand::Expr(_) => Err(self.unexpected("comparison operator")),
        }
    }

    // After a grouped filter, anything that would only make sense after an
    // expression.
    fn continues_expression(&self) -> bool {
        matches!(
            self.stream.peek().kind,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Eq
                | TokenKind::Ne
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::In
                | TokenKind::Like
                | TokenKind::Is
                | TokenKind::Between
        )
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> ParseResult<Token> {
        if self.stream.check(kind) {
            Ok(self.stream.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_close(&mut self, open: &Token) -> ParseResult<()> {
        if self.stream.eat(&TokenKind::RParen) {
            return Ok(());
        }

        if self.stream.is_eof() {
            Err(self.error_at(open, SyntaxErrorKind::UnbalancedParenthesis))
        } else {
            Err(self.unexpected("')'"))
        }
    }

    fn expect_end(&self) -> ParseResult<()> {
        let token = self.stream.peek();

        match token.kind {
            TokenKind::Eof => Ok(()),
            TokenKind::RParen => Err(self.error_at(token, SyntaxErrorKind::UnbalancedParenthesis)),
            _ => Err(self.unexpected("AND, OR or end of input")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> SyntaxError {
        self.expected_at(self.stream.peek(), expected)
    }

    fn expected_at(&self, token: &Token, expected: &'static str) -> SyntaxError {
        match self.token_text(token) {
            None => SyntaxError::at(SyntaxErrorKind::UnexpectedEnd { expected }, token.start),
            Some(found) => SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken {
                    expected,
                    found: found.clone(),
                },
                token.start,
                Some(found),
            ),
        }
    }

    fn error_at(&self, token: &Token, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, token.start, self.token_text(token))
    }

    fn token_text(&self, token: &Token) -> Option<String> {
        if token.is_eof() {
            return None;
        }

        self.source
            .get(token.start..token.end)
            .map(ToString::to_string)
    }
}
