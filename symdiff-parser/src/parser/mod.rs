pub mod error;

use error::{kind, Error};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use crate::tree::{error::DepthLimitExceeded, Arena, Limits, NodeId, OpKind, Tree};
use std::ops::Range;
use tracing::{debug, warn};

/// The tokens that can start a quantity.
const QUANT_START: &[TokenKind] = &[
    TokenKind::Name,
    TokenKind::Number,
    TokenKind::Sub,
    TokenKind::Add,
    TokenKind::OpenParen,
];

/// A recursive-descent parser that reads an expression into a [`Tree`].
///
/// The grammar, from lowest to highest precedence:
///
/// ```text
/// Expression     := AddOperand (('+' | '-') AddOperand)*
/// AddOperand     := MulOperand (('*' | '/') MulOperand)*
/// MulOperand     := FuncOperand ('^' FuncOperand)*
/// FuncOperand    := Function | GeneralOperand
/// Function       := ('sin' | 'cos' | 'exp' | 'log') <whitespace> GeneralOperand
/// GeneralOperand := '(' Expression ')' | Quant
/// Quant          := <letter> | ['+' | '-'] <number>
/// ```
///
/// Every binary operator, including `^`, associates to the left, so `2^3^2` is `(2^3)^2`. There is
/// no unary minus; a sign directly in front of a number is part of the number.
///
/// Nodes are allocated in an arena owned by the parser. If parsing fails, the arena is dropped
/// with the parser, so nothing built so far outlives the error.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The arena that parsed nodes are allocated in.
    arena: Arena,

    /// The number of parentheses the cursor is currently inside of.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self::with_limits(source, Limits::default())
    }

    /// Create a new parser for the given source, building a tree with the given limits.
    pub fn with_limits(source: &'source str, limits: Limits) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            arena: Arena::with_limits(limits),
            depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl symdiff_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token, including whitespace. The cursor is not moved. Returns [`None`]
    /// if the cursor is at the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Advances the cursor past any whitespace.
    fn skip_whitespace(&mut self) {
        while self.current_token().is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the kind of the next non-whitespace token, moving the cursor onto it.
    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.skip_whitespace();
        self.current_token().map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Parses the whole source as a single expression. All the tokens must be consumed by the
    /// parser; if not, an error is returned.
    pub fn try_parse_full(mut self) -> Result<Tree, Error> {
        let root = self.expression()?;
        if self.peek_kind().is_some() {
            return Err(self.error(kind::ExpectedEof));
        }

        let tree = self.arena.into_tree(root);
        debug!(nodes = tree.len(), "parsed `{}`", tree);
        Ok(tree)
    }

    /// Parses a sequence of terms separated by `+` and `-`.
    fn expression(&mut self) -> Result<NodeId, Error> {
        let mut lhs = self.add_operand()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Add) => OpKind::Add,
                Some(TokenKind::Sub) => OpKind::Sub,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.add_operand()?;
            lhs = self.arena.binary(op, lhs, rhs)?;
        }
    }

    /// Parses a sequence of factors separated by `*` and `/`.
    fn add_operand(&mut self) -> Result<NodeId, Error> {
        let mut lhs = self.mul_operand()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Mul) => OpKind::Mul,
                Some(TokenKind::Div) => OpKind::Div,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.mul_operand()?;
            lhs = self.arena.binary(op, lhs, rhs)?;
        }
    }

    /// Parses a sequence of operands separated by `^`.
    fn mul_operand(&mut self) -> Result<NodeId, Error> {
        let mut lhs = self.func_operand()?;
        while self.peek_kind() == Some(TokenKind::Exp) {
            self.cursor += 1;
            let rhs = self.func_operand()?;
            lhs = self.arena.pow(lhs, rhs)?;
        }
        Ok(lhs)
    }

    /// Parses a function application, or a general operand.
    fn func_operand(&mut self) -> Result<NodeId, Error> {
        let op = match self.peek_kind() {
            Some(TokenKind::Sin) => OpKind::Sin,
            Some(TokenKind::Cos) => OpKind::Cos,
            Some(TokenKind::ExpFn) => OpKind::Exp,
            Some(TokenKind::Log) => OpKind::Log,
            _ => return self.general_operand(),
        };
        let name = self.next_token()?;

        // the function name must be followed by whitespace before its argument
        if !self.current_token().is_some_and(Token::is_whitespace) {
            return Err(Error::new(
                vec![name.span],
                kind::MissingFunctionSeparator { name: op.symbol() },
            ));
        }

        let arg = self.general_operand()?;
        self.arena.unary(op, arg)
    }

    /// Parses a parenthesized expression, or a quantity.
    fn general_operand(&mut self) -> Result<NodeId, Error> {
        if self.peek_kind() != Some(TokenKind::OpenParen) {
            return self.quant();
        }
        let open = self.next_token()?;

        let limit = self.arena.limits().max_depth;
        if self.depth >= limit {
            warn!(limit, "parenthesis nesting limit reached");
            return Err(Error::new(vec![open.span], DepthLimitExceeded { limit }));
        }

        self.depth += 1;
        let inner = self.expression()?;
        self.depth -= 1;

        match self.next_token() {
            Ok(token) if token.kind == TokenKind::CloseParen => Ok(inner),
            _ => Err(Error::new(vec![open.span], kind::UnclosedParenthesis)),
        }
    }

    /// Parses a variable or a number. A `+` or `-` directly followed by a number is the sign of
    /// that number.
    fn quant(&mut self) -> Result<NodeId, Error> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Name => match token.lexeme.chars().next() {
                Some(name) => self.arena.new_variable(name),
                None => Err(Error::new(vec![token.span], kind::InvalidNumber)),
            },
            TokenKind::Number => {
                let value = parse_number(&token)?;
                self.arena.new_literal(value)
            },
            TokenKind::Add | TokenKind::Sub => {
                let number = match self.current_token() {
                    Some(number) if number.kind == TokenKind::Number => number.clone(),
                    _ => return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                        expected: &[TokenKind::Number],
                        found: token.kind,
                    })),
                };
                self.cursor += 1;

                let value = parse_number(&number)?;
                let value = if token.kind == TokenKind::Sub { -value } else { value };
                self.arena.new_literal(value)
            },
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: QUANT_START,
                found,
            })),
        }
    }
}

/// Converts a number token into its value.
fn parse_number(token: &Token) -> Result<f64, Error> {
    token.lexeme
        .parse::<f64>()
        .map_err(|_| Error::new(vec![token.span.clone()], kind::InvalidNumber))
}
