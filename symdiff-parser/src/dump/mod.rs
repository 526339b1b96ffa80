//! The bracketed prefix format used to persist expression trees.
//!
//! Every node is written as an opening bracket, its token in single quotes, its children, and a
//! closing bracket:
//!
//! ```text
//! { '+'
//! { 'x' }
//! { '1.000000' }
//! }
//! ```
//!
//! Operators are written as `+`, `-`, `*`, `/`, `pow`, or the function name, and functions have a
//! single child bracket. Literals are written with six decimals, and variables as their letter.

pub mod error;

use error::{MissingChild, TrailingInput, UnclosedBracket, UnexpectedCharacter, UnexpectedEnd, UnknownNode};
use logos::Logos;
use crate::tree::{error::DepthLimitExceeded, Arena, Limits, Node, NodeId, OpKind, Tree, Visitor};
use std::{fmt::Write, ops::{ControlFlow, Range}};
use symdiff_error::Error;
use tracing::{debug, warn};

/// The tokens of the dump format.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum DumpToken {
    #[token("{")]
    Open,

    #[token("}")]
    Close,

    #[regex(r"'[^']*'")]
    Quoted,
}

/// Writes each node as it is entered and closes its bracket as it is left.
struct Store {
    out: String,
}

impl Visitor for Store {
    fn pre(&mut self, arena: &Arena, id: NodeId) -> ControlFlow<()> {
        // writing to a `String` cannot fail
        let _ = match *arena.node(id) {
            Node::Literal(value) => write!(self.out, "{{ '{:.6}' ", value),
            Node::Variable(name) => write!(self.out, "{{ '{}' ", name),
            Node::Operation { op, .. } => writeln!(self.out, "{{ '{}'", op.dump_token()),
        };
        ControlFlow::Continue(())
    }

    fn post(&mut self, _: &Arena, _: NodeId) -> ControlFlow<()> {
        self.out.push_str("}\n");
        ControlFlow::Continue(())
    }
}

/// Writes the tree in the dump format.
pub fn store(tree: &Tree) -> String {
    let mut store = Store { out: String::new() };
    let _ = tree.walk(&mut store);
    store.out
}

/// Reads a tree in the dump format, using the default [`Limits`].
pub fn load(source: &str) -> Result<Tree, Error> {
    load_with(source, Limits::default())
}

/// Reads a tree in the dump format. The tree is built with the given limits, and brackets may not
/// be nested more deeply than [`Limits::max_depth`].
pub fn load_with(source: &str, limits: Limits) -> Result<Tree, Error> {
    let mut loader = Loader::new(source, limits)?;
    let root = loader.node()?;
    if let Some((_, span)) = loader.tokens.get(loader.cursor) {
        return Err(Error::new(vec![span.clone()], TrailingInput));
    }

    let tree = loader.arena.into_tree(root);
    debug!(nodes = tree.len(), "loaded dump");
    Ok(tree)
}

/// A recursive-descent reader for the dump format.
struct Loader<'source> {
    source: &'source str,
    tokens: Vec<(DumpToken, Range<usize>)>,
    cursor: usize,
    arena: Arena,
    depth: usize,
}

impl<'source> Loader<'source> {
    fn new(source: &'source str, limits: Limits) -> Result<Self, Error> {
        let mut lexer = DumpToken::lexer(source);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            match result {
                Ok(token) => tokens.push((token, lexer.span())),
                Err(()) => return Err(Error::new(vec![lexer.span()], UnexpectedCharacter)),
            }
        }

        Ok(Self {
            source,
            tokens,
            cursor: 0,
            arena: Arena::with_limits(limits),
            depth: 0,
        })
    }

    /// Returns a span pointing at the end of the source.
    fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// Returns the next token and its span, then advances the cursor.
    fn next_token(&mut self) -> Result<(DumpToken, Range<usize>), Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                Ok(token.clone())
            },
            None => Err(Error::new(vec![self.eof_span()], UnexpectedEnd)),
        }
    }

    /// Reads a child bracket of the operator `op`.
    fn child(&mut self, op: OpKind) -> Result<NodeId, Error> {
        match self.tokens.get(self.cursor) {
            Some((DumpToken::Open, _)) => self.node(),
            Some((_, span)) => Err(Error::new(vec![span.clone()], MissingChild { op: op.dump_token() })),
            None => Err(Error::new(vec![self.eof_span()], MissingChild { op: op.dump_token() })),
        }
    }

    /// Reads a bracketed node and all of its children.
    fn node(&mut self) -> Result<NodeId, Error> {
        let open = match self.next_token()? {
            (DumpToken::Open, span) => span,
            (_, span) => return Err(Error::new(vec![span], UnexpectedCharacter)),
        };

        let limit = self.arena.limits().max_depth;
        if self.depth >= limit {
            warn!(limit, "dump nesting limit reached");
            return Err(Error::new(vec![open], DepthLimitExceeded { limit }));
        }
        self.depth += 1;

        let source = self.source;
        let (text, span) = match self.next_token()? {
            (DumpToken::Quoted, span) => (&source[span.start + 1..span.end - 1], span),
            (_, span) => return Err(Error::new(vec![span], UnexpectedCharacter)),
        };

        let id = match OpKind::from_dump_token(text) {
            Some(op) if op.is_unary() => {
                let arg = self.child(op)?;
                self.arena.unary(op, arg)?
            },
            Some(op) => {
                let left = self.child(op)?;
                let right = self.child(op)?;
                self.arena.binary(op, left, right)?
            },
            None => self.leaf(text, span)?,
        };

        match self.tokens.get(self.cursor) {
            Some((DumpToken::Close, _)) => self.cursor += 1,
            Some((_, span)) => return Err(Error::new(vec![open, span.clone()], UnclosedBracket)),
            None => return Err(Error::new(vec![open, self.eof_span()], UnclosedBracket)),
        }

        self.depth -= 1;
        Ok(id)
    }

    /// Builds a variable or literal node from its token.
    fn leaf(&mut self, text: &str, span: Range<usize>) -> Result<NodeId, Error> {
        let mut chars = text.chars();
        if let (Some(name), None) = (chars.next(), chars.next()) {
            if name.is_ascii_alphabetic() {
                return self.arena.new_variable(name);
            }
        }

        match text.trim().parse::<f64>() {
            Ok(value) => self.arena.new_literal(value),
            Err(_) => Err(Error::new(vec![span], UnknownNode { token: text.to_string() })),
        }
    }
}
