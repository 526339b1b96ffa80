//! Errors produced while building or manipulating an expression tree.

use symdiff_attrs::ErrorKind;
use super::OpKind;

/// A node could not be allocated, either because the configured node limit was reached or
/// because the allocator refused to grow the arena.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("could not allocate another node (the tree holds {} nodes)", live),
    help = "increase `Limits::max_nodes`, or simplify the expression first",
    class = OutOfMemory,
)]
pub struct OutOfMemory {
    /// The number of live nodes in the arena when allocation failed.
    pub live: usize,
}

/// An operation node was built with the wrong children for its operator, or a handle to a freed
/// node was used. This always indicates a bug in the caller.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = match op {
        Some(op) => format!("invalid node shape for `{}`: {}", op.symbol(), reason),
        None => format!("invalid node shape: {}", reason),
    },
    help = "you should never see this error; please report this as a bug",
    class = InvalidNodeShape,
)]
pub struct InvalidNodeShape {
    /// The operator of the offending node, if it is an operation.
    pub op: Option<OpKind>,

    /// What is wrong with the node.
    pub reason: &'static str,
}

/// A tree is nested more deeply than the configured limit allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expression is nested more than {} levels deep", limit),
    labels = ["the limit was reached here"],
    help = "increase `Limits::max_depth`, or reduce the nesting of the expression",
    class = Overflow,
)]
pub struct DepthLimitExceeded {
    /// The depth limit that was exceeded.
    pub limit: usize,
}
