//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Every error produced by the workspace is an [`Error`]: a boxed [`ErrorKind`] plus the regions
//! of source code it points at. Errors produced while manipulating a tree (rather than while
//! reading source text) simply carry no spans.

use ariadne::{Color, Report};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad category an [`ErrorKind`] belongs to.
///
/// Callers usually only care about the class of an error: whether the input was bad, whether the
/// engine ran out of room, or whether an internal invariant was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A node could not be allocated.
    OutOfMemory,

    /// The source text or persisted dump does not follow the grammar.
    MalformedInput,

    /// A tree is too deep to be processed within the configured depth limit.
    Overflow,

    /// An internal invariant of the expression tree was violated. This always indicates a bug.
    InvalidNodeShape,
}

impl Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::MalformedInput => write!(f, "malformed input"),
            Self::Overflow => write!(f, "overflow"),
            Self::InvalidNodeShape => write!(f, "invalid node shape"),
        }
    }
}

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns `self` as [`Any`], so that the concrete error type can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// The class of this error.
    fn class(&self) -> ErrorClass;

    /// A short, single-line description of the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the class of the error.
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Returns true if the error is of the concrete kind `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the concrete error kind, if it is of type `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class(), self.kind.message())
    }
}

impl std::error::Error for Error {}
