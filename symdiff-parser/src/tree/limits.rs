#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resource limits attached to an [`Arena`](super::Arena).
///
/// Every tree carries the limits it was built with, and trees derived from it (derivatives, Taylor
/// series, copies) inherit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Limits {
    /// The maximum nesting depth accepted by recursive algorithms: parenthesis nesting while
    /// parsing, bracket nesting while loading a dump, and tree depth while differentiating.
    ///
    /// Each level of nesting costs a few stack frames, so the default is kept low enough for a
    /// thread with a 2 MiB stack. The default value is `128`.
    pub max_depth: usize,

    /// The maximum number of live nodes a single arena may hold. Allocating past this limit
    /// returns an [`OutOfMemory`](super::error::OutOfMemory) error.
    ///
    /// The default value is `16_777_216`.
    pub max_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_nodes: 1 << 24,
        }
    }
}

impl Limits {
    /// Create a builder that starts from these limits.
    pub fn into_builder(self) -> LimitsBuilder {
        LimitsBuilder(self)
    }
}

/// A builder for [`Limits`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LimitsBuilder(Limits);

impl LimitsBuilder {
    /// Creates a new builder with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth. See [`Limits::max_depth`] for more information.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Sets the maximum number of live nodes. See [`Limits::max_nodes`] for more information.
    pub fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.0.max_nodes = max_nodes;
        self
    }

    /// Builds the limits.
    pub fn build(self) -> Limits {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let limits = LimitsBuilder::new()
            .max_depth(8)
            .build();
        assert_eq!(limits.max_depth, 8);
        assert_eq!(limits.max_nodes, Limits::default().max_nodes);

        let limits = limits.into_builder().max_nodes(3).build();
        assert_eq!(limits, Limits { max_depth: 8, max_nodes: 3 });
    }
}
