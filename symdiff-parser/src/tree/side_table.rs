use std::collections::HashMap;
use super::{Arena, NodeId};

/// Metadata attached to the nodes of a tree from the outside, keyed by [`NodeId`].
///
/// The tree itself never reads a side table, so metadata kept here (such as presentation hints)
/// cannot influence differentiation, simplification or evaluation. Since rewrites keep the handle
/// of the rewritten node, an entry follows its node through in-place simplification; entries of
/// nodes that were freed can be dropped with [`SideTable::retain_live`].
#[derive(Debug, Clone)]
pub struct SideTable<T> {
    entries: HashMap<NodeId, T>,
}

impl<T> Default for SideTable<T> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<T> SideTable<T> {
    /// Creates an empty side table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a value to a node, returning the value previously attached to it, if any.
    pub fn insert(&mut self, id: NodeId, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    /// Returns the value attached to a node.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.entries.get(&id)
    }

    /// Returns a mutable reference to the value attached to a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Detaches the value attached to a node.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.entries.remove(&id)
    }

    /// The number of nodes with an attached value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no node has an attached value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the entries of nodes that are no longer live in `arena`.
    ///
    /// A freed slot may be reused by a later allocation, so this should be called before new nodes
    /// are allocated if stale entries must not leak onto them.
    pub fn retain_live(&mut self, arena: &Arena) {
        self.entries.retain(|&id, _| arena.get(id).is_some());
    }
}
