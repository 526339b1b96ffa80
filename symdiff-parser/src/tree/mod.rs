//! The expression tree shared by every part of the engine.
//!
//! Nodes live in an [`Arena`] and refer to each other through [`NodeId`] handles. A handle stays
//! valid for as long as the node it names is owned by the tree; rewriting a node in place (for
//! example, replacing `x + 0` with `x`) keeps the handle of the rewritten node stable, so
//! consumers holding handles to it (such as a [`SideTable`]) see the new content.
//!
//! A [`Tree`] bundles an arena with the handle of its root node. Operations that only read a tree
//! (evaluation, formatting, storing) take `&Tree`; operations that build or rewrite one work on
//! the arena directly.

pub mod error;
mod fmt;
mod limits;
mod op;
mod side_table;
mod visit;

pub use limits::{Limits, LimitsBuilder};
pub use op::{OpKind, Precedence};
pub use side_table::SideTable;
pub use visit::{walk, Visitor};

use error::{InvalidNodeShape, OutOfMemory};
use std::{collections::HashMap, ops::ControlFlow};
use symdiff_error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A handle to a node in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// The index of the node's slot in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The three kinds of node a tree can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Literal,
    Variable,
    Operation,
}

/// The content of a single node.
///
/// A well-formed binary operation has both children, and a well-formed unary operation has only
/// a right child. The child links are optional so that a node can be taken apart and rebuilt in
/// place; every public operation of this crate leaves the tree well-formed again when it returns.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A numeric constant.
    Literal(f64),

    /// A single-letter variable.
    Variable(char),

    /// An operator applied to its children.
    Operation {
        op: OpKind,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

impl Node {
    /// Creates a binary operation node.
    pub fn binary(op: OpKind, left: NodeId, right: NodeId) -> Self {
        Self::Operation { op, left: Some(left), right: Some(right) }
    }

    /// Creates a unary operation node.
    pub fn unary(op: OpKind, arg: NodeId) -> Self {
        Self::Operation { op, left: None, right: Some(arg) }
    }

    /// Returns the shape of the node.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Literal(_) => Shape::Literal,
            Self::Variable(_) => Shape::Variable,
            Self::Operation { .. } => Shape::Operation,
        }
    }

    /// Returns the operator of the node, if it is an operation.
    pub fn op(&self) -> Option<OpKind> {
        match self {
            Self::Operation { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Returns the left child of the node, if any.
    pub fn left(&self) -> Option<NodeId> {
        match self {
            Self::Operation { left, .. } => *left,
            _ => None,
        }
    }

    /// Returns the right child of the node, if any. For unary operations, this is the argument.
    pub fn right(&self) -> Option<NodeId> {
        match self {
            Self::Operation { right, .. } => *right,
            _ => None,
        }
    }

    /// Returns an iterator over the children of the node, left child first.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left().into_iter().chain(self.right())
    }

    /// Checks that the node has exactly the children its operator requires.
    pub fn check_shape(&self) -> Result<(), InvalidNodeShape> {
        let Self::Operation { op, left, right } = *self else {
            return Ok(());
        };
        let reason = match (op.is_unary(), left, right) {
            (_, _, None) => "operation is missing its right operand",
            (true, Some(_), _) => "unary operation has a left operand",
            (false, None, _) => "binary operation is missing its left operand",
            _ => return Ok(()),
        };
        Err(InvalidNodeShape { op: Some(op), reason })
    }
}

/// Storage for the nodes of one or more expression trees.
///
/// Freed slots are recycled by later allocations. Allocation fails with an
/// [`OutOfMemory`](error::OutOfMemory) error once [`Limits::max_nodes`] live nodes exist.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
    live: usize,
    limits: Limits,
}

impl Arena {
    /// Creates an empty arena with the default [`Limits`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with the given [`Limits`].
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits, ..Self::default() }
    }

    /// The limits this arena enforces.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// The number of live nodes in the arena.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if the arena holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the node with the given handle, or [`None`] if the node was freed.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the node with the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the node was freed.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("use of freed node {:?}", id),
        }
    }

    /// Returns the shape of the node.
    pub fn shape(&self, id: NodeId) -> Shape {
        self.node(id).shape()
    }

    /// Returns the operator of the node, if it is an operation.
    pub fn op_kind(&self, id: NodeId) -> Option<OpKind> {
        self.node(id).op()
    }

    /// Returns the value of the node, if it is a literal.
    pub fn literal_value(&self, id: NodeId) -> Option<f64> {
        match self.node(id) {
            Node::Literal(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the name of the node, if it is a variable.
    pub fn variable_name(&self, id: NodeId) -> Option<char> {
        match self.node(id) {
            Node::Variable(name) => Some(*name),
            _ => None,
        }
    }

    /// Returns the left child of the node, if any.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left()
    }

    /// Returns the right child of the node, if any.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right()
    }

    /// Returns true if the node has a left child.
    pub fn has_left(&self, id: NodeId) -> bool {
        self.left(id).is_some()
    }

    /// Returns true if the node has a right child.
    pub fn has_right(&self, id: NodeId) -> bool {
        self.right(id).is_some()
    }

    /// Stores a node in a free slot.
    fn alloc(&mut self, node: Node) -> Result<NodeId, Error> {
        if self.live >= self.limits.max_nodes {
            return Err(Error::spanless(OutOfMemory { live: self.live }));
        }

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            },
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_| Error::spanless(OutOfMemory { live: self.live }))?;
                self.slots.try_reserve(1)
                    .map_err(|_| Error::spanless(OutOfMemory { live: self.live }))?;
                self.slots.push(Some(node));
                NodeId(index)
            },
        };

        self.live += 1;
        Ok(id)
    }

    /// Removes a single node from its slot without touching its children, and returns its
    /// content.
    fn release(&mut self, id: NodeId) -> Node {
        match self.slots.get_mut(id.index()).and_then(Option::take) {
            Some(node) => {
                self.free.push(id);
                self.live -= 1;
                node
            },
            None => panic!("double free of node {:?}", id),
        }
    }

    /// Frees the node and every node below it.
    pub fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = self.release(id);
            stack.extend(node.children());
        }
    }

    /// Allocates a literal node.
    pub fn new_literal(&mut self, value: f64) -> Result<NodeId, Error> {
        self.alloc(Node::Literal(value))
    }

    /// Allocates a variable node.
    pub fn new_variable(&mut self, name: char) -> Result<NodeId, Error> {
        self.alloc(Node::Variable(name))
    }

    /// Allocates an operation node that takes ownership of the given children.
    ///
    /// Binary operators require both children, and unary operators require only a `right` child
    /// (their argument). Any other combination, or a handle to a freed node, is rejected with an
    /// [`InvalidNodeShape`](error::InvalidNodeShape) error.
    pub fn new_operation(
        &mut self,
        op: OpKind,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> Result<NodeId, Error> {
        let node = Node::Operation { op, left, right };
        node.check_shape().map_err(Error::spanless)?;
        if node.children().any(|child| self.get(child).is_none()) {
            return Err(Error::spanless(InvalidNodeShape {
                op: Some(op),
                reason: "operand refers to a freed node",
            }));
        }
        self.alloc(node)
    }

    /// Allocates a binary operation node.
    pub fn binary(&mut self, op: OpKind, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.new_operation(op, Some(left), Some(right))
    }

    /// Allocates a unary operation node.
    pub fn unary(&mut self, op: OpKind, arg: NodeId) -> Result<NodeId, Error> {
        self.new_operation(op, None, Some(arg))
    }

    pub fn add(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.binary(OpKind::Add, left, right)
    }

    pub fn sub(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.binary(OpKind::Sub, left, right)
    }

    pub fn mul(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.binary(OpKind::Mul, left, right)
    }

    pub fn div(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.binary(OpKind::Div, left, right)
    }

    pub fn pow(&mut self, left: NodeId, right: NodeId) -> Result<NodeId, Error> {
        self.binary(OpKind::Pow, left, right)
    }

    pub fn sin(&mut self, arg: NodeId) -> Result<NodeId, Error> {
        self.unary(OpKind::Sin, arg)
    }

    pub fn cos(&mut self, arg: NodeId) -> Result<NodeId, Error> {
        self.unary(OpKind::Cos, arg)
    }

    pub fn exp(&mut self, arg: NodeId) -> Result<NodeId, Error> {
        self.unary(OpKind::Exp, arg)
    }

    pub fn log(&mut self, arg: NodeId) -> Result<NodeId, Error> {
        self.unary(OpKind::Log, arg)
    }

    /// Returns the handles of the subtree rooted at `root`, children before their parents.
    pub fn postorder(&self, root: NodeId) -> Vec<NodeId> {
        struct Collect(Vec<NodeId>);

        impl Visitor for Collect {
            fn post(&mut self, _: &Arena, id: NodeId) -> ControlFlow<()> {
                self.0.push(id);
                ControlFlow::Continue(())
            }
        }

        let mut collect = Collect(Vec::new());
        let _ = walk(self, root, &mut collect);
        collect.0
    }

    /// Copies the nodes of a subtree, listed in postorder, into this arena. On failure, every node
    /// allocated so far is freed again.
    fn graft(&mut self, nodes: Vec<(NodeId, Node)>) -> Result<NodeId, Error> {
        let mut mapped = HashMap::with_capacity(nodes.len());
        let mut last = None;

        for (old, node) in nodes {
            let node = match node {
                Node::Operation { op, left, right } => Node::Operation {
                    op,
                    left: left.map(|id| mapped[&id]),
                    right: right.map(|id| mapped[&id]),
                },
                leaf => leaf,
            };

            match self.alloc(node) {
                Ok(new) => {
                    mapped.insert(old, new);
                    last = Some(new);
                },
                Err(err) => {
                    for id in mapped.into_values() {
                        self.release(id);
                    }
                    return Err(err);
                },
            }
        }

        // postorder ends with the root
        last.ok_or_else(|| Error::spanless(InvalidNodeShape {
            op: None,
            reason: "cannot copy an empty subtree",
        }))
    }

    /// Deep-copies the subtree rooted at `id`, returning the handle of the copy. The copy owns
    /// fresh nodes and shares nothing with the original.
    pub fn copy_subtree(&mut self, id: NodeId) -> Result<NodeId, Error> {
        let nodes = self.postorder(id)
            .into_iter()
            .map(|id| (id, *self.node(id)))
            .collect();
        self.graft(nodes)
    }

    /// Deep-copies the subtree rooted at `id` in another arena into this arena.
    pub fn import(&mut self, src: &Arena, id: NodeId) -> Result<NodeId, Error> {
        let nodes = src.postorder(id)
            .into_iter()
            .map(|id| (id, *src.node(id)))
            .collect();
        self.graft(nodes)
    }

    /// Replaces the content of `dest` with the content of `donor`, so that `dest` takes over the
    /// donor's children. The donor node itself is freed, as is every former child of `dest`
    /// other than the donor.
    ///
    /// This is how a node is collapsed into one of its operands: replacing `x + 0` with its left
    /// child `x` keeps the handle of the sum, and frees the `0`.
    ///
    /// # Panics
    ///
    /// Panics if `dest` and `donor` are the same node, or if either was freed. The donor must be
    /// a direct child of `dest` or a node that no other node owns.
    pub fn replace_content(&mut self, dest: NodeId, donor: NodeId) {
        assert_ne!(dest, donor, "a node cannot replace itself");
        let old = *self.node(dest);
        let content = self.release(donor);

        for child in old.children().filter(|&child| child != donor) {
            self.free_subtree(child);
        }
        self.slots[dest.index()] = Some(content);
    }

    /// Overwrites `dest` with `node`. Former children of `dest` that `node` does not keep are
    /// freed.
    ///
    /// # Panics
    ///
    /// Panics if `dest` was freed. The children of `node` must be children of `dest` or nodes that
    /// no other node owns.
    pub fn rewrite(&mut self, dest: NodeId, node: Node) {
        let old = *self.node(dest);
        for child in old.children() {
            if !node.children().any(|kept| kept == child) {
                self.free_subtree(child);
            }
        }
        self.slots[dest.index()] = Some(node);
    }

    /// Overwrites `id` with a literal, freeing its children.
    pub fn set_literal(&mut self, id: NodeId, value: f64) {
        self.rewrite(id, Node::Literal(value));
    }

    /// Overwrites `id` with a variable, freeing its children.
    pub fn set_variable(&mut self, id: NodeId, name: char) {
        self.rewrite(id, Node::Variable(name));
    }

    /// Frees both children of an operation node and clears its child links. The node is left
    /// without operands, and must be rewritten before the tree is used again.
    pub fn drop_children(&mut self, id: NodeId) {
        self.drop_left(id);
        self.drop_right(id);
    }

    /// Frees the left child of an operation node, if any, and clears the link.
    pub fn drop_left(&mut self, id: NodeId) {
        if let Some(Node::Operation { left, .. }) = self.slots[id.index()].as_mut() {
            if let Some(child) = left.take() {
                self.free_subtree(child);
            }
        }
    }

    /// Frees the right child of an operation node, if any, and clears the link.
    pub fn drop_right(&mut self, id: NodeId) {
        if let Some(Node::Operation { right, .. }) = self.slots[id.index()].as_mut() {
            if let Some(child) = right.take() {
                self.free_subtree(child);
            }
        }
    }

    /// Returns true if no variable occurs anywhere in the subtree rooted at `id`.
    pub fn is_constant(&self, id: NodeId) -> bool {
        struct FindVariable;

        impl Visitor for FindVariable {
            fn pre(&mut self, arena: &Arena, id: NodeId) -> ControlFlow<()> {
                match arena.node(id) {
                    Node::Variable(_) => ControlFlow::Break(()),
                    _ => ControlFlow::Continue(()),
                }
            }
        }

        walk(self, id, &mut FindVariable).is_continue()
    }

    /// Replaces every occurrence of the variable `from` in the subtree rooted at `id` with the
    /// variable `to`.
    pub fn rename_variable(&mut self, id: NodeId, from: char, to: char) {
        struct Occurrences {
            name: char,
            found: Vec<NodeId>,
        }

        impl Visitor for Occurrences {
            fn inorder(&mut self, arena: &Arena, id: NodeId) -> ControlFlow<()> {
                if arena.variable_name(id) == Some(self.name) {
                    self.found.push(id);
                }
                ControlFlow::Continue(())
            }
        }

        let mut occurrences = Occurrences { name: from, found: Vec::new() };
        let _ = walk(self, id, &mut occurrences);
        for id in occurrences.found {
            self.set_variable(id, to);
        }
    }

    /// Returns true if the subtree rooted at `a` in this arena has the same structure and content
    /// as the subtree rooted at `b` in `other`.
    ///
    /// Literals are compared by value, except that two NaN literals are considered equal.
    pub fn subtree_eq(&self, a: NodeId, other: &Arena, b: NodeId) -> bool {
        let mut stack = vec![(a, b)];
        while let Some((a, b)) = stack.pop() {
            match (self.node(a), other.node(b)) {
                (Node::Literal(x), Node::Literal(y)) => {
                    if x != y && !(x.is_nan() && y.is_nan()) {
                        return false;
                    }
                },
                (Node::Variable(x), Node::Variable(y)) => {
                    if x != y {
                        return false;
                    }
                },
                (
                    Node::Operation { op: op_a, left: left_a, right: right_a },
                    Node::Operation { op: op_b, left: left_b, right: right_b },
                ) => {
                    if op_a != op_b {
                        return false;
                    }
                    for pair in [(left_a, left_b), (right_a, right_b)] {
                        match pair {
                            (Some(a), Some(b)) => stack.push((*a, *b)),
                            (None, None) => (),
                            _ => return false,
                        }
                    }
                },
                _ => return false,
            }
        }
        true
    }

    /// Wraps the arena and the handle of its root node into a [`Tree`].
    ///
    /// Nodes of the arena that are not reachable from `root` are kept; use [`Tree::validate`] to
    /// check that the arena holds exactly one tree.
    pub fn into_tree(self, root: NodeId) -> Tree {
        Tree { arena: self, root }
    }
}

/// An expression tree: an [`Arena`] together with the handle of the root node.
///
/// A tree always has a root node. Cloning a tree performs a deep copy.
#[derive(Clone)]
pub struct Tree {
    arena: Arena,
    root: NodeId,
}

impl Tree {
    /// Creates a tree consisting of a single literal.
    pub fn literal(value: f64) -> Result<Self, Error> {
        let mut arena = Arena::new();
        let root = arena.new_literal(value)?;
        Ok(arena.into_tree(root))
    }

    /// Creates a tree consisting of a single variable.
    pub fn variable(name: char) -> Result<Self, Error> {
        let mut arena = Arena::new();
        let root = arena.new_variable(name)?;
        Ok(arena.into_tree(root))
    }

    /// Copies the subtree rooted at `id` in `arena` into a new tree with the same limits.
    pub fn from_subtree(arena: &Arena, id: NodeId) -> Result<Self, Error> {
        let mut new = Arena::with_limits(arena.limits());
        let root = new.import(arena, id)?;
        Ok(new.into_tree(root))
    }

    /// The handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root node.
    pub fn root_node(&self) -> &Node {
        self.arena.node(self.root)
    }

    /// The arena holding the tree's nodes.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to the arena holding the tree's nodes.
    ///
    /// The root handle stays fixed, so rewrites that collapse the root must happen in place (see
    /// [`Arena::replace_content`]).
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Splits the tree into its arena and root handle.
    pub fn into_parts(self) -> (Arena, NodeId) {
        (self.arena, self.root)
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always returns false; a tree has at least its root node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the node with the given handle.
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.node(id)
    }

    /// Walks the tree depth-first from the root. See [`walk`] for more information.
    pub fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) -> ControlFlow<()> {
        walk(&self.arena, self.root, visitor)
    }

    /// Returns true if the tree contains no variables.
    pub fn is_constant(&self) -> bool {
        self.arena.is_constant(self.root)
    }

    /// Replaces every occurrence of the variable `from` with the variable `to`.
    pub fn rename_variable(&mut self, from: char, to: char) {
        self.arena.rename_variable(self.root, from, to);
    }

    /// Returns true if both trees have the same structure and content. See
    /// [`Arena::subtree_eq`].
    pub fn structurally_eq(&self, other: &Tree) -> bool {
        self.arena.subtree_eq(self.root, &other.arena, other.root)
    }

    /// Copies the subtree rooted at `id` into a new, independent tree.
    pub fn subtree(&self, id: NodeId) -> Result<Tree, Error> {
        Tree::from_subtree(&self.arena, id)
    }

    /// Checks that the tree is well-formed: every operation has the children its operator
    /// requires, no node is reachable twice, no link refers to a freed node, and the arena holds
    /// no node that is unreachable from the root.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |op: Option<OpKind>, reason: &'static str| {
            Err(Error::spanless(InvalidNodeShape { op, reason }))
        };
        let mut seen = vec![false; self.arena.slots.len()];
        let mut reached = 0;
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                return invalid(None, "link refers to a freed node");
            };
            if std::mem::replace(&mut seen[id.index()], true) {
                return invalid(node.op(), "node is owned by more than one parent");
            }
            node.check_shape().map_err(Error::spanless)?;
            reached += 1;
            stack.extend(node.children());
        }

        if reached != self.arena.len() {
            return invalid(None, "arena holds nodes that are unreachable from the root");
        }
        Ok(())
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}
