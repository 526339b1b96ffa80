use std::ops::ControlFlow;
use super::{Arena, NodeId};

/// Hooks called by [`walk`] as it traverses a tree.
///
/// Every hook defaults to doing nothing. Returning [`ControlFlow::Break`] from any hook stops the
/// walk immediately.
pub trait Visitor {
    /// Called when a node is entered, before any of its children.
    fn pre(&mut self, arena: &Arena, id: NodeId) -> ControlFlow<()> {
        let _ = (arena, id);
        ControlFlow::Continue(())
    }

    /// Called after the left subtree of a node was walked, and before its right subtree. Leaves
    /// and unary operations, which have no left subtree, get this call right after [`pre`].
    ///
    /// [`pre`]: Visitor::pre
    fn inorder(&mut self, arena: &Arena, id: NodeId) -> ControlFlow<()> {
        let _ = (arena, id);
        ControlFlow::Continue(())
    }

    /// Called when a node is left, after all of its children.
    fn post(&mut self, arena: &Arena, id: NodeId) -> ControlFlow<()> {
        let _ = (arena, id);
        ControlFlow::Continue(())
    }
}

/// Where the walk is within a node.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Enter,
    Between,
    Exit,
}

/// Walks the subtree rooted at `root` depth-first, left child before right child, calling the
/// visitor's hooks on the way.
///
/// The walk keeps an explicit stack, so it handles trees of any depth. It returns
/// [`ControlFlow::Break`] if a hook stopped it early.
pub fn walk<V: Visitor + ?Sized>(arena: &Arena, root: NodeId, visitor: &mut V) -> ControlFlow<()> {
    let mut stack = vec![(root, Stage::Enter)];

    while let Some((id, stage)) = stack.pop() {
        let flow = match stage {
            Stage::Enter => {
                stack.push((id, Stage::Between));
                if let Some(left) = arena.left(id) {
                    stack.push((left, Stage::Enter));
                }
                visitor.pre(arena, id)
            },
            Stage::Between => {
                stack.push((id, Stage::Exit));
                if let Some(right) = arena.right(id) {
                    stack.push((right, Stage::Enter));
                }
                visitor.inorder(arena, id)
            },
            Stage::Exit => visitor.post(arena, id),
        };

        if flow.is_break() {
            return flow;
        }
    }

    ControlFlow::Continue(())
}
