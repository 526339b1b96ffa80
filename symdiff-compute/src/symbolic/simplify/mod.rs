//! Simplification of expression trees.
//!
//! Simplification alternates two passes over the tree until neither changes anything:
//!
//! - [`fold`] replaces every operation whose operands are all literals with its value.
//! - [`rules`] applies a fixed set of local rewrites (identity and absorbing elements, a few
//!   trigonometric identities, merging of literal coefficients).
//!
//! Every rewrite happens in place and strictly shrinks the tree, so simplification always
//! terminates, never allocates, and cannot fail. Simplifying an already simplified tree leaves it
//! unchanged.

pub mod fold;
pub mod rules;
pub mod step;

use crate::symbolic::step_collector::StepCollector;
use step::Step;
use symdiff_parser::{Arena, NodeId, Tree};
use tracing::{debug, trace};

/// Options that control which rewrites the simplifier may apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Whether the trigonometric identities apply to any argument, rather than only to the
    /// variable `x`.
    ///
    /// With this option, `sin(x+1)*sin(x+1) + cos(x+1)*cos(x+1)` simplifies to `1`, as long as all
    /// four arguments are structurally equal.
    ///
    /// The default value is `false`.
    pub structural_trig: bool,
}

impl SimplifyOptions {
    /// Sets whether the trigonometric identities apply to any argument. See
    /// [`SimplifyOptions::structural_trig`] for more information.
    pub fn structural_trig(mut self, structural_trig: bool) -> Self {
        self.structural_trig = structural_trig;
        self
    }
}

/// Simplifies the subtree rooted at `root` in place, until no pass changes it anymore.
///
/// The handle `root` stays valid and names the simplified subtree.
pub fn simplify_node(
    arena: &mut Arena,
    root: NodeId,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) {
    let mut passes = 0;
    loop {
        passes += 1;
        let folded = fold::fold_constants(arena, root, step_collector);
        let rewritten = rules::apply_rules(arena, root, options, step_collector);
        trace!(passes, folded, rewritten, "simplification pass");

        if !folded && !rewritten {
            break;
        }
    }
}

/// Simplifies the tree in place, with the default options.
pub fn simplify(tree: &mut Tree) {
    simplify_with(tree, &SimplifyOptions::default());
}

/// Simplifies the tree in place, with the given options.
pub fn simplify_with(tree: &mut Tree, options: &SimplifyOptions) {
    simplify_with_steps(tree, options, &mut ());
}

/// Simplifies the tree in place, reporting every rewrite to the step collector.
pub fn simplify_with_steps(
    tree: &mut Tree,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) {
    let before = tree.len();
    let root = tree.root();
    simplify_node(tree.arena_mut(), root, options, step_collector);
    debug!(before, after = tree.len(), "simplified to `{}`", tree);
}
