//! Visibility over the ancestor chain.

use crate::content::node::NodeTree;

/// True when the node and every ancestor up to the root are visible.
///
/// Unknown nodes and malformed (cyclic) chains count as not visible. A chain
/// that dangles below the root is judged on the nodes that exist.
pub fn is_visible(tree: &NodeTree, identifier: &str) -> bool {
    let Some(mut node) = tree.get(identifier) else {
        return false;
    };
    // A well-formed chain is never longer than the tree.
    for _ in 0..tree.len() {
        if !node.visible {
            return false;
        }
        match tree.parent(&node.identifier) {
            Some(parent) => node = parent,
            None => return true,
        }
    }
    false
}
