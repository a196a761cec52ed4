//! Type-filtered depth-first traversal of a node tree.

use crate::content::node::{NodeSnapshot, NodeTree, ROOT_NODE_IDENTIFIER};
use crate::content::node_type::{validate_type_name, NodeTypeRegistry};
use crate::error::FinderError;
use crate::types::NodeIdentifier;
use std::collections::HashSet;

/// Finds nodes of a type, including subtypes, in a tree.
pub struct NodeTraverser<'a> {
    node_types: &'a NodeTypeRegistry,
}

impl<'a> NodeTraverser<'a> {
    pub fn new(node_types: &'a NodeTypeRegistry) -> Self {
        Self { node_types }
    }

    /// Lazily yield every node of `type_name` in pre-order, root included.
    ///
    /// Each call starts a fresh walk. A malformed type name is a traversal
    /// error for the tree's dimension combination.
    pub fn find_by_type<'t>(
        &self,
        tree: &'t NodeTree,
        type_name: &'t str,
    ) -> Result<TypeMatches<'t>, FinderError>
    where
        'a: 't,
    {
        validate_type_name(type_name)
            .map_err(|reason| FinderError::traversal(&tree.context().dimensions, reason))?;
        Ok(TypeMatches {
            tree,
            node_types: self.node_types,
            type_name,
            stack: vec![ROOT_NODE_IDENTIFIER],
            visited: HashSet::new(),
        })
    }
}

/// Iterator over the nodes matched by [`NodeTraverser::find_by_type`].
pub struct TypeMatches<'t> {
    tree: &'t NodeTree,
    node_types: &'t NodeTypeRegistry,
    type_name: &'t str,
    stack: Vec<&'t str>,
    visited: HashSet<&'t str>,
}

impl<'t> Iterator for TypeMatches<'t> {
    type Item = &'t NodeSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            // Reversed so the first child is popped first.
            self.stack.extend(
                self.tree
                    .children(id)
                    .iter()
                    .rev()
                    .map(NodeIdentifier::as_str),
            );
            if self.node_types.is_of_type(&node.node_type, self.type_name) {
                return Some(node);
            }
        }
        None
    }
}
