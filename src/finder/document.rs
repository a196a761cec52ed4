//! Closest enclosing document lookup.

use crate::content::node::{NodeSnapshot, NodeTree};
use crate::content::node_type::NodeTypeRegistry;
use crate::error::FinderError;
use std::collections::HashSet;

/// Resolves the page a node belongs to.
pub struct DocumentResolver<'a> {
    node_types: &'a NodeTypeRegistry,
    document_type: &'a str,
}

impl<'a> DocumentResolver<'a> {
    pub fn new(node_types: &'a NodeTypeRegistry, document_type: &'a str) -> Self {
        Self {
            node_types,
            document_type,
        }
    }

    pub fn is_document(&self, node: &NodeSnapshot) -> bool {
        self.node_types
            .is_of_type(&node.node_type, self.document_type)
    }

    /// First document on the way from `identifier` (inclusive) to the root.
    ///
    /// `None` when the root or a dangling parent is reached first; a cycle in
    /// the parent index is a `FinderError::Structural`.
    pub fn closest_document<'t>(
        &self,
        tree: &'t NodeTree,
        identifier: &str,
    ) -> Result<Option<&'t NodeSnapshot>, FinderError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = tree.get(identifier);
        while let Some(node) = current {
            if !visited.insert(node.identifier.as_str()) {
                return Err(FinderError::Structural(identifier.to_string()));
            }
            if self.is_document(node) {
                return Ok(Some(node));
            }
            current = tree.parent(&node.identifier);
        }
        Ok(None)
    }
}
