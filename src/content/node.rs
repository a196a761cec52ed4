//! Node snapshots and the immutable per-context node tree.

use crate::content::context::ContentContext;
use crate::types::{NodeIdentifier, NodeTypeName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Identifier of the synthetic root node every tree starts from.
pub const ROOT_NODE_IDENTIFIER: &str = "root";

/// Type name of the synthetic root node.
pub const ROOT_NODE_TYPE: &str = "unstructured";

/// Read-only snapshot of one node in one content context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub identifier: NodeIdentifier,
    /// Path segment of the node below its parent
    pub name: String,
    pub node_type: NodeTypeName,
    pub parent: Option<NodeIdentifier>,
    pub visible: bool,
    pub label: String,
    pub uri_path_segment: Option<String>,
}

impl NodeSnapshot {
    pub fn new(
        identifier: impl Into<String>,
        node_type: impl Into<String>,
        parent: Option<&str>,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            label: identifier.clone(),
            identifier,
            node_type: node_type.into(),
            parent: parent.map(str::to_string),
            visible: true,
            uri_path_segment: None,
        }
    }

    pub fn root() -> Self {
        Self {
            identifier: ROOT_NODE_IDENTIFIER.to_string(),
            name: String::new(),
            node_type: ROOT_NODE_TYPE.to_string(),
            parent: None,
            visible: true,
            label: "/".to_string(),
            uri_path_segment: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_uri_path_segment(mut self, segment: impl Into<String>) -> Self {
        self.uri_path_segment = Some(segment.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Immutable tree of node snapshots for one content context.
///
/// Parent links are held in an explicit child-to-parent index; nodes never
/// point at each other. Nodes whose parent is missing stay addressable but are
/// unreachable from the root.
#[derive(Debug, Clone)]
pub struct NodeTree {
    context: ContentContext,
    nodes: HashMap<NodeIdentifier, NodeSnapshot>,
    children: HashMap<NodeIdentifier, Vec<NodeIdentifier>>,
    parents: HashMap<NodeIdentifier, NodeIdentifier>,
}

impl NodeTree {
    /// Build a tree from nodes in insertion order; the synthetic root is added.
    ///
    /// Nodes without a parent are attached to the root. A repeated identifier
    /// replaces the earlier record but keeps the earlier place among its
    /// parent's children, so every identifier is listed as a child once.
    pub fn from_nodes(context: ContentContext, nodes: Vec<NodeSnapshot>) -> Self {
        let mut tree = NodeTree {
            context,
            nodes: HashMap::with_capacity(nodes.len() + 1),
            children: HashMap::new(),
            parents: HashMap::new(),
        };
        tree.nodes
            .insert(ROOT_NODE_IDENTIFIER.to_string(), NodeSnapshot::root());

        for mut node in nodes {
            if node.identifier == ROOT_NODE_IDENTIFIER {
                continue;
            }
            let parent = node
                .parent
                .get_or_insert_with(|| ROOT_NODE_IDENTIFIER.to_string())
                .clone();
            if tree.parents.contains_key(&node.identifier) {
                warn!(node = %node.identifier, "Duplicate node identifier in tree");
            } else {
                tree.children
                    .entry(parent.clone())
                    .or_default()
                    .push(node.identifier.clone());
            }
            tree.parents.insert(node.identifier.clone(), parent);
            tree.nodes.insert(node.identifier.clone(), node);
        }
        tree
    }

    pub fn context(&self) -> &ContentContext {
        &self.context
    }

    pub fn get(&self, identifier: &str) -> Option<&NodeSnapshot> {
        self.nodes.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.nodes.contains_key(identifier)
    }

    /// Parent identifier from the index; `None` for the root.
    pub fn parent_id(&self, identifier: &str) -> Option<&NodeIdentifier> {
        self.parents.get(identifier)
    }

    /// Parent snapshot; `None` for the root and for dangling parents.
    pub fn parent(&self, identifier: &str) -> Option<&NodeSnapshot> {
        self.parent_id(identifier).and_then(|p| self.nodes.get(p))
    }

    /// Children in insertion order.
    pub fn children(&self, identifier: &str) -> &[NodeIdentifier] {
        self.children
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by its absolute path of node names, e.g. `/sites/demo`.
    ///
    /// Duplicate sibling names resolve to the first inserted sibling.
    pub fn find_by_path(&self, path: &str) -> Option<&NodeSnapshot> {
        let mut current = ROOT_NODE_IDENTIFIER;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self
                .children(current)
                .iter()
                .find(|child| self.nodes[child.as_str()].name == segment)?
                .as_str();
        }
        self.nodes.get(current)
    }
}
