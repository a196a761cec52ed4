//! Content repository port.

use crate::content::context::ContentContext;
use crate::content::node::NodeTree;
use crate::content::node_type::NodeTypeRegistry;
use crate::error::FinderError;

/// Configured content dimension with its selectable presets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionDefinition {
    pub name: String,
    pub default: Option<String>,
    pub presets: Vec<DimensionPreset>,
}

impl DimensionDefinition {
    pub fn preset(&self, value: &str) -> Option<&DimensionPreset> {
        self.presets.iter().find(|p| p.value == value)
    }
}

/// One selectable value of a dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionPreset {
    pub value: String,
    /// URI prefix segment; empty means the value adds no prefix.
    pub uri_segment: String,
}

/// Read-only access to the content the finder searches.
pub trait ContentRepository: Send + Sync {
    /// Node type registry used for polymorphic type checks.
    fn node_types(&self) -> &NodeTypeRegistry;

    /// Configured dimensions, in declaration order.
    fn dimensions(&self) -> &[DimensionDefinition];

    /// Whether a workspace with this name exists.
    fn has_workspace(&self, name: &str) -> bool;

    /// Fetch the whole tree for a context.
    ///
    /// Unknown dimensions or values fail with `FinderError::Traversal`,
    /// unknown workspaces with `FinderError::WorkspaceNotFound`.
    fn tree(&self, context: &ContentContext) -> Result<NodeTree, FinderError>;
}
