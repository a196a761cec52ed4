//! Content model
//!
//! Read-only view of the content the finder searches: node snapshots,
//! per-context node trees, node types, contexts, and the repository port with
//! its snapshot-file implementation.

pub mod context;
pub mod node;
pub mod node_type;
pub mod repository;
pub mod snapshot;

pub use context::{ContentContext, ContextPath, RenderContext};
pub use node::{NodeSnapshot, NodeTree, ROOT_NODE_IDENTIFIER};
pub use node_type::{validate_type_name, NodeType, NodeTypeRegistry, NodeTypeSummary};
pub use repository::{ContentRepository, DimensionDefinition, DimensionPreset};
pub use snapshot::SnapshotRepository;
