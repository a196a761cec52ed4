//! Content repository backed by a site snapshot file (YAML or JSON).

use crate::content::context::ContentContext;
use crate::content::node::{NodeSnapshot, NodeTree, ROOT_NODE_IDENTIFIER};
use crate::content::node_type::{NodeType, NodeTypeRegistry};
use crate::content::repository::{ContentRepository, DimensionDefinition, DimensionPreset};
use crate::error::FinderError;
use crate::types::{DimensionCombination, LIVE_WORKSPACE};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    node_types: BTreeMap<String, NodeTypeEntry>,
    #[serde(default)]
    dimensions: Vec<DimensionEntry>,
    #[serde(default)]
    workspaces: Vec<WorkspaceEntry>,
    #[serde(default)]
    nodes: Vec<NodeEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeTypeEntry {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    super_types: Vec<String>,
    #[serde(default, rename = "abstract")]
    is_abstract: bool,
}

#[derive(Debug, Deserialize)]
struct DimensionEntry {
    name: String,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    presets: Vec<PresetEntry>,
}

#[derive(Debug, Deserialize)]
struct PresetEntry {
    value: String,
    /// Defaults to the value itself.
    #[serde(default)]
    uri_segment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceEntry {
    name: String,
    #[serde(default)]
    base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NodeEntry {
    identifier: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    uri_path_segment: Option<String>,
    #[serde(default)]
    dimensions: DimensionCombination,
    #[serde(default)]
    workspace: Option<String>,
    #[serde(default)]
    removed: bool,
}

impl NodeEntry {
    fn workspace(&self) -> &str {
        self.workspace.as_deref().unwrap_or(LIVE_WORKSPACE)
    }

    fn to_snapshot(&self) -> NodeSnapshot {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| self.identifier.clone());
        NodeSnapshot {
            identifier: self.identifier.clone(),
            label: self.label.clone().unwrap_or_else(|| name.clone()),
            name,
            node_type: self.node_type.clone(),
            parent: self.parent.clone(),
            visible: !self.hidden,
            uri_path_segment: self.uri_path_segment.clone(),
        }
    }
}

/// Snapshot-backed [`ContentRepository`].
///
/// A node variant in workspace W overrides variants with the same identifier
/// from W's base workspaces; dimension-specific variants override shared ones
/// (variants without dimensions).
#[derive(Debug)]
pub struct SnapshotRepository {
    node_types: NodeTypeRegistry,
    dimensions: Vec<DimensionDefinition>,
    /// workspace name -> base workspace
    workspaces: HashMap<String, Option<String>>,
    nodes: Vec<NodeEntry>,
}

impl SnapshotRepository {
    /// Load a snapshot, choosing the parser by file extension.
    pub fn load(path: &Path) -> Result<Self, FinderError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FinderError::Snapshot(format!("Failed to read {}: {}", path.display(), e))
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(FinderError::Snapshot(format!(
                "Unsupported snapshot format: {} (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, FinderError> {
        let file: SnapshotFile = serde_yaml::from_str(content)
            .map_err(|e| FinderError::Snapshot(format!("Invalid YAML snapshot: {}", e)))?;
        Self::from_file(file)
    }

    pub fn from_json_str(content: &str) -> Result<Self, FinderError> {
        let file: SnapshotFile = serde_json::from_str(content)
            .map_err(|e| FinderError::Snapshot(format!("Invalid JSON snapshot: {}", e)))?;
        Self::from_file(file)
    }

    fn from_file(file: SnapshotFile) -> Result<Self, FinderError> {
        let mut node_types = NodeTypeRegistry::new();
        for (name, entry) in file.node_types {
            node_types.register(NodeType {
                name,
                label: entry.label,
                super_types: entry.super_types,
                is_abstract: entry.is_abstract,
            });
        }

        let dimensions = file
            .dimensions
            .into_iter()
            .map(|d| DimensionDefinition {
                name: d.name,
                default: d.default,
                presets: d
                    .presets
                    .into_iter()
                    .map(|p| DimensionPreset {
                        uri_segment: p.uri_segment.unwrap_or_else(|| p.value.clone()),
                        value: p.value,
                    })
                    .collect(),
            })
            .collect();

        let mut workspaces: HashMap<String, Option<String>> = HashMap::new();
        workspaces.insert(LIVE_WORKSPACE.to_string(), None);
        for ws in file.workspaces {
            if ws.name == LIVE_WORKSPACE {
                continue;
            }
            let base = ws.base.unwrap_or_else(|| LIVE_WORKSPACE.to_string());
            workspaces.insert(ws.name, Some(base));
        }

        let repository = SnapshotRepository {
            node_types,
            dimensions,
            workspaces,
            nodes: file.nodes,
        };
        repository.validate()?;
        Ok(repository)
    }

    fn validate(&self) -> Result<(), FinderError> {
        for name in self.workspaces.keys() {
            self.workspace_chain(name)?;
        }
        for node in &self.nodes {
            if node.identifier == ROOT_NODE_IDENTIFIER {
                return Err(FinderError::Snapshot(format!(
                    "Node identifier '{}' is reserved for the root node",
                    ROOT_NODE_IDENTIFIER
                )));
            }
            if !self.workspaces.contains_key(node.workspace()) {
                return Err(FinderError::Snapshot(format!(
                    "Node {} refers to unknown workspace {}",
                    node.identifier,
                    node.workspace()
                )));
            }
        }
        Ok(())
    }

    /// Workspace followed by its base workspaces, ending in `live`.
    fn workspace_chain(&self, name: &str) -> Result<Vec<&str>, FinderError> {
        let mut chain: Vec<&str> = Vec::new();
        let mut current = Some(name);
        while let Some(ws) = current {
            let (key, base) = self
                .workspaces
                .get_key_value(ws)
                .ok_or_else(|| FinderError::WorkspaceNotFound(ws.to_string()))?;
            if chain.contains(&key.as_str()) {
                return Err(FinderError::Snapshot(format!(
                    "Workspace {} has a cyclic base chain",
                    name
                )));
            }
            chain.push(key.as_str());
            current = base.as_deref();
        }
        Ok(chain)
    }

    /// Check the requested combination and fill unset dimensions with their defaults.
    fn complete_dimensions(
        &self,
        requested: &DimensionCombination,
    ) -> Result<DimensionCombination, FinderError> {
        for (name, value) in requested.iter() {
            let definition = self
                .dimensions
                .iter()
                .find(|d| d.name == name)
                .ok_or_else(|| {
                    FinderError::traversal(requested, format!("unknown dimension '{}'", name))
                })?;
            if definition.preset(value).is_none() {
                return Err(FinderError::traversal(
                    requested,
                    format!("unknown value '{}' for dimension '{}'", value, name),
                ));
            }
        }

        let mut completed = requested.clone();
        for definition in &self.dimensions {
            if completed.get(&definition.name).is_some() {
                continue;
            }
            match &definition.default {
                Some(default) => completed = completed.with(definition.name.clone(), default.clone()),
                None => {
                    return Err(FinderError::traversal(
                        requested,
                        format!("missing dimension '{}'", definition.name),
                    ))
                }
            }
        }
        Ok(completed)
    }
}

impl ContentRepository for SnapshotRepository {
    fn node_types(&self) -> &NodeTypeRegistry {
        &self.node_types
    }

    fn dimensions(&self) -> &[DimensionDefinition] {
        &self.dimensions
    }

    fn has_workspace(&self, name: &str) -> bool {
        self.workspaces.contains_key(name)
    }

    fn tree(&self, context: &ContentContext) -> Result<NodeTree, FinderError> {
        let chain = self.workspace_chain(&context.workspace)?;
        let dimensions = self.complete_dimensions(&context.dimensions)?;

        // identifier -> ((workspace rank, shared variant), index)
        let mut chosen: HashMap<&str, ((usize, bool), usize)> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            let shared = node.dimensions.is_default();
            if !shared && node.dimensions != dimensions {
                continue;
            }
            let Some(rank) = chain.iter().position(|ws| *ws == node.workspace()) else {
                continue;
            };
            let key = (rank, shared);
            match chosen.get(node.identifier.as_str()) {
                Some((existing, _)) if *existing <= key => {}
                Some(_) => {
                    chosen.insert(node.identifier.as_str(), (key, index));
                }
                None => {
                    order.push(node.identifier.as_str());
                    chosen.insert(node.identifier.as_str(), (key, index));
                }
            }
        }

        let mut snapshots: Vec<NodeSnapshot> = order
            .iter()
            .map(|id| &self.nodes[chosen[id].1])
            .filter(|entry| !entry.removed)
            .filter(|entry| context.invisible_content_shown || !entry.hidden)
            .map(NodeEntry::to_snapshot)
            .collect();

        let tree_context = ContentContext {
            workspace: context.workspace.clone(),
            dimensions,
            invisible_content_shown: context.invisible_content_shown,
        };

        if !context.invisible_content_shown {
            let full = NodeTree::from_nodes(tree_context.clone(), snapshots.clone());
            let reachable = reachable_from_root(&full);
            snapshots.retain(|n| reachable.contains(n.identifier.as_str()));
        }

        debug!(
            context = %tree_context,
            nodes = snapshots.len(),
            "Built node tree from snapshot"
        );
        Ok(NodeTree::from_nodes(tree_context, snapshots))
    }
}

fn reachable_from_root(tree: &NodeTree) -> HashSet<String> {
    let mut reachable = HashSet::new();
    let mut stack = vec![ROOT_NODE_IDENTIFIER.to_string()];
    while let Some(id) = stack.pop() {
        if !reachable.insert(id.clone()) {
            continue;
        }
        stack.extend(tree.children(&id).iter().cloned());
    }
    reachable
}
