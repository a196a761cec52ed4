//! Node type registry with super-type inheritance.

use crate::types::NodeTypeName;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Declared node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeType {
    pub name: NodeTypeName,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub super_types: Vec<NodeTypeName>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

impl NodeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            super_types: Vec::new(),
            is_abstract: false,
        }
    }

    pub fn with_super_type(mut self, super_type: impl Into<String>) -> Self {
        self.super_types.push(super_type.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// Name and label of a node type, as listed to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeSummary {
    pub name: NodeTypeName,
    pub label: String,
}

/// Registry of all known node types
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
    types: BTreeMap<NodeTypeName, NodeType>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.name.clone(), node_type);
    }

    pub fn get(&self, name: &str) -> Option<&NodeType> {
        self.types.get(name)
    }

    /// Check whether `name` is `super_name` or inherits from it.
    ///
    /// Undeclared types only match themselves. Inheritance cycles are tolerated.
    pub fn is_of_type(&self, name: &str, super_name: &str) -> bool {
        if name == super_name {
            return true;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(name);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            if current == super_name {
                return true;
            }
            if let Some(node_type) = self.types.get(current) {
                queue.extend(node_type.super_types.iter().map(String::as_str));
            }
        }
        false
    }

    /// Non-abstract types that are documents or content, sorted by name.
    pub fn relevant_node_types(
        &self,
        document_type: &str,
        content_type: &str,
    ) -> Vec<NodeTypeSummary> {
        self.types
            .values()
            .filter(|t| !t.is_abstract)
            .filter(|t| {
                self.is_of_type(&t.name, document_type) || self.is_of_type(&t.name, content_type)
            })
            .map(|t| NodeTypeSummary {
                name: t.name.clone(),
                label: t.label.clone().unwrap_or_else(|| t.name.clone()),
            })
            .collect()
    }
}

/// Validate the `Vendor.Package:Name` syntax of a node type query.
///
/// The error is the human-readable reason.
pub fn validate_type_name(name: &str) -> Result<(), String> {
    let invalid = |why: &str| format!("invalid node type name '{}': {}", name, why);
    let (package, local) = name
        .split_once(':')
        .ok_or_else(|| invalid("expected Vendor.Package:Name"))?;
    if package.is_empty() || local.is_empty() {
        return Err(invalid("package and name must not be empty"));
    }
    if local.contains(':') {
        return Err(invalid("more than one ':' separator"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if !package.chars().all(allowed) || !local.chars().all(allowed) {
        return Err(invalid("unexpected character"));
    }
    if package.starts_with('.') || package.ends_with('.') || package.contains("..") {
        return Err(invalid("malformed package name"));
    }
    Ok(())
}
