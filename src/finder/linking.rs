//! Link building for document nodes.

use crate::content::context::RenderContext;
use crate::content::node::{NodeSnapshot, NodeTree, ROOT_NODE_IDENTIFIER};
use crate::content::node_type::NodeTypeRegistry;
use crate::content::repository::DimensionDefinition;
use crate::error::FinderError;
use url::Url;

/// Builds the canonical front-end URL of a node.
pub trait LinkBuilder: Send + Sync {
    /// URL of `identifier` within `tree`'s context; `Ok(None)` when the node
    /// has no route.
    fn node_uri(
        &self,
        tree: &NodeTree,
        identifier: &str,
        render: &RenderContext,
    ) -> Result<Option<String>, FinderError>;
}

/// Routes documents by their URI path segments.
///
/// The topmost document below the root is the site (home page) and adds no
/// segment. Configured dimensions contribute one leading segment made of their
/// preset URI segments joined by `_`. Without a base URI the result is
/// relative and starts with `./`; the home page is `/`.
pub struct RouteLinkBuilder {
    node_types: NodeTypeRegistry,
    dimensions: Vec<DimensionDefinition>,
    document_type: String,
}

impl RouteLinkBuilder {
    pub fn new(
        node_types: &NodeTypeRegistry,
        dimensions: &[DimensionDefinition],
        document_type: impl Into<String>,
    ) -> Self {
        Self {
            node_types: node_types.clone(),
            dimensions: dimensions.to_vec(),
            document_type: document_type.into(),
        }
    }

    fn dimension_prefix(&self, tree: &NodeTree) -> Option<String> {
        let dimensions = &tree.context().dimensions;
        let mut segments = Vec::new();
        for definition in &self.dimensions {
            let value = dimensions.get(&definition.name)?;
            let preset = definition.preset(value)?;
            if !preset.uri_segment.is_empty() {
                segments.push(preset.uri_segment.as_str());
            }
        }
        Some(segments.join("_"))
    }

    /// URI path segments of the document chain, top-down, excluding the site.
    fn document_segments<'t>(&self, tree: &'t NodeTree, identifier: &str) -> Option<Vec<&'t str>> {
        let mut documents: Vec<&'t NodeSnapshot> = Vec::new();
        let mut current = tree.get(identifier)?;
        for _ in 0..tree.len() {
            if current.identifier == ROOT_NODE_IDENTIFIER {
                documents.reverse();
                // First entry is the site node.
                return documents
                    .into_iter()
                    .skip(1)
                    .map(|node| node.uri_path_segment.as_deref().filter(|s| !s.is_empty()))
                    .collect();
            }
            if self
                .node_types
                .is_of_type(&current.node_type, &self.document_type)
            {
                documents.push(current);
            }
            // Dangling parent: orphan without a route.
            current = tree.parent(&current.identifier)?;
        }
        None
    }
}

impl LinkBuilder for RouteLinkBuilder {
    fn node_uri(
        &self,
        tree: &NodeTree,
        identifier: &str,
        render: &RenderContext,
    ) -> Result<Option<String>, FinderError> {
        let Some(node) = tree.get(identifier) else {
            return Ok(None);
        };
        if !self
            .node_types
            .is_of_type(&node.node_type, &self.document_type)
        {
            return Ok(None);
        }
        let Some(segments) = self.document_segments(tree, identifier) else {
            return Ok(None);
        };
        let Some(prefix) = self.dimension_prefix(tree) else {
            return Ok(None);
        };

        let segments: Vec<&str> = std::iter::once(prefix.as_str())
            .filter(|p| !p.is_empty())
            .chain(segments)
            .collect();

        let uri = match &render.base_uri {
            Some(base) => append_segments(base, &segments)?.to_string(),
            None if segments.is_empty() => "/".to_string(),
            None => {
                let root = Url::parse("http://localhost/").map_err(|e| {
                    FinderError::ConfigError(format!("Cannot build relative URI: {}", e))
                })?;
                format!(".{}", append_segments(&root, &segments)?.path())
            }
        };
        Ok(Some(uri))
    }
}

/// Append percent-encoded path segments to `base`, dropping its query and fragment.
fn append_segments(base: &Url, segments: &[&str]) -> Result<Url, FinderError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    if segments.is_empty() {
        return Ok(url);
    }
    url.path_segments_mut()
        .map_err(|_| FinderError::ConfigError(format!("Base URI {} cannot carry a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
