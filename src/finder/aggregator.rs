//! Occurrence search across all dimension combinations.

use crate::content::context::{ContentContext, ContextPath, RenderContext};
use crate::content::node_type::NodeTypeSummary;
use crate::content::repository::ContentRepository;
use crate::error::FinderError;
use crate::finder::dimensions::{combinations_to_search, DimensionEnumerator};
use crate::finder::document::DocumentResolver;
use crate::finder::linking::LinkBuilder;
use crate::finder::traverser::NodeTraverser;
use crate::finder::uri::{UriResolver, UserService};
use crate::finder::visibility::is_visible;
use crate::types::{DimensionCombination, NodeIdentifier};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One page where the searched type occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub url: String,
    pub label: String,
    pub visible: bool,
}

/// A dimension combination whose search was aborted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFailure {
    pub dimensions: DimensionCombination,
    pub reason: String,
}

/// Result of an occurrence search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceReport {
    pub node_type: String,
    pub occurrences: Vec<Occurrence>,
    pub failed_dimensions: Vec<DimensionFailure>,
    /// Matches dropped because of per-node errors (not resolution misses).
    pub skipped_nodes: usize,
    pub searched_dimensions: usize,
}

impl OccurrenceReport {
    /// Every searched combination failed.
    pub fn all_dimensions_failed(&self) -> bool {
        self.searched_dimensions > 0 && self.failed_dimensions.len() == self.searched_dimensions
    }
}

/// Result of resolving a single node to its page URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNode {
    pub node: NodeIdentifier,
    pub document: NodeIdentifier,
    pub url: String,
    pub label: String,
    pub visible: bool,
}

/// Search settings
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub document_type: String,
    pub content_type: String,
    /// Whole-search deadline; exceeding it fails the search.
    pub timeout: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            document_type: "Neos.Neos:Document".to_string(),
            content_type: "Neos.Neos:Content".to_string(),
            timeout: None,
        }
    }
}

/// Finds the pages on which nodes of a type occur.
///
/// All collaborators are passed in; the finder holds no state between calls.
pub struct OccurrenceFinder<'a> {
    repository: &'a dyn ContentRepository,
    dimensions: &'a dyn DimensionEnumerator,
    links: &'a dyn LinkBuilder,
    users: &'a dyn UserService,
    options: SearchOptions,
}

struct Deadline {
    started: Instant,
    timeout: Option<Duration>,
}

impl Deadline {
    fn check(&self) -> Result<(), FinderError> {
        match self.timeout {
            Some(timeout) if self.started.elapsed() > timeout => Err(FinderError::Timeout(timeout)),
            _ => Ok(()),
        }
    }
}

impl<'a> OccurrenceFinder<'a> {
    pub fn new(
        repository: &'a dyn ContentRepository,
        dimensions: &'a dyn DimensionEnumerator,
        links: &'a dyn LinkBuilder,
        users: &'a dyn UserService,
        options: SearchOptions,
    ) -> Self {
        Self {
            repository,
            dimensions,
            links,
            users,
            options,
        }
    }

    /// Find every page containing a node of `type_name`, deduplicated by URL
    /// in first-discovery order.
    ///
    /// A failing dimension combination is recorded and skipped; a failing node
    /// is logged, counted and skipped. Only a timeout fails the whole search.
    pub fn find_occurrences(
        &self,
        type_name: &str,
        render: &RenderContext,
    ) -> Result<OccurrenceReport, FinderError> {
        let deadline = Deadline {
            started: Instant::now(),
            timeout: self.options.timeout,
        };
        let combinations = combinations_to_search(self.dimensions);
        info!(
            node_type = type_name,
            combinations = combinations.len(),
            "Searching node type occurrences"
        );

        let node_types = self.repository.node_types();
        let traverser = NodeTraverser::new(node_types);
        let documents = DocumentResolver::new(node_types, &self.options.document_type);
        let uris = UriResolver::new(self.repository, self.links, self.users);

        let mut report = OccurrenceReport {
            node_type: type_name.to_string(),
            occurrences: Vec::new(),
            failed_dimensions: Vec::new(),
            skipped_nodes: 0,
            searched_dimensions: combinations.len(),
        };
        let mut seen_urls: HashSet<String> = HashSet::new();

        for combination in combinations {
            deadline.check()?;
            let context = ContentContext::live(combination.clone());
            let tree = match self.repository.tree(&context) {
                Ok(tree) => tree,
                Err(e) => {
                    warn!(dimensions = %combination, error = %e, "Skipping dimension combination");
                    report.failed_dimensions.push(DimensionFailure {
                        dimensions: combination,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let matches = match traverser.find_by_type(&tree, type_name) {
                Ok(matches) => matches,
                Err(e) => {
                    warn!(dimensions = %combination, error = %e, "Skipping dimension combination");
                    report.failed_dimensions.push(DimensionFailure {
                        dimensions: combination,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let mut matched = 0usize;
            for node in matches {
                deadline.check()?;
                matched += 1;
                let document = match documents.closest_document(&tree, &node.identifier) {
                    Ok(Some(document)) => document,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!(node = %node.identifier, error = %e, "Skipping node");
                        report.skipped_nodes += 1;
                        continue;
                    }
                };
                let visible = is_visible(&tree, &document.identifier);
                let url = match uris.resolve(&tree, &document.identifier, visible, render) {
                    Ok(Some(url)) => url,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!(node = %node.identifier, error = %e, "Skipping node");
                        report.skipped_nodes += 1;
                        continue;
                    }
                };
                if seen_urls.insert(url.clone()) {
                    report.occurrences.push(Occurrence {
                        url,
                        label: document.label.clone(),
                        visible,
                    });
                }
            }
            debug!(dimensions = %combination, matched, "Searched dimension combination");
        }

        info!(
            node_type = type_name,
            occurrences = report.occurrences.len(),
            failed_dimensions = report.failed_dimensions.len(),
            skipped_nodes = report.skipped_nodes,
            "Search finished"
        );
        Ok(report)
    }

    /// Resolve one node, addressed by context path, to the URL of its page.
    ///
    /// Every miss is a `FinderError::NotFound` with a user-facing message.
    pub fn resolve_node(
        &self,
        path: &ContextPath,
        render: &RenderContext,
    ) -> Result<ResolvedNode, FinderError> {
        let tree = self.repository.tree(&path.content_context())?;
        let node = tree
            .find_by_path(&path.node_path)
            .ok_or_else(|| FinderError::NotFound(format!("No node found at path {}", path)))?;

        let documents = DocumentResolver::new(self.repository.node_types(), &self.options.document_type);
        let document = documents
            .closest_document(&tree, &node.identifier)?
            .ok_or_else(|| {
                FinderError::NotFound(format!("No document node found for node {}", node.identifier))
            })?;
        let visible = is_visible(&tree, &document.identifier);

        let uris = UriResolver::new(self.repository, self.links, self.users);
        let url = uris
            .resolve(&tree, &document.identifier, visible, render)?
            .ok_or_else(|| FinderError::NotFound(format!("No URI found for node {}", node.identifier)))?;

        Ok(ResolvedNode {
            node: node.identifier.clone(),
            document: document.identifier.clone(),
            url,
            label: document.label.clone(),
            visible,
        })
    }

    /// Document and content types a user can search for.
    pub fn relevant_node_types(&self) -> Vec<NodeTypeSummary> {
        self.repository
            .node_types()
            .relevant_node_types(&self.options.document_type, &self.options.content_type)
    }
}
