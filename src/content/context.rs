//! Content and render contexts, and context path parsing.

use crate::error::FinderError;
use crate::types::{DimensionCombination, LIVE_WORKSPACE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// One view of the content: workspace, dimension combination and whether
/// hidden nodes are included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentContext {
    pub workspace: String,
    pub dimensions: DimensionCombination,
    pub invisible_content_shown: bool,
}

impl ContentContext {
    /// Live workspace with invisible content shown, the view searches run in.
    pub fn live(dimensions: DimensionCombination) -> Self {
        Self {
            workspace: LIVE_WORKSPACE.to_string(),
            dimensions,
            invisible_content_shown: true,
        }
    }

    /// Same context with another workspace.
    pub fn with_workspace(&self, workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            ..self.clone()
        }
    }

    pub fn with_invisible_content_shown(mut self, shown: bool) -> Self {
        self.invisible_content_shown = shown;
        self
    }
}

impl fmt::Display for ContentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.workspace, self.dimensions)
    }
}

/// Caller-side context for building links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Absolute base for generated URLs; relative `./` URLs without it.
    pub base_uri: Option<Url>,
    /// Current user, used to find the personal workspace.
    pub user: Option<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_base_uri(mut self, base_uri: Url) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    /// Parse and normalize a base URI so that relative joins append to its path.
    pub fn parse_base_uri(raw: &str) -> Result<Url, FinderError> {
        let mut url = Url::parse(raw)
            .map_err(|e| FinderError::ConfigError(format!("Invalid base URI '{}': {}", raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(FinderError::ConfigError(format!(
                "Base URI '{}' cannot be used as a base",
                raw
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

/// Node path plus the context it should be read in.
///
/// Textual form: `/sites/demo/about@user-admin;language=en&region=eu`. The
/// workspace defaults to `live`, the dimensions to the default combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPath {
    pub node_path: String,
    pub workspace: String,
    pub dimensions: DimensionCombination,
}

impl ContextPath {
    pub fn content_context(&self) -> ContentContext {
        ContentContext {
            workspace: self.workspace.clone(),
            dimensions: self.dimensions.clone(),
            invisible_content_shown: true,
        }
    }
}

impl FromStr for ContextPath {
    type Err = FinderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| FinderError::InvalidContextPath(format!("{} ({})", raw, why));

        let (path_and_workspace, dimension_part) = match raw.split_once(';') {
            Some((head, tail)) => (head, Some(tail)),
            None => (raw, None),
        };
        let (node_path, workspace) = match path_and_workspace.split_once('@') {
            Some((path, workspace)) => (path, workspace),
            None => (path_and_workspace, LIVE_WORKSPACE),
        };

        if !node_path.starts_with('/') {
            return Err(invalid("node path must be absolute"));
        }
        if workspace.is_empty() {
            return Err(invalid("empty workspace name"));
        }

        let mut dimensions = DimensionCombination::new();
        if let Some(part) = dimension_part {
            for pair in part.split('&').filter(|p| !p.is_empty()) {
                let (name, value) = pair
                    .split_once('=')
                    .ok_or_else(|| invalid("dimension must be name=value"))?;
                if name.is_empty() || value.is_empty() {
                    return Err(invalid("empty dimension name or value"));
                }
                dimensions = dimensions.with(name, value);
            }
        }

        let node_path = if node_path.len() > 1 {
            node_path.trim_end_matches('/')
        } else {
            node_path
        };

        Ok(ContextPath {
            node_path: node_path.to_string(),
            workspace: workspace.to_string(),
            dimensions,
        })
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.node_path, self.workspace)?;
        if !self.dimensions.is_default() {
            write!(f, ";{}", self.dimensions)?;
        }
        Ok(())
    }
}
