//! Configuration sections.

use crate::content::RenderContext;
use crate::error::FinderError;
use crate::finder::SearchOptions;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(crate) const DEFAULT_SNAPSHOT: &str = "site.yaml";
pub(crate) const DEFAULT_DOCUMENT_TYPE: &str = "Neos.Neos:Document";
pub(crate) const DEFAULT_CONTENT_TYPE: &str = "Neos.Neos:Content";
pub(crate) const DEFAULT_SERVE_PORT: u16 = 8081;

fn default_snapshot() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT)
}

fn default_document_type() -> String {
    DEFAULT_DOCUMENT_TYPE.to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_interface() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_SERVE_PORT
}

/// Where the content comes from and how links are rendered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Snapshot file (relative to workspace root)
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,

    /// Absolute base URI; relative URLs when unset
    #[serde(default)]
    pub base_uri: Option<String>,

    /// User whose personal workspace overrides hidden documents
    #[serde(default)]
    pub user: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
            base_uri: None,
            user: None,
        }
    }
}

impl SiteConfig {
    /// Resolve the snapshot path against the workspace root.
    pub fn snapshot_path(&self, workspace_root: &Path) -> PathBuf {
        if self.snapshot.is_absolute() {
            self.snapshot.clone()
        } else {
            workspace_root.join(&self.snapshot)
        }
    }

    /// Render context from config, with per-command overrides taking precedence.
    pub fn render_context(
        &self,
        user: Option<&str>,
        base_uri: Option<&str>,
    ) -> Result<RenderContext, FinderError> {
        let mut render = RenderContext::new();
        if let Some(user) = user.or(self.user.as_deref()) {
            render = render.with_user(user);
        }
        if let Some(raw) = base_uri.or(self.base_uri.as_deref()) {
            render = render.with_base_uri(RenderContext::parse_base_uri(raw)?);
        }
        Ok(render)
    }
}

/// Search behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Type every page type inherits from
    #[serde(default = "default_document_type")]
    pub document_type: String,

    /// Type every inline content type inherits from
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Whole-search timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            document_type: default_document_type(),
            content_type: default_content_type(),
            timeout_ms: None,
        }
    }
}

impl SearchConfig {
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions {
            document_type: self.document_type.clone(),
            content_type: self.content_type.clone(),
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// HTTP service mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_interface")]
    pub interface: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            port: default_port(),
        }
    }
}
