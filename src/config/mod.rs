//! Configuration
//!
//! Layered configuration for the finder: built-in defaults, the global config
//! file, the workspace config file and `TYPEFINDER__*` environment variables.

mod facade;
mod merge;
mod paths;
mod sections;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use sections::{SearchConfig, ServeConfig, SiteConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Name of the per-workspace config file.
pub const WORKSPACE_CONFIG_FILE: &str = "typefinder.toml";

/// Prefix of configuration environment variables (`TYPEFINDER__SITE__USER`).
pub const ENV_PREFIX: &str = "TYPEFINDER";

/// Complete finder configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub serve: ServeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
