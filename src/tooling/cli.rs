//! CLI Tooling
//!
//! Command-line interface for occurrence search. Every command runs against the
//! content snapshot configured for the workspace.

use crate::config::{ConfigLoader, FinderConfig};
use crate::content::{ContentRepository, ContextPath, RenderContext, SnapshotRepository};
use crate::error::FinderError;
use crate::finder::dimensions::combinations_to_search;
use crate::finder::{
    OccurrenceFinder, PresetDimensionCombinator, RepositoryUserService, RouteLinkBuilder,
};
use crate::logging::LoggingConfig;
use crate::tooling::format::{
    format_dimensions_text, format_node_types_text, format_occurrences_text,
    format_resolved_text, to_json, OutputFormat,
};
use crate::tooling::serve;
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// typefinder CLI - Find the pages a node type is used on
#[derive(Parser)]
#[command(name = "typefinder")]
#[command(about = "Find every page on which a node type occurs, across all content dimensions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply the `--log-*` flags on top of the configured logging.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the pages on which nodes of a type occur
    ListOccurrences {
        /// Node type to search for, e.g. Vendor.Site:Banner
        node_type: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// User whose personal workspace resolves hidden pages
        #[arg(long)]
        user: Option<String>,
        /// Absolute base URI for generated links
        #[arg(long)]
        base_uri: Option<String>,
    },
    /// Resolve one node to the URL of its page
    Resolve {
        /// Context path, e.g. /sites/demo/main/banner@live;language=en
        context_path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// User whose personal workspace resolves hidden pages
        #[arg(long)]
        user: Option<String>,
        /// Absolute base URI for generated links
        #[arg(long)]
        base_uri: Option<String>,
    },
    /// List the document and content node types that can be searched
    NodeTypes {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the dimension combinations a search runs over
    Dimensions {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the effective configuration as TOML
    Config,
    /// Serve occurrence search over HTTP
    Serve {
        /// Interface to bind (default from config)
        #[arg(long)]
        interface: Option<IpAddr>,
        /// Port to bind (default from config)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Load configuration the way every command does.
pub fn load_config(
    workspace_root: &Path,
    config_path: Option<&Path>,
) -> Result<FinderConfig, FinderError> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load(workspace_root)?,
    };
    Ok(config)
}

/// CLI context: configuration plus the collaborators of a search
pub struct CliContext {
    config: FinderConfig,
    repository: Arc<dyn ContentRepository>,
    dimensions: PresetDimensionCombinator,
    links: RouteLinkBuilder,
    users: RepositoryUserService,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, FinderError> {
        let config = load_config(&workspace_root, config_path.as_deref())?;
        Self::with_config(&workspace_root, config)
    }

    /// Create a context from already loaded configuration.
    pub fn with_config(workspace_root: &Path, config: FinderConfig) -> Result<Self, FinderError> {
        let snapshot = config.site.snapshot_path(workspace_root);
        info!(snapshot = %snapshot.display(), "Loading content snapshot");
        let repository = SnapshotRepository::load(&snapshot)?;
        Ok(Self::from_repository(config, Arc::new(repository)))
    }

    /// Create a context over any repository.
    pub fn from_repository(config: FinderConfig, repository: Arc<dyn ContentRepository>) -> Self {
        let dimensions = PresetDimensionCombinator::new(repository.dimensions());
        let links = RouteLinkBuilder::new(
            repository.node_types(),
            repository.dimensions(),
            config.search.document_type.clone(),
        );
        let users = RepositoryUserService::new(Arc::clone(&repository));
        Self {
            config,
            repository,
            dimensions,
            links,
            users,
        }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Occurrence finder wired to this context's collaborators.
    pub fn finder(&self) -> OccurrenceFinder<'_> {
        OccurrenceFinder::new(
            self.repository.as_ref(),
            &self.dimensions,
            &self.links,
            &self.users,
            self.config.search.to_options(),
        )
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, FinderError> {
        match command {
            Commands::ListOccurrences {
                node_type,
                format,
                user,
                base_uri,
            } => {
                let format = OutputFormat::parse(format)?;
                let render = self
                    .config
                    .site
                    .render_context(user.as_deref(), base_uri.as_deref())?;
                self.list_occurrences(node_type, &render, format)
            }
            Commands::Resolve {
                context_path,
                format,
                user,
                base_uri,
            } => {
                let format = OutputFormat::parse(format)?;
                let render = self
                    .config
                    .site
                    .render_context(user.as_deref(), base_uri.as_deref())?;
                let path: ContextPath = context_path.parse()?;
                let resolved = self.finder().resolve_node(&path, &render)?;
                match format {
                    OutputFormat::Text => Ok(format_resolved_text(&resolved)),
                    OutputFormat::Json => to_json(&resolved),
                }
            }
            Commands::NodeTypes { format } => {
                let types = self.finder().relevant_node_types();
                match OutputFormat::parse(format)? {
                    OutputFormat::Text => Ok(format_node_types_text(&types)),
                    OutputFormat::Json => to_json(&types),
                }
            }
            Commands::Dimensions { format } => {
                let combinations = combinations_to_search(&self.dimensions);
                match OutputFormat::parse(format)? {
                    OutputFormat::Text => Ok(format_dimensions_text(&combinations)),
                    OutputFormat::Json => to_json(&combinations),
                }
            }
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                FinderError::ConfigError(format!("Failed to render configuration: {}", e))
            }),
            Commands::Serve { interface, port } => {
                let interface = interface.unwrap_or(self.config.serve.interface);
                let port = port.unwrap_or(self.config.serve.port);
                serve::run(self, interface, port)
                    .map_err(|e| FinderError::Server(format!("{:#}", e)))?;
                Ok(String::new())
            }
        }
    }

    fn list_occurrences(
        &self,
        node_type: &str,
        render: &RenderContext,
        format: OutputFormat,
    ) -> Result<String, FinderError> {
        let report = self.finder().find_occurrences(node_type, render)?;
        if report.all_dimensions_failed() {
            let reasons = report
                .failed_dimensions
                .iter()
                .map(|f| format!("[{}] {}", f.dimensions, f.reason))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FinderError::SearchFailed(reasons));
        }
        match format {
            OutputFormat::Text => Ok(format_occurrences_text(&report)),
            OutputFormat::Json => to_json(&report),
        }
    }
}
