//! Built-in defaults, the lowest layer of every merge.

use crate::config::sections::{
    DEFAULT_CONTENT_TYPE, DEFAULT_DOCUMENT_TYPE, DEFAULT_SERVE_PORT, DEFAULT_SNAPSHOT,
};
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Start a builder seeded with the default values.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("site.snapshot", DEFAULT_SNAPSHOT)?
        .set_default("search.document_type", DEFAULT_DOCUMENT_TYPE)?
        .set_default("search.content_type", DEFAULT_CONTENT_TYPE)?
        .set_default("serve.interface", "127.0.0.1")?
        .set_default("serve.port", i64::from(DEFAULT_SERVE_PORT))
}
