//! Integration tests for the node type occurrence finder

mod cli_parse;
mod config_layers;
mod dedup_properties;
mod occurrence_search;
mod support;
