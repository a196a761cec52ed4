//! typefinder: Node Type Occurrence Finder
//!
//! Finds every page of a content site on which nodes of a given type occur,
//! across all content dimension combinations, and reports each page URL once.

pub mod config;
pub mod content;
pub mod error;
pub mod finder;
pub mod logging;
pub mod tooling;
pub mod types;
