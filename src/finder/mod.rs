//! Node Type Occurrence Finder
//!
//! Walks every dimension combination, collects the nodes of a searched type,
//! maps each one to its page, and reports the page URLs once each. The
//! collaborators (repository, dimension source, link builder, user service)
//! are traits so hosts and tests can supply their own.

mod aggregator;
pub mod dimensions;
pub mod document;
pub mod linking;
pub mod traverser;
pub mod uri;
pub mod visibility;

pub use aggregator::{
    DimensionFailure, Occurrence, OccurrenceFinder, OccurrenceReport, ResolvedNode, SearchOptions,
};
pub use dimensions::{DimensionEnumerator, PresetDimensionCombinator, StaticDimensions};
pub use document::DocumentResolver;
pub use linking::{LinkBuilder, RouteLinkBuilder};
pub use traverser::NodeTraverser;
pub use uri::{strip_relative_prefix, RepositoryUserService, UriResolver, UserService};
pub use visibility::is_visible;
