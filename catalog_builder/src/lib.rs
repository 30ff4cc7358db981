pub mod artifact;
pub mod builder;
pub mod derive;
pub mod errors;
pub mod feeds;
pub mod overrides;
pub mod sources;

pub use builder::{BuildPaths, CatalogBuilder, reconcile};
pub use errors::BuilderError;
pub use sources::{FeedSource, HttpFeedSource};
