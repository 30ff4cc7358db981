use std::{io, path::PathBuf};

use crawler::errors::CrawlerError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::feeds::FeedKind;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("{feed} feed request failed: {source}")]
    FeedRequest {
        feed: FeedKind,
        #[source]
        source: CrawlerError,
    },
    #[error("{feed} feed fetch failed: {status}")]
    FeedStatus { feed: FeedKind, status: StatusCode },
    #[error("{feed} feed has wrong shape: {source}")]
    FeedShape {
        feed: FeedKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to derive id from helpLink: {help_link}")]
    IdentifierDerivation { help_link: String },
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write catalog artifact {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
