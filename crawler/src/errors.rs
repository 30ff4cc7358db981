use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Crawler middleware error: {0}")]
    ClientMiddlewareError(#[from] reqwest_middleware::Error),
    #[error("Crawler transport error: {0}")]
    ClientError(#[from] reqwest::Error),
    #[error("Crawler failed to create header")]
    InvalidHeader,
}

impl From<InvalidHeaderName> for CrawlerError {
    fn from(_err: InvalidHeaderName) -> Self {
        Self::InvalidHeader
    }
}

impl From<InvalidHeaderValue> for CrawlerError {
    fn from(_err: InvalidHeaderValue) -> Self {
        Self::InvalidHeader
    }
}
