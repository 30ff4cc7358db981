use async_trait::async_trait;
use crawler::{request::Request, unprotected::UnprotectedCrawler};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    errors::BuilderError,
    feeds::{AddonFeed, FeedKind, MarketplaceFeed},
};

pub const DEFAULT_ADDONS_FEED_URL: &str =
    "https://raw.githubusercontent.com/grasshopper3d/GrasshopperDocsSite/master/feeds/addons.json";
pub const DEFAULT_MARKETPLACE_FEED_URL: &str =
    "https://raw.githubusercontent.com/grasshopper3d/GrasshopperDocsSite/master/feeds/food4rhino.json";

/// Where the two upstream feeds come from.
#[async_trait]
pub trait FeedSource {
    async fn fetch_addons(&self) -> Result<AddonFeed, BuilderError>;
    async fn fetch_marketplace(&self) -> Result<MarketplaceFeed, BuilderError>;
}

/// Strict schema check of a feed body.
pub fn parse_feed<T: DeserializeOwned>(feed: FeedKind, body: &str) -> Result<T, BuilderError> {
    serde_json::from_str(body).map_err(|source| BuilderError::FeedShape { feed, source })
}

pub struct HttpFeedSource {
    crawler: UnprotectedCrawler,
    addons_url: String,
    marketplace_url: String,
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_ADDONS_FEED_URL, DEFAULT_MARKETPLACE_FEED_URL)
    }
}

impl HttpFeedSource {
    pub fn new(addons_url: impl Into<String>, marketplace_url: impl Into<String>) -> Self {
        Self {
            crawler: UnprotectedCrawler::new(),
            addons_url: addons_url.into(),
            marketplace_url: marketplace_url.into(),
        }
    }

    async fn fetch_feed<T: DeserializeOwned>(
        &self,
        feed: FeedKind,
        url: &str,
    ) -> Result<T, BuilderError> {
        let request = Request::builder()
            .set_url(url)
            .add_header("accept", "application/json")
            .build();

        let response = self
            .crawler
            .make_web_request(request)
            .await
            .map_err(|source| BuilderError::FeedRequest { feed, source })?;

        if !response.is_success() {
            return Err(BuilderError::FeedStatus {
                feed,
                status: response.status,
            });
        }

        debug!("{} feed returned {} bytes", feed, response.body.len());

        parse_feed(feed, &response.body)
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_addons(&self) -> Result<AddonFeed, BuilderError> {
        let feed: AddonFeed = self.fetch_feed(FeedKind::Addons, &self.addons_url).await?;

        info!("Fetched {} addons", feed.index.len());

        Ok(feed)
    }

    async fn fetch_marketplace(&self) -> Result<MarketplaceFeed, BuilderError> {
        let feed: MarketplaceFeed = self
            .fetch_feed(FeedKind::Marketplace, &self.marketplace_url)
            .await?;

        info!("Fetched {} marketplace entries", feed.index.len());

        Ok(feed)
    }
}
