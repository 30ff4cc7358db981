use std::{str::FromStr, sync::OnceLock, time::Duration};

use reqwest::{
    ClientBuilder as BaseClientBuilder,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use reqwest_middleware::{ClientBuilder as RetryableClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, info};

use crate::{errors::CrawlerError, request::Request, traits::CrawlerResponse};

const PAGE_TIMEOUT_SECONDS: u64 = 60;
const PAGE_MIN_SECS_BACKOFF: u64 = 2;
const PAGE_MAX_SECS_BACKOFF: u64 = 30;
const MAX_RETRY: u32 = 3;

const USER_AGENT: &str = "hopperdeck-sync/1.0 (+https://github.com/hopperdeck/hopperdeck)";

static REQWEST_CLIENT: OnceLock<ClientWithMiddleware> = OnceLock::new();

#[derive(Copy, Clone)]
pub struct UnprotectedCrawler {}

impl Default for UnprotectedCrawler {
    fn default() -> Self {
        Self::new()
    }
}

impl UnprotectedCrawler {
    pub fn new() -> Self {
        Self {}
    }

    fn create_client() -> &'static ClientWithMiddleware {
        REQWEST_CLIENT.get_or_init(|| {
            let base_client = BaseClientBuilder::new()
                .gzip(true)
                .timeout(Duration::from_secs(PAGE_TIMEOUT_SECONDS))
                .user_agent(USER_AGENT)
                .build()
                .expect("Valid base reqwest to be built");

            let retry_strat = ExponentialBackoff::builder()
                .retry_bounds(
                    Duration::from_secs(PAGE_MIN_SECS_BACKOFF),
                    Duration::from_secs(PAGE_MAX_SECS_BACKOFF),
                )
                .build_with_max_retries(MAX_RETRY);
            let retry_middleware = RetryTransientMiddleware::new_with_policy(retry_strat);

            RetryableClientBuilder::new(base_client)
                .with(retry_middleware)
                .build()
        })
    }

    /// Sends the request and hands back whatever the server answered,
    /// non-2xx included. Callers decide what a bad status means.
    pub async fn make_web_request(
        &self,
        request: Request,
    ) -> Result<CrawlerResponse, CrawlerError> {
        let client = Self::create_client();

        let mut request_builder = client.get(request.url.clone());

        if !request.headers.is_empty() {
            let mut header_map = HeaderMap::new();

            for (key, value) in request.headers.iter() {
                header_map.append(HeaderName::from_str(key)?, HeaderValue::from_str(value)?);
            }

            request_builder = request_builder.headers(header_map);
        }

        info!("Sending request to {}", request.url);

        let response = request_builder.send().await?;

        debug!("{response:?}");

        let status = response.status();
        let body = response.text().await?;

        Ok(CrawlerResponse { status, body })
    }
}
