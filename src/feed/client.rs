use log::{debug, error, info};
use std::time::Duration;

use super::{parse_feed, FeedDocument, FeedError, FeedQuery};
use crate::config::FeedConfig;

/// Reads the Blogger JSON feed of a single blog.
#[derive(Clone, Debug)]
pub struct FeedClient {
    http: reqwest::Client,
    blog_url: String,
    timeout_secs: u64,
}

impl FeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Request(e.to_string()))?;

        Ok(Self {
            http,
            blog_url: config.blog_url.clone(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub async fn fetch(&self, query: &FeedQuery) -> Result<FeedDocument, FeedError> {
        let url = query.to_url(&self.blog_url)?;
        info!("fetching feed {url}");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            error!("feed request to {url} failed: {e}");
            if e.is_timeout() {
                FeedError::Timeout(self.timeout_secs)
            } else {
                FeedError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        debug!("feed response status: {status}");
        if !status.is_success() {
            error!("feed {url} responded with {status}");
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            error!("error reading feed body: {e}");
            if e.is_timeout() {
                FeedError::Timeout(self.timeout_secs)
            } else {
                FeedError::Request(e.to_string())
            }
        })?;
        debug!("feed body length: {}", body.len());

        let document = parse_feed(&body).inspect_err(|e| error!("{e}"))?;
        info!("parsed {} feed entries", document.entries().len());
        Ok(document)
    }
}
