use std::time::Duration;

use anyhow::{Context, anyhow};
use log::warn;
use reqwest::Client;
use tokio::sync::RwLock;

use crate::{ListingPage, PageFetcher, PageUrl, StdResult};

/// The production host serving the dependents listings.
pub const GITHUB_BASE_URL: &str = "https://github.com";

const USER_AGENT: &str = concat!("github-dependents-crawler/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches listing pages over HTTP and keeps the last one as the current page.
pub struct HttpPageFetcher {
    client: Client,
    current_page: RwLock<Option<ListingPage>>,
}

impl HttpPageFetcher {
    /// Creates a new `HttpPageFetcher` instance.
    pub fn try_new() -> StdResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            current_page: RwLock::new(None),
        })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn navigate_to(&self, url: &PageUrl) -> StdResult<()> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .with_context(|| format!("Failed to load listing page {url}"))?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            // The rendered body is kept: a blocked or rate-limited page is
            // detected downstream through its missing dependents container.
            warn!("Listing page {url} answered with status {status}");
        }
        let mut current_page = self.current_page.write().await;
        *current_page = Some(ListingPage::new(url.clone(), body));

        Ok(())
    }

    async fn current_page(&self) -> StdResult<ListingPage> {
        let current_page = self.current_page.read().await;

        current_page
            .clone()
            .ok_or_else(|| anyhow!("No listing page has been loaded yet"))
    }
}
