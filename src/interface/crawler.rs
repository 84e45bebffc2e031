use crate::{CrawlMode, StdResult};

/// A trait for harvesting the dependents listing of a target repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DependentsCrawler {
    /// Crawls the dependents listing until its last page is reached.
    async fn crawl(&self, mode: CrawlMode) -> StdResult<()>;
}
