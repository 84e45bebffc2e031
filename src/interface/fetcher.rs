use crate::{ListingPage, PageUrl, StdResult};

/// A trait for driving the collaborator that fetches and renders listing pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PageFetcher: Sync + Send {
    /// Loads the page at the given URL and makes it the current page.
    async fn navigate_to(&self, url: &PageUrl) -> StdResult<()>;

    /// Returns the currently rendered listing page.
    async fn current_page(&self) -> StdResult<ListingPage>;
}
