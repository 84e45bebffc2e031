use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};
use tokio::sync::Mutex;

use crate::{
    CrawlMode, Dependent, DependentExtractor, DependentStore, DependentsCrawler, ListingPage,
    NavigationOutcome, PageFetcher, PageNavigator, ResumeError, StdResult,
};

/// Running totals for one crawl
#[derive(Debug, Default)]
struct CrawlProgress {
    pages_processed: u32,
    total_extracted: u32,
    total_persisted: u32,
    total_collisions: u32,
}

/// A crawler walking the dependents listing one page at a time, persisting
/// each page before moving to the next one.
pub struct PaginatedCrawler {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn DependentExtractor>,
    navigator: Arc<dyn PageNavigator>,
    store: Arc<dyn DependentStore>,
    state: Mutex<CrawlProgress>,
}

impl PaginatedCrawler {
    /// Creates a new `PaginatedCrawler` instance with the given collaborators.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn DependentExtractor>,
        navigator: Arc<dyn PageNavigator>,
        store: Arc<dyn DependentStore>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            navigator,
            store,
            state: Mutex::new(CrawlProgress::default()),
        }
    }

    /// Repositions the fetcher one page past the backward link of the last
    /// persisted record. Returns `true` when the store already covers the
    /// final listing page.
    async fn position_for_resume(&self) -> StdResult<bool> {
        let records = self.store.load().await?;
        let last_record = records.last().ok_or(ResumeError::StoreEmpty)?;
        let Some(previous_url) = last_record.previous_page_url() else {
            // Records without a backward link come from the first page, the
            // fetcher is already positioned there.
            return Ok(false);
        };

        info!("Resuming from the page following {previous_url}");
        self.fetcher.navigate_to(previous_url).await?;
        let page = self.fetcher.current_page().await?;
        match self.navigator.next_page(&page)? {
            NavigationOutcome::Link(next_url) => {
                self.fetcher.navigate_to(&next_url).await?;
                Ok(false)
            }
            NavigationOutcome::Boundary => Ok(true),
        }
    }

    async fn filter_already_persisted(
        &self,
        batch: Vec<Dependent>,
    ) -> StdResult<Vec<Dependent>> {
        let persisted = self.store.load().await?;

        Ok(batch
            .into_iter()
            .filter(|dependent| !persisted.contains(dependent))
            .collect())
    }

    async fn process_page(
        &self,
        page: &ListingPage,
        overwrite_pending: bool,
        progress: &mut CrawlProgress,
    ) -> StdResult<()> {
        let extracted = self
            .extractor
            .extract(page)
            .with_context(|| format!("Extraction failed on {}", page.url()))?;
        if extracted.is_empty() {
            info!("No dependents found on {}", page.url());
        }
        for dependent in &extracted {
            info!("Extracted {dependent}");
        }
        let total_extracted = extracted.len() as u32;

        let batch = if overwrite_pending {
            extracted
        } else {
            self.filter_already_persisted(extracted).await?
        };
        let batch = match self.navigator.previous_page(page)? {
            NavigationOutcome::Link(previous_url) => batch
                .into_iter()
                .map(|dependent| dependent.with_previous_page_url(previous_url.clone()))
                .collect::<Vec<_>>(),
            NavigationOutcome::Boundary => batch,
        };

        if overwrite_pending {
            self.store.initialize().await?;
        }
        let total_appended = self.store.append_deduped(&batch).await?;
        progress.pages_processed += 1;
        progress.total_extracted += total_extracted;
        progress.total_persisted += total_appended;
        progress.total_collisions += total_extracted - total_appended;

        Ok(())
    }
}

#[async_trait::async_trait]
impl DependentsCrawler for PaginatedCrawler {
    async fn crawl(&self, mode: CrawlMode) -> StdResult<()> {
        if mode == CrawlMode::Resume && self.position_for_resume().await? {
            info!("Persisted store already covers the last listing page, nothing left to crawl");
            return Ok(());
        }

        let mut progress = self.state.lock().await;
        // The initializing overwrite of a fresh run happens at the first
        // persist, later pages of the same run always append.
        let mut overwrite_pending = mode == CrawlMode::Fresh;
        loop {
            let page = self.fetcher.current_page().await?;
            info!("Processing listing page {}", page.url());
            self.process_page(&page, overwrite_pending, &mut progress)
                .await?;
            overwrite_pending = false;

            warn!(
                "Dependents: persisted={}, collisions={}, Pages: done={}",
                progress.total_persisted, progress.total_collisions, progress.pages_processed
            );

            match self.navigator.next_page(&page)? {
                NavigationOutcome::Boundary => break,
                NavigationOutcome::Link(next_url) => self.fetcher.navigate_to(&next_url).await?,
            }
        }
        info!(
            "Crawl finished: extracted={}, persisted={} dependents over {} pages",
            progress.total_extracted, progress.total_persisted, progress.pages_processed
        );

        Ok(())
    }
}
