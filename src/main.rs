use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use log::{debug, info};

use github_dependents_crawler::{
    CrawlMode, DependentsCrawler, GITHUB_BASE_URL, HtmlDependentExtractor, HtmlPageNavigator,
    HttpPageFetcher, JsonFileStore, PageFetcher, PaginatedCrawler, StdResult, TargetRepository,
};

/// Command line arguments for the GitHub dependents crawler
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Repository whose dependents are harvested, in `owner/repo` form
    #[arg(short, long, value_parser = parse_target)]
    target: TargetRepository,

    /// Destination file for the harvested records, must end in `.json`
    #[arg(short, long, value_parser = parse_store_path)]
    output: PathBuf,

    /// Resume a previously interrupted crawl instead of starting fresh
    #[arg(short, long)]
    resume: bool,

    /// Base URL of the host serving the dependents listings
    #[arg(long, env = "GITHUB_BASE_URL", default_value = GITHUB_BASE_URL)]
    github_base_url: String,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    info!("Starting GitHub dependents crawling");
    let args = Args::parse();
    debug!("Arguments: {args:?}");
    let mode = if args.resume {
        CrawlMode::Resume
    } else {
        CrawlMode::Fresh
    };

    let fetcher = Arc::new(HttpPageFetcher::try_new()?);
    fetcher
        .navigate_to(&args.target.dependents_listing_url(&args.github_base_url))
        .await?;
    let crawler = build_crawler(fetcher.clone(), &args)?;
    crawler.crawl(mode).await?;
    info!("Crawling completed");

    Ok(())
}

fn build_crawler(fetcher: Arc<HttpPageFetcher>, args: &Args) -> StdResult<Arc<dyn DependentsCrawler>> {
    let extractor = Arc::new(HtmlDependentExtractor::try_new()?);
    let navigator = Arc::new(HtmlPageNavigator::try_new()?);
    let store = Arc::new(JsonFileStore::new(&args.output));

    Ok(Arc::new(PaginatedCrawler::new(
        fetcher, extractor, navigator, store,
    )))
}

fn parse_target(raw: &str) -> Result<TargetRepository, String> {
    raw.parse()
}

fn parse_store_path(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => Ok(path),
        _ => Err(format!("Invalid store path '{raw}', expected a '.json' file")),
    }
}
