use anyhow::anyhow;
use log::warn;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::{Dependent, DependentExtractor, ListingPage, ParseError, StdResult};

/// The container holding the header block and one block per dependent entry.
const DEPENDENTS_CONTAINER_SELECTOR: &str = "#dependents > div.Box";

/// The shape of one dependent row: owner, slash, repository, then the stars
/// and forks counters as digit groups optionally separated by commas.
const DEPENDENT_ROW_PATTERN: &str =
    r"^(?P<owner>[^\s/]+)\s*/\s*(?P<repo>\S+)\s+(?P<stars>\d+(?:,\d+)*)\s+(?P<forks>\d+(?:,\d+)*)$";

/// Extracts dependent records from the rendered markup of a listing page.
pub struct HtmlDependentExtractor {
    container_selector: Selector,
    row_pattern: Regex,
}

impl HtmlDependentExtractor {
    /// Creates a new `HtmlDependentExtractor` instance.
    pub fn try_new() -> StdResult<Self> {
        Ok(Self {
            container_selector: Selector::parse(DEPENDENTS_CONTAINER_SELECTOR)
                .map_err(|e| anyhow!("Invalid dependents container selector: {e}"))?,
            row_pattern: Regex::new(DEPENDENT_ROW_PATTERN)?,
        })
    }

    fn extract_row(&self, row_number: usize, text: &str) -> Result<Dependent, ParseError> {
        let mismatch = || ParseError::RowMismatch {
            row: row_number,
            text: text.to_string(),
        };
        let captures = self.row_pattern.captures(text).ok_or_else(mismatch)?;
        let stars = parse_counter(&captures["stars"]).ok_or_else(mismatch)?;
        let forks = parse_counter(&captures["forks"]).ok_or_else(mismatch)?;

        Ok(Dependent::new(
            &captures["owner"],
            &captures["repo"],
            stars,
            forks,
        ))
    }
}

impl DependentExtractor for HtmlDependentExtractor {
    fn extract(&self, page: &ListingPage) -> Result<Vec<Dependent>, ParseError> {
        let document = Html::parse_document(page.html());
        let container = document
            .select(&self.container_selector)
            .next()
            .ok_or(ParseError::ContainerNotFound)?;

        let mut dependents = Vec::new();
        // The first child of the container is the listing header, not a data row.
        let rows = container.children().filter_map(ElementRef::wrap).skip(1);
        for (index, row) in rows.enumerate() {
            let text = normalized_text(&row);
            match self.extract_row(index + 2, &text) {
                Ok(dependent) => dependents.push(dependent),
                Err(error) => warn!("Skipping listing row: {error}"),
            }
        }

        Ok(dependents)
    }
}

/// Collapses the row's text nodes into a single whitespace-normalized line.
fn normalized_text(row: &ElementRef) -> String {
    let text = row.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a counter value after stripping the thousands separators.
fn parse_counter(raw: &str) -> Option<u32> {
    raw.replace(',', "").parse::<u32>().ok()
}
