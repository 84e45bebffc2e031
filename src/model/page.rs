use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};

/// The address of one page of the dependents listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageUrl(pub String);

impl Deref for PageUrl {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for PageUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rendered listing page as exposed by the page fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// The address the page was fetched from.
    url: PageUrl,

    /// The rendered markup of the page.
    html: String,
}

impl ListingPage {
    /// Creates a new `ListingPage` instance.
    pub fn new(url: PageUrl, html: String) -> Self {
        Self { url, html }
    }

    /// Retrieves the page address.
    pub fn url(&self) -> &PageUrl {
        &self.url
    }

    /// Retrieves the rendered markup.
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// The outcome of resolving a pagination link on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The listing continues with the page at this address.
    Link(PageUrl),

    /// No page exists in the requested direction.
    Boundary,
}
