use crate::{Dependent, ListingPage, ParseError};

/// A trait for extracting dependent records from a rendered listing page.
#[cfg_attr(test, mockall::automock)]
pub trait DependentExtractor: Sync + Send {
    /// Extracts the ordered sequence of dependent records found on the page.
    fn extract(&self, page: &ListingPage) -> Result<Vec<Dependent>, ParseError>;
}
