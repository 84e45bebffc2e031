use crate::{ListingPage, NavigationError, NavigationOutcome};

/// A trait for resolving the pagination links of a rendered listing page.
#[cfg_attr(test, mockall::automock)]
pub trait PageNavigator: Sync + Send {
    /// Resolves the link to the listing page preceding this one.
    fn previous_page(&self, page: &ListingPage) -> Result<NavigationOutcome, NavigationError>;

    /// Resolves the link to the listing page following this one.
    fn next_page(&self, page: &ListingPage) -> Result<NavigationOutcome, NavigationError>;
}
