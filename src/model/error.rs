use std::fmt::Display;

use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// The direction of a pagination lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the page preceding the current one.
    Previous,

    /// Towards the page following the current one.
    Next,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Previous => write!(f, "previous"),
            Direction::Next => write!(f, "next"),
        }
    }
}

/// Listing page extraction error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The dependents container is missing from the rendered page.
    #[error("Dependents container not found, the upstream is likely rate limiting or blocking")]
    ContainerNotFound,

    /// A data row does not match the dependent row pattern.
    #[error("Row #{row} does not match the dependent row pattern: '{text}'")]
    RowMismatch { row: usize, text: String },
}

/// Pagination resolution error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    /// No pagination control could be located in the requested direction.
    #[error("Unable to locate the {0} pagination control")]
    ControlNotFound(Direction),

    /// A pagination control carries a target that is not a valid URL.
    #[error("Invalid {0} pagination link target: '{1}'")]
    InvalidLinkTarget(Direction, String),
}

/// Persisted store error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The persisted content could not be read or deserialized.
    #[error("Store content is corrupt or missing: {0}")]
    CorruptOrMissing(String),

    /// The persisted content could not be written.
    #[error("Store write error: {0}")]
    Write(String),
}

/// Crawl resumption error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResumeError {
    /// Resume was requested but the store holds no record to resume from.
    #[error("Resume requested but the store contains no records")]
    StoreEmpty,
}
