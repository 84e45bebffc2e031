use std::{fmt::Display, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

use super::PageUrl;

/// The name of the namespace owning a repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OwnerName(pub String);

impl Deref for OwnerName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for OwnerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The name of a repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(pub String);

impl Deref for RepositoryName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of stars a repository has.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StarsCounter(pub u32);

impl Deref for StarsCounter {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for StarsCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number of forks a repository has.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForksCounter(pub u32);

impl Deref for ForksCounter {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ForksCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository depending on the crawled target, harvested from one listing page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    /// The name of the namespace owning the dependent repository.
    owner: OwnerName,

    /// The name of the dependent repository.
    repo: RepositoryName,

    /// The number of stars the dependent repository has.
    stars: StarsCounter,

    /// The number of forks the dependent repository has.
    forks: ForksCounter,

    /// The listing page preceding the one this record was harvested from,
    /// absent for records found on the first page. Only used to resume an
    /// interrupted crawl.
    #[serde(rename = "previousGithubDependentsPageUrl")]
    previous_page_url: Option<PageUrl>,
}

impl Dependent {
    /// Creates a new `Dependent` instance without a backward page link.
    pub fn new(owner: &str, repo: &str, stars: u32, forks: u32) -> Self {
        Self {
            owner: OwnerName(owner.to_string()),
            repo: RepositoryName(repo.to_string()),
            stars: StarsCounter(stars),
            forks: ForksCounter(forks),
            previous_page_url: None,
        }
    }

    /// Returns this record with its backward page link set.
    pub fn with_previous_page_url(mut self, url: PageUrl) -> Self {
        self.previous_page_url = Some(url);
        self
    }

    /// Retrieves the owner name.
    pub fn owner(&self) -> &OwnerName {
        &self.owner
    }

    /// Retrieves the repository name.
    pub fn repo(&self) -> &RepositoryName {
        &self.repo
    }

    /// Retrieves the stars counter.
    pub fn stars(&self) -> &StarsCounter {
        &self.stars
    }

    /// Retrieves the forks counter.
    pub fn forks(&self) -> &ForksCounter {
        &self.forks
    }

    /// Retrieves the backward page link, if any.
    pub fn previous_page_url(&self) -> Option<&PageUrl> {
        self.previous_page_url.as_ref()
    }
}

impl Display for Dependent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dependent: {}/{}, Stars: {}, Forks: {}",
            self.owner, self.repo, self.stars, self.forks
        )
    }
}

/// The repository whose dependents listing is crawled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRepository {
    owner: OwnerName,
    repo: RepositoryName,
}

impl TargetRepository {
    /// Creates a new `TargetRepository` instance.
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: OwnerName(owner.to_string()),
            repo: RepositoryName(repo.to_string()),
        }
    }

    /// Builds the URL of the first page of the dependents listing.
    pub fn dependents_listing_url(&self, base_url: &str) -> PageUrl {
        PageUrl(format!(
            "{base_url}/{}/{}/network/dependents",
            self.owner, self.repo
        ))
    }
}

impl FromStr for TargetRepository {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let is_identifier = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        let (owner, repo) = raw
            .split_once('/')
            .ok_or_else(|| format!("Invalid target '{raw}', expected 'owner/repo'"))?;
        if !is_identifier(owner) || !is_identifier(repo) {
            return Err(format!("Invalid target '{raw}', expected 'owner/repo'"));
        }

        Ok(Self::new(owner, repo))
    }
}

impl Display for TargetRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The mode a crawl run starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlMode {
    /// Start from the first listing page, discarding any persisted records.
    Fresh,

    /// Re-enter the listing at the page recorded by the last persisted record.
    Resume,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    mod dependent {
        use super::*;

        #[test]
        fn serializes_to_wire_format_without_backward_link() {
            let dependent = Dependent::new("org-1", "repository-1", 1234, 56);

            let value = serde_json::to_value(&dependent).unwrap();

            assert_eq!(
                json!({
                    "owner": "org-1",
                    "repo": "repository-1",
                    "stars": 1234,
                    "forks": 56,
                    "previousGithubDependentsPageUrl": null
                }),
                value
            );
        }

        #[test]
        fn serializes_to_wire_format_with_backward_link() {
            let dependent = Dependent::new("org-1", "repository-1", 1234, 56)
                .with_previous_page_url(PageUrl("https://github.com/page-1".to_string()));

            let value = serde_json::to_value(&dependent).unwrap();

            assert_eq!(
                json!({
                    "owner": "org-1",
                    "repo": "repository-1",
                    "stars": 1234,
                    "forks": 56,
                    "previousGithubDependentsPageUrl": "https://github.com/page-1"
                }),
                value
            );
        }

        #[test]
        fn deserializes_from_wire_format() {
            let dependent: Dependent = serde_json::from_value(json!({
                "owner": "org-1",
                "repo": "repository-1",
                "stars": 1234,
                "forks": 56,
                "previousGithubDependentsPageUrl": null
            }))
            .unwrap();

            assert_eq!(Dependent::new("org-1", "repository-1", 1234, 56), dependent);
        }

        #[test]
        fn records_differing_only_in_backward_link_are_not_equal() {
            let dependent = Dependent::new("org-1", "repository-1", 1234, 56);
            let linked = dependent
                .clone()
                .with_previous_page_url(PageUrl("https://github.com/page-1".to_string()));

            assert_ne!(dependent, linked);
        }
    }

    mod target_repository {
        use super::*;

        #[test]
        fn parses_owner_and_repo() {
            let target: TargetRepository = "org-1/repository-1".parse().unwrap();

            assert_eq!(TargetRepository::new("org-1", "repository-1"), target);
        }

        #[test]
        fn rejects_missing_separator() {
            "org-1".parse::<TargetRepository>().unwrap_err();
        }

        #[test]
        fn rejects_empty_parts() {
            "/repository-1".parse::<TargetRepository>().unwrap_err();
            "org-1/".parse::<TargetRepository>().unwrap_err();
        }

        #[test]
        fn rejects_extra_separator() {
            "org-1/repository-1/extra"
                .parse::<TargetRepository>()
                .unwrap_err();
        }

        #[test]
        fn builds_dependents_listing_url() {
            let target = TargetRepository::new("org-1", "repository-1");

            assert_eq!(
                PageUrl("https://github.com/org-1/repository-1/network/dependents".to_string()),
                target.dependents_listing_url("https://github.com")
            );
        }
    }
}
