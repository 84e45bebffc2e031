use anyhow::anyhow;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{
    Direction, ListingPage, NavigationError, NavigationOutcome, PageNavigator, PageUrl, StdResult,
};

/// The group holding the previous and next pagination controls, in that order.
const PAGINATE_BUTTON_GROUP_SELECTOR: &str = "#dependents > div.paginate-container > div.BtnGroup";

/// The fallback representation, with the controls directly under the container.
const PAGINATE_CONTAINER_SELECTOR: &str = "#dependents > div.paginate-container";

/// Resolves pagination links from the rendered markup of a listing page.
pub struct HtmlPageNavigator {
    button_group_selector: Selector,
    container_selector: Selector,
}

/// One pagination control: an anchor when enabled, a bare button when disabled.
struct PaginationControl {
    target: Option<String>,
    disabled: bool,
}

impl From<ElementRef<'_>> for PaginationControl {
    fn from(element: ElementRef<'_>) -> Self {
        let target = element.value().attr("href").map(str::to_string);
        let disabled = element.value().attr("disabled").is_some() || target.is_none();

        Self { target, disabled }
    }
}

impl HtmlPageNavigator {
    /// Creates a new `HtmlPageNavigator` instance.
    pub fn try_new() -> StdResult<Self> {
        Ok(Self {
            button_group_selector: Selector::parse(PAGINATE_BUTTON_GROUP_SELECTOR)
                .map_err(|e| anyhow!("Invalid pagination group selector: {e}"))?,
            container_selector: Selector::parse(PAGINATE_CONTAINER_SELECTOR)
                .map_err(|e| anyhow!("Invalid pagination container selector: {e}"))?,
        })
    }

    fn pagination_controls(&self, document: &Html) -> Vec<PaginationControl> {
        if let Some(group) = document.select(&self.button_group_selector).next() {
            let controls = group
                .children()
                .filter_map(ElementRef::wrap)
                .map(PaginationControl::from)
                .collect::<Vec<_>>();
            if !controls.is_empty() {
                return controls;
            }
        }

        document
            .select(&self.container_selector)
            .next()
            .map(|container| {
                container
                    .children()
                    .filter_map(ElementRef::wrap)
                    .map(PaginationControl::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn control_outcome(
        &self,
        page: &ListingPage,
        direction: Direction,
        control: &PaginationControl,
    ) -> Result<NavigationOutcome, NavigationError> {
        match &control.target {
            Some(href) if !control.disabled => {
                let resolved = resolve_link(page.url(), href).ok_or_else(|| {
                    NavigationError::InvalidLinkTarget(direction, href.to_string())
                })?;
                Ok(NavigationOutcome::Link(resolved))
            }
            _ => Ok(NavigationOutcome::Boundary),
        }
    }
}

impl PageNavigator for HtmlPageNavigator {
    fn previous_page(&self, page: &ListingPage) -> Result<NavigationOutcome, NavigationError> {
        let document = Html::parse_document(page.html());
        let controls = self.pagination_controls(&document);
        match controls.first() {
            Some(control) => self.control_outcome(page, Direction::Previous, control),
            None => Err(NavigationError::ControlNotFound(Direction::Previous)),
        }
    }

    fn next_page(&self, page: &ListingPage) -> Result<NavigationOutcome, NavigationError> {
        let document = Html::parse_document(page.html());
        let controls = self.pagination_controls(&document);
        if let Some(control) = controls.get(1) {
            return self.control_outcome(page, Direction::Next, control);
        }

        // A page whose previous control links somewhere but which has no
        // second control is the last page of the listing.
        if matches!(self.previous_page(page), Ok(NavigationOutcome::Link(_))) {
            return Ok(NavigationOutcome::Boundary);
        }
        match controls.first() {
            Some(control) => self.control_outcome(page, Direction::Next, control),
            None => Err(NavigationError::ControlNotFound(Direction::Next)),
        }
    }
}

/// Resolves a pagination link target against the address of the current page.
fn resolve_link(base: &PageUrl, href: &str) -> Option<PageUrl> {
    let base = Url::parse(base.as_str()).ok()?;
    let resolved = base.join(href).ok()?;

    Some(PageUrl(resolved.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str =
        "https://github.com/org-1/repository-1/network/dependents?dependents_after=xyz";
    const PREVIOUS_URL: &str =
        "https://github.com/org-1/repository-1/network/dependents?dependents_before=abc";
    const NEXT_URL: &str =
        "https://github.com/org-1/repository-1/network/dependents?dependents_after=def";

    fn page_with_pagination(controls: &str) -> ListingPage {
        let html = format!(
            r#"<html><body><div id="dependents">
                <div class="Box"><div class="Box-header">Header</div></div>
                <div class="paginate-container">
                    <div class="BtnGroup">{controls}</div>
                </div>
            </div></body></html>"#
        );

        ListingPage::new(PageUrl(PAGE_URL.to_string()), html)
    }

    fn anchor(label: &str, href: &str) -> String {
        format!(r#"<a class="btn BtnGroup-item" href="{href}">{label}</a>"#)
    }

    fn disabled_button(label: &str) -> String {
        format!(r#"<button disabled="disabled" class="btn BtnGroup-item">{label}</button>"#)
    }

    #[test]
    fn previous_is_boundary_when_control_is_disabled() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let page = page_with_pagination(&format!(
            "{}{}",
            disabled_button("Previous"),
            anchor("Next", NEXT_URL)
        ));

        let outcome = navigator.previous_page(&page).unwrap();

        assert_eq!(NavigationOutcome::Boundary, outcome);
    }

    #[test]
    fn previous_returns_link_when_control_is_enabled() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let page = page_with_pagination(&format!(
            "{}{}",
            anchor("Previous", PREVIOUS_URL),
            anchor("Next", NEXT_URL)
        ));

        let outcome = navigator.previous_page(&page).unwrap();

        assert_eq!(
            NavigationOutcome::Link(PageUrl(PREVIOUS_URL.to_string())),
            outcome
        );
    }

    #[test]
    fn next_returns_link_when_second_control_is_enabled() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let page = page_with_pagination(&format!(
            "{}{}",
            disabled_button("Previous"),
            anchor("Next", NEXT_URL)
        ));

        let outcome = navigator.next_page(&page).unwrap();

        assert_eq!(NavigationOutcome::Link(PageUrl(NEXT_URL.to_string())), outcome);
    }

    #[test]
    fn next_is_boundary_when_second_control_is_disabled() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let page = page_with_pagination(&format!(
            "{}{}",
            anchor("Previous", PREVIOUS_URL),
            disabled_button("Next")
        ));

        let outcome = navigator.next_page(&page).unwrap();

        assert_eq!(NavigationOutcome::Boundary, outcome);
    }

    #[test]
    fn next_is_boundary_when_only_a_previous_link_remains() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let page = page_with_pagination(&anchor("Previous", PREVIOUS_URL));

        let outcome = navigator.next_page(&page).unwrap();

        assert_eq!(NavigationOutcome::Boundary, outcome);
    }

    #[test]
    fn navigation_fails_when_no_pagination_control_exists() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let page = ListingPage::new(
            PageUrl(PAGE_URL.to_string()),
            r#"<html><body><div id="dependents"><div class="Box"></div></div></body></html>"#
                .to_string(),
        );

        assert_eq!(
            NavigationError::ControlNotFound(Direction::Previous),
            navigator.previous_page(&page).unwrap_err()
        );
        assert_eq!(
            NavigationError::ControlNotFound(Direction::Next),
            navigator.next_page(&page).unwrap_err()
        );
    }

    #[test]
    fn controls_directly_under_the_container_are_used_as_fallback() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let html = format!(
            r#"<html><body><div id="dependents">
                <div class="Box"></div>
                <div class="paginate-container">{}{}</div>
            </div></body></html>"#,
            anchor("Previous", PREVIOUS_URL),
            anchor("Next", NEXT_URL)
        );
        let page = ListingPage::new(PageUrl(PAGE_URL.to_string()), html);

        assert_eq!(
            NavigationOutcome::Link(PageUrl(PREVIOUS_URL.to_string())),
            navigator.previous_page(&page).unwrap()
        );
        assert_eq!(
            NavigationOutcome::Link(PageUrl(NEXT_URL.to_string())),
            navigator.next_page(&page).unwrap()
        );
    }

    #[test]
    fn relative_link_targets_are_resolved_against_the_page_url() {
        let navigator = HtmlPageNavigator::try_new().unwrap();
        let page = page_with_pagination(&format!(
            "{}{}",
            disabled_button("Previous"),
            anchor(
                "Next",
                "/org-1/repository-1/network/dependents?dependents_after=def"
            )
        ));

        let outcome = navigator.next_page(&page).unwrap();

        assert_eq!(NavigationOutcome::Link(PageUrl(NEXT_URL.to_string())), outcome);
    }
}
