use crate::errors::ScraperError;
use scraper::{ElementRef, Html, Selector};

pub trait DocumentNode: Sized {
    /// Descendants matching a CSS selector, in document order.
    fn select_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError>;

    /// Direct element children matching a tag name, in document order.
    fn children_named(&self, tag: &str) -> Vec<Self>;

    /// Concatenated text of the node and all its descendants.
    fn text(&self) -> String;

    fn attr(&self, name: &str) -> Option<String>;

    fn select_first(&self, selector: &str) -> Result<Option<Self>, ScraperError> {
        Ok(self.select_all(selector)?.into_iter().next())
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|err| ScraperError::SelectorError(err.to_string()))
}

impl<'a> DocumentNode for ElementRef<'a> {
    fn select_all(&self, selector: &str) -> Result<Vec<Self>, ScraperError> {
        let selector = parse_selector(selector)?;
        Ok(self.select(&selector).collect())
    }

    fn children_named(&self, tag: &str) -> Vec<Self> {
        self.children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name().eq_ignore_ascii_case(tag))
            .collect()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }
}

/// Root element of a parsed document.
pub fn root(document: &Html) -> ElementRef<'_> {
    document.root_element()
}
