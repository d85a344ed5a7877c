use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ReviewError, Result};

/// Parsed product page. Read-only once built; every extractor borrows it.
pub struct DocumentTree {
    html: Html,
}

impl DocumentTree {
    /// Build a tree from raw markup. The HTML parser recovers from broken
    /// markup on its own, so only input with no content at all is rejected.
    pub fn parse(markup: &str) -> Result<Self> {
        if markup.trim().is_empty() {
            return Err(ReviewError::Parse("document is empty".into()));
        }
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            debug!("Recovered from {} markup errors", html.errors.len());
        }
        Ok(DocumentTree { html })
    }

    /// All elements matching `selector`, in document order.
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }
}

/// Concatenated text of `el` and all its descendants.
pub fn text_content(el: &ElementRef) -> String {
    el.text().collect()
}

/// Whitespace-trimmed [`text_content`].
pub fn trimmed_text(el: &ElementRef) -> String {
    text_content(el).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(DocumentTree::parse("  \n "), Err(ReviewError::Parse(_))));
    }

    #[test]
    fn broken_markup_still_loads() {
        let doc = DocumentTree::parse("<div><span class='review-text'>ok<div></span>").unwrap();
        let sel = Selector::parse("span.review-text").unwrap();
        let texts: Vec<String> = doc.select(&sel).map(|e| trimmed_text(&e)).collect();
        assert_eq!(texts, vec!["ok".to_string()]);
    }
}
