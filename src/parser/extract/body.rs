use std::sync::LazyLock;

use scraper::Selector;

use super::{Fragment, ReviewScope};
use crate::parser::document::{trimmed_text, DocumentTree};

static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.review-text").unwrap());

/// Review bodies in document order, trimmed but otherwise untouched.
pub fn extract(doc: &DocumentTree, scope: &ReviewScope) -> Vec<Fragment<String>> {
    doc.select(&BODY_SEL)
        .map(|el| scope.tag(&el, trimmed_text(&el)))
        .collect()
}
