use std::sync::LazyLock;

use scraper::Selector;
use tracing::warn;

use super::{Fragment, ReviewScope};
use crate::parser::document::{text_content, DocumentTree};

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "a.a-size-base.a-link-normal.review-title.a-color-base.review-title-content.a-text-bold",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRating {
    pub rating: String,
    pub title: String,
}

/// Anchor text that did not have a rating line followed by a title line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTitle {
    pub raw: String,
}

pub type TitleRatingEntry = Result<TitleRating, MalformedTitle>;

/// Title anchors in document order. Malformed anchors keep their slot so
/// positional alignment stays in step.
pub fn extract(doc: &DocumentTree, scope: &ReviewScope) -> Vec<Fragment<TitleRatingEntry>> {
    doc.select(&TITLE_SEL)
        .map(|el| {
            let entry = split_title_rating(&text_content(&el));
            if let Err(bad) = &entry {
                warn!("Title anchor without rating/title lines: {:?}", bad.raw);
            }
            scope.tag(&el, entry)
        })
        .collect()
}

/// First non-blank line is the rating label, second is the title.
pub fn split_title_rating(text: &str) -> TitleRatingEntry {
    let mut lines = text.trim().split('\n').map(str::trim).filter(|l| !l.is_empty());
    match (lines.next(), lines.next()) {
        (Some(rating), Some(title)) => Ok(TitleRating {
            rating: rating.to_string(),
            title: title.to_string(),
        }),
        _ => Err(MalformedTitle {
            raw: text.trim().to_string(),
        }),
    }
}
