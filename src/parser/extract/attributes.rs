use std::sync::LazyLock;

use scraper::Selector;
use tracing::{debug, warn};

use super::{Fragment, ReviewScope};
use crate::parser::document::{trimmed_text, DocumentTree};
use crate::parser::segment::AttributeSegmenter;
use crate::record::SENTINEL;

static CARD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.card-padding").unwrap());
static STRIP_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.review-data.review-format-strip").unwrap());
static SECONDARY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-color-secondary").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    pub color: String,
    pub size: String,
}

impl Attributes {
    pub fn unresolved() -> Self {
        Attributes {
            color: SENTINEL.to_string(),
            size: SENTINEL.to_string(),
        }
    }
}

/// One entry per format strip inside the review card region, `NA` where the
/// strip carries no usable colour/size text.
pub fn extract(
    doc: &DocumentTree,
    scope: &ReviewScope,
    segmenter: &AttributeSegmenter,
) -> Vec<Fragment<Attributes>> {
    let Some(card) = doc.select(&CARD_SEL).next() else {
        debug!("No review card region on page");
        return Vec::new();
    };

    card.select(&STRIP_SEL)
        .map(|strip| {
            let attrs = match strip.select(&SECONDARY_SEL).next() {
                Some(span) => {
                    let block = trimmed_text(&span);
                    let (color, size) = segmenter.color_and_size(&block);
                    if color == SENTINEL && size == SENTINEL {
                        warn!("Unresolved colour/size in {:?}", block);
                    }
                    Attributes { color, size }
                }
                None => Attributes::unresolved(),
            };
            scope.tag(&strip, attrs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Vec<Attributes> {
        let doc = DocumentTree::parse(html).unwrap();
        let scope = ReviewScope::new(&doc);
        extract(&doc, &scope, &AttributeSegmenter::default())
            .into_iter()
            .map(|f| f.value)
            .collect()
    }

    #[test]
    fn strips_inside_card_only() {
        let out = run(r#"
            <div class="a-row a-spacing-mini review-data review-format-strip">
              <span class="a-color-secondary">Colour: Red Size: 64GB</span></div>
            <div class="a-section card-padding">
              <div class="a-row a-spacing-mini review-data review-format-strip">
                <span class="a-color-secondary">Colour: Black Size: 128GB Pattern Name: Pro</span></div>
              <div class="a-row a-spacing-mini review-data review-format-strip"></div>
              <div class="a-row a-spacing-mini review-data review-format-strip">
                <span class="a-color-secondary">Style: Max</span></div>
            </div>"#);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].color, "Black");
        assert_eq!(out[0].size, "128GB");
        assert_eq!(out[1], Attributes::unresolved());
        assert_eq!(out[2], Attributes::unresolved());
    }

    #[test]
    fn no_card_region() {
        assert!(run("<div class='review-data review-format-strip'></div>").is_empty());
    }

    #[test]
    fn body_review_data_is_not_a_strip() {
        let out = run(r#"<div class="card-padding">
              <div class="a-row a-spacing-small review-data"><span class="review-text">hi</span></div>
            </div>"#);
        assert!(out.is_empty());
    }
}
