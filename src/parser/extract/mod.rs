pub mod attributes;
pub mod body;
pub mod title_rating;
pub mod verified;

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::debug;

use super::document::DocumentTree;
use super::segment::AttributeSegmenter;
use attributes::Attributes;
use title_rating::TitleRatingEntry;

static REVIEW_SCOPE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[data-hook="review"]"#).unwrap());

/// Identity of the review a fragment belongs to: the position of its
/// enclosing review container in document order, plus that container's DOM id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReviewKey {
    pub ordinal: usize,
    pub dom_id: Option<String>,
}

/// One located piece of text. `key` is `None` when the node sits outside
/// any review container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<T> {
    pub key: Option<ReviewKey>,
    pub value: T,
}

/// Review containers of a document, used to tag fragments with a [`ReviewKey`].
pub struct ReviewScope<'a> {
    containers: Vec<ElementRef<'a>>,
}

impl<'a> ReviewScope<'a> {
    pub fn new(doc: &'a DocumentTree) -> Self {
        ReviewScope {
            containers: doc.select(&REVIEW_SCOPE_SEL).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Key of the innermost review container enclosing `el` (or `el` itself).
    pub fn key_for(&self, el: &ElementRef<'_>) -> Option<ReviewKey> {
        std::iter::once(*el)
            .chain(el.ancestors().filter_map(ElementRef::wrap))
            .find_map(|node| {
                self.containers
                    .iter()
                    .position(|c| c.id() == node.id())
                    .map(|ordinal| ReviewKey {
                        ordinal,
                        dom_id: node.value().id().map(str::to_string),
                    })
            })
    }

    pub fn tag<T>(&self, el: &ElementRef<'_>, value: T) -> Fragment<T> {
        Fragment {
            key: self.key_for(el),
            value,
        }
    }
}

/// Output of all four extractors for one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFragments {
    pub bodies: Vec<Fragment<String>>,
    pub title_ratings: Vec<Fragment<TitleRatingEntry>>,
    pub verified: Vec<Fragment<String>>,
    pub attributes: Vec<Fragment<Attributes>>,
    /// Number of review containers found.
    pub reviews: usize,
}

/// Run every extractor over the same tree. Extractors are independent of one
/// another; each only preserves its own document order.
pub fn extract_all(doc: &DocumentTree, segmenter: &AttributeSegmenter) -> ExtractedFragments {
    let scope = ReviewScope::new(doc);
    let bodies = body::extract(doc, &scope);
    let title_ratings = title_rating::extract(doc, &scope);
    let verified = verified::extract(doc, &scope);
    let attributes = attributes::extract(doc, &scope, segmenter);

    debug!(
        reviews = scope.len(),
        bodies = bodies.len(),
        titles = title_ratings.len(),
        verified = verified.len(),
        attributes = attributes.len(),
        "Extracted fragments"
    );

    ExtractedFragments {
        bodies,
        title_ratings,
        verified,
        attributes,
        reviews: scope.len(),
    }
}

// ── Tests ──
