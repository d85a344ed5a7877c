use std::sync::LazyLock;

use scraper::Selector;

use super::{Fragment, ReviewScope};
use crate::parser::document::{trimmed_text, DocumentTree};

static BADGE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-color-state.a-text-bold").unwrap());

/// Purchase-verification badges. Reviews without a badge contribute nothing,
/// so this sequence can be shorter than the others.
pub fn extract(doc: &DocumentTree, scope: &ReviewScope) -> Vec<Fragment<String>> {
    doc.select(&BADGE_SEL)
        .map(|el| scope.tag(&el, trimmed_text(&el)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_text_kept_verbatim() {
        let doc = DocumentTree::parse(
            r#"<span class="a-size-mini a-color-state a-text-bold"> Verified Purchase </span>
               <span class="a-color-state">Top contributor</span>"#,
        )
        .unwrap();
        let scope = ReviewScope::new(&doc);
        let out = extract(&doc, &scope);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, "Verified Purchase");
    }
}
