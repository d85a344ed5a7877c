pub mod align;
pub mod document;
pub mod extract;
pub mod segment;

use align::{AlignMode, AlignmentReport, MismatchPolicy};
use document::DocumentTree;
use segment::AttributeSegmenter;

use crate::error::Result;

/// Markup → tree → fragments → aligned records. The tree is dropped before returning.
pub fn process_document(
    markup: &str,
    mode: AlignMode,
    policy: MismatchPolicy,
) -> Result<AlignmentReport> {
    let doc = DocumentTree::parse(markup)?;
    let fragments = extract::extract_all(&doc, &AttributeSegmenter::default());
    align::align(&fragments, mode, policy)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SENTINEL;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn product_page_records() {
        let report =
            process_document(&fixture("product_page"), AlignMode::Keyed, MismatchPolicy::Abort).unwrap();
        assert_eq!(report.skipped(), 0);
        let r = &report.records.records;
        assert_eq!(r.len(), 3);

        assert_eq!(r[0].title, "Great phone");
        assert_eq!(r[0].rating, "5.0 out of 5 stars");
        assert_eq!(r[0].verified, "Verified Purchase");
        assert_eq!(r[0].color, "Black");
        assert_eq!(r[0].size, "128GB");
        assert!(r[0].body.starts_with("Fast, bright screen"));

        assert_eq!(r[1].color, "Blue");
        assert_eq!(r[1].size, "256 GB");

        assert_eq!(r[2].title, "Battery could be better");
        assert_eq!(r[2].color, SENTINEL);
        assert_eq!(r[2].size, SENTINEL);
        assert!(r.iter().all(|rec| rec.fields().iter().all(|f| !f.is_empty())));
    }

    #[test]
    fn keyed_and_positional_agree_on_clean_page() {
        let html = fixture("product_page");
        let keyed = process_document(&html, AlignMode::Keyed, MismatchPolicy::Abort).unwrap();
        let positional = process_document(&html, AlignMode::Positional, MismatchPolicy::Abort).unwrap();
        assert_eq!(keyed.records, positional.records);
    }

    #[test]
    fn missing_badge_keyed_keeps_every_review() {
        let report =
            process_document(&fixture("missing_badge"), AlignMode::Keyed, MismatchPolicy::Abort).unwrap();
        let r = &report.records.records;
        assert_eq!(r.len(), 3);
        assert_eq!(r[1].verified, SENTINEL);
        assert_eq!(r[2].verified, "Verified Purchase");
    }

    #[test]
    fn missing_badge_positional() {
        let html = fixture("missing_badge");
        assert!(process_document(&html, AlignMode::Positional, MismatchPolicy::Abort).is_err());
        let report = process_document(&html, AlignMode::Positional, MismatchPolicy::Truncate).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn same_input_same_output() {
        let html = fixture("product_page");
        let a = process_document(&html, AlignMode::Keyed, MismatchPolicy::Truncate).unwrap();
        let b = process_document(&html, AlignMode::Keyed, MismatchPolicy::Truncate).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn page_without_reviews() {
        let report = process_document(
            "<html><body><h1>Phone</h1></body></html>",
            AlignMode::Keyed,
            MismatchPolicy::Abort,
        )
        .unwrap();
        assert!(report.records.is_empty());
    }
}
