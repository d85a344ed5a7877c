use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::record::SENTINEL;

pub const COLOUR_LABEL: &str = "Colour:";
pub const SIZE_LABEL: &str = "Size:";
pub const PATTERN_LABEL: &str = "Pattern Name:";

/// Ordered `(label, value)` pairs found in one attribute block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    pairs: Vec<(String, String)>,
}

impl AttributeMap {
    /// Value of the first occurrence of `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Splits a flat run like `"Colour: Black Size: 128GB Pattern Name: Pro"`
/// into labelled values. Labels are literal and case-sensitive.
#[derive(Debug, Clone)]
pub struct AttributeSegmenter {
    labels: Regex,
}

static DEFAULT_SEGMENTER: LazyLock<AttributeSegmenter> = LazyLock::new(|| {
    AttributeSegmenter::new(&[COLOUR_LABEL, SIZE_LABEL, PATTERN_LABEL]).unwrap()
});

impl Default for AttributeSegmenter {
    fn default() -> Self {
        DEFAULT_SEGMENTER.clone()
    }
}

impl AttributeSegmenter {
    pub fn new(labels: &[&str]) -> Result<Self, regex::Error> {
        // Longest label first so a label that prefixes another cannot shadow it.
        let mut sorted: Vec<&str> = labels.iter().copied().filter(|l| !l.is_empty()).collect();
        sorted.sort_by_key(|l| std::cmp::Reverse(l.len()));
        let pattern = sorted
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|");
        Ok(AttributeSegmenter {
            labels: Regex::new(&pattern)?,
        })
    }

    /// Every label occurrence opens a value that runs until the next label
    /// or the end of the text.
    pub fn segment(&self, text: &str) -> AttributeMap {
        let hits: Vec<_> = self.labels.find_iter(text).collect();
        let pairs = hits
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let end = hits.get(i + 1).map_or(text.len(), |next| next.start());
                (m.as_str().to_string(), text[m.end()..end].trim().to_string())
            })
            .collect();
        AttributeMap { pairs }
    }

    /// Resolve `(color, size)` from one block, falling back to [`SENTINEL`].
    ///
    /// The block must open with a colour label (any case), and a `Size:`
    /// marker must be present; otherwise both fields are unresolved.
    pub fn color_and_size(&self, block: &str) -> (String, String) {
        let block = block.trim();
        let unresolved = || (SENTINEL.to_string(), SENTINEL.to_string());

        if !block.to_lowercase().starts_with("colour") {
            return unresolved();
        }
        let map = self.segment(block);
        debug!(labels = map.pairs.len(), "Segmented attribute block");
        let Some(size) = map.get(SIZE_LABEL) else {
            return unresolved();
        };
        let color = map.get(COLOUR_LABEL).unwrap_or_default();
        (or_sentinel(color), or_sentinel(size))
    }
}

fn or_sentinel(value: &str) -> String {
    if value.is_empty() {
        SENTINEL.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(block: &str) -> (String, String) {
        AttributeSegmenter::default().color_and_size(block)
    }

    #[test]
    fn colour_size_pattern() {
        assert_eq!(
            split("Colour: Black Size: 128GB Pattern Name: Pro"),
            ("Black".to_string(), "128GB".to_string())
        );
    }

    #[test]
    fn no_pattern_runs_to_end() {
        assert_eq!(
            split("Colour: Pacific Blue Size: 256 GB"),
            ("Pacific Blue".to_string(), "256 GB".to_string())
        );
    }

    #[test]
    fn missing_size_marker() {
        assert_eq!(split("Colour: Black Pattern Name: Pro"), ("NA".to_string(), "NA".to_string()));
    }

    #[test]
    fn other_leading_label() {
        assert_eq!(split("Style: Pro Size: 128GB"), ("NA".to_string(), "NA".to_string()));
    }

    #[test]
    fn lowercase_leading_label_keeps_size_only() {
        // Passes the leading check but the exact "Colour:" marker is absent.
        assert_eq!(split("colour: red Size: M"), ("NA".to_string(), "M".to_string()));
    }

    #[test]
    fn default_segmenter_is_shared_and_usable() {
        let a = AttributeSegmenter::default();
        let b = AttributeSegmenter::default();
        assert_eq!(a.labels.as_str(), b.labels.as_str());
        assert_eq!(a.segment("Colour: Red Pattern Name: X").get(PATTERN_LABEL), Some("X"));
    }

    #[test]
    fn segment_returns_all_pairs_in_order() {
        let seg = AttributeSegmenter::new(&["Colour:", "Size:", "Style Name:"]).unwrap();
        let map = seg.segment("Colour: Gold Size: 64GB Style Name: Mini");
        assert_eq!(map.pairs.len(), 3);
        assert_eq!(map.get("Colour:"), Some("Gold"));
        assert_eq!(map.get("Size:"), Some("64GB"));
        assert_eq!(map.get("Style Name:"), Some("Mini"));
        assert_eq!(map.get("Pattern Name:"), None);
    }
}
