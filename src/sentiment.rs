use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

/// Word polarity in [-1, 1].
static LEXICON: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("best", 1.0),
        ("bright", 0.7),
        ("decent", 0.17),
        ("excellent", 1.0),
        ("fantastic", 0.4),
        ("fast", 0.2),
        ("fine", 0.42),
        ("good", 0.7),
        ("great", 0.8),
        ("happy", 0.8),
        ("love", 0.5),
        ("nice", 0.6),
        ("perfect", 1.0),
        ("recommend", 0.3),
        ("smooth", 0.4),
        ("superb", 1.0),
        ("well", 0.3),
        ("worth", 0.3),
        ("awful", -1.0),
        ("bad", -0.7),
        ("broke", -0.5),
        ("broken", -0.4),
        ("disappointed", -0.75),
        ("disappointing", -0.6),
        ("expensive", -0.5),
        ("faulty", -0.6),
        ("hate", -0.8),
        ("heats", -0.3),
        ("horrible", -1.0),
        ("poor", -0.4),
        ("pricey", -0.3),
        ("slow", -0.3),
        ("terrible", -1.0),
        ("useless", -0.5),
        ("waste", -0.6),
        ("worst", -1.0),
        ("worse", -0.4),
    ]
    .into_iter()
    .collect()
});

const NEGATIONS: &[&str] = &["not", "no", "never", "isn't", "wasn't", "don't", "doesn't", "didn't"];
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("so", 1.2),
    ("super", 1.4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Mean polarity of the opinion words in `text`, in [-1, 1]. A negation
/// flips and dampens the next opinion word; an intensifier scales it.
pub fn polarity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let mut scores = Vec::new();
    let mut negate = false;
    let mut scale = 1.0;

    for word in WORD_RE.find_iter(&lower).map(|m| m.as_str()) {
        if NEGATIONS.contains(&word) {
            negate = true;
            continue;
        }
        if let Some((_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == word) {
            scale *= factor;
            continue;
        }
        if let Some(&p) = LEXICON.get(word) {
            let mut score = (p * scale).clamp(-1.0, 1.0);
            if negate {
                score *= -0.5;
            }
            scores.push(score);
            negate = false;
            scale = 1.0;
        }
    }

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

pub fn classify(text: &str) -> Sentiment {
    let score = polarity(text);
    if score > 0.0 {
        Sentiment::Positive
    } else if score < 0.0 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
