use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::Deserialize;
use tracing::warn;

use super::extract::attributes::Attributes;
use super::extract::title_rating::TitleRating;
use super::extract::{ExtractedFragments, Fragment};
use crate::error::{ReviewError, Result};
use crate::record::{ReviewRecord, ReviewRecordSet};

/// How fragments from different extractors are matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    /// Join on the enclosing review container.
    Keyed,
    /// Zip by index over the title/rating sequence.
    Positional,
}

/// What positional alignment does when sequence lengths disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Keep the first `min(lengths)` slots and report the rest as skipped.
    Truncate,
    /// Fail the run.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    MalformedTitle,
    MissingFragment,
}

/// A review entry that did not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIssue {
    pub kind: IssueKind,
    /// Position in the title/rating sequence, or the review container
    /// ordinal when the review has no title anchor.
    pub index: usize,
    pub detail: String,
}

impl fmt::Display for EntryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            IssueKind::MalformedTitle => "malformed title",
            IssueKind::MissingFragment => "missing fragment",
        };
        write!(f, "entry {}: {} ({})", self.index, kind, self.detail)
    }
}

#[derive(Debug, Clone)]
pub struct AlignmentReport {
    pub records: ReviewRecordSet,
    pub issues: Vec<EntryIssue>,
    /// Mode actually used; keyed alignment can fall back to positional.
    pub mode: AlignMode,
    /// Review containers found on the page.
    pub reviews: usize,
}

impl AlignmentReport {
    pub fn skipped(&self) -> usize {
        self.issues.len()
    }
}

pub fn align(
    fragments: &ExtractedFragments,
    mode: AlignMode,
    policy: MismatchPolicy,
) -> Result<AlignmentReport> {
    match mode {
        AlignMode::Keyed if fragments.title_ratings.iter().all(|f| f.key.is_some()) => {
            Ok(align_keyed(fragments))
        }
        AlignMode::Keyed => {
            warn!("Title anchors outside any review container, falling back to positional alignment");
            align_positional(fragments, policy)
        }
        AlignMode::Positional => align_positional(fragments, policy),
    }
}

fn align_keyed(fragments: &ExtractedFragments) -> AlignmentReport {
    let bodies = index_by_review(&fragments.bodies);
    let verified = index_by_review(&fragments.verified);
    let attributes = index_by_review(&fragments.attributes);

    let mut records = Vec::new();
    let mut issues = Vec::new();

    for (index, fragment) in fragments.title_ratings.iter().enumerate() {
        let Some(ordinal) = fragment.key.as_ref().map(|k| k.ordinal) else {
            continue;
        };
        let tr = match &fragment.value {
            Ok(tr) => tr,
            Err(bad) => {
                issues.push(malformed(index, &bad.raw));
                continue;
            }
        };
        let Some(body) = bodies.get(&ordinal) else {
            let review = fragment
                .key
                .as_ref()
                .and_then(|k| k.dom_id.clone())
                .unwrap_or_else(|| format!("#{}", ordinal));
            issues.push(EntryIssue {
                kind: IssueKind::MissingFragment,
                index,
                detail: format!("review {} has no body", review),
            });
            continue;
        };
        records.push(build(
            tr,
            body,
            verified.get(&ordinal).copied(),
            attributes.get(&ordinal).copied(),
        ));
    }

    let titled: HashSet<usize> = fragments
        .title_ratings
        .iter()
        .filter_map(|f| f.key.as_ref().map(|k| k.ordinal))
        .collect();
    let untitled: BTreeSet<usize> = bodies
        .keys()
        .chain(verified.keys())
        .chain(attributes.keys())
        .copied()
        .filter(|ordinal| !titled.contains(ordinal))
        .collect();
    issues.extend(untitled.into_iter().map(|ordinal| EntryIssue {
        kind: IssueKind::MissingFragment,
        index: ordinal,
        detail: format!("review #{} has no title anchor", ordinal),
    }));

    AlignmentReport {
        records: records.into(),
        issues,
        mode: AlignMode::Keyed,
        reviews: fragments.reviews,
    }
}

/// First fragment per review container; fragments outside any container are ignored.
fn index_by_review<T>(fragments: &[Fragment<T>]) -> HashMap<usize, &T> {
    let mut map = HashMap::new();
    for f in fragments {
        if let Some(key) = &f.key {
            map.entry(key.ordinal).or_insert(&f.value);
        }
    }
    map
}

fn align_positional(fragments: &ExtractedFragments, policy: MismatchPolicy) -> Result<AlignmentReport> {
    let titles = fragments.title_ratings.len();
    let lengths = [
        titles,
        fragments.bodies.len(),
        fragments.verified.len(),
        fragments.attributes.len(),
    ];
    let usable = lengths.iter().copied().min().unwrap_or(0);

    let mut issues = Vec::new();
    if lengths.iter().any(|&n| n != titles) {
        let detail = format!(
            "titles={} bodies={} verified={} attributes={}",
            lengths[0], lengths[1], lengths[2], lengths[3]
        );
        if policy == MismatchPolicy::Abort {
            return Err(ReviewError::StructuralMismatch(detail));
        }
        warn!("Fragment counts disagree ({}), keeping {} entries", detail, usable);
        issues.extend((usable..titles).map(|index| EntryIssue {
            kind: IssueKind::MissingFragment,
            index,
            detail: "beyond the shortest fragment sequence".to_string(),
        }));
    }

    let mut records = Vec::with_capacity(usable);
    for index in 0..usable {
        match &fragments.title_ratings[index].value {
            Ok(tr) => records.push(build(
                tr,
                &fragments.bodies[index].value,
                Some(&fragments.verified[index].value),
                Some(&fragments.attributes[index].value),
            )),
            Err(bad) => issues.push(malformed(index, &bad.raw)),
        }
    }
    issues.sort_by_key(|i| i.index);

    Ok(AlignmentReport {
        records: records.into(),
        issues,
        mode: AlignMode::Positional,
        reviews: fragments.reviews,
    })
}

fn build(
    tr: &TitleRating,
    body: &str,
    verified: Option<&String>,
    attributes: Option<&Attributes>,
) -> ReviewRecord {
    let attrs = attributes.cloned().unwrap_or_else(Attributes::unresolved);
    ReviewRecord::new(
        tr.title.clone(),
        body.to_string(),
        verified.cloned(),
        attrs.color,
        attrs.size,
        tr.rating.clone(),
    )
}

fn malformed(index: usize, raw: &str) -> EntryIssue {
    EntryIssue {
        kind: IssueKind::MalformedTitle,
        index,
        detail: format!("{:?}", raw),
    }
}

// ── Tests ──
