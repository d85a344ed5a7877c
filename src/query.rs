use crate::record::{ReviewRecord, ReviewRecordSet};

/// Attribute match over a persisted table: exact colour and size, rating by prefix.
#[derive(Debug, Clone)]
pub struct ReviewFilter {
    pub color: String,
    pub size: String,
    pub rating_prefix: String,
}

impl ReviewFilter {
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        record.color == self.color
            && record.size == self.size
            && record.rating.starts_with(&self.rating_prefix)
    }
}

/// Bodies of matching records, in table order.
pub fn filter_bodies(records: &ReviewRecordSet, filter: &ReviewFilter) -> Vec<String> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| r.body.clone())
        .collect()
}
