/// Placeholder for any field the page did not provide.
pub const SENTINEL: &str = "NA";

/// Column order of every persisted table.
pub const COLUMNS: [&str; 6] = ["Review_Title", "Review Body", "Verified", "Color", "Size", "Rating"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub title: String,
    pub body: String,
    pub verified: String,
    pub color: String,
    pub size: String,
    pub rating: String,
}

impl ReviewRecord {
    /// Empty values collapse to [`SENTINEL`] so every column is populated.
    pub fn new(
        title: String,
        body: String,
        verified: Option<String>,
        color: String,
        size: String,
        rating: String,
    ) -> Self {
        ReviewRecord {
            title: or_sentinel(title),
            body: or_sentinel(body),
            verified: verified.map(or_sentinel).unwrap_or_else(|| SENTINEL.to_string()),
            color: or_sentinel(color),
            size: or_sentinel(size),
            rating: or_sentinel(rating),
        }
    }

    /// Field values in [`COLUMNS`] order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.title.as_str(),
            self.body.as_str(),
            self.verified.as_str(),
            self.color.as_str(),
            self.size.as_str(),
            self.rating.as_str(),
        ]
    }

    pub fn from_fields(fields: [String; 6]) -> Self {
        let [title, body, verified, color, size, rating] = fields;
        ReviewRecord::new(title, body, Some(verified), color, size, rating)
    }
}

fn or_sentinel(value: String) -> String {
    if value.trim().is_empty() {
        SENTINEL.to_string()
    } else {
        value
    }
}

/// All records of one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRecordSet {
    pub records: Vec<ReviewRecord>,
}

impl ReviewRecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReviewRecord> {
        self.records.iter()
    }
}

impl From<Vec<ReviewRecord>> for ReviewRecordSet {
    fn from(records: Vec<ReviewRecord>) -> Self {
        ReviewRecordSet { records }
    }
}
