use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReviewError>;

/// Failures that end a run. Per-entry problems are reported through
/// [`crate::parser::align::EntryIssue`] instead.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("failed to retrieve {url}: {reason}")]
    Retrieval { url: String, reason: String },

    #[error("could not load document: {0}")]
    Parse(String),

    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),

    #[error("malformed table at line {line}: {reason}")]
    Table { line: usize, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl ReviewError {
    pub fn retrieval(url: &str, reason: impl ToString) -> Self {
        ReviewError::Retrieval {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
