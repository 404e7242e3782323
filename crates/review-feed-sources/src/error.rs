use thiserror::Error;

/// Failures surfaced by the review source adapters.
///
/// Field-level parse problems never show up here; the normalizers absorb
/// those with documented defaults.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} is not configured")]
    MissingConfig(&'static str),
    #[error("upstream request failed: {0}")]
    Fetch(String),
    #[error("upstream payload failed validation: {0}")]
    Schema(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL so query-string credentials never reach logs or clients
        Self::Fetch(err.without_url().to_string())
    }
}
