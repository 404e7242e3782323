use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    pub listing_id: i64,
    pub review_id: String, // Matches NormalizedReview::id, numeric upstream ids stringified
    pub approved: bool,
    pub approved_at: DateTime<Utc>,
}

/// Composite key identifying one review decision within one listing.
pub fn review_key(listing_id: i64, review_id: &str) -> String {
    format!("{}:{}", listing_id, review_id)
}
