use chrono::{DateTime, TimeZone, Utc};
use review_feed_models::{NormalizedReview, ReviewSource, ReviewStatus, ReviewType};
use uuid::Uuid;

use super::api::GoogleResultRaw;

pub const CHANNEL: &str = "google";

/// Map a Place Details result onto the canonical review shape. The place
/// name and id double as listing name and listing id.
pub fn normalize_reviews(result: GoogleResultRaw) -> Vec<NormalizedReview> {
    let GoogleResultRaw {
        name,
        place_id,
        reviews,
    } = result;

    reviews
        .unwrap_or_default()
        .into_iter()
        .map(|raw| NormalizedReview {
            // Google keeps the submission epoch unique per place, so it
            // doubles as a stable id; rows without one get a random id
            id: raw
                .time
                .map(|epoch| format!("{}", epoch))
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            source: ReviewSource::Google,
            review_type: ReviewType::Guest,
            status: ReviewStatus::Published,
            rating: raw.rating,
            categories: Vec::new(),
            submitted_at: epoch_to_instant(raw.time),
            author_name: raw.author_name,
            listing_id: place_id.clone(),
            listing_name: name.clone(),
            channel: CHANNEL.to_string(),
            content: raw.text.unwrap_or_default(),
        })
        .collect()
}

fn epoch_to_instant(epoch_seconds: Option<f64>) -> DateTime<Utc> {
    epoch_seconds
        .and_then(|seconds| Utc.timestamp_millis_opt((seconds * 1000.0) as i64).single())
        .unwrap_or_else(Utc::now)
}
