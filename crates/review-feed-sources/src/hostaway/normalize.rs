use chrono::{DateTime, NaiveDateTime, Utc};
use review_feed_models::{NormalizedReview, ReviewSource, ReviewStatus, ReviewType};
use uuid::Uuid;

use super::api::{HostawayReviewRaw, RawId};

/// Channel recorded when the upstream row does not carry one.
pub const DEFAULT_CHANNEL: &str = "hostaway";

/// Map raw Hostaway rows onto the canonical review shape.
pub fn normalize_reviews(rows: Vec<HostawayReviewRaw>) -> Vec<NormalizedReview> {
    rows.into_iter().map(normalize_review).collect()
}

fn normalize_review(raw: HostawayReviewRaw) -> NormalizedReview {
    NormalizedReview {
        id: raw
            .id
            .map(RawId::into_string)
            .unwrap_or_else(synthesize_review_id),
        source: ReviewSource::Hostaway,
        review_type: raw.review_type.unwrap_or(ReviewType::Guest),
        status: raw.status.unwrap_or(ReviewStatus::Published),
        rating: raw.rating,
        categories: raw.review_category.unwrap_or_default(),
        submitted_at: parse_submitted_at(raw.submitted_at.as_deref()),
        author_name: raw.guest_name,
        listing_id: raw.listing_id.map(RawId::into_string),
        listing_name: raw.listing_name,
        channel: raw.channel.unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
        content: raw.public_review.unwrap_or_default(),
    }
}

/// Random id for rows the upstream sent without one. Collisions across
/// refetches are acceptable; collisions within one batch are not.
fn synthesize_review_id() -> String {
    Uuid::new_v4().to_string()
}

/// Hostaway timestamps look like "2020-08-21 22:45:14". Swap the first
/// space for a T, take whatever parses, and substitute the current instant
/// for anything that does not.
fn parse_submitted_at(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };
    let iso_like = raw.replacen(' ', "T", 1);
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&iso_like) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(&iso_like, "%Y-%m-%dT%H:%M:%S") {
        return parsed.and_utc();
    }
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn raw_from_json(value: serde_json::Value) -> HostawayReviewRaw {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_preserves_populated_fields() {
        let raw = raw_from_json(json!({
            "id": 7453,
            "type": "host-to-guest",
            "status": "published",
            "rating": null,
            "publicReview": "Shane and family are wonderful! Would definitely host again :)",
            "reviewCategory": [
                {"category": "cleanliness", "rating": 10},
                {"category": "communication", "rating": 10}
            ],
            "submittedAt": "2020-08-21 22:45:14",
            "guestName": "Shane Finkelstein",
            "listingName": "2B N1 A - 29 Shoreditch Heights",
            "listingId": 100,
            "channel": "airbnb"
        }));

        let review = normalize_reviews(vec![raw]).remove(0);

        assert_eq!(review.id, "7453");
        assert_eq!(review.source, ReviewSource::Hostaway);
        assert_eq!(review.review_type, ReviewType::HostToGuest);
        assert_eq!(review.status, ReviewStatus::Published);
        assert_eq!(review.rating, None);
        assert_eq!(review.categories.len(), 2);
        assert_eq!(review.categories[0].category, "cleanliness");
        assert_eq!(review.categories[0].rating, Some(10.0));
        assert_eq!(
            review.submitted_at,
            Utc.with_ymd_and_hms(2020, 8, 21, 22, 45, 14).unwrap()
        );
        assert_eq!(review.author_name.as_deref(), Some("Shane Finkelstein"));
        assert_eq!(review.listing_id.as_deref(), Some("100"));
        assert_eq!(review.channel, "airbnb");
    }

    #[test]
    fn test_normalize_fills_defaults_for_empty_row() {
        let before = Utc::now();
        let review = normalize_reviews(vec![raw_from_json(json!({}))]).remove(0);

        assert!(!review.id.is_empty());
        assert_eq!(review.review_type, ReviewType::Guest);
        assert_eq!(review.status, ReviewStatus::Published);
        assert_eq!(review.rating, None);
        assert!(review.categories.is_empty());
        assert_eq!(review.channel, DEFAULT_CHANNEL);
        assert_eq!(review.content, "");
        assert_eq!(review.author_name, None);
        assert_eq!(review.listing_id, None);
        assert_eq!(review.listing_name, None);
        assert!(review.submitted_at >= before);
        assert!(review.submitted_at <= Utc::now() + Duration::seconds(1));
    }

    #[test]
    fn test_synthesized_ids_differ_between_rows() {
        let reviews = normalize_reviews(vec![
            raw_from_json(json!({})),
            raw_from_json(json!({})),
        ]);
        assert_ne!(reviews[0].id, reviews[1].id);
    }

    #[test]
    fn test_submitted_at_accepts_rfc3339_with_offset() {
        let review = normalize_reviews(vec![raw_from_json(json!({
            "id": 1,
            "submittedAt": "2021-01-02T03:04:05+02:00"
        }))])
        .remove(0);

        assert_eq!(
            review.submitted_at,
            Utc.with_ymd_and_hms(2021, 1, 2, 1, 4, 5).unwrap()
        );
    }

    #[test]
    fn test_submitted_at_unparseable_becomes_current_instant() {
        let before = Utc::now();
        let review = normalize_reviews(vec![raw_from_json(json!({
            "id": 1,
            "submittedAt": "yesterday evening"
        }))])
        .remove(0);

        assert!(review.submitted_at >= before);
        assert!(review.submitted_at <= Utc::now() + Duration::seconds(1));
    }
}
