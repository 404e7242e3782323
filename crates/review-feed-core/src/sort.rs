use review_feed_models::{NormalizedReview, SortKey};

/// Sort a review list by the given key. The sort is stable, so reviews that
/// compare equal keep their incoming order.
pub fn sort_reviews(mut list: Vec<NormalizedReview>, key: SortKey) -> Vec<NormalizedReview> {
    match key {
        SortKey::Newest => list.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at)),
        SortKey::Oldest => list.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at)),
        // Unrated reviews count as -1, which sinks them below every real rating
        SortKey::Rating => list.sort_by(|a, b| {
            b.rating
                .unwrap_or(-1.0)
                .total_cmp(&a.rating.unwrap_or(-1.0))
        }),
    }
    list
}
