use review_feed_models::{FilterQuery, NormalizedReview};

/// Apply every supplied predicate with AND semantics; absent fields
/// constrain nothing. Unrated reviews count as -1 against minimums, which
/// keeps them out of any rating-filtered view.
pub fn filter_reviews(list: Vec<NormalizedReview>, query: &FilterQuery) -> Vec<NormalizedReview> {
    let name_needle = query.listing_name.as_deref().map(str::to_lowercase);
    let search_needle = query.search.as_deref().map(str::to_lowercase);

    list.into_iter()
        .filter(|review| {
            if let Some(min) = query.min_rating {
                if review.rating.unwrap_or(-1.0) < min {
                    return false;
                }
            }
            if let Some(channel) = query.channel.as_deref() {
                if !review.channel.eq_ignore_ascii_case(channel) {
                    return false;
                }
            }
            if let Some(wanted) = query.review_type {
                if review.review_type != wanted {
                    return false;
                }
            }
            if let Some(listing_id) = query.listing_id.as_deref() {
                if review.listing_id.as_deref() != Some(listing_id) {
                    return false;
                }
            }
            if let Some(needle) = name_needle.as_deref() {
                let name = review.listing_name.as_deref().unwrap_or("").to_lowercase();
                if !name.contains(needle) {
                    return false;
                }
            }
            if let Some(needle) = search_needle.as_deref() {
                let blob = format!(
                    "{} {} {}",
                    review.content,
                    review.author_name.as_deref().unwrap_or(""),
                    review.listing_name.as_deref().unwrap_or("")
                )
                .to_lowercase();
                if !blob.contains(needle) {
                    return false;
                }
            }

            // Date bounds compare calendar days in UTC, both ends inclusive
            let day = review.submitted_at.date_naive();
            if let Some(from) = query.from {
                if day < from {
                    return false;
                }
            }
            if let Some(to) = query.to {
                if day > to {
                    return false;
                }
            }

            if let Some(category) = query.category.as_deref() {
                if !matches_category(review, category, query.category_min) {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// True when the review carries a sub-rating of the given name; with a
/// minimum set, that sub-rating must also be rated and meet it.
fn matches_category(review: &NormalizedReview, category: &str, min: Option<f64>) -> bool {
    review.categories.iter().any(|entry| {
        entry.category.eq_ignore_ascii_case(category)
            && match min {
                Some(min) => entry.rating.map(|rating| rating >= min).unwrap_or(false),
                None => true,
            }
    })
}
