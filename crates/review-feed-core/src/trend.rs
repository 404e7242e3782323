use std::collections::BTreeMap;

use review_feed_models::NormalizedReview;
use serde::Serialize;

/// One calendar month of review activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: String, // "YYYY-MM" in UTC
    pub avg: Option<f64>,
    pub count: usize,
}

/// Bucket reviews by UTC calendar month, ascending by month. `count` covers
/// every review in the bucket while `avg` covers only the rated ones; a
/// bucket holding nothing but unrated reviews has no average.
pub fn bucket_by_month(list: &[NormalizedReview]) -> Vec<MonthBucket> {
    let mut buckets: BTreeMap<String, (f64, usize, usize)> = BTreeMap::new();

    for review in list {
        let key = review.submitted_at.format("%Y-%m").to_string();
        let entry = buckets.entry(key).or_insert((0.0, 0, 0));
        if let Some(rating) = review.rating {
            entry.0 += rating;
            entry.1 += 1;
        }
        entry.2 += 1;
    }

    buckets
        .into_iter()
        .map(|(month, (sum, rated, count))| MonthBucket {
            month,
            avg: if rated > 0 {
                Some(sum / rated as f64)
            } else {
                None
            },
            count,
        })
        .collect()
}
