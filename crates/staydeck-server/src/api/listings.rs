use axum::extract::{Path, State};
use axum::Json;
use review_feed_core::sort_reviews;
use review_feed_models::{NormalizedReview, SortKey};
use serde::Serialize;
use std::collections::HashSet;

use super::approvals::store_error_response;
use super::server::AppContext;
use super::ApiError;

#[derive(Debug, Serialize)]
pub struct ApprovedReviewsEnvelope {
    pub status: &'static str,
    pub count: usize,
    pub result: Vec<NormalizedReview>,
}

/// GET /api/listings/:listing_id/reviews
///
/// Data source of the public property page: the listing's reviews
/// restricted to the ones a manager approved, newest first.
pub async fn approved_reviews(
    State(context): State<AppContext>,
    Path(listing_id): Path<i64>,
) -> Result<Json<ApprovedReviewsEnvelope>, ApiError> {
    let approvals = context
        .approvals
        .list_by_listing(listing_id)
        .await
        .map_err(store_error_response)?;
    let approved: HashSet<String> = approvals
        .into_iter()
        .filter(|record| record.approved)
        .map(|record| record.review_id)
        .collect();

    let listing_key = listing_id.to_string();
    let reviews = context.hostaway.fetch_reviews().await;
    let matching: Vec<NormalizedReview> = reviews
        .into_iter()
        .filter(|review| review.listing_id.as_deref() == Some(listing_key.as_str()))
        .filter(|review| approved.contains(&review.id))
        .collect();
    let result = sort_reviews(matching, SortKey::Newest);

    Ok(Json(ApprovedReviewsEnvelope {
        status: "success",
        count: result.len(),
        result,
    }))
}
