use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use review_feed_core::{
    bucket_by_month, filter_reviews, paginate, sort_reviews, MonthBucket, DEFAULT_PER_PAGE,
};
use review_feed_models::{FilterQuery, NormalizedReview};
use review_feed_sources::SourceError;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::params;
use super::server::AppContext;
use super::{error_response, ApiError};

/// Raw query string of the review listing endpoints. Everything arrives as
/// text and is parsed leniently; bad values never reject the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListParams {
    pub min_rating: Option<String>,
    pub channel: Option<String>,
    #[serde(rename = "type")]
    pub review_type: Option<String>,
    pub listing_id: Option<String>,
    pub listing_name: Option<String>,
    pub search: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub category_min: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
    // Google only; the other endpoints ignore it
    pub place_id: Option<String>,
}

impl ReviewListParams {
    pub fn filter_query(&self) -> FilterQuery {
        FilterQuery {
            min_rating: params::opt_num(&self.min_rating),
            channel: params::opt_str(&self.channel),
            review_type: params::opt_review_type(&self.review_type),
            listing_id: params::opt_str(&self.listing_id),
            listing_name: params::opt_str(&self.listing_name),
            search: params::opt_str(&self.search),
            from: params::opt_date(&self.from),
            to: params::opt_date(&self.to),
            category: params::opt_str(&self.category),
            category_min: params::opt_num(&self.category_min),
        }
    }
}

/// `count` is the number of rows in this page; `total` is the size of the
/// filtered set before pagination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsEnvelope {
    pub status: &'static str,
    pub count: usize,
    pub total: usize,
    pub page: i64,
    pub per_page: i64,
    pub result: Vec<NormalizedReview>,
}

#[derive(Debug, Serialize)]
pub struct TrendsEnvelope {
    pub status: &'static str,
    pub count: usize,
    pub result: Vec<MonthBucket>,
}

fn run_pipeline(reviews: Vec<NormalizedReview>, params: &ReviewListParams) -> ReviewsEnvelope {
    let filtered = filter_reviews(reviews, &params.filter_query());
    let sorted = sort_reviews(filtered, params::sort_key(&params.sort));
    let page = paginate(
        sorted,
        params::num_or(&params.page, 1),
        params::num_or(&params.per_page, DEFAULT_PER_PAGE),
    );

    ReviewsEnvelope {
        status: "success",
        count: page.items.len(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        result: page.items,
    }
}

/// GET /api/reviews/hostaway
pub async fn list_hostaway(
    State(context): State<AppContext>,
    Query(params): Query<ReviewListParams>,
) -> Json<ReviewsEnvelope> {
    let reviews = context.hostaway.fetch_reviews().await;
    Json(run_pipeline(reviews, &params))
}

/// GET /api/reviews/hostaway/trends
///
/// Monthly buckets of the filtered set; sort and pagination do not apply.
pub async fn hostaway_trends(
    State(context): State<AppContext>,
    Query(params): Query<ReviewListParams>,
) -> Json<TrendsEnvelope> {
    let reviews = context.hostaway.fetch_reviews().await;
    let filtered = filter_reviews(reviews, &params.filter_query());
    let buckets = bucket_by_month(&filtered);

    Json(TrendsEnvelope {
        status: "success",
        count: buckets.len(),
        result: buckets,
    })
}

/// GET /api/reviews/google
pub async fn list_google(
    State(context): State<AppContext>,
    Query(params): Query<ReviewListParams>,
) -> Result<Json<ReviewsEnvelope>, ApiError> {
    let place_id = params::opt_str(&params.place_id)
        .or_else(|| context.google.default_place_id().map(String::from));
    let Some(place_id) = place_id else {
        return Err(error_response(StatusCode::BAD_REQUEST, "placeId is required"));
    };

    let reviews = context
        .google
        .fetch_reviews(&place_id)
        .await
        .map_err(source_error_response)?;

    Ok(Json(run_pipeline(reviews, &params)))
}

fn source_error_response(err: SourceError) -> ApiError {
    error!("Google reviews request failed: {}", err);
    let code = match err {
        SourceError::MissingConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SourceError::Fetch(_) | SourceError::Schema(_) => StatusCode::BAD_GATEWAY,
    };
    error_response(code, err.to_string())
}
