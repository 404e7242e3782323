use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use review_feed_core::StoreError;
use review_feed_models::ApprovalRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use super::server::AppContext;
use super::{error_response, ApiError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalListParams {
    pub listing_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApprovalsEnvelope {
    pub status: &'static str,
    pub result: Vec<ApprovalRecord>,
}

#[derive(Debug, Serialize)]
pub struct ApprovalEnvelope {
    pub status: &'static str,
    pub result: ApprovalRecord,
}

/// GET /api/approvals
///
/// All decisions, or one listing's when `listingId` parses. An unparsable
/// `listingId` falls back to "all" rather than erroring.
pub async fn list_approvals(
    State(context): State<AppContext>,
    Query(params): Query<ApprovalListParams>,
) -> Result<Json<ApprovalsEnvelope>, ApiError> {
    let result = match params.listing_id.as_deref().filter(|v| !v.is_empty()) {
        Some(raw) => match raw.parse::<f64>().ok().filter(|n| n.is_finite()) {
            // A fractional id can never match a stored listing
            Some(n) if n.fract() == 0.0 => context.approvals.list_by_listing(n as i64).await,
            Some(_) => Ok(Vec::new()),
            None => context.approvals.load_all().await,
        },
        None => context.approvals.load_all().await,
    }
    .map_err(store_error_response)?;

    Ok(Json(ApprovalsEnvelope {
        status: "success",
        result,
    }))
}

/// POST /api/approvals
///
/// Stores one decision and echoes it back with the server-assigned
/// `approvedAt` instant.
pub async fn upsert_approval(
    State(context): State<AppContext>,
    Json(body): Json<Value>,
) -> Result<Json<ApprovalEnvelope>, ApiError> {
    let listing_id = body.get("listingId").and_then(Value::as_i64);
    let review_id = body.get("reviewId").and_then(coerce_review_id);
    let approved = body.get("approved").and_then(Value::as_bool);

    let (Some(listing_id), Some(review_id), Some(approved)) = (listing_id, review_id, approved)
    else {
        return Err(error_response(StatusCode::BAD_REQUEST, "Invalid body"));
    };

    let record = ApprovalRecord {
        listing_id,
        review_id,
        approved,
        approved_at: Utc::now(),
    };
    context
        .approvals
        .upsert(record.clone())
        .await
        .map_err(store_error_response)?;

    Ok(Json(ApprovalEnvelope {
        status: "success",
        result: record,
    }))
}

// Review ids arrive as strings or numbers; both store as strings.
fn coerce_review_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

pub(super) fn store_error_response(err: StoreError) -> ApiError {
    error!("Approval store operation failed: {}", err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_feed_core::{ApprovalStore, MemoryApprovalStore};
    use review_feed_sources::{GoogleClient, HostawayClient};
    use std::sync::Arc;

    fn create_context() -> AppContext {
        let approvals: Arc<dyn ApprovalStore> = Arc::new(MemoryApprovalStore::new());
        AppContext {
            hostaway: Arc::new(HostawayClient::new(None, None)),
            google: Arc::new(GoogleClient::new(None, None)),
            approvals,
        }
    }

    fn list_params(listing_id: Option<&str>) -> ApprovalListParams {
        ApprovalListParams {
            listing_id: listing_id.map(String::from),
        }
    }

    async fn approve(context: &AppContext, body: Value) -> Result<Json<ApprovalEnvelope>, ApiError> {
        upsert_approval(State(context.clone()), Json(body)).await
    }

    #[tokio::test]
    async fn test_upsert_then_list_round_trip() {
        let context = create_context();

        let Json(stored) = approve(
            &context,
            serde_json::json!({"listingId": 100, "reviewId": "7453", "approved": true}),
        )
        .await
        .unwrap();
        assert_eq!(stored.status, "success");
        assert_eq!(stored.result.listing_id, 100);
        assert_eq!(stored.result.review_id, "7453");
        assert!(stored.result.approved);

        let Json(listed) = list_approvals(State(context), Query(list_params(Some("100"))))
            .await
            .unwrap();
        assert_eq!(listed.result.len(), 1);
        assert_eq!(listed.result[0].review_id, "7453");
    }

    #[tokio::test]
    async fn test_numeric_review_id_is_coerced_to_string() {
        let context = create_context();

        let Json(stored) = approve(
            &context,
            serde_json::json!({"listingId": 100, "reviewId": 7453, "approved": true}),
        )
        .await
        .unwrap();

        assert_eq!(stored.result.review_id, "7453");
    }

    #[tokio::test]
    async fn test_second_decision_replaces_the_first() {
        let context = create_context();

        approve(
            &context,
            serde_json::json!({"listingId": 100, "reviewId": "7453", "approved": true}),
        )
        .await
        .unwrap();
        approve(
            &context,
            serde_json::json!({"listingId": 100, "reviewId": "7453", "approved": false}),
        )
        .await
        .unwrap();

        let Json(listed) = list_approvals(State(context), Query(list_params(None)))
            .await
            .unwrap();
        assert_eq!(listed.result.len(), 1);
        assert!(!listed.result[0].approved);
    }

    #[tokio::test]
    async fn test_incomplete_body_is_rejected() {
        let context = create_context();

        for body in [
            serde_json::json!({"reviewId": "7453", "approved": true}),
            serde_json::json!({"listingId": 100, "approved": true}),
            serde_json::json!({"listingId": 100, "reviewId": "7453"}),
            serde_json::json!({"listingId": "100", "reviewId": "7453", "approved": true}),
            serde_json::json!({"listingId": 100, "reviewId": "", "approved": true}),
        ] {
            let (code, Json(envelope)) = approve(&context, body).await.unwrap_err();
            assert_eq!(code, StatusCode::BAD_REQUEST);
            assert_eq!(envelope.message, "Invalid body");
        }
    }

    #[tokio::test]
    async fn test_listing_id_parse_ladder() {
        let context = create_context();
        approve(
            &context,
            serde_json::json!({"listingId": 100, "reviewId": "7453", "approved": true}),
        )
        .await
        .unwrap();
        approve(
            &context,
            serde_json::json!({"listingId": 200, "reviewId": "8203", "approved": true}),
        )
        .await
        .unwrap();

        // Unparsable id means no listing filter at all
        let Json(listed) = list_approvals(State(context.clone()), Query(list_params(Some("abc"))))
            .await
            .unwrap();
        assert_eq!(listed.result.len(), 2);

        // A fractional id matches nothing
        let Json(listed) = list_approvals(State(context.clone()), Query(list_params(Some("1.5"))))
            .await
            .unwrap();
        assert!(listed.result.is_empty());

        let Json(listed) = list_approvals(State(context), Query(list_params(Some("200"))))
            .await
            .unwrap();
        assert_eq!(listed.result.len(), 1);
        assert_eq!(listed.result[0].review_id, "8203");
    }
}
