use reqwest::Client;
use review_feed_models::{ReviewCategory, ReviewStatus, ReviewType};
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://api.hostaway.com/v1";

/// Hostaway caps the reviews endpoint at 100 rows per request.
pub const PAGE_SIZE: i64 = 100;

/// Upstream ids arrive as either strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// One review row as the Hostaway API ships it. Every field is optional;
/// the normalizer fills the gaps.
#[derive(Debug, Clone, Deserialize)]
pub struct HostawayReviewRaw {
    pub id: Option<RawId>,
    #[serde(rename = "type")]
    pub review_type: Option<ReviewType>,
    pub status: Option<ReviewStatus>,
    pub rating: Option<f64>,
    #[serde(rename = "publicReview")]
    pub public_review: Option<String>,
    #[serde(rename = "reviewCategory")]
    pub review_category: Option<Vec<ReviewCategory>>,
    #[serde(rename = "submittedAt")]
    pub submitted_at: Option<String>, // e.g. "2020-08-21 22:45:14"
    #[serde(rename = "guestName")]
    pub guest_name: Option<String>,
    #[serde(rename = "listingName")]
    pub listing_name: Option<String>,
    #[serde(rename = "listingId")]
    pub listing_id: Option<RawId>,
    pub channel: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HostawayResponseRaw {
    pub status: Option<String>,
    pub result: Option<Vec<HostawayReviewRaw>>,
}

/// Validate a reviews envelope. One bad row rejects the whole page; a
/// missing result array counts as an empty page.
pub fn validate_reviews_payload(
    payload: serde_json::Value,
) -> Result<Vec<HostawayReviewRaw>, SourceError> {
    let parsed: HostawayResponseRaw = serde_json::from_value(payload)
        .map_err(|err| SourceError::Schema(format!("Hostaway reviews payload: {}", err)))?;
    Ok(parsed.result.unwrap_or_default())
}

/// Fetch one page of reviews for the account.
pub async fn fetch_reviews_page(
    client: &Client,
    base_url: &str,
    access_token: &str,
    account_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<HostawayReviewRaw>, SourceError> {
    let url = format!(
        "{}/reviews?accountId={}&limit={}&offset={}",
        base_url,
        urlencoding::encode(account_id),
        limit,
        offset
    );

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("Accept", "application/json")
        .header("Cache-Control", "no-cache")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(SourceError::Fetch(format!(
            "Hostaway reviews request returned {}: {}",
            status, error_text
        )));
    }

    let payload: serde_json::Value = response.json().await?;
    let rows = validate_reviews_payload(payload)?;
    debug!("Fetched {} Hostaway reviews at offset {}", rows.len(), offset);
    Ok(rows)
}

/// Walk the reviews endpoint offset by offset until a short page signals
/// the end of the collection. Pages are fetched sequentially.
pub async fn fetch_all_reviews(
    client: &Client,
    base_url: &str,
    access_token: &str,
    account_id: &str,
    page_size: i64,
) -> Result<Vec<HostawayReviewRaw>, SourceError> {
    let mut all = Vec::new();
    let mut offset = 0;

    loop {
        let page = fetch_reviews_page(client, base_url, access_token, account_id, page_size, offset)
            .await?;
        let fetched = page.len() as i64;
        all.extend(page);
        if fetched < page_size {
            break;
        }
        offset += page_size;
    }

    debug!("Fetched {} Hostaway reviews in total", all.len());
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_string_and_numeric_ids() {
        let rows = validate_reviews_payload(json!({
            "status": "success",
            "result": [
                {"id": 7453, "listingId": "100"},
                {"id": "g-1", "listingId": 200}
            ]
        }))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id.clone().unwrap().into_string(), "7453");
        assert_eq!(rows[0].listing_id.clone().unwrap().into_string(), "100");
        assert_eq!(rows[1].id.clone().unwrap().into_string(), "g-1");
    }

    #[test]
    fn test_validate_treats_missing_result_as_empty() {
        let rows = validate_reviews_payload(json!({"status": "success"})).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_validate_rejects_mistyped_rows() {
        let err = validate_reviews_payload(json!({
            "result": [{"id": 1, "rating": "excellent"}]
        }))
        .unwrap_err();
        assert!(matches!(err, SourceError::Schema(_)));

        let err = validate_reviews_payload(json!({
            "result": [{"type": "guest-to-guest"}]
        }))
        .unwrap_err();
        assert!(matches!(err, SourceError::Schema(_)));
    }

    #[test]
    fn test_validate_ignores_unknown_fields() {
        let rows = validate_reviews_payload(json!({
            "result": [{"id": 1, "departureDate": "2024-05-01", "arrivalDate": "2024-04-28"}]
        }))
        .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
