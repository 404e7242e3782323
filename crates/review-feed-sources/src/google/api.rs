use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Fields requested from the Place Details endpoint.
const DETAILS_FIELDS: &str = "name,place_id,reviews";

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleReviewRaw {
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub time: Option<f64>, // Unix timestamp (seconds)
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleResultRaw {
    pub name: Option<String>,
    pub place_id: Option<String>,
    pub reviews: Option<Vec<GoogleReviewRaw>>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleResponseRaw {
    pub status: Option<String>,
    pub result: Option<GoogleResultRaw>,
}

/// Validate a Place Details envelope. Unlike the Hostaway side there is no
/// fallback dataset, so a missing result object is an error.
pub fn validate_details_payload(
    payload: serde_json::Value,
) -> Result<GoogleResultRaw, SourceError> {
    let parsed: GoogleResponseRaw = serde_json::from_value(payload)
        .map_err(|err| SourceError::Schema(format!("Google place details payload: {}", err)))?;
    parsed.result.ok_or_else(|| {
        let status = parsed.status.unwrap_or_else(|| "unknown".to_string());
        SourceError::Schema(format!(
            "Google place details response has no result (status {})",
            status
        ))
    })
}

/// Fetch place details, which carry up to five of the place's most
/// relevant reviews.
pub async fn fetch_place_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    place_id: &str,
) -> Result<GoogleResultRaw, SourceError> {
    let url = format!(
        "{}/details/json?place_id={}&fields={}&key={}",
        base_url,
        urlencoding::encode(place_id),
        DETAILS_FIELDS,
        urlencoding::encode(api_key)
    );

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        // No body in the message; Google echoes the request URL into some
        // error bodies and the key must stay out of logs
        return Err(SourceError::Fetch(format!(
            "Google place details request returned {}",
            response.status()
        )));
    }

    let payload: serde_json::Value = response.json().await?;
    let result = validate_details_payload(payload)?;
    debug!(
        "Fetched {} Google reviews for place {}",
        result.reviews.as_ref().map(Vec::len).unwrap_or(0),
        place_id
    );
    Ok(result)
}
