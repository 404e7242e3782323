pub mod api;
pub mod normalize;

use reqwest::Client;
use review_feed_models::NormalizedReview;

use crate::error::SourceError;

/// Review source for the Google Places channel.
///
/// Unlike Hostaway there is no bundled fallback; callers surface every
/// error to their own clients.
pub struct GoogleClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    default_place_id: Option<String>,
}

impl GoogleClient {
    pub fn new(api_key: Option<String>, default_place_id: Option<String>) -> Self {
        Self::with_base_url(api::DEFAULT_BASE_URL, api_key, default_place_id)
    }

    /// Point the client at a different API root; used against test servers.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
        default_place_id: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
            default_place_id: default_place_id.filter(|id| !id.is_empty()),
        }
    }

    /// Place used when a request names none.
    pub fn default_place_id(&self) -> Option<&str> {
        self.default_place_id.as_deref()
    }

    /// Fetch and normalize the reviews attached to one place.
    pub async fn fetch_reviews(
        &self,
        place_id: &str,
    ) -> Result<Vec<NormalizedReview>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingConfig("Google API key"))?;

        let result =
            api::fetch_place_details(&self.client, &self.base_url, api_key, place_id).await?;
        Ok(normalize::normalize_reviews(result))
    }
}
