use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    pub id: String, // Upstream id when present, otherwise synthesized
    pub source: ReviewSource,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub rating: Option<f64>, // Overall rating; sub-ratings live in categories
    pub categories: Vec<ReviewCategory>,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_name: Option<String>,
    pub channel: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewCategory {
    pub category: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    Hostaway,
    Google,
    Booking,
    Airbnb,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewType {
    HostToGuest,
    GuestToHost,
    Guest, // Undirected channels, e.g. Google
}

impl ReviewType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "host-to-guest" => Some(Self::HostToGuest),
            "guest-to-host" => Some(Self::GuestToHost),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Published,
    Pending,
    Hidden,
    Archived,
}
