use chrono::NaiveDate;

use crate::review::ReviewType;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub min_rating: Option<f64>,
    pub channel: Option<String>, // Case-insensitive exact match
    pub review_type: Option<ReviewType>,
    pub listing_id: Option<String>, // Exact match
    pub listing_name: Option<String>, // Case-insensitive substring match
    pub search: Option<String>, // Matches content, author name and listing name
    pub from: Option<NaiveDate>, // Inclusive, compared on the UTC calendar day
    pub to: Option<NaiveDate>, // Inclusive
    pub category: Option<String>,
    pub category_min: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Rating, // Highest first, unrated last
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}
