pub mod approval;
pub mod query;
pub mod review;

pub use approval::{review_key, ApprovalRecord};
pub use query::{FilterQuery, SortKey};
pub use review::{NormalizedReview, ReviewCategory, ReviewSource, ReviewStatus, ReviewType};
