pub mod approvals;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod trend;

pub use approvals::{ApprovalStore, FileApprovalStore, MemoryApprovalStore, StoreError};
pub use filter::filter_reviews;
pub use paginate::{paginate, Page, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use sort::sort_reviews;
pub use trend::{bucket_by_month, MonthBucket};
