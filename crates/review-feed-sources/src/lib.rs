pub mod error;
pub mod google;
pub mod hostaway;

pub use error::SourceError;
pub use google::GoogleClient;
pub use hostaway::{AccessTokenProvider, HostawayClient};
