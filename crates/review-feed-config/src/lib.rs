pub mod config;
pub mod paths;

pub use config::{ApprovalsConfig, Config, GoogleConfig, HostawayConfig, ServerConfig};
pub use paths::{container_base_path, PathManager};
