use std::env;
use std::path::PathBuf;

/// Base directory for containerized deployments. `STAYDECK_BASE_PATH`
/// overrides the conventional `/app`.
pub fn container_base_path() -> PathBuf {
    env::var("STAYDECK_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

/// Resolves where configuration, data and logs live, for both desktop
/// and container layouts.
#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    /// Platform directories via the `dirs` crate, with relative
    /// fallbacks for platforms where they cannot be resolved.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .map(|dir| dir.join("staydeck"))
            .unwrap_or_else(|| PathBuf::from("./config"));

        let data_dir = dirs::data_dir()
            .map(|dir| dir.join("staydeck"))
            .unwrap_or_else(|| PathBuf::from("./data"));

        let log_dir = dirs::data_dir()
            .map(|dir| dir.join("staydeck").join("logs"))
            .unwrap_or_else(|| PathBuf::from("./logs"));

        Self {
            config_dir,
            data_dir,
            log_dir,
        }
    }

    /// Fixed layout under the container base path.
    pub fn from_docker_env() -> Self {
        let base = container_base_path();

        Self {
            config_dir: base.join("config"),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &PathBuf {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn approvals_file(&self) -> PathBuf {
        self.data_dir.join("approvals.json")
    }

    pub fn server_log_file(&self) -> PathBuf {
        self.log_dir.join("staydeck.log")
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        let base = container_base_path();
        if base.exists() {
            Self::from_docker_env()
        } else {
            Self::new()
        }
    }
}
