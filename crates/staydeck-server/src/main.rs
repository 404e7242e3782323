use clap::{ArgAction, Parser};
use review_feed_config::{Config, PathManager};
use review_feed_core::{ApprovalStore, FileApprovalStore, MemoryApprovalStore};
use review_feed_sources::{GoogleClient, HostawayClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod api;
mod logging;

#[derive(Parser)]
#[command(name = "staydeck")]
#[command(about = "Staydeck - guest review feed, trends and approval service")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Write logs to this file with daily rotation instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let mut config =
        Config::load(cli.config.as_ref()).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    info!("Starting staydeck v{}", env!("CARGO_PKG_VERSION"));

    let hostaway = match &config.hostaway {
        Some(section) => {
            let client = HostawayClient::with_base_url(
                section.base_url.clone(),
                Some(section.account_id.clone()),
                Some(section.api_key.clone()),
            );
            match section.page_size {
                Some(page_size) => client.with_page_size(page_size),
                None => client,
            }
        }
        None => HostawayClient::new(None, None),
    };
    if !hostaway.has_credentials() {
        info!("Hostaway credentials not configured, serving the bundled dataset");
    }

    let google = match &config.google {
        Some(section) => GoogleClient::with_base_url(
            section.base_url.clone(),
            Some(section.api_key.clone()),
            section.place_id.clone(),
        ),
        None => GoogleClient::new(None, None),
    };

    let approvals: Arc<dyn ApprovalStore> = match &config.approvals {
        Some(section) => {
            let path = section
                .file
                .clone()
                .unwrap_or_else(|| PathManager::default().approvals_file());
            info!("Storing approvals in {}", path.display());
            Arc::new(FileApprovalStore::new(path))
        }
        None => {
            info!("No approvals file configured, keeping approvals in memory");
            Arc::new(MemoryApprovalStore::new())
        }
    };

    let context = api::AppContext {
        hostaway: Arc::new(hostaway),
        google: Arc::new(google),
        approvals,
    };

    api::server::run(context, &config.server.host, config.server.port).await
}
