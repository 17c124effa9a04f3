//! CLI module for opsboard
//!
//! # Commands
//!
//! - `serve` - Run the dashboard front server and poller
//! - `status` - Fetch one status snapshot and print it
//! - `check-db` - Run the database topology check once
//! - `details` - Fetch deep metrics for one database host
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start the dashboard against a monitoring API
//! opsboard serve --upstream http://10.0.0.5:5000
//!
//! # One-shot topology check as JSON
//! opsboard check-db --json
//!
//! # Generate shell completions
//! opsboard completions bash > ~/.bash_completion.d/opsboard
//! ```

pub mod completions;
pub mod config;
pub mod db;
pub mod details;
pub mod output;
pub mod serve;
pub mod status;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::{OpsboardConfig, UpstreamConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// opsboard - operations dashboard front server
#[derive(Parser, Debug)]
#[command(
    name = "opsboard",
    version,
    about = "Operations dashboard for inference, database and server health"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dashboard server
    Serve(ServeArgs),
    /// Print the current status snapshot
    Status(StatusArgs),
    /// Check database replication topology
    CheckDb(CheckDbArgs),
    /// Show deep metrics for one database host
    Details(DetailsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "opsboard.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "OPSBOARD_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "OPSBOARD_HOST")]
    pub host: Option<String>,

    /// Override monitoring API base URL
    #[arg(short, long, env = "OPSBOARD_UPSTREAM_URL")]
    pub upstream: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "OPSBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Serve the page without background polling
    #[arg(long)]
    pub no_poll: bool,
}

/// Where one-shot commands find the monitoring API.
#[derive(Args, Debug, Clone)]
pub struct UpstreamArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "opsboard.toml")]
    pub config: PathBuf,

    /// Override monitoring API base URL
    #[arg(short, long, env = "OPSBOARD_UPSTREAM_URL")]
    pub upstream: Option<String>,
}

impl UpstreamArgs {
    /// Config file (when present) < environment < `--upstream`.
    pub fn load_config(&self) -> Result<OpsboardConfig, Box<dyn std::error::Error>> {
        let mut config = if self.config.exists() {
            OpsboardConfig::load(Some(&self.config))?
        } else {
            OpsboardConfig::default()
        }
        .with_env_overrides();

        if let Some(ref url) = self.upstream {
            config.upstream.base_url = url.clone();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn upstream_config(&self) -> Result<UpstreamConfig, Box<dyn std::error::Error>> {
        Ok(self.load_config()?.upstream)
    }
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub upstream: UpstreamArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Replication error look-back window in hours (default from config)
    #[arg(long)]
    pub hours: Option<u32>,
}

#[derive(Args, Debug)]
pub struct CheckDbArgs {
    #[command(flatten)]
    pub upstream: UpstreamArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DetailsArgs {
    /// Database host IP as reported by the topology check
    pub ip: String,

    #[command(flatten)]
    pub upstream: UpstreamArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "opsboard.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,

    /// Monitoring API base URL to write into the file
    #[arg(short, long)]
    pub upstream: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
