use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;

/// Config file read when `--config` is not given; absence is not an error
pub const DEFAULT_CONFIG_PATH: &str = "parley.toml";

/// Parley prompt gateway
#[derive(Debug, Parser)]
#[command(name = "parley", about = "HTTP gateway forwarding prompts to hosted language models")]
pub struct Args {
    /// Path to configuration file; must exist when given
    #[arg(short, long, env = "PARLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "PARLEY_LISTEN")]
    pub listen: Option<SocketAddr>,
}

impl Args {
    pub fn config_path(&self) -> &Path {
        self.config.as_deref().unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }
}
