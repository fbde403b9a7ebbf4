//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diascreen-gateway")]
#[command(about = "DiaScreen diabetes screening gateway", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "gateway.yaml", env = "DIASCREEN_CONFIG")]
    pub config: String,

    /// Listen address (host:port)
    #[arg(short, long, env = "DIASCREEN_LISTEN")]
    pub listen: Option<String>,

    /// Local model artifact path (forces a local source)
    #[arg(long, value_name = "PATH")]
    pub model_path: Option<PathBuf>,

    /// Remote model artifact URL
    #[arg(long, value_name = "URL")]
    pub model_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
