pub mod cli;
pub mod script_config;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "patient-registry")]
#[command(about = "Runs a scripted session against an in-memory patient registry")]
pub struct CliConfig {
    /// Path to a TOML session script; the bundled hospital demo runs when omitted
    #[arg(short, long)]
    pub script: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Validate the script and list its steps without executing them
    #[arg(long)]
    pub dry_run: bool,
}
