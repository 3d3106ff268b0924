pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::ConsoleSink, script_config::ScriptConfig, OutputFormat};
pub use core::{
    registry::Registry,
    session::{Command, MemorySink, RegistrySession, SessionSummary},
};
pub use domain::report::EMPTY_MARKER;
pub use utils::error::{RegistryError, Result};
