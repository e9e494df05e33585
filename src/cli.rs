//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::application::{load_application_data, sample, ApplicationPayload};
use crate::config::ConfigOverrides;
use crate::error::AppResult;

/// What an invocation asks for, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `--generate-data-json` and/or `--generate-config-json`
    Generate,
    /// `--version`
    ShowVersion,
    Submit,
}

#[derive(Debug, Parser)]
#[command(name = "micv")]
#[command(about = "Submit a job application to a token-protected endpoint", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Path to configuration file (JSON, or TOML with a .toml extension)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// URL for the secret endpoint
    #[arg(long, value_name = "URL")]
    pub secret_url: Option<String>,

    /// URL for the application endpoint
    #[arg(long = "app-url", value_name = "URL")]
    pub app_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Path to JSON file containing application data
    #[arg(long, value_name = "FILE", conflicts_with = "args")]
    pub data: Option<PathBuf>,

    /// Generate sample data.json file
    #[arg(long)]
    pub generate_data_json: bool,

    /// Generate sample config.json file
    #[arg(long)]
    pub generate_config_json: bool,

    /// Enable verbose logging (debug level)
    #[arg(long)]
    pub verbose: bool,

    /// Show version information
    #[arg(long)]
    pub version: bool,

    /// <name> <email> <job_title> [final_attempt]
    #[arg(value_name = "ARGS", num_args = 0..=4)]
    pub args: Vec<String>,
}

impl Cli {
    fn wants_generation(&self) -> bool {
        self.generate_data_json || self.generate_config_json
    }

    /// Generation wins over `--version`, which wins over submission.
    pub fn action(&self) -> Action {
        if self.wants_generation() {
            Action::Generate
        } else if self.version {
            Action::ShowVersion
        } else {
            Action::Submit
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            secret_url: self.secret_url.clone(),
            application_url: self.app_url.clone(),
            timeout_seconds: self.timeout,
        }
    }

    /// Resolve the payload from `--data` or the positional arguments.
    pub fn payload(&self) -> AppResult<ApplicationPayload> {
        match &self.data {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading application data");
                Ok(load_application_data(path)?)
            }
            None => Ok(sample::from_args(&self.args)?),
        }
    }

    /// Example invocation printed after sample files are generated.
    pub fn usage_hint(&self) -> Option<&'static str> {
        match (self.generate_data_json, self.generate_config_json) {
            (true, true) => Some("micv --config config.json --data data.json"),
            (true, false) => Some("micv --data data.json"),
            (false, true) => Some("micv --config config.json"),
            (false, false) => None,
        }
    }
}
