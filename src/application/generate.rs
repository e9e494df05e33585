//! Sample file generation for `--generate-data-json` / `--generate-config-json`.

use std::path::{Path, PathBuf};

use crate::application::data::save_application_data;
use crate::application::sample::sample_application;
use crate::config::{save_config, AppConfig};
use crate::error::AppResult;

pub const DATA_FILE_NAME: &str = "data.json";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Write the requested sample files into `dir` and return their paths.
pub fn generate_files(dir: &Path, data: bool, config: bool) -> AppResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    if data {
        let path = dir.join(DATA_FILE_NAME);
        save_application_data(&sample_application(), &path)?;
        tracing::info!(path = %path.display(), "Sample data file generated");
        written.push(path);
    }

    if config {
        let path = dir.join(CONFIG_FILE_NAME);
        save_config(&AppConfig::default(), &path)?;
        tracing::info!(path = %path.display(), "Sample config file generated");
        written.push(path);
    }

    Ok(written)
}
