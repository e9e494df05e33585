//! Configuration loading: defaults, file, command-line flags, environment.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ConfigWarning, ValidationError};

pub const ENV_SECRET_URL: &str = "MICV_SECRET_URL";
pub const ENV_APPLICATION_URL: &str = "MICV_APPLICATION_URL";
pub const ENV_TIMEOUT: &str = "MICV_TIMEOUT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode config file {}: {source}", path.display())]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to decode config file {}: {source}", path.display())]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode config: {0}")]
    EncodeToml(#[from] toml::ser::Error),

    #[error("failed to encode config: {0}")]
    EncodeJson(#[from] serde_json::Error),

    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line; `None` leaves the current value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub secret_url: Option<String>,
    pub application_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = non_empty(self.secret_url.as_deref()) {
            config.secret_url = url.to_string();
        }
        if let Some(url) = non_empty(self.application_url.as_deref()) {
            config.application_url = url.to_string();
        }
        if let Some(timeout) = self.timeout_seconds.filter(|t| *t > 0) {
            config.timeout_seconds = timeout;
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Parse a config file. `.toml` files are TOML, everything else is JSON.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if is_toml(path) {
        toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Apply `MICV_*` environment variables read through `lookup`.
///
/// Empty values are ignored. A timeout that is not a positive integer is
/// ignored and reported as a warning.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F) -> Vec<ConfigWarning>
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();

    if let Some(url) = lookup(ENV_SECRET_URL).filter(|v| !v.is_empty()) {
        config.secret_url = url;
    }
    if let Some(url) = lookup(ENV_APPLICATION_URL).filter(|v| !v.is_empty()) {
        config.application_url = url;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT) {
        match raw.trim().parse::<u64>() {
            Ok(timeout) if timeout > 0 => config.timeout_seconds = timeout,
            _ => warnings.push(ConfigWarning::new(
                "timeout_seconds",
                format!("Ignoring invalid {} value '{}'", ENV_TIMEOUT, raw),
            )),
        }
    }
    warnings
}

/// A validated configuration plus the warnings collected while loading it.
///
/// Loading happens before logging is installed, so warnings are carried
/// out and emitted by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub warnings: Vec<ConfigWarning>,
}

impl LoadedConfig {
    pub fn emit_warnings(&self) {
        for warning in &self.warnings {
            warning.emit();
        }
    }
}

/// Load, merge and validate configuration using an explicit environment.
///
/// Precedence, lowest to highest: defaults, config file, flags, environment.
pub fn load_config_with_env<F>(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
    lookup: F,
) -> Result<LoadedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => AppConfig::default(),
    };

    overrides.apply(&mut config);
    let mut warnings = apply_env(&mut config, lookup);
    warnings.extend(validate_config(&config).map_err(ConfigError::Validation)?);

    Ok(LoadedConfig { config, warnings })
}

/// Load, merge and validate configuration from the process environment.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LoadedConfig, ConfigError> {
    load_config_with_env(path, overrides, |key| std::env::var(key).ok())
}

/// Write configuration to disk, as TOML for `.toml` paths and indented JSON otherwise.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let content = if is_toml(path) {
        toml::to_string_pretty(config)?
    } else {
        serde_json::to_string_pretty(config)? + "\n"
    };

    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn json_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let loaded = load_config_with_env(None, &ConfigOverrides::default(), env(&[])).unwrap();
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_precedence_file_then_flags_then_env() {
        let file = json_file(
            r#"{
                "secret_url": "http://file/secret",
                "application_url": "http://file/apply",
                "timeout_seconds": 15
            }"#,
        );
        let overrides = ConfigOverrides {
            secret_url: Some("http://flag/secret".into()),
            application_url: None,
            timeout_seconds: Some(20),
        };

        let config = load_config_with_env(Some(file.path()), &overrides, env(&[]))
            .unwrap()
            .config;
        assert_eq!(config.secret_url, "http://flag/secret");
        assert_eq!(config.application_url, "http://file/apply");
        assert_eq!(config.timeout_seconds, 20);

        let config = load_config_with_env(
            Some(file.path()),
            &overrides,
            env(&[(ENV_SECRET_URL, "http://env/secret"), (ENV_TIMEOUT, "25")]),
        )
        .unwrap()
        .config;
        assert_eq!(config.secret_url, "http://env/secret");
        assert_eq!(config.timeout_seconds, 25);
    }

    #[test]
    fn test_invalid_env_timeout_ignored() {
        let loaded = load_config_with_env(
            None,
            &ConfigOverrides::default(),
            env(&[(ENV_TIMEOUT, "-5"), (ENV_APPLICATION_URL, "")]),
        )
        .unwrap();
        assert_eq!(loaded.config.timeout_seconds, 30);
        assert_eq!(loaded.config.application_url, AppConfig::default().application_url);
        assert_eq!(
            loaded.warnings,
            vec![ConfigWarning::new("timeout_seconds", "Ignoring invalid MICV_TIMEOUT value '-5'")]
        );
    }

    #[test]
    fn test_zero_flag_timeout_keeps_current() {
        let overrides = ConfigOverrides {
            timeout_seconds: Some(0),
            ..ConfigOverrides::default()
        };
        let config = load_config_with_env(None, &overrides, env(&[])).unwrap().config;
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_validation_runs_after_merge() {
        let file = json_file(r#"{"timeout_seconds": 0, "secret_url": ""}"#);
        let err = load_config_with_env(Some(file.path()), &ConfigOverrides::default(), env(&[]))
            .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }

        // The environment can repair what the file broke.
        let config = load_config_with_env(
            Some(file.path()),
            &ConfigOverrides::default(),
            env(&[(ENV_SECRET_URL, "http://env/secret"), (ENV_TIMEOUT, "3")]),
        )
        .unwrap()
        .config;
        assert_eq!(config.timeout_seconds, 3);
    }

    #[test]
    fn test_malformed_file() {
        let file = json_file("{ nope");
        assert!(matches!(
            load_config_file(file.path()),
            Err(ConfigError::ParseJson { .. })
        ));
        assert!(matches!(
            load_config_file(Path::new("/nonexistent/config.json")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_save_and_reload_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.timeout_seconds = 12;
        config.submission.fail_on_error_status = true;

        for name in ["config.json", "config.toml"] {
            let path = dir.path().join(name);
            save_config(&config, &path).unwrap();
            assert_eq!(load_config_file(&path).unwrap(), config, "{}", name);
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_warnings_are_logged_when_emitted() {
        let file = json_file(r#"{"retry": {"multiplier": 0.5}}"#);
        let loaded = load_config_with_env(
            Some(file.path()),
            &ConfigOverrides::default(),
            env(&[(ENV_TIMEOUT, "abc")]),
        )
        .unwrap();
        assert_eq!(loaded.warnings.len(), 2);

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || loaded.emit_warnings());

        let output = logs.contents();
        assert!(output.contains("WARN"), "{}", output);
        assert!(output.contains("Ignoring invalid MICV_TIMEOUT value 'abc'"), "{}", output);
        assert!(output.contains("Retry multiplier below 1.0"), "{}", output);
    }
}
