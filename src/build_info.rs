//! Version metadata reported by `micv --version`.
//!
//! `MICV_BUILD_TIME` and `MICV_COMMIT_HASH` are read at compile time, so a
//! release build can stamp them with e.g.
//! `MICV_COMMIT_HASH=$(git rev-parse --short HEAD) cargo build --release`.

use std::fmt;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    pub commit_hash: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_time: match option_env!("MICV_BUILD_TIME") {
                Some(value) => value,
                None => UNKNOWN,
            },
            commit_hash: match option_env!("MICV_COMMIT_HASH") {
                Some(value) => value,
                None => UNKNOWN,
            },
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "micv version: {}", self.version)?;
        writeln!(f, "Build time: {}", self.build_time)?;
        write!(f, "Commit hash: {}", self.commit_hash)
    }
}
