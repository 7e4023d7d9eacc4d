use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use mcmeta_core::{
    fetch::DEFAULT_TIMEOUT, json::manifest::MANIFEST_URL, store::DEFAULT_OUTPUT_DIR,
    IntoIoError, IntoJsonError, IoError, JsonError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arguments::ArgumentInfo;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] IoError),
    #[error("invalid config: {0}")]
    Json(#[from] JsonError),
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Settings for one mirror run.
///
/// Read from an optional JSON file, then overridden
/// by whatever was passed on the command line.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub manifest_url: String,
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            manifest_url: MANIFEST_URL.to_owned(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            log_file: None,
        }
    }
}

impl SyncConfig {
    /// Builds the config for this run from the command line
    /// (and the config file it points to, if any).
    pub fn load(args: &ArgumentInfo) -> Result<Self, ConfigError> {
        let config = match &args.config {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };
        config.with_overrides(args).validated()
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).path(path)?;
        Self::from_json(text)
    }

    fn from_json(text: String) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(&text).json(text)?)
    }

    fn with_overrides(mut self, args: &ArgumentInfo) -> Self {
        if let Some(manifest_url) = &args.manifest_url {
            manifest_url.clone_into(&mut self.manifest_url);
        }
        if let Some(output_dir) = &args.output_dir {
            output_dir.clone_into(&mut self.output_dir);
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if args.log_file.is_some() {
            self.log_file.clone_from(&args.log_file);
        }
        self
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(self)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_mirror_layout() {
        let config = SyncConfig::load(&ArgumentInfo::default()).unwrap();
        assert_eq!(config.manifest_url, MANIFEST_URL);
        assert_eq!(config.output_dir, PathBuf::from("version"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = SyncConfig::from_json(r#"{ "timeout_secs": 5 }"#.to_owned()).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.manifest_url, MANIFEST_URL);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SyncConfig::from_json(r#"{ "timeout": 5 }"#.to_owned()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn flags_override_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("mcmeta.json");
        std::fs::write(
            &path,
            r#"{ "output_dir": "from-file", "timeout_secs": 30, "log_file": "sync.log" }"#,
        )
        .unwrap();

        let args = ArgumentInfo {
            config: Some(path),
            output_dir: Some(PathBuf::from("from-flag")),
            ..Default::default()
        };
        let config = SyncConfig::load(&args).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("from-flag"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_file, Some(PathBuf::from("sync.log")));
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = ArgumentInfo {
            config: Some(PathBuf::from("/definitely/not/here/mcmeta.json")),
            ..Default::default()
        };
        assert!(matches!(
            SyncConfig::load(&args),
            Err(ConfigError::Io(IoError::Io { .. }))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let args = ArgumentInfo {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            SyncConfig::load(&args),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
