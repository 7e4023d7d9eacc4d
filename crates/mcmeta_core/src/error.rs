use std::path::PathBuf;

use thiserror::Error;

use crate::{normalize::ValidationReport, RequestError};

#[derive(Clone, Debug, Error)]
pub enum IoError {
    #[error("at path {path:?}, error: {error}")]
    Io { error: String, path: PathBuf },
    #[error("version id {0:?} points outside the output directory. POTENTIAL SECURITY RISK AVOIDED")]
    DirEscapeAttack(String),
}

pub trait IntoIoError<T> {
    #[allow(clippy::missing_errors_doc)]
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError>;
}

impl<T> IntoIoError<T> for std::io::Result<T> {
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError> {
        self.map_err(|err: std::io::Error| IoError::Io {
            error: err.to_string(),
            path: p.into(),
        })
    }
}

/// A JSON parse error along with (a preview of)
/// the text that failed to parse.
#[derive(Debug, Error)]
#[error("json error: {error}\n- Text: {}", preview(.json))]
pub struct JsonError {
    pub error: serde_json::Error,
    pub json: String,
}

fn preview(json: &str) -> &str {
    const LIMIT: usize = 200;
    if json.len() <= LIMIT {
        return json;
    }
    let mut end = LIMIT;
    while !json.is_char_boundary(end) {
        end -= 1;
    }
    &json[..end]
}

pub trait IntoJsonError<T> {
    #[allow(clippy::missing_errors_doc)]
    fn json(self, text: String) -> Result<T, JsonError>;
}

impl<T> IntoJsonError<T> for Result<T, serde_json::Error> {
    fn json(self, text: String) -> Result<T, JsonError> {
        self.map_err(|error| JsonError { error, json: text })
    }
}

#[derive(Debug, Error)]
pub enum JsonDownloadError {
    #[error(transparent)]
    RequestError(#[from] RequestError),
    #[error(transparent)]
    SerdeError(#[from] JsonError),
}

impl From<mcmeta_reqwest::Error> for JsonDownloadError {
    fn from(value: mcmeta_reqwest::Error) -> Self {
        Self::RequestError(RequestError::ReqwestError(value))
    }
}

/// Why a version JSON could not be normalized.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("unsupported minimumLauncherVersion {found} (highest supported is {max})")]
    UnsupportedLauncherVersion {
        found: serde_json::Number,
        max: u64,
    },
    #[error("json field not found or has the wrong type: \"{0}\"")]
    MissingField(&'static str),
    #[error("argument validation failed: {0}")]
    Validation(ValidationReport),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not download the version manifest: {0}")]
    Manifest(JsonDownloadError),
    #[error("could not download version {id}: {error}")]
    Version { id: String, error: JsonDownloadError },
    #[error("while processing version {id}: {error}")]
    Process { id: String, error: ProcessError },
    #[error("could not serialize version json: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] IoError),
}

impl SyncError {
    /// Whether this failure came from an unknown feature
    /// or variable name in an argument template.
    #[must_use]
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            SyncError::Process {
                error: ProcessError::Validation(_),
                ..
            }
        )
    }
}
