//! Core of the `mcmeta` version mirror.
//!
//! # Contains
//! - Version manifest and version JSON types
//! - The normalizer that strips a version JSON down and validates
//!   its game arguments
//! - A byte-stable JSON writer and the skip-if-unchanged store
//! - The [`sync::sync_versions`] pipeline tying it all together
//! - Error types
//! - Logging macros

mod error;
/// Getting text and JSON over the network.
pub mod fetch;
/// JSON structs for the version manifest and version documents.
pub mod json;
pub mod normalize;
/// Logging macros.
pub mod print;
pub mod serialize;
/// The on-disk mirror.
pub mod store;
pub mod sync;

pub use error::{
    IntoIoError, IntoJsonError, IoError, JsonDownloadError, JsonError, ProcessError, SyncError,
};
pub use fetch::{fetch_json, Fetcher, ReqwestFetcher, RequestError};
pub use print::{logger_finish, logger_init, LoggingState, LOGGER};
pub use store::{VersionStore, WriteOutcome};
pub use sync::{sync_versions, SyncReport};
