//! A shim that re-exports `reqwest` for the `mcmeta` tools.
//!
//! ```no_run
//! pub use reqwest::*;
//! ```
//!
//! The crate exists only to pin reqwest's feature set per platform
//! (rustls on Linux, the native TLS stack everywhere else) in one place,
//! so that the rest of the workspace never names `reqwest` directly.

pub use reqwest::*;
