//! `mcmeta`: keeps a directory of normalized Minecraft
//! release JSONs in sync with Mojang's version manifest.
//!
//! See [`mcmeta_core::sync::sync_versions`] for what a run does.

use std::process::ExitCode;

use clap::Parser;
use mcmeta_core::{
    err, err_stdout, info, logger_finish, logger_init, ReqwestFetcher, SyncError, SyncReport,
    VersionStore,
};

use crate::{arguments::ArgumentInfo, config::SyncConfig};

mod arguments;
mod config;

/// Unknown argument feature or variable: the allow-lists need a look.
const EXIT_VALIDATION: u8 = 1;
/// Anything else (network, bad JSON, IO, config).
const EXIT_FAILURE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = ArgumentInfo::parse();

    let config = match SyncConfig::load(&args) {
        Ok(config) => config,
        Err(error) => {
            err!("{error}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    if let Some(log_file) = &config.log_file {
        if let Err(error) = logger_init(log_file) {
            err!("Could not open log file, continuing without it: {error}");
        }
    }

    let code = match run(&config).await {
        Ok(report) => {
            for line in report.summary() {
                info!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(error) if error.is_validation_failure() => {
            err_stdout!("{error}");
            ExitCode::from(EXIT_VALIDATION)
        }
        Err(error) => {
            err!("{error}");
            ExitCode::from(EXIT_FAILURE)
        }
    };

    logger_finish();
    code
}

async fn run(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    let fetcher = ReqwestFetcher::new(config.timeout())
        .map_err(|error| SyncError::Manifest(error.into()))?;
    let store = VersionStore::new(&config.output_dir);
    mcmeta_core::sync_versions(&fetcher, &config.manifest_url, &store).await
}
