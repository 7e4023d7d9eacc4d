use std::path::PathBuf;

use clap::Parser;

/// Mirrors every Minecraft release's version JSON into
/// `<output-dir>/<id>/<id>.json`, normalized, rewriting
/// only the files whose content actually changed.
///
/// Exits with 1 if a version uses an argument feature or
/// variable that isn't known yet, 2 on any other failure.
#[derive(Parser, Debug, Default)]
#[command(name = "mcmeta", version)]
pub struct ArgumentInfo {
    /// URL of the version manifest
    #[arg(long, value_name = "URL")]
    pub manifest_url: Option<String>,

    /// Directory holding one folder per version
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Also append everything printed to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// JSON config file; flags given here take precedence over it
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
