use crate::{
    fetch_json, info,
    json::{Manifest, VersionDescriptor, VersionDocument},
    normalize::process_version,
    serialize::to_mirror_json,
    store::{VersionStore, WriteOutcome},
    Fetcher, SyncError,
};

/// Which versions a run added or modified, in manifest order.
///
/// A version is never in both lists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub changed: Vec<String>,
    pub new: Vec<String>,
}

impl SyncReport {
    pub fn record(&mut self, id: &str, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::New => self.new.push(id.to_owned()),
            WriteOutcome::Changed => self.changed.push(id.to_owned()),
            WriteOutcome::Unchanged => {}
        }
    }

    /// The two closing lines of a run.
    #[must_use]
    pub fn summary(&self) -> [String; 2] {
        let changed = if self.changed.is_empty() {
            "No updated versions".to_owned()
        } else {
            format!("Updated versions: {}", self.changed.join(", "))
        };
        let new = if self.new.is_empty() {
            "No new versions".to_owned()
        } else {
            format!("New versions: {}", self.new.join(", "))
        };
        [changed, new]
    }
}

/// Mirrors every release (plus 1.5) listed in the manifest
/// at `manifest_url` into `store`.
///
/// Versions are fetched, normalized and written one at a time,
/// in manifest order. The first failure of any kind stops the run;
/// files written before it stay on disk, and a re-run only rewrites
/// what actually differs.
///
/// # Errors
/// - the manifest or a version JSON couldn't be downloaded or parsed
/// - a version failed normalization (see [`process_version`])
/// - a version file couldn't be written
pub async fn sync_versions(
    fetcher: &dyn Fetcher,
    manifest_url: &str,
    store: &VersionStore,
) -> Result<SyncReport, SyncError> {
    info!("Fetching versions");
    let manifest = Manifest::download(fetcher, manifest_url)
        .await
        .map_err(SyncError::Manifest)?;

    let mut report = SyncReport::default();
    for version in manifest.selected() {
        let outcome = sync_version(fetcher, version, store).await?;
        report.record(&version.id, outcome);
    }
    Ok(report)
}

/// Fetches, normalizes and persists a single version.
///
/// # Errors
/// See [`sync_versions`].
pub async fn sync_version(
    fetcher: &dyn Fetcher,
    version: &VersionDescriptor,
    store: &VersionStore,
) -> Result<WriteOutcome, SyncError> {
    info!("Processing {}", version.id);

    let doc: VersionDocument = fetch_json(fetcher, &version.url)
        .await
        .map_err(|error| SyncError::Version {
            id: version.id.clone(),
            error,
        })?;

    let doc = process_version(doc).map_err(|error| SyncError::Process {
        id: version.id.clone(),
        error,
    })?;

    let contents = to_mirror_json(&doc)?;
    Ok(store.persist(&version.id, &contents).await?)
}
