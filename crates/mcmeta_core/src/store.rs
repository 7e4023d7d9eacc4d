use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use crate::{info, pt, IntoIoError, IoError};

/// Where version files go unless configured otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "version";

/// What [`VersionStore::persist`] did with a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The version's directory didn't exist before.
    New,
    /// The file existed (or its directory did) and the content differed.
    Changed,
    /// The file already had exactly these bytes. Nothing was written.
    Unchanged,
}

/// The on-disk mirror: one `<root>/<id>/<id>.json` per version.
#[derive(Debug, Clone)]
pub struct VersionStore {
    root: PathBuf,
}

impl VersionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding version `id`.
    ///
    /// # Errors
    /// [`IoError::DirEscapeAttack`] if `id` isn't a single plain path
    /// component (empty, `..`, contains a separator, ...).
    pub fn version_dir(&self, id: &str) -> Result<PathBuf, IoError> {
        let mut components = Path::new(id).components();
        let is_plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(name)), None) if name == id
        );
        if !is_plain || id.contains(['/', '\\', ':']) {
            return Err(IoError::DirEscapeAttack(id.to_owned()));
        }
        Ok(self.root.join(id))
    }

    /// The JSON file of version `id`.
    ///
    /// # Errors
    /// See [`VersionStore::version_dir`].
    pub fn version_file(&self, id: &str) -> Result<PathBuf, IoError> {
        Ok(self.version_dir(id)?.join(format!("{id}.json")))
    }

    /// Saves `contents` as the JSON of version `id`, unless the
    /// file on disk already holds exactly the same bytes.
    ///
    /// This is to minimize writes: re-running over an up-to-date
    /// mirror doesn't touch a single file.
    ///
    /// # Errors
    /// - `id` is not a safe directory name
    /// - the directory could not be created
    /// - the existing file could not be read
    /// - the new file could not be written
    pub async fn persist(&self, id: &str, contents: &str) -> Result<WriteOutcome, IoError> {
        let dir = self.version_dir(id)?;
        let target = dir.join(format!("{id}.json"));

        let is_new = !tokio::fs::try_exists(&dir).await.path(&dir)?;
        if is_new {
            info!("Making dir {}", dir.display());
            tokio::fs::create_dir_all(&dir).await.path(&dir)?;
        } else {
            match tokio::fs::read(&target).await {
                Ok(old) if old == contents.as_bytes() => {
                    pt!("Version file is the same we already have, skipping");
                    return Ok(WriteOutcome::Unchanged);
                }
                Ok(_) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err).path(&target),
            }
        }

        write_replacing(&target, contents).await?;

        Ok(if is_new {
            WriteOutcome::New
        } else {
            WriteOutcome::Changed
        })
    }
}

/// Writes to a sibling temp file first so a crash
/// never leaves a half-written version JSON behind.
async fn write_replacing(target: &Path, contents: &str) -> Result<(), IoError> {
    let temp = target.with_extension("json.tmp");
    tokio::fs::write(&temp, contents).await.path(&temp)?;
    tokio::fs::rename(&temp, target).await.path(target)
}
