use serde::Deserialize;

use crate::{fetch_json, Fetcher, JsonDownloadError};

/// Where Mojang publishes the list of all versions.
pub const MANIFEST_URL: &str = "https://launchermeta.mojang.com/mc/game/version_manifest_v2.json";

/// Mirrors carry 1.5 even though the manifest lists it as a snapshot.
pub const SNAPSHOT_EXCEPTION: &str = "1.5";

/// An official Minecraft version manifest
/// (list of all versions and their download links)
#[derive(Deserialize, Clone, Debug)]
pub struct Manifest {
    pub latest: Option<Latest>,
    pub versions: Vec<VersionDescriptor>,
}

impl Manifest {
    /// Downloads and parses the manifest at `url`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be downloaded or parsed into JSON.
    pub async fn download(fetcher: &dyn Fetcher, url: &str) -> Result<Manifest, JsonDownloadError> {
        fetch_json(fetcher, url).await
    }

    /// The versions worth mirroring, in manifest order:
    /// every release, plus [`SNAPSHOT_EXCEPTION`].
    pub fn selected(&self) -> impl Iterator<Item = &VersionDescriptor> {
        self.versions.iter().filter(|n| n.is_selected())
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
    #[serde(other)]
    Unknown,
}

#[allow(non_snake_case)]
#[derive(Deserialize, Clone, Debug)]
pub struct VersionDescriptor {
    pub id: String,
    pub r#type: VersionType,
    pub url: String,
    pub time: Option<String>,
    pub releaseTime: Option<String>,
    pub sha1: Option<String>,
}

impl VersionDescriptor {
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.r#type == VersionType::Release || self.id == SNAPSHOT_EXCEPTION
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn manifest() -> Manifest {
        serde_json::from_value(json!({
            "latest": { "release": "1.21.1", "snapshot": "24w33a" },
            "versions": [
                { "id": "24w33a", "type": "snapshot", "url": "https://x/24w33a.json" },
                { "id": "1.21.1", "type": "release", "url": "https://x/1.21.1.json",
                  "time": "2024-08-08T12:24:45+00:00", "releaseTime": "2024-08-08T12:24:45+00:00",
                  "sha1": "abc", "complianceLevel": 1 },
                { "id": "1.5", "type": "snapshot", "url": "https://x/1.5.json" },
                { "id": "1.4.7", "type": "release", "url": "https://x/1.4.7.json" },
                { "id": "b1.7.3", "type": "old_beta", "url": "https://x/b1.7.3.json" },
                { "id": "rd-132211", "type": "old_alpha", "url": "https://x/rd.json" },
                { "id": "weird", "type": "experiment", "url": "https://x/weird.json" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn parses_version_types() {
        let manifest = manifest();
        assert_eq!(manifest.versions[0].r#type, VersionType::Snapshot);
        assert_eq!(manifest.versions[4].r#type, VersionType::OldBeta);
        assert_eq!(manifest.versions[5].r#type, VersionType::OldAlpha);
        assert_eq!(manifest.versions[6].r#type, VersionType::Unknown);
        assert_eq!(manifest.latest.unwrap().release, "1.21.1");
    }

    #[test]
    fn selects_releases_and_exception_in_order() {
        let manifest = manifest();
        let ids: Vec<&str> = manifest.selected().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1.21.1", "1.5", "1.4.7"]);

        for version in &manifest.versions {
            let expected =
                version.r#type == VersionType::Release || version.id == SNAPSHOT_EXCEPTION;
            assert_eq!(ids.contains(&version.id.as_str()), expected, "{}", version.id);
        }
    }
}
