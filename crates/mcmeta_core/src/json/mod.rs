pub mod manifest;
pub mod version;

pub use manifest::{Manifest, VersionDescriptor, VersionType};
pub use version::{JavaVersion, VersionDocument};
