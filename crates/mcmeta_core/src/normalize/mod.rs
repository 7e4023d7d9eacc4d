//! Stripping a raw version JSON down to what the launcher
//! actually uses, and refusing anything it wouldn't understand.

use std::{cmp::Ordering, collections::BTreeSet};

use serde_json::{Map, Value};

use crate::{
    json::{version::document_id, JavaVersion, VersionDocument},
    warn, ProcessError,
};

mod validate;
mod version_compare;

pub use validate::{
    placeholders, validate_game_arguments, NameKind, UnknownName, ValidationReport,
    KNOWN_FEATURES, KNOWN_VARIABLES,
};
pub use version_compare::compare_versions;

/// Newest `minimumLauncherVersion` whose schema we understand.
pub const MAX_LAUNCHER_VERSION: u64 = 21;

/// Architectures a `${arch}` native classifier gets expanded to.
pub const NATIVE_ARCHS: [&str; 2] = ["32", "64"];

const ARCH_PLACEHOLDER: &str = "${arch}";

/// Versions before this one are expected to ship natives.
const NATIVES_REQUIRED_BEFORE: &str = "1.19";

/// Normalizes a freshly downloaded version JSON.
///
/// In order:
/// 1. Refuses versions whose `minimumLauncherVersion` is
///    above [`MAX_LAUNCHER_VERSION`].
/// 2. Keeps only the `client` entry of `downloads`.
/// 3. Removes `downloads.artifact.path` from every library and
///    prunes native classifiers the library doesn't reference.
/// 4. Removes `logging` and `complianceLevel`.
/// 5. Adds a `jre-legacy` (Java 8) `javaVersion` if there is none.
/// 6. Warns if a pre-1.19 version has no natives at all.
/// 7. Checks the game arguments against the known features
///    and variables.
///
/// Key order of everything that's kept is preserved.
///
/// # Errors
/// - [`ProcessError::UnsupportedLauncherVersion`] for newer schemas
/// - [`ProcessError::MissingField`] if `libraries` isn't a list
/// - [`ProcessError::Validation`] if any game argument uses an unknown
///   feature or variable. Every offender is printed before returning.
pub fn process_version(mut doc: VersionDocument) -> Result<VersionDocument, ProcessError> {
    check_launcher_version(&doc)?;

    if let Some(Value::Object(downloads)) = doc.get_mut("downloads") {
        downloads.retain(|name, _| name == "client");
    }

    let natives_detected = strip_libraries(&mut doc)?;

    doc.shift_remove("logging");
    doc.shift_remove("complianceLevel");

    if !doc.contains_key("javaVersion") {
        doc.insert("javaVersion".to_owned(), JavaVersion::legacy().into());
    }

    if !natives_detected && natives_expected(&doc) {
        warn!(
            "No natives detected for {}",
            document_id(&doc).unwrap_or("<unknown id>")
        );
    }

    let report = validate_game_arguments(&doc);
    if !report.is_empty() {
        report.print();
        return Err(ProcessError::Validation(report));
    }

    Ok(doc)
}

fn check_launcher_version(doc: &VersionDocument) -> Result<(), ProcessError> {
    let Some(value) = doc.get("minimumLauncherVersion") else {
        return Ok(());
    };
    let Value::Number(found) = value else {
        return Err(ProcessError::MissingField("minimumLauncherVersion"));
    };

    #[allow(clippy::cast_precision_loss)]
    let too_new = match found.as_u64() {
        Some(n) => n > MAX_LAUNCHER_VERSION,
        None => found
            .as_f64()
            .is_some_and(|n| n > MAX_LAUNCHER_VERSION as f64),
    };

    if too_new {
        Err(ProcessError::UnsupportedLauncherVersion {
            found: found.clone(),
            max: MAX_LAUNCHER_VERSION,
        })
    } else {
        Ok(())
    }
}

/// Returns whether any library declared natives.
fn strip_libraries(doc: &mut VersionDocument) -> Result<bool, ProcessError> {
    let Some(Value::Array(libraries)) = doc.get_mut("libraries") else {
        return Err(ProcessError::MissingField("libraries"));
    };

    let mut natives_detected = false;
    for library in libraries.iter_mut().filter_map(Value::as_object_mut) {
        natives_detected |= strip_library(library);
    }
    Ok(natives_detected)
}

/// Returns whether the library declared natives.
///
/// Only libraries with a `downloads` block are looked at,
/// the rest are left exactly as they are.
fn strip_library(library: &mut Map<String, Value>) -> bool {
    let native_keys = library
        .get("natives")
        .and_then(Value::as_object)
        .map(expand_native_keys);

    let Some(Value::Object(downloads)) = library.get_mut("downloads") else {
        return false;
    };

    // Redundant with the url.
    if let Some(Value::Object(artifact)) = downloads.get_mut("artifact") {
        artifact.shift_remove("path");
    }

    let Some(native_keys) = native_keys else {
        return false;
    };

    if let Some(Value::Object(classifiers)) = downloads.get_mut("classifiers") {
        classifiers.retain(|key, _| native_keys.contains(key));
    }
    true
}

/// Collects the classifier keys a `natives` mapping (OS -> classifier)
/// refers to, with every `${arch}` key expanded once per
/// [`NATIVE_ARCHS`] entry.
///
/// ```
/// # use mcmeta_core::normalize::expand_native_keys;
/// let natives = serde_json::json!({
///     "linux": "natives-linux",
///     "windows": "natives-windows-${arch}",
/// });
/// let keys = expand_native_keys(natives.as_object().unwrap());
/// assert_eq!(
///     keys.into_iter().collect::<Vec<_>>(),
///     ["natives-linux", "natives-windows-32", "natives-windows-64"]
/// );
/// ```
#[must_use]
pub fn expand_native_keys(natives: &Map<String, Value>) -> BTreeSet<String> {
    natives
        .values()
        .filter_map(Value::as_str)
        .flat_map(|key| {
            if key.contains(ARCH_PLACEHOLDER) {
                NATIVE_ARCHS
                    .iter()
                    .map(|arch| key.replace(ARCH_PLACEHOLDER, arch))
                    .collect::<Vec<_>>()
            } else {
                vec![key.to_owned()]
            }
        })
        .collect()
}

/// Unknown ids get the warning too, a missing `id`
/// is already suspicious enough.
fn natives_expected(doc: &VersionDocument) -> bool {
    document_id(doc)
        .is_none_or(|id| compare_versions(id, NATIVES_REQUIRED_BEFORE) == Ordering::Less)
}
