use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The full launch metadata of a single version
/// (downloads, libraries, arguments, javaVersion, ...).
///
/// Kept as a generic JSON object rather than a struct: the upstream
/// schema keeps growing and every field we don't touch has to be
/// written back out untouched and in its original order.
pub type VersionDocument = Map<String, Value>;

/// Version of java required.
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JavaVersion {
    pub component: String,
    pub majorVersion: u32,
}

impl JavaVersion {
    /// What versions predating the `javaVersion` field run on.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            component: "jre-legacy".to_owned(),
            majorVersion: 8,
        }
    }
}

impl From<JavaVersion> for Value {
    fn from(value: JavaVersion) -> Self {
        serde_json::json!({
            "component": value.component,
            "majorVersion": value.majorVersion,
        })
    }
}

/// Returns the `id` field of a version document, if it has one.
#[must_use]
pub fn document_id(doc: &VersionDocument) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_java_serializes_with_upstream_names() {
        let value = serde_json::to_value(JavaVersion::legacy()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "component": "jre-legacy", "majorVersion": 8 })
        );
    }
}
