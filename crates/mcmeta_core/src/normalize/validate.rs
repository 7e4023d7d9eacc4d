use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::{err_stdout, json::VersionDocument};

/// Rule features the downstream launcher knows how to evaluate.
pub const KNOWN_FEATURES: &[&str] = &[
    "is_demo_user",
    "has_custom_resolution",
    "has_quick_plays_support",
    "is_quick_play_singleplayer",
    "is_quick_play_multiplayer",
    "is_quick_play_realms",
];

/// `${...}` placeholders the downstream launcher knows how to fill in.
pub const KNOWN_VARIABLES: &[&str] = &[
    "auth_username",
    "auth_session",
    "auth_access_token",
    "auth_player_name",
    "auth_uuid",
    "profile_name",
    "version_name",
    "version_type",
    "game_directory",
    "natives_directory",
    "classpath",
    "resolution_width",
    "resolution_height",
    "game_assets",
    "assets_root",
    "assets_index_name",
    "user_type",
    "user_properties",
    "launcher_name",
    "launcher_version",
    // Only reachable through features that are disabled downstream
    "quickPlayPath",
    "quickPlaySingleplayer",
    "quickPlayMultiplayer",
    "quickPlayRealms",
    // Not filled in yet, but harmless
    "clientid",
    "auth_xuid",
];

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"));

/// Yields the names of all `${name}` placeholders in `template`.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Feature,
    Variable,
}

/// A name that isn't in one of the allow-lists,
/// and the argument (as JSON text) it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub kind: NameKind,
    pub name: String,
    pub argument: String,
}

/// Everything wrong with the game arguments of one version,
/// in the order the arguments appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub unknown: Vec<UnknownName>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown.is_empty()
    }

    pub fn unknown_features(&self) -> impl Iterator<Item = &UnknownName> {
        self.of_kind(NameKind::Feature)
    }

    pub fn unknown_variables(&self) -> impl Iterator<Item = &UnknownName> {
        self.of_kind(NameKind::Variable)
    }

    fn of_kind(&self, kind: NameKind) -> impl Iterator<Item = &UnknownName> {
        self.unknown.iter().filter(move |n| n.kind == kind)
    }

    /// One line per offending argument, followed by the abort reason(s).
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .unknown
            .iter()
            .map(|UnknownName { kind, name, argument }| match kind {
                NameKind::Feature => format!("Unknown feature {name} in argument {argument}"),
                NameKind::Variable => format!("Unknown variable {name} in argument {argument}"),
            })
            .collect();
        if self.unknown_features().next().is_some() {
            lines.push("Aborting due to rule feature errors".to_owned());
        }
        if self.unknown_variables().next().is_some() {
            lines.push("Aborting due to variable errors".to_owned());
        }
        lines
    }

    /// Prints [`ValidationReport::lines`] to stdout.
    pub fn print(&self) {
        for line in self.lines() {
            err_stdout!("{line}");
        }
    }

    fn push(&mut self, kind: NameKind, name: &str, argument: &Value) {
        self.unknown.push(UnknownName {
            kind,
            name: name.to_owned(),
            argument: argument.to_string(),
        });
    }

    fn check_variables(&mut self, template: &str, argument: &Value) {
        for variable in placeholders(template) {
            if !KNOWN_VARIABLES.contains(&variable) {
                self.push(NameKind::Variable, variable, argument);
            }
        }
    }

    fn check_rules(&mut self, rules: &[Value], argument: &Value) {
        let features = rules
            .iter()
            .filter_map(|rule| rule.get("features"))
            .filter_map(Value::as_object)
            .flat_map(|features| features.keys());

        for feature in features {
            if !KNOWN_FEATURES.contains(&feature.as_str()) {
                self.push(NameKind::Feature, feature, argument);
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |list: Vec<&UnknownName>| {
            list.iter()
                .map(|n| n.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let features: Vec<_> = self.unknown_features().collect();
        let variables: Vec<_> = self.unknown_variables().collect();
        match (features.is_empty(), variables.is_empty()) {
            (true, true) => write!(f, "no problems"),
            (false, true) => write!(f, "unknown features: {}", names(features)),
            (true, false) => write!(f, "unknown variables: {}", names(variables)),
            (false, false) => write!(
                f,
                "unknown features: {}; unknown variables: {}",
                names(features),
                names(variables)
            ),
        }
    }
}

/// Checks every `arguments.game` entry of `doc` against
/// [`KNOWN_FEATURES`] and [`KNOWN_VARIABLES`].
///
/// Plain string arguments have their placeholders checked.
/// Conditional arguments (`{"rules": [...], "value": ...}`) have
/// the feature names of their rules checked, as well as the
/// placeholders in `value` (a string or a list of strings).
///
/// Versions without `arguments` (pre-1.13, which use
/// `minecraftArguments`) always pass.
#[must_use]
pub fn validate_game_arguments(doc: &VersionDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(game) = doc
        .get("arguments")
        .and_then(|n| n.get("game"))
        .and_then(Value::as_array)
    else {
        return report;
    };

    for argument in game {
        match argument {
            Value::String(template) => report.check_variables(template, argument),
            Value::Object(conditional) => {
                if let Some(rules) = conditional.get("rules").and_then(Value::as_array) {
                    report.check_rules(rules, argument);
                }
                match conditional.get("value") {
                    Some(Value::String(template)) => report.check_variables(template, argument),
                    Some(Value::Array(values)) => {
                        for template in values.iter().filter_map(Value::as_str) {
                            report.check_variables(template, argument);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    report
}
