use std::{cmp::Ordering, sync::LazyLock};

use regex::Regex;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)(?:-([^+]+))?(?:\+.*)?$").expect("version regex is valid")
});

/// Orders two version ids the way release numbers are read:
/// numerically per dotted group, with a pre-release suffix
/// (`-pre1`, `-rc2`) sorting before the plain release.
///
/// Ids that don't look like version numbers at all are
/// compared as plain strings.
#[must_use]
pub fn compare_versions(version_a: &str, version_b: &str) -> Ordering {
    let (Some(matcher_a), Some(matcher_b)) =
        (VERSION_RE.captures(version_a), VERSION_RE.captures(version_b))
    else {
        return version_a.cmp(version_b);
    };

    let core_a = matcher_a.get(1).map_or("", |m| m.as_str());
    let core_b = matcher_b.get(1).map_or("", |m| m.as_str());
    let cmp = compare_version_groups(core_a, core_b); // Compare version core
    if cmp != Ordering::Equal {
        return cmp;
    }

    match (matcher_a.get(2), matcher_b.get(2)) {
        (Some(pre_a), Some(pre_b)) => compare_version_groups(pre_a.as_str(), pre_b.as_str()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_version_groups(group_a: &str, group_b: &str) -> Ordering {
    let parts_a: Vec<&str> = group_a.split('.').collect();
    let parts_b: Vec<&str> = group_b.split('.').collect();

    for (part_a, part_b) in parts_a.iter().zip(parts_b.iter()) {
        let cmp = match (part_a.parse::<u32>(), part_b.parse::<u32>()) {
            (Ok(a), Ok(b)) => a.cmp(&b), // Both numeric
            (Ok(_), Err(_)) => Ordering::Less, // Only A numeric
            (Err(_), Ok(_)) => Ordering::Greater, // Only B numeric
            (Err(_), Err(_)) => part_a.cmp(part_b), // Neither numeric
        };
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    // 1.19 == 1.19.0
    let trailing_zeros = |parts: &[&str]| parts.iter().all(|n| n.parse::<u32>() == Ok(0));
    match parts_a.len().cmp(&parts_b.len()) {
        Ordering::Greater if trailing_zeros(&parts_a[parts_b.len()..]) => Ordering::Equal,
        Ordering::Less if trailing_zeros(&parts_b[parts_a.len()..]) => Ordering::Equal,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare() {
        assert_eq!(compare_versions("0.1", "0.2"), Ordering::Less);
        assert_eq!(compare_versions("0.2", "0.1"), Ordering::Greater);
        assert_eq!(compare_versions("0.1", "0.1"), Ordering::Equal);

        assert_eq!(compare_versions("0.1", "0.1.1"), Ordering::Less);
        assert_eq!(compare_versions("0.1.1", "0.1"), Ordering::Greater);
        assert_eq!(compare_versions("0.1.1", "0.1.1"), Ordering::Equal);

        assert_eq!(compare_versions("0.1.1-alpha", "0.1.1"), Ordering::Less);
        assert_eq!(compare_versions("0.1.1", "0.1.1-alpha"), Ordering::Greater);
    }

    #[test]
    fn minecraft_releases() {
        assert_eq!(compare_versions("1.5", "1.19"), Ordering::Less);
        assert_eq!(compare_versions("1.8.9", "1.19"), Ordering::Less);
        assert_eq!(compare_versions("1.18.2", "1.19"), Ordering::Less);
        assert_eq!(compare_versions("1.19", "1.19"), Ordering::Equal);
        assert_eq!(compare_versions("1.19.0", "1.19"), Ordering::Equal);
        assert_eq!(compare_versions("1.19.4", "1.19"), Ordering::Greater);
        assert_eq!(compare_versions("1.21.1", "1.19"), Ordering::Greater);
        assert_eq!(compare_versions("1.19-pre1", "1.19"), Ordering::Less);
    }
}
