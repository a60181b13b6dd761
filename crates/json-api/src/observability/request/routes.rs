//! Low-cardinality route labels.

use uuid::Uuid;

/// Replace offer identifiers and config keys with placeholders so metrics stay bounded.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut label = String::new();

    for (index, segment) in segments.iter().enumerate() {
        label.push('/');

        let previous = index.checked_sub(1).and_then(|i| segments.get(i)).copied();

        match previous {
            Some("offers") if Uuid::parse_str(segment).is_ok() => label.push_str("{offer}"),
            Some("config") => label.push_str("{key}"),
            _ => label.push_str(segment),
        }
    }

    if label.is_empty() {
        label.push('/');
    }

    label
}
