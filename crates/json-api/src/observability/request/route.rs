//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Replace identifier segments so every campaign shares one label, e.g.
/// `/campaigns/{uuid}/participations`.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}
