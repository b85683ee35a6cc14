use crate::feed::{from_xml, unwrap_root};
use serde_json::Value;
use std::path::PathBuf;

/// Raw XML of a fixture under `src/tests/fixtures`.
pub fn fixture_xml(name: &str) -> &'static str {
    match name {
        "ash.xml" => include_str!("fixtures/ash.xml"),
        "maa.xml" => include_str!("fixtures/maa.xml"),
        other => panic!("unknown fixture {other}"),
    }
}

/// Fixture converted and unwrapped, ready for `parse`.
pub fn fixture_data(name: &str) -> Value {
    let doc = from_xml(fixture_xml(name)).unwrap_or_else(|e| panic!("{name}: {e}"));
    unwrap_root(doc).unwrap_or_else(|e| panic!("{name}: {e}"))
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src/tests/fixtures")
        .join(name)
}
