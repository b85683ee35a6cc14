// src/feed/mod.rs

pub mod encoding;
pub mod xml;

use crate::domain::OutputRecord;
use crate::errors::{MitsError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

pub use encoding::decode_feed;
pub use xml::{from_xml, CONTENT_KEY};

/// Root element of every MITS feed.
pub const ROOT_KEY: &str = "PhysicalProperty";

/// Takes the value under the `PhysicalProperty` root out of a converted document.
pub fn unwrap_root(mut doc: Value) -> Result<Value> {
    match doc.get_mut(ROOT_KEY) {
        Some(inner) => Ok(inner.take()),
        None => {
            let found = doc
                .as_object()
                .and_then(|map| map.keys().next().cloned())
                .unwrap_or_else(|| "nothing".to_string());
            Err(MitsError::MissingRoot(format!(
                "expected <{ROOT_KEY}>, found {found}"
            )))
        }
    }
}

/// Reads one feed file and returns the data below its root element.
///
/// The file is decoded using its byte order mark or XML declaration.
pub fn read_feed(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let decoded = decode_feed(&bytes).and_then(|xml| from_xml(&xml));
    let data = decoded.and_then(unwrap_root).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to load feed");
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "loaded feed");
    Ok(data)
}

/// Converts a feed document and extracts its property records.
pub fn parse_feed(xml: &str) -> Result<Vec<OutputRecord>> {
    let data = unwrap_root(from_xml(xml)?)?;
    crate::parser::parse(&data)
}
