// src/parser.rs

use crate::domain::property::ensure_collection;
use crate::domain::{extract_properties, OutputRecord, Property};
use crate::errors::Result;
use serde_json::Value;
use tracing::debug;

/// Extracts one [`OutputRecord`] per property from already-converted feed data.
///
/// The data must not include the `PhysicalProperty` root key; see
/// [`crate::feed::unwrap_root`].
///
/// ```ignore
/// let parser = MitsParser::new(&data)?;
/// let records = parser.parse();
/// ```
#[derive(Debug)]
pub struct MitsParser<'a> {
    properties: Vec<Property<'a>>,
}

impl<'a> MitsParser<'a> {
    pub fn new(data: &'a Value) -> Result<Self> {
        ensure_collection(data)?;

        Ok(MitsParser {
            properties: extract_properties(data),
        })
    }

    pub fn properties(&self) -> &[Property<'a>] {
        &self.properties
    }

    pub fn parse(&self) -> Vec<OutputRecord> {
        let records: Vec<_> = self
            .properties
            .iter()
            .map(OutputRecord::from_property)
            .collect();

        debug!(records = records.len(), "assembled property records");
        records
    }
}

/// One-shot entry point: validate, extract, assemble.
pub fn parse(data: &Value) -> Result<Vec<OutputRecord>> {
    Ok(MitsParser::new(data)?.parse())
}
