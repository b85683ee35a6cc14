//! Extracts property records from MITS (`PhysicalProperty`) feeds.
//!
//! A feed is converted into a `serde_json::Value` tree, every `Property`
//! subtree is located with a deep key search, and each one is reshaped into an
//! [`OutputRecord`] holding six lists: identification, information, policy,
//! floorplans, amenities and file.

pub mod domain;
pub mod errors;
pub mod feed;
pub mod parser;
pub mod search;

#[cfg(test)]
mod tests;

pub use domain::{extract_properties, FieldGroup, OutputRecord, Property};
pub use errors::{MitsError, Result};
pub use feed::{parse_feed, read_feed};
pub use parser::{parse, MitsParser};
