// src/domain/record.rs

use crate::domain::property::{FieldGroup, Property};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fixed-shape record produced for each property.
///
/// Every group is a list, even when the feed had a single element or none,
/// because the same field shows up as a singleton in one feed and a list in
/// another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub identification: Vec<Value>,
    pub information: Vec<Value>,
    pub policy: Vec<Value>,
    pub floorplans: Vec<Value>,
    pub amenities: Vec<Value>,
    pub file: Vec<Value>,
}

impl OutputRecord {
    pub fn from_property(property: &Property<'_>) -> Self {
        OutputRecord {
            identification: property.identification(),
            information: property.information(),
            policy: property.policy(),
            floorplans: property.floorplans(),
            amenities: property.amenities(),
            file: property.file(),
        }
    }

    pub fn get(&self, group: FieldGroup) -> &[Value] {
        match group {
            FieldGroup::Identification => &self.identification,
            FieldGroup::Information => &self.information,
            FieldGroup::Policy => &self.policy,
            FieldGroup::Floorplans => &self.floorplans,
            FieldGroup::Amenities => &self.amenities,
            FieldGroup::File => &self.file,
        }
    }

    /// True when no group found anything.
    pub fn is_empty(&self) -> bool {
        FieldGroup::ALL.iter().all(|g| self.get(*g).is_empty())
    }
}
