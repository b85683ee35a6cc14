pub mod property;
pub mod record;

pub use property::{extract_properties, FieldGroup, Property, PROPERTY_KEYS};
pub use record::OutputRecord;
