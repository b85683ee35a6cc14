// src/domain/property.rs

use crate::errors::{MitsError, Result};
use crate::search::{find_all_by_key, is_present, node_kind};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// Key spellings under which a property listing can appear in a feed.
pub const PROPERTY_KEYS: [&str; 2] = ["Property", "property"];

/// The six categories of data collected for every property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Identification,
    Information,
    Policy,
    Floorplans,
    Amenities,
    File,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 6] = [
        FieldGroup::Identification,
        FieldGroup::Information,
        FieldGroup::Policy,
        FieldGroup::Floorplans,
        FieldGroup::Amenities,
        FieldGroup::File,
    ];

    /// Element name the group is stored under in a MITS feed.
    pub fn key(self) -> &'static str {
        match self {
            FieldGroup::Identification => "Identification",
            FieldGroup::Information => "Information",
            FieldGroup::Policy => "Policy",
            FieldGroup::Floorplans => "Floorplans",
            FieldGroup::Amenities => "Amenities",
            FieldGroup::File => "File",
        }
    }

    /// Field name used in an output record.
    pub fn name(self) -> &'static str {
        match self {
            FieldGroup::Identification => "identification",
            FieldGroup::Information => "information",
            FieldGroup::Policy => "policy",
            FieldGroup::Floorplans => "floorplans",
            FieldGroup::Amenities => "amenities",
            FieldGroup::File => "file",
        }
    }
}

/// Fails with `InvalidInput` unless `node` is a map or a sequence.
pub(crate) fn ensure_collection(node: &Value) -> Result<()> {
    match node {
        Value::Object(_) | Value::Array(_) => Ok(()),
        other => Err(MitsError::InvalidInput(format!(
            "data must be a sequence or a map, got {}",
            node_kind(other)
        ))),
    }
}

/// A borrowed view over one property subtree of a feed.
///
/// Every field lookup is a deep search scoped to this subtree only.
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    node: &'a Value,
}

impl<'a> Property<'a> {
    /// Wraps `node` without checking its shape. A scalar property simply has
    /// no field groups.
    pub(crate) fn new(node: &'a Value) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Value {
        self.node
    }

    /// Collects every value found under any of `aliases` below this property.
    ///
    /// Matches that are sequences are spliced in one level. Blank entries are
    /// dropped and duplicates (by value) keep only their first occurrence.
    pub fn field(&self, aliases: &[&str]) -> Vec<Value> {
        let mut results = UniqueValues::default();

        let mut keep = |value: &Value| {
            if is_present(value) {
                results.insert(value);
            }
        };

        for alias in aliases {
            for found in find_all_by_key(self.node, alias) {
                match found {
                    Value::Array(items) => items.iter().for_each(&mut keep),
                    other => keep(other),
                }
            }
        }

        results.items
    }

    pub fn group(&self, group: FieldGroup) -> Vec<Value> {
        self.field(&[group.key()])
    }

    pub fn identification(&self) -> Vec<Value> {
        self.group(FieldGroup::Identification)
    }

    pub fn information(&self) -> Vec<Value> {
        self.group(FieldGroup::Information)
    }

    pub fn policy(&self) -> Vec<Value> {
        self.group(FieldGroup::Policy)
    }

    pub fn floorplans(&self) -> Vec<Value> {
        self.group(FieldGroup::Floorplans)
    }

    pub fn amenities(&self) -> Vec<Value> {
        self.group(FieldGroup::Amenities)
    }

    pub fn file(&self) -> Vec<Value> {
        self.group(FieldGroup::File)
    }
}

impl<'a> TryFrom<&'a Value> for Property<'a> {
    type Error = MitsError;

    fn try_from(node: &'a Value) -> Result<Self> {
        ensure_collection(node)?;
        Ok(Property::new(node))
    }
}

/// Finds every property subtree below `root`, in traversal order.
///
/// Results for all key spellings are concatenated; a sequence under a
/// property key contributes each of its elements. The same subtree reached
/// twice is kept once, while distinct subtrees with equal content are all kept.
pub fn extract_properties(root: &Value) -> Vec<Property<'_>> {
    let mut found: Vec<&Value> = Vec::new();
    let mut seen: HashSet<*const Value> = HashSet::new();

    for key in PROPERTY_KEYS {
        let matches = find_all_by_key(root, key);
        trace!(key, count = matches.len(), "property key matches");

        for node in matches {
            match node {
                Value::Array(items) => {
                    for item in items {
                        push_unique(&mut found, &mut seen, item);
                    }
                }
                other => push_unique(&mut found, &mut seen, other),
            }
        }
    }

    debug!(count = found.len(), "extracted properties");
    found.into_iter().map(Property::new).collect()
}

/// Identity check only: an owned tree never reaches one node twice, so this
/// collapses nothing for a parsed feed.
fn push_unique<'a>(
    found: &mut Vec<&'a Value>,
    seen: &mut HashSet<*const Value>,
    node: &'a Value,
) {
    if seen.insert(node as *const Value) {
        found.push(node);
    }
}

/// Values in first-seen order, deduplicated by value equality.
#[derive(Default)]
struct UniqueValues {
    items: Vec<Value>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl UniqueValues {
    fn insert(&mut self, value: &Value) -> bool {
        let bucket = self.buckets.entry(fingerprint(value)).or_default();
        if bucket.iter().any(|&i| self.items[i] == *value) {
            return false;
        }

        bucket.push(self.items.len());
        self.items.push(value.clone());
        true
    }
}

/// Hash consistent with `Value` equality. Map entries are combined without
/// regard to order, since maps compare equal regardless of key order.
fn fingerprint(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();

    match value {
        Value::Null => 0u8.hash(&mut hasher),
        Value::Bool(b) => (1u8, b).hash(&mut hasher),
        Value::Number(n) => (2u8, n.to_string()).hash(&mut hasher),
        Value::String(s) => (3u8, s).hash(&mut hasher),
        Value::Array(items) => {
            4u8.hash(&mut hasher);
            for item in items {
                fingerprint(item).hash(&mut hasher);
            }
        }
        Value::Object(map) => {
            5u8.hash(&mut hasher);
            let entries = map.iter().fold(0u64, |acc, (key, value)| {
                let mut entry = DefaultHasher::new();
                (key, fingerprint(value)).hash(&mut entry);
                acc.wrapping_add(entry.finish())
            });
            (map.len(), entries).hash(&mut hasher);
        }
    }

    hasher.finish()
}
