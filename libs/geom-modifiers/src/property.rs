//! # Property Bag
//!
//! Named, typed, labelled values holding a stage's runtime configuration.
//!
//! A stage defines its properties with defaults once, at construction.
//! Afterwards values can change but types cannot: [`Properties::change`]
//! rejects a value of another type, and loading a saved bag only takes
//! over entries that exist and keep their type. Entries written by a newer
//! build and since dropped are ignored, new entries keep their default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PropertyError, RecordError};
use crate::record::{RecordReader, RecordWriter};

const PROPERTIES_TAG: &str = "properties";
const PROPERTIES_VERSION: u32 = 1;

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// On or off switch.
    Bool(bool),
    /// Integer, clamped to the range if one is set.
    Int(i64),
    /// Number, clamped to the range if one is set.
    Float(f64),
    /// Free text such as an equation or a script.
    Text(String),
    /// Fixed-length vector such as a color.
    Floats(Vec<f64>),
}

impl PropertyValue {
    /// Name of the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Floats(_) => "floats",
        }
    }

    fn same_type(&self, other: &PropertyValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(v: Vec<f64>) -> Self {
        Self::Floats(v)
    }
}

/// One entry of a [`Properties`] bag.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Human readable name.
    pub label: String,
    /// One-line help text.
    pub tip: String,
    /// Current value.
    pub value: PropertyValue,
    /// Inclusive numeric range applied to `Int` and `Float` values.
    pub range: Option<(f64, f64)>,
}

impl Property {
    fn clamped(&self, value: PropertyValue) -> PropertyValue {
        match (value, self.range) {
            (PropertyValue::Int(v), Some((min, max))) => {
                PropertyValue::Int(v.clamp(min.ceil() as i64, max.floor() as i64))
            }
            (PropertyValue::Float(v), Some((min, max))) => PropertyValue::Float(v.clamp(min, max)),
            (value, _) => value,
        }
    }
}

/// Property bag keyed by stable ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: BTreeMap<String, Property>,
}

impl Properties {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or redefines) a property with its default value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geom_modifiers::property::Properties;
    ///
    /// let mut props = Properties::new();
    /// props.define("level", "level", "Number of passes", 1i64);
    /// assert_eq!(props.get_int("level").unwrap(), 1);
    /// ```
    pub fn define(
        &mut self,
        id: &str,
        label: &str,
        tip: &str,
        value: impl Into<PropertyValue>,
    ) -> &mut Self {
        self.entries.insert(
            id.to_string(),
            Property {
                label: label.to_string(),
                tip: tip.to_string(),
                value: value.into(),
                range: None,
            },
        );
        self
    }

    /// Restricts a numeric property to `[min, max]` and clamps its value.
    pub fn set_range(&mut self, id: &str, min: f64, max: f64) -> &mut Self {
        if let Some(property) = self.entries.get_mut(id) {
            property.range = Some((min, max));
            property.value = property.clamped(property.value.clone());
        }
        self
    }

    /// Changes the value of an existing property.
    ///
    /// Numeric values are clamped to the property's range.
    ///
    /// # Errors
    ///
    /// [`PropertyError::Missing`] for an unknown id,
    /// [`PropertyError::TypeMismatch`] if `value` has another type.
    pub fn change(&mut self, id: &str, value: impl Into<PropertyValue>) -> Result<(), PropertyError> {
        let value = value.into();
        let property = self
            .entries
            .get_mut(id)
            .ok_or_else(|| PropertyError::Missing(id.to_string()))?;
        if !property.value.same_type(&value) {
            return Err(PropertyError::TypeMismatch {
                id: id.to_string(),
                expected: property.value.type_name(),
                found: value.type_name(),
            });
        }
        property.value = property.clamped(value);
        Ok(())
    }

    /// Entry with id `id`.
    pub fn property(&self, id: &str) -> Option<&Property> {
        self.entries.get(id)
    }

    /// Value with id `id`.
    pub fn get(&self, id: &str) -> Option<&PropertyValue> {
        self.entries.get(id).map(|p| &p.value)
    }

    /// Iterates entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn typed<'a, T>(
        &'a self,
        id: &str,
        expected: &'static str,
        pick: impl FnOnce(&'a PropertyValue) -> Option<T>,
    ) -> Result<T, PropertyError> {
        let value = self
            .get(id)
            .ok_or_else(|| PropertyError::Missing(id.to_string()))?;
        pick(value).ok_or_else(|| PropertyError::TypeMismatch {
            id: id.to_string(),
            expected,
            found: value.type_name(),
        })
    }

    /// Boolean value of `id`.
    pub fn get_bool(&self, id: &str) -> Result<bool, PropertyError> {
        self.typed(id, "bool", |v| match v {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Integer value of `id`.
    pub fn get_int(&self, id: &str) -> Result<i64, PropertyError> {
        self.typed(id, "int", |v| match v {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Float value of `id`; integer properties convert.
    pub fn get_float(&self, id: &str) -> Result<f64, PropertyError> {
        self.typed(id, "float", |v| match v {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Int(i) => Some(*i as f64),
            _ => None,
        })
    }

    /// Text value of `id`.
    pub fn get_text(&self, id: &str) -> Result<&str, PropertyError> {
        self.typed(id, "text", |v| match v {
            PropertyValue::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Float list value of `id`.
    pub fn get_floats(&self, id: &str) -> Result<&[f64], PropertyError> {
        self.typed(id, "floats", |v| match v {
            PropertyValue::Floats(f) => Some(f.as_slice()),
            _ => None,
        })
    }

    // =========================================================================
    // SERIALIZATION
    // =========================================================================

    /// Writes every `(id, value)` pair. Labels and ranges are not stored.
    pub fn serialize(&self, writer: &mut RecordWriter) -> Result<(), RecordError> {
        writer.write_header(PROPERTIES_TAG, PROPERTIES_VERSION)?;
        writer.write(&(self.entries.len() as u32))?;
        for (id, property) in &self.entries {
            writer.write(id.as_str())?;
            writer.write(&property.value)?;
        }
        Ok(())
    }

    /// Loads values into the already defined entries.
    ///
    /// Stored ids that are unknown here, or whose type changed, are skipped.
    pub fn deserialize(&mut self, reader: &mut RecordReader<'_>) -> Result<(), RecordError> {
        reader.read_header(PROPERTIES_TAG, PROPERTIES_VERSION)?;
        let count: u32 = reader.read()?;
        for _ in 0..count {
            let id: String = reader.read()?;
            let value: PropertyValue = reader.read()?;
            match self.entries.get_mut(&id) {
                Some(property) if property.value.same_type(&value) => {
                    property.value = property.clamped(value);
                }
                Some(property) => log::debug!(
                    "ignoring stored property '{}': {} is now {}",
                    id,
                    value.type_name(),
                    property.value.type_name()
                ),
                None => log::debug!("ignoring unknown stored property '{}'", id),
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Properties {
        let mut props = Properties::new();
        props
            .define("level", "level", "passes", 2i64)
            .define("amount", "amount", "", 0.5)
            .define("text", "text", "", "hi")
            .define("on", "enabled", "", true)
            .define("color", "color", "", vec![1.0, 0.5, 0.0, 1.0]);
        props.set_range("level", 1.0, 10.0);
        props
    }

    #[test]
    fn test_typed_getters() {
        let props = sample();
        assert_eq!(props.get_int("level").unwrap(), 2);
        assert_eq!(props.get_float("level").unwrap(), 2.0);
        assert_eq!(props.get_float("amount").unwrap(), 0.5);
        assert_eq!(props.get_text("text").unwrap(), "hi");
        assert!(props.get_bool("on").unwrap());
        assert_eq!(props.get_floats("color").unwrap().len(), 4);
        assert_eq!(
            props.get_int("text"),
            Err(PropertyError::TypeMismatch {
                id: "text".into(),
                expected: "int",
                found: "text",
            })
        );
        assert_eq!(props.get_bool("nope"), Err(PropertyError::Missing("nope".into())));
    }

    #[test]
    fn test_change_checks_type_and_clamps() {
        let mut props = sample();
        props.change("level", 50i64).unwrap();
        assert_eq!(props.get_int("level").unwrap(), 10);
        props.change("level", -3i64).unwrap();
        assert_eq!(props.get_int("level").unwrap(), 1);
        assert!(props.change("level", 2.0).is_err());
        assert!(props.change("missing", 2.0).is_err());
    }

    #[test]
    fn test_round_trip_keeps_known_matching_entries() {
        let mut stored = sample();
        stored.change("amount", 0.75).unwrap();
        stored.define("obsolete", "", "", 1i64);
        // Same id, different type than the reader expects
        stored.define("on", "", "", 3i64);

        let mut writer = RecordWriter::new();
        stored.serialize(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        let mut loaded = sample();
        loaded.deserialize(&mut RecordReader::new(&bytes)).unwrap();
        assert_eq!(loaded.get_float("amount").unwrap(), 0.75);
        assert!(loaded.get_bool("on").unwrap());
        assert!(loaded.get("obsolete").is_none());
        assert_eq!(loaded.len(), 5);
    }
}
