//! Encoded and decoded attribute records.
//!
//! Wire format of an encoded record:
//!
//! ```text
//! { "id": "u-1", "attrs": [ { "primary": "A1", "secondary": "34" }, ... ] }
//! ```
//!
//! and of a decoded record:
//!
//! ```text
//! { "id": "u-1", "attrs": { "age": "34", ... } }
//! ```
//!
//! Identifier and code fields accept JSON numbers and booleans as well as
//! strings; producers are not consistent about quoting numeric codes.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// One `(primary, secondary)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedAttribute {
    /// Attribute id in the taxonomy.
    #[serde(deserialize_with = "scalar_string")]
    pub primary: String,
    /// Raw code; `None` when the producer sent `null` or omitted it.
    #[serde(
        default,
        deserialize_with = "optional_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary: Option<String>,
}

impl EncodedAttribute {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: Some(secondary.into()),
        }
    }
}

/// A subject's attributes as delivered by the data-management platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRecord {
    #[serde(rename = "id", deserialize_with = "scalar_string")]
    pub subject_id: String,
    pub attrs: Vec<EncodedAttribute>,
}

impl EncodedRecord {
    pub fn new(subject_id: impl Into<String>, attrs: Vec<EncodedAttribute>) -> Self {
        Self {
            subject_id: subject_id.into(),
            attrs,
        }
    }
}

/// A subject's attributes keyed by human-readable attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    #[serde(rename = "id")]
    pub subject_id: String,
    pub attrs: BTreeMap<String, String>,
}

impl DecodedRecord {
    pub fn new(subject_id: impl Into<String>, attrs: BTreeMap<String, String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            attrs,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<String, E> {
        Ok(value.to_string())
    }
}

struct OptionalScalarVisitor;

impl<'de> Visitor<'de> for OptionalScalarVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null or a string, number or boolean")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        scalar_string(deserializer).map(Some)
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(ScalarVisitor)
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_option(OptionalScalarVisitor)
}
