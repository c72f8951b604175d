use std::collections::BTreeMap;
use std::sync::Arc;

use dmp_model::{AttributeKind, DecodedRecord, EncodedAttribute, EncodedRecord};
use dmp_taxonomy::{Resolution, Taxonomy};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::error::{DecodeError, Result};
use crate::policy::ExclusionPolicy;
use crate::stats::{AttributeOutcome, DecodeStats};

/// Turns encoded records into decoded ones against a shared taxonomy.
///
/// Decoding reads the taxonomy only; one decoder can serve any number of
/// threads.
#[derive(Debug, Clone)]
pub struct Decoder {
    taxonomy: Arc<Taxonomy>,
    policy: ExclusionPolicy,
}

impl Decoder {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            policy: ExclusionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn decode(&self, record: &EncodedRecord) -> DecodedRecord {
        self.decode_with_stats(record).0
    }

    /// Decode a record and count what happened to each attribute.
    pub fn decode_with_stats(&self, record: &EncodedRecord) -> (DecodedRecord, DecodeStats) {
        let mut attrs = BTreeMap::new();
        let mut stats = DecodeStats {
            records: 1,
            ..DecodeStats::default()
        };

        for attribute in &record.attrs {
            match self.resolve(attribute) {
                Ok((name, value)) => {
                    attrs.insert(name.to_string(), value.to_string());
                    stats.record(AttributeOutcome::Decoded);
                }
                Err(outcome) => {
                    trace!(
                        subject_id = %record.subject_id,
                        primary = %attribute.primary,
                        secondary = attribute.secondary.as_deref().unwrap_or("-"),
                        outcome = %outcome,
                        "attribute dropped"
                    );
                    stats.record(outcome);
                }
            }
        }

        (DecodedRecord::new(record.subject_id.clone(), attrs), stats)
    }

    /// Resolve one attribute to `(name, value)`, or say why it is dropped.
    pub fn resolve<'a>(
        &'a self,
        attribute: &'a EncodedAttribute,
    ) -> std::result::Result<(&'a str, &'a str), AttributeOutcome> {
        let definition = self
            .taxonomy
            .attribute(&attribute.primary)
            .ok_or(AttributeOutcome::UnknownAttribute)?;
        let code = attribute
            .secondary
            .as_deref()
            .ok_or(AttributeOutcome::MissingValue)?;

        let value = match definition.kind() {
            AttributeKind::Direct(_) => code,
            AttributeKind::Referential(type_name) => {
                match self.taxonomy.dictionaries().resolve(type_name, code) {
                    Resolution::Found(value) => value,
                    Resolution::UnknownType => return Err(AttributeOutcome::UnknownType),
                    Resolution::UnknownCode => return Err(AttributeOutcome::UnknownCode),
                }
            }
        };

        if self.policy.excludes(value) {
            return Err(AttributeOutcome::Excluded);
        }
        Ok((definition.name.as_str(), value))
    }

    /// Decode an already parsed JSON value.
    pub fn decode_value(&self, value: &Value) -> Result<DecodedRecord> {
        let record = record_from_value(value)?;
        Ok(self.decode(&record))
    }

    /// Decode one JSON document.
    pub fn decode_json(&self, text: &str) -> Result<DecodedRecord> {
        let record = parse_record(text)?;
        Ok(self.decode(&record))
    }
}

/// Parse JSON text into an encoded record.
///
/// Text that is not JSON is a [`DecodeError::Json`]; JSON of the wrong
/// shape is a [`DecodeError::Malformed`].
pub fn parse_record(text: &str) -> Result<EncodedRecord> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| DecodeError::Json { source })?;
    record_from_value(&value)
}

pub fn record_from_value(value: &Value) -> Result<EncodedRecord> {
    EncodedRecord::deserialize(value).map_err(|source| DecodeError::Malformed { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmp_model::AttributeDefinition;
    use dmp_taxonomy::TypeDictionaries;

    fn decoder() -> Decoder {
        let mut dictionaries = TypeDictionaries::new();
        dictionaries.insert("CityCodes", [("5", "Berlin")].into_iter().collect());
        let taxonomy = Taxonomy::new(
            vec![
                AttributeDefinition::new("A1", "age", "Integer"),
                AttributeDefinition::new("A2", "city", "CityCodes"),
                AttributeDefinition::new("A3", "region", "RegionCodes"),
            ],
            dictionaries,
        );
        Decoder::new(Arc::new(taxonomy))
    }

    #[test]
    fn resolve_reports_each_outcome() {
        let decoder = decoder();
        let cases = [
            (EncodedAttribute::new("A1", "34"), Ok(("age", "34"))),
            (EncodedAttribute::new("A2", "5"), Ok(("city", "Berlin"))),
            (EncodedAttribute::new("ZZ", "1"), Err(AttributeOutcome::UnknownAttribute)),
            (EncodedAttribute::new("A3", "1"), Err(AttributeOutcome::UnknownType)),
            (EncodedAttribute::new("A2", "9"), Err(AttributeOutcome::UnknownCode)),
            (EncodedAttribute::new("A1", "0"), Err(AttributeOutcome::Excluded)),
        ];
        for (attribute, expected) in cases {
            assert_eq!(decoder.resolve(&attribute), expected, "{attribute:?}");
        }

        let missing = EncodedAttribute {
            primary: "A1".to_string(),
            secondary: None,
        };
        assert_eq!(decoder.resolve(&missing), Err(AttributeOutcome::MissingValue));
    }

    #[test]
    fn json_and_shape_errors_are_distinct() {
        assert!(matches!(parse_record("{not json"), Err(DecodeError::Json { .. })));
        assert!(matches!(
            parse_record(r#"{"attrs": []}"#),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(
            parse_record(r#"{"id": "u1", "attrs": {}}"#),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(
            parse_record(r#"{"id": "u1", "attrs": [{"secondary": "1"}]}"#),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn decoder_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Decoder>();
    }
}
