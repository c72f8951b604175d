//! Outbound event projection of decoded records.
//!
//! Only attributes on the allow-list are forwarded, renamed to their
//! outbound keys. The decoder itself knows nothing about this mapping.

use std::collections::BTreeMap;

use dmp_model::DecodedRecord;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{ForwardSection, Route};

/// Outbound key carrying the external event name.
pub const EVENT_NAME_FIELD: &str = "eventname";

#[derive(Debug, Clone)]
pub struct Forwarder {
    identity_field: String,
    routes: Vec<Route>,
    attributes: BTreeMap<String, String>,
}

impl Forwarder {
    pub fn new(config: &ForwardSection) -> Self {
        Self {
            identity_field: config.identity_field.clone(),
            routes: config.routes.clone(),
            attributes: config.attributes.clone(),
        }
    }

    /// True when at least one route listens for `event_name`.
    pub fn handles(&self, event_name: &str) -> bool {
        self.routes.iter().any(|route| route.event_name == event_name)
    }

    /// Build one outbound event per matching route with an external event.
    pub fn project(&self, event_name: &str, record: &DecodedRecord) -> Vec<Value> {
        let events: Vec<Value> = self
            .routes
            .iter()
            .filter(|route| route.event_name == event_name)
            .filter_map(|route| route.external_event.as_deref())
            .map(|external_event| Value::Object(self.outbound(external_event, record)))
            .collect();
        debug!(
            event_name,
            subject_id = %record.subject_id,
            event_count = events.len(),
            "record projected"
        );
        events
    }

    fn outbound(&self, external_event: &str, record: &DecodedRecord) -> Map<String, Value> {
        let mut event = Map::new();
        event.insert(
            EVENT_NAME_FIELD.to_string(),
            Value::String(external_event.to_string()),
        );
        event.insert(
            self.identity_field.clone(),
            Value::String(record.subject_id.clone()),
        );
        for (name, outbound_key) in &self.attributes {
            if let Some(value) = record.get(name) {
                event.insert(outbound_key.clone(), Value::String(value.to_string()));
            }
        }
        event
    }
}
