//! Outbound event projection.

use std::collections::BTreeMap;

use dmp_cli::config::{ForwardSection, Route};
use dmp_cli::forward::Forwarder;
use dmp_model::DecodedRecord;

fn forwarder() -> Forwarder {
    let mut attributes = BTreeMap::new();
    attributes.insert("sd_age_estimated".to_string(), "attribute_4".to_string());
    attributes.insert("leisure_hobby".to_string(), "attribute_3".to_string());
    attributes.insert("sd_job_pos_category".to_string(), "attribute_5".to_string());
    Forwarder::new(&ForwardSection {
        routes: vec![
            Route {
                event_name: "page_view".to_string(),
                external_event: Some("dmp_profile".to_string()),
            },
            Route {
                event_name: "page_view".to_string(),
                external_event: Some("dmp_audit".to_string()),
            },
            Route {
                event_name: "login".to_string(),
                external_event: None,
            },
        ],
        attributes,
        ..ForwardSection::default()
    })
}

fn decoded() -> DecodedRecord {
    let attrs = [
        ("sd_age_estimated", "34"),
        ("leisure_hobby", "Chess"),
        ("city", "Berlin"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect();
    DecodedRecord::new("dh-42", attrs)
}

#[test]
fn projects_allow_listed_attributes() {
    let events = forwarder().project("page_view", &decoded());

    insta::with_settings!({sort_maps => true}, {
        insta::assert_json_snapshot!(events, @r#"
        [
          {
            "attribute_3": "Chess",
            "attribute_4": "34",
            "datahub_id": "dh-42",
            "eventname": "dmp_profile"
          },
          {
            "attribute_3": "Chess",
            "attribute_4": "34",
            "datahub_id": "dh-42",
            "eventname": "dmp_audit"
          }
        ]
        "#);
    });
}

#[test]
fn route_without_external_event_emits_nothing() {
    let forwarder = forwarder();
    assert!(forwarder.handles("login"));
    assert!(forwarder.project("login", &decoded()).is_empty());
}

#[test]
fn unrouted_event_emits_nothing() {
    let forwarder = forwarder();
    assert!(!forwarder.handles("checkout"));
    assert!(forwarder.project("checkout", &decoded()).is_empty());
}

#[test]
fn identity_field_is_configurable() {
    let forwarder = Forwarder::new(&ForwardSection {
        identity_field: "subject_id".to_string(),
        routes: vec![Route {
            event_name: "e".to_string(),
            external_event: Some("out".to_string()),
        }],
        attributes: BTreeMap::new(),
    });
    let events = forwarder.project("e", &decoded());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["subject_id"], "dh-42");
    assert_eq!(events[0]["eventname"], "out");
    assert!(events[0].get("attribute_4").is_none());
}
