//! Property tests over arbitrary encoded records.

use std::sync::Arc;

use dmp_decode::{DEFAULT_SENTINELS, Decoder};
use dmp_model::{AttributeDefinition, EncodedAttribute, EncodedRecord};
use dmp_taxonomy::{Taxonomy, TypeDictionaries};
use proptest::prelude::*;

fn decoder() -> Decoder {
    let mut dictionaries = TypeDictionaries::new();
    dictionaries.insert(
        "Codes",
        [("1", "one"), ("2", "0"), ("3", "Отсутствует"), ("4", "four")]
            .into_iter()
            .collect(),
    );
    let taxonomy = Taxonomy::new(
        vec![
            AttributeDefinition::new("A1", "direct", "String"),
            AttributeDefinition::new("A2", "coded", "Codes"),
            AttributeDefinition::new("A3", "orphan", "MissingCodes"),
        ],
        dictionaries,
    );
    Decoder::new(Arc::new(taxonomy))
}

fn arb_attribute() -> impl Strategy<Value = EncodedAttribute> {
    let primary = prop_oneof![
        Just("A1".to_string()),
        Just("A2".to_string()),
        Just("A3".to_string()),
        "[A-Z][0-9]{1,3}",
    ];
    let secondary = prop_oneof![
        Just("0".to_string()),
        Just(String::new()),
        "[0-9]{1,2}",
        "[a-zа-я ]{0,6}",
    ];
    (primary, proptest::option::of(secondary))
        .prop_map(|(primary, secondary)| EncodedAttribute { primary, secondary })
}

fn arb_record() -> impl Strategy<Value = EncodedRecord> {
    ("[a-z0-9]{1,8}", prop::collection::vec(arb_attribute(), 0..12))
        .prop_map(|(id, attrs)| EncodedRecord::new(id, attrs))
}

proptest! {
    #[test]
    fn decode_is_idempotent(record in arb_record()) {
        let decoder = decoder();
        let first = serde_json::to_vec(&decoder.decode(&record)).unwrap();
        let second = serde_json::to_vec(&decoder.decode(&record)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_never_holds_sentinels(record in arb_record()) {
        let decoded = decoder().decode(&record);
        for value in decoded.attrs.values() {
            prop_assert!(!DEFAULT_SENTINELS.contains(&value.as_str()));
        }
    }

    #[test]
    fn output_names_come_from_known_attributes(record in arb_record()) {
        let decoded = decoder().decode(&record);
        prop_assert_eq!(&decoded.subject_id, &record.subject_id);
        for name in decoded.attrs.keys() {
            prop_assert!(name == "direct" || name == "coded");
        }
    }

    #[test]
    fn stats_cover_every_attribute(record in arb_record()) {
        let (decoded, stats) = decoder().decode_with_stats(&record);
        prop_assert_eq!(stats.attributes(), record.attrs.len());
        prop_assert!(decoded.len() <= stats.decoded);
    }
}
