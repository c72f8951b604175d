use std::collections::HashMap;
use std::collections::hash_map::Entry;

use dmp_model::AttributeDefinition;

/// The ordered attribute table with an id lookup.
///
/// The first row carrying an id is authoritative; later rows with the same
/// id stay in the table (document order is preserved) but are recorded as
/// duplicates and never returned by `lookup`.
#[derive(Debug, Clone, Default)]
pub struct AttributeIndex {
    attributes: Vec<AttributeDefinition>,
    positions: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl AttributeIndex {
    pub fn new(attributes: Vec<AttributeDefinition>) -> Self {
        let mut positions = HashMap::with_capacity(attributes.len());
        let mut duplicates = Vec::new();
        for (position, attribute) in attributes.iter().enumerate() {
            match positions.entry(attribute.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => duplicates.push(attribute.id.clone()),
            }
        }
        Self {
            attributes,
            positions,
            duplicates,
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&AttributeDefinition> {
        self.positions
            .get(id)
            .and_then(|&position| self.attributes.get(position))
    }

    /// Every row of the attribute table in document order, duplicates included.
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Shadowed ids, one entry per ignored row, in document order.
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicates
    }
}

impl FromIterator<AttributeDefinition> for AttributeIndex {
    fn from_iter<I: IntoIterator<Item = AttributeDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_definition_wins() {
        let index: AttributeIndex = vec![
            AttributeDefinition::new("A1", "age", "Integer"),
            AttributeDefinition::new("A2", "city", "CityCodes"),
            AttributeDefinition::new("A1", "age_v2", "String"),
        ]
        .into_iter()
        .collect();

        let age = index.lookup("A1").unwrap();
        assert_eq!(age.name, "age");
        assert_eq!(age.type_name, "Integer");
        assert_eq!(index.len(), 2);
        assert_eq!(index.attributes().len(), 3);
        assert_eq!(index.duplicate_ids(), ["A1".to_string()]);
    }

    #[test]
    fn unknown_id_is_absent() {
        let index = AttributeIndex::new(vec![AttributeDefinition::new("A1", "age", "Integer")]);
        assert!(index.lookup("ZZ").is_none());
    }
}
