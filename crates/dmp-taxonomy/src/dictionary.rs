//! Code dictionaries for referential attribute types.

use std::collections::BTreeMap;

use serde::Serialize;

/// Code -> description table sourced from one dictionary sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeDictionary {
    entries: BTreeMap<String, String>,
}

impl TypeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code; a later insert for the same code replaces the earlier one.
    pub fn insert(&mut self, code: impl Into<String>, description: impl Into<String>) {
        self.entries.insert(code.into(), description.into());
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, description)| (code.as_str(), description.as_str()))
    }
}

impl<C, D> FromIterator<(C, D)> for TypeDictionary
where
    C: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, D)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (code, description) in iter {
            dictionary.insert(code, description);
        }
        dictionary
    }
}

/// Outcome of a two-level dictionary lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a str),
    /// No dictionary is registered under the type name.
    UnknownType,
    /// The dictionary exists but does not contain the code.
    UnknownCode,
}

impl<'a> Resolution<'a> {
    pub fn value(self) -> Option<&'a str> {
        match self {
            Resolution::Found(value) => Some(value),
            Resolution::UnknownType | Resolution::UnknownCode => None,
        }
    }
}

/// All dictionaries of a taxonomy, keyed by sheet name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeDictionaries {
    by_type: BTreeMap<String, TypeDictionary>,
}

impl TypeDictionaries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dictionary, replacing any previous one with the same name.
    pub fn insert(&mut self, type_name: impl Into<String>, dictionary: TypeDictionary) {
        self.by_type.insert(type_name.into(), dictionary);
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeDictionary> {
        self.by_type.get(type_name)
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.by_type.contains_key(type_name)
    }

    pub fn resolve(&self, type_name: &str, code: &str) -> Resolution<'_> {
        match self.by_type.get(type_name) {
            None => Resolution::UnknownType,
            Some(dictionary) => dictionary
                .get(code)
                .map_or(Resolution::UnknownCode, Resolution::Found),
        }
    }

    pub fn lookup(&self, type_name: &str, code: &str) -> Option<&str> {
        self.resolve(type_name, code).value()
    }

    /// Number of registered dictionaries, empty ones included.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDictionary)> {
        self.by_type
            .iter()
            .map(|(name, dictionary)| (name.as_str(), dictionary))
    }
}
