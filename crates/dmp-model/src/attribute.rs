use serde::{Deserialize, Serialize};

use crate::scalar::ScalarType;

/// One row of the taxonomy's "Attributes" sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Taxonomy key, matched against the `primary` code of encoded attributes.
    pub id: String,
    /// Output key of the decoded attribute.
    pub name: String,
    pub short_name: String,
    /// Either a scalar tag or the name of a code dictionary sheet.
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}

impl AttributeDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: String::new(),
            type_name: type_name.into(),
            description: String::new(),
        }
    }

    /// Classify the type column.
    pub fn kind(&self) -> AttributeKind<'_> {
        AttributeKind::classify(&self.type_name)
    }
}

/// How the secondary code of an attribute is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind<'a> {
    /// The secondary code is the value.
    Direct(ScalarType),
    /// The secondary code is a key into the named code dictionary.
    Referential(&'a str),
}

impl<'a> AttributeKind<'a> {
    pub fn classify(type_name: &'a str) -> Self {
        match type_name.parse::<ScalarType>() {
            Ok(scalar) => AttributeKind::Direct(scalar),
            Err(_) => AttributeKind::Referential(type_name),
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, AttributeKind::Direct(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Direct(_) => "direct",
            AttributeKind::Referential(_) => "referential",
        }
    }
}
