//! Direct scalar type tags.
//!
//! An attribute whose type column holds one of these tags carries its value
//! inline: the secondary code of an encoded attribute is the value itself.
//! Any other type name refers to a code dictionary sheet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of scalar tags used in the taxonomy's type column.
///
/// Matching is exact: `integer` is not `Integer` and resolves as a
/// dictionary reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarType {
    Boolean,
    Character,
    Byte,
    Integer,
    Long,
    Double,
    String,
    Enum,
    ABoolean,
    ACharacter,
    AByte,
    AInteger,
    ALong,
    ADouble,
    AString,
    AEnum,
    AAByte,
    #[serde(rename = "D-Currency")]
    DCurrency,
}

impl ScalarType {
    /// Every scalar tag, in the order the taxonomy documents them.
    pub const ALL: [ScalarType; 18] = [
        ScalarType::Boolean,
        ScalarType::Character,
        ScalarType::Byte,
        ScalarType::Integer,
        ScalarType::Long,
        ScalarType::Double,
        ScalarType::String,
        ScalarType::Enum,
        ScalarType::ABoolean,
        ScalarType::ACharacter,
        ScalarType::AByte,
        ScalarType::AInteger,
        ScalarType::ALong,
        ScalarType::ADouble,
        ScalarType::AString,
        ScalarType::AEnum,
        ScalarType::AAByte,
        ScalarType::DCurrency,
    ];

    /// Returns the tag exactly as it appears in the taxonomy document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "Boolean",
            ScalarType::Character => "Character",
            ScalarType::Byte => "Byte",
            ScalarType::Integer => "Integer",
            ScalarType::Long => "Long",
            ScalarType::Double => "Double",
            ScalarType::String => "String",
            ScalarType::Enum => "Enum",
            ScalarType::ABoolean => "ABoolean",
            ScalarType::ACharacter => "ACharacter",
            ScalarType::AByte => "AByte",
            ScalarType::AInteger => "AInteger",
            ScalarType::ALong => "ALong",
            ScalarType::ADouble => "ADouble",
            ScalarType::AString => "AString",
            ScalarType::AEnum => "AEnum",
            ScalarType::AAByte => "AAByte",
            ScalarType::DCurrency => "D-Currency",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScalarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScalarType::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("Unknown scalar type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_tag() {
        for tag in ScalarType::ALL {
            assert_eq!(tag.as_str().parse::<ScalarType>(), Ok(tag));
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("integer".parse::<ScalarType>().is_err());
        assert!("INTEGER".parse::<ScalarType>().is_err());
        assert!(" Integer".parse::<ScalarType>().is_err());
        assert!("DCurrency".parse::<ScalarType>().is_err());
    }
}
