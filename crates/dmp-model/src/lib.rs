//! Data model for taxonomy-driven attribute decoding.

pub mod attribute;
pub mod record;
pub mod scalar;

pub use attribute::{AttributeDefinition, AttributeKind};
pub use record::{DecodedRecord, EncodedAttribute, EncodedRecord};
pub use scalar::ScalarType;
