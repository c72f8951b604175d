//! Decoding of encoded attribute records against a loaded taxonomy.
//!
//! For every `(primary, secondary)` pair the attribute definition is looked
//! up by id; direct types keep the code as the value and referential types
//! map it through the type's code dictionary. Unresolvable attributes and
//! sentinel values are dropped without failing the record.

#![deny(unsafe_code)]

pub mod decoder;
pub mod error;
pub mod policy;
pub mod stats;

pub use decoder::{Decoder, parse_record, record_from_value};
pub use error::DecodeError;
pub use policy::{DEFAULT_SENTINELS, ExclusionPolicy, NO_VALUE_SENTINEL};
pub use stats::{AttributeOutcome, DecodeStats};
