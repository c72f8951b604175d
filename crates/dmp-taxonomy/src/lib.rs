#![deny(unsafe_code)]

pub mod dictionary;
pub mod document;
pub mod error;
pub mod hash;
pub mod index;
pub mod loader;
pub mod taxonomy;

pub use crate::dictionary::{Resolution, TypeDictionaries, TypeDictionary};
pub use crate::document::{Document, Sheet};
pub use crate::error::DocumentError;
pub use crate::index::AttributeIndex;
pub use crate::loader::{ATTRIBUTES_SHEET, RESERVED_SHEETS, is_reserved_sheet};
pub use crate::taxonomy::{Taxonomy, TaxonomySummary};
