//! Sheet layout of the taxonomy document.
//!
//! Both the attribute table and the code dictionaries share one layout
//! convention: the first three rows are header/metadata and data rows are
//! identified by a non-blank cell in column 1.

use dmp_model::AttributeDefinition;
use tracing::{debug, trace};

use crate::dictionary::{TypeDictionaries, TypeDictionary};
use crate::document::{Document, Sheet};

/// Name of the master attribute sheet.
pub const ATTRIBUTES_SHEET: &str = "Attributes";

/// Sheets that hold metadata rather than code tables.
pub const RESERVED_SHEETS: &[&str] = &[
    "Id-Sync-Table",
    "Attributes",
    "Notes",
    "Sheets",
    "types",
    "Groups",
    "D-System",
];

/// Rows with a smaller index are headers.
pub const HEADER_ROWS: usize = 3;

const ID_COLUMN: usize = 1;
const NAME_COLUMN: usize = 2;
const SHORT_NAME_COLUMN: usize = 3;
const TYPE_COLUMN: usize = 4;
const DESCRIPTION_COLUMN: usize = 5;

const CODE_COLUMN: usize = 1;
const CODE_DESCRIPTION_COLUMN: usize = 3;

pub fn is_reserved_sheet(name: &str) -> bool {
    RESERVED_SHEETS.contains(&name)
}

/// Data rows of a sheet: past the header block, with a non-blank key cell.
fn data_rows(sheet: &Sheet) -> impl Iterator<Item = usize> + '_ {
    sheet
        .rows()
        .filter(|(idx, _)| *idx >= HEADER_ROWS)
        .filter(move |(idx, _)| !sheet.cell(*idx, ID_COLUMN).is_empty())
        .map(|(idx, _)| idx)
}

/// Read the attribute table in document row order.
pub fn parse_attributes(sheet: &Sheet) -> Vec<AttributeDefinition> {
    let attributes: Vec<AttributeDefinition> = data_rows(sheet)
        .map(|row| AttributeDefinition {
            id: sheet.cell(row, ID_COLUMN).to_string(),
            name: sheet.cell(row, NAME_COLUMN).to_string(),
            short_name: sheet.cell(row, SHORT_NAME_COLUMN).to_string(),
            type_name: sheet.cell(row, TYPE_COLUMN).to_string(),
            description: sheet.cell(row, DESCRIPTION_COLUMN).to_string(),
        })
        .collect();
    debug!(
        sheet = sheet.name(),
        attribute_count = attributes.len(),
        "attribute table parsed"
    );
    attributes
}

/// Read one code dictionary sheet.
pub fn parse_dictionary(sheet: &Sheet) -> TypeDictionary {
    let dictionary: TypeDictionary = data_rows(sheet)
        .map(|row| {
            (
                sheet.cell(row, CODE_COLUMN),
                sheet.cell(row, CODE_DESCRIPTION_COLUMN),
            )
        })
        .collect();
    trace!(
        sheet = sheet.name(),
        entry_count = dictionary.len(),
        "code dictionary parsed"
    );
    dictionary
}

/// Build a dictionary for every non-reserved sheet, empty ones included.
pub fn parse_dictionaries(document: &Document) -> TypeDictionaries {
    let mut dictionaries = TypeDictionaries::new();
    for sheet in document.sheets() {
        if is_reserved_sheet(sheet.name()) {
            continue;
        }
        dictionaries.insert(sheet.name(), parse_dictionary(sheet));
    }
    dictionaries
}
