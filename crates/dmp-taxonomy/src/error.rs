#![deny(unsafe_code)]

use std::path::PathBuf;

/// Failure to turn a taxonomy document into a usable taxonomy.
///
/// Every variant is fatal for startup: there is no partial taxonomy to
/// decode with.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet '{sheet}' in {path}: {source}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to parse CSV sheet {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no sheets found in {path}")]
    Empty { path: PathBuf },

    #[error("taxonomy document has no '{sheet}' sheet")]
    MissingAttributesSheet { sheet: String },
}

impl DocumentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
