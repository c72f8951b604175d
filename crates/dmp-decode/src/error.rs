use thiserror::Error;

/// A record that cannot be decoded at all.
///
/// Per-attribute resolution failures are not errors; they only drop the
/// attribute from the output.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input text is not JSON.
    #[error("input is not valid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON without the encoded record shape (`id`, `attrs[].primary`).
    #[error("malformed encoded record: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
