//! Values that mean "attribute is unset".

use serde::Serialize;

/// Localized "absent" marker used by the taxonomy's code dictionaries.
pub const NO_VALUE_SENTINEL: &str = "Отсутствует";

/// Values that are always excluded from decoded output.
pub const DEFAULT_SENTINELS: &[&str] = &["", "0", NO_VALUE_SENTINEL];

/// Decides which resolved values are dropped from decoded output.
///
/// The default set is fixed; configuration can only add to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionPolicy {
    sentinels: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            sentinels: DEFAULT_SENTINELS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl ExclusionPolicy {
    /// Add extra sentinel values on top of the defaults.
    #[must_use]
    pub fn with_extra_sentinels<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for sentinel in extra {
            let sentinel = sentinel.into();
            if !self.sentinels.contains(&sentinel) {
                self.sentinels.push(sentinel);
            }
        }
        self
    }

    pub fn excludes(&self, value: &str) -> bool {
        self.sentinels.iter().any(|sentinel| sentinel == value)
    }

    pub fn sentinels(&self) -> &[String] {
        &self.sentinels
    }
}
