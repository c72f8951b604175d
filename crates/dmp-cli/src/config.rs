//! TOML configuration for the decoder CLI.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable consulted when no taxonomy path is configured.
pub const TAXONOMY_PATH_ENV: &str = "DMP_TAXONOMY_PATH";

/// Taxonomy file looked up in the working directory as a last resort.
pub const DEFAULT_TAXONOMY_FILE: &str = "cleverdata_taxonomy_client.xlsm";

/// Outbound key carrying the subject id.
pub const DEFAULT_IDENTITY_FIELD: &str = "datahub_id";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub taxonomy: TaxonomySection,
    pub decode: DecodeSection,
    pub forward: ForwardSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxonomySection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeSection {
    /// Added to the built-in sentinel values; the built-ins always apply.
    pub extra_sentinels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForwardSection {
    pub identity_field: String,
    pub routes: Vec<Route>,
    /// Decoded attribute name -> outbound key.
    pub attributes: BTreeMap<String, String>,
}

impl Default for ForwardSection {
    fn default() -> Self {
        Self {
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
            routes: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }
}

/// Maps an incoming event name to the outbound event it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Route {
    pub event_name: String,
    #[serde(default)]
    pub external_event: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the file when a path is given, otherwise use defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Taxonomy location: explicit argument, config file, environment, then
    /// the conventional file name.
    pub fn taxonomy_path(&self, explicit: Option<&Path>) -> PathBuf {
        resolve_taxonomy_path(
            explicit,
            self.taxonomy.path.as_deref(),
            env::var_os(TAXONOMY_PATH_ENV).map(PathBuf::from),
        )
    }
}

fn resolve_taxonomy_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    from_env: Option<PathBuf>,
) -> PathBuf {
    explicit
        .or(configured)
        .map(Path::to_path_buf)
        .or(from_env.filter(|path| !path.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TAXONOMY_FILE))
}
