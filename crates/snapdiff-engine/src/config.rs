//! Runtime configuration.
//!
//! Loaded from a TOML file, then overridden by environment variables (a
//! `.env` file in the working directory is honoured):
//!
//! ```toml
//! [store]
//! root = "snapshots"
//!
//! [source]
//! dir = "incoming"
//!
//! [logging]
//! profile = "production"
//!
//! [datasets.article]
//! key_field = "reference"
//! collection_field = "articles"
//!
//! [datasets.stock]
//! key_field = "ref"
//! ```

use crate::fetcher::SourceConfig;
use serde::Deserialize;
use snapdiff_core::diff::DEFAULT_KEY_FIELD;
use snapdiff_core::errors::{ExError, ExErrorKind, Result};
use snapdiff_core::logging_facility::Profile;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File read when no explicit config path is given and it exists
pub const DEFAULT_CONFIG_FILE: &str = "snapdiff.toml";

pub const ENV_ROOT: &str = "SNAPDIFF_ROOT";
pub const ENV_SOURCE_DIR: &str = "SNAPDIFF_SOURCE_DIR";
pub const ENV_LOG_PROFILE: &str = "SNAPDIFF_LOG_PROFILE";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapDiffConfig {
    pub store: StoreSection,
    pub source: SourceSection,
    pub logging: LoggingSection,
    pub datasets: BTreeMap<String, DatasetConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// Directory holding one sub-directory per dataset
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSection {
    /// Drop directory the fetcher reads `<dataset>.json` payloads from
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub profile: String,
}

/// Per-dataset comparison settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Field correlating records across snapshots
    pub key_field: String,
    /// Envelope field holding the records when the source wraps them
    pub collection_field: Option<String>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("snapshots"),
        }
    }
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("incoming"),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            profile: "development".to_string(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            key_field: DEFAULT_KEY_FIELD.to_string(),
            collection_field: None,
        }
    }
}

impl SnapDiffConfig {
    /// Load configuration for a process.
    ///
    /// Reads `path` when given (it must exist), else `snapdiff.toml` when
    /// present, else defaults; then applies environment overrides.
    ///
    /// # Errors
    ///
    /// - `Config`: the file cannot be read or is not valid configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// # Errors
    ///
    /// - `Config`: the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// - `Config`: the text is not valid configuration TOML
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("parse_config")
                .with_message(e.to_string())
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_ROOT) {
            self.store.root = PathBuf::from(root);
        }
        if let Some(dir) = lookup(ENV_SOURCE_DIR) {
            self.source.dir = PathBuf::from(dir);
        }
        if let Some(profile) = lookup(ENV_LOG_PROFILE) {
            self.logging.profile = profile;
        }
    }

    /// Settings for `dataset`, defaults when it is not configured
    pub fn dataset(&self, dataset: &str) -> DatasetConfig {
        self.datasets.get(dataset).cloned().unwrap_or_default()
    }

    /// Fetcher settings: the drop directory and the configured datasets as
    /// the allowed endpoints
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::new(self.source.dir.clone(), self.datasets.keys().cloned())
    }

    /// # Errors
    ///
    /// - `Config`: the profile name is not recognised
    pub fn logging_profile(&self) -> Result<Profile> {
        self.logging.profile.parse().map_err(|e: String| {
            ExError::new(ExErrorKind::Config)
                .with_op("logging_profile")
                .with_message(e)
        })
    }
}
