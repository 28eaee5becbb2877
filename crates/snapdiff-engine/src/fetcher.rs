//! Source fetching.
//!
//! A [`Fetcher`] hands back the raw JSON document an upstream endpoint
//! currently serves. Endpoint names are checked against an allow-list before
//! any I/O happens.

use serde_json::Value;
use snapdiff_core::errors::{ExError, ExErrorKind, Result};
use snapdiff_core::payload::decode_document;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Source of raw dataset payloads
pub trait Fetcher {
    /// Retrieve the current document for `endpoint`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: endpoint is not in the allow-list
    /// - `ExternalService`: the source could not deliver a payload
    /// - `Encoding`: the payload is not JSON
    fn fetch(&self, endpoint: &str) -> Result<Value>;
}

/// Where payloads come from and which endpoints may be asked for
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub dir: PathBuf,
    pub endpoints: BTreeSet<String>,
}

impl SourceConfig {
    pub fn new<I>(dir: impl Into<PathBuf>, endpoints: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            dir: dir.into(),
            endpoints: endpoints.into_iter().collect(),
        }
    }

    pub fn is_valid_endpoint(&self, endpoint: &str) -> bool {
        self.endpoints.contains(endpoint)
    }

    /// # Errors
    ///
    /// - `InvalidInput`: endpoint is not in the allow-list
    pub fn check_endpoint(&self, endpoint: &str) -> Result<()> {
        if self.is_valid_endpoint(endpoint) {
            return Ok(());
        }
        let allowed: Vec<&str> = self.endpoints.iter().map(String::as_str).collect();
        Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("fetch")
            .with_dataset(endpoint)
            .with_message(format!(
                "unknown endpoint '{}' (allowed: {})",
                endpoint,
                allowed.join(", ")
            )))
    }
}

/// Reads `<dir>/<endpoint>.json` from a local drop directory
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    config: SourceConfig,
}

impl DirectoryFetcher {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn payload_path(&self, endpoint: &str) -> PathBuf {
        self.config.dir.join(format!("{}.json", endpoint))
    }
}

impl Fetcher for DirectoryFetcher {
    fn fetch(&self, endpoint: &str) -> Result<Value> {
        self.config.check_endpoint(endpoint)?;

        let path = self.payload_path(endpoint);
        let bytes = std::fs::read(&path).map_err(|e| unavailable(endpoint, &path, e))?;
        tracing::debug!(dataset = endpoint, bytes = bytes.len(), "fetched payload");

        decode_document(&bytes).map_err(|e| {
            ExError::from(e)
                .with_op("fetch")
                .with_dataset(endpoint)
        })
    }
}

fn unavailable(endpoint: &str, path: &Path, err: std::io::Error) -> ExError {
    let message = match err.kind() {
        ErrorKind::NotFound => format!("no payload at {}", path.display()),
        _ => format!("{}: {}", path.display(), err),
    };
    ExError::new(ExErrorKind::ExternalService)
        .with_op("fetch")
        .with_dataset(endpoint)
        .with_message(message)
}
