use snapdiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the structured error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (the CLI, a scheduled
/// job, tests) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Caller-supplied argument is malformed (dataset name, date, endpoint)
    InvalidInput,
    /// A requested item does not exist where absence is an error
    NotFound,
    /// A value handed to the differ or decoder is not a collection of records
    Contract,
    /// A collection could not be serialized, or a payload could not be decoded
    Encoding,
    /// The snapshot location could not be created or written
    Persistence,
    /// Configuration file or environment is unusable
    Config,
    /// The upstream source could not deliver a payload
    ExternalService,
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Contract => "ERR_CONTRACT",
            ExErrorKind::Encoding => "ERR_ENCODING",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging. Built with the `with_*` chain:
///
/// ```
/// use snapdiff_core::errors::{ExError, ExErrorKind};
///
/// let err = ExError::new(ExErrorKind::Persistence)
///     .with_op("save_snapshot")
///     .with_dataset("article")
///     .with_message("disk full");
/// assert_eq!(err.code(), "ERR_PERSISTENCE");
/// ```
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    dataset: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            dataset: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add dataset context
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(dataset) = &self.dataset {
            write!(f, " (dataset: {})", dataset)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by decoding and comparison code
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapDiffError {
    /// A side of a comparison, or a decoded payload, is not a JSON array
    #[error("{side} is not a collection (found {found})")]
    NotACollection { side: String, found: String },

    /// An element of a collection is not a JSON object
    #[error("{side}[{index}] is not a record (found {found})")]
    NotARecord {
        side: String,
        index: usize,
        found: String,
    },

    /// The envelope document does not carry the expected collection field
    #[error("document has no collection under field `{field}`")]
    MissingCollectionField { field: String },

    /// An operation that needs at least one record received none
    #[error("collection is empty")]
    EmptyCollection,

    /// Dataset name cannot be used as a single path segment
    #[error("invalid dataset name: {name:?}")]
    InvalidDatasetName { name: String },

    /// Payload bytes are not valid JSON
    #[error("invalid JSON payload: {message}")]
    InvalidJson { message: String },

    /// A table could not be written as delimited text
    #[error("table rendering failed: {message}")]
    TableRender { message: String },
}

impl From<SnapDiffError> for ExError {
    fn from(err: SnapDiffError) -> Self {
        let message = err.to_string();
        match err {
            SnapDiffError::NotACollection { .. }
            | SnapDiffError::NotARecord { .. }
            | SnapDiffError::MissingCollectionField { .. } => {
                ExError::new(ExErrorKind::Contract).with_message(message)
            }
            SnapDiffError::EmptyCollection => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            SnapDiffError::InvalidDatasetName { name } => ExError::new(ExErrorKind::InvalidInput)
                .with_dataset(name)
                .with_message(message),
            SnapDiffError::InvalidJson { .. } | SnapDiffError::TableRender { .. } => {
                ExError::new(ExErrorKind::Encoding).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SnapDiffError {
    fn from(err: serde_json::Error) -> Self {
        SnapDiffError::InvalidJson {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for SnapDiffError {
    fn from(err: csv::Error) -> Self {
        SnapDiffError::TableRender {
            message: err.to_string(),
        }
    }
}

/// Short name of a JSON value's type, for contract error messages
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
