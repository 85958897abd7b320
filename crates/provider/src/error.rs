//! Error types for the dashboard resource.

use std::fmt;

use cloudlogs_client::ClientError;
use thiserror::Error;

use crate::id::IdError;
use crate::validate::Diagnostics;

/// Result type alias for resource operations.
pub type Result<T> = std::result::Result<T, ResourceError>;

fn at(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

/// Failure while mapping between the flat form and the wire form.
///
/// Every variant carries the attribute path where the problem was found,
/// e.g. `layout.0.sections.0.rows.0.widgets.0.title`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("missing required attribute {}", at(.path))]
    MissingRequired { path: String },

    #[error("attribute {}: expected {expected}, got {found}", at(.path))]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("attribute {}: at most {max} item(s) allowed, got {found}", at(.path))]
    TooManyItems {
        path: String,
        max: usize,
        found: usize,
    },

    #[error("only one of [{}] may be set at {}", .variants.join(", "), at(.path))]
    MultipleVariants { path: String, variants: Vec<String> },

    #[error("exactly one of [{}] must be set at {}", .variants.join(", "), at(.path))]
    MissingVariant { path: String, variants: Vec<String> },

    #[error("unrecognized subtype '{key}' at {}", at(.path))]
    UnrecognizedSubtype { path: String, key: String },

    #[error("failed to decode {}: {message}", at(.path))]
    Decode { path: String, message: String },

    #[error("failed to encode {}: {message}", at(.path))]
    Encode { path: String, message: String },
}

/// Lifecycle operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Plan,
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Plan => "plan",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong inside a lifecycle operation.
#[derive(Error, Debug)]
pub enum ResourceErrorKind {
    #[error("invalid configuration:\n{0}")]
    Validation(Diagnostics),

    #[error("failed to build request: {0}")]
    BuildRequest(ConversionError),

    #[error("failed to read response: {0}")]
    ReadResponse(ConversionError),

    #[error("{0}")]
    InvalidId(IdError),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("{0}")]
    Client(ClientError),
}

/// A fatal lifecycle error, tagged with the resource and operation.
#[derive(Error, Debug)]
#[error("{resource} {operation} failed: {kind}")]
pub struct ResourceError {
    pub resource: &'static str,
    pub operation: Operation,
    pub kind: ResourceErrorKind,
}

impl ResourceError {
    pub fn new(resource: &'static str, operation: Operation, kind: ResourceErrorKind) -> Self {
        Self {
            resource,
            operation,
            kind,
        }
    }

    /// The API client error behind this failure, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match &self.kind {
            ResourceErrorKind::Client(e) => Some(e),
            _ => None,
        }
    }

    /// True for configuration problems caught before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            ResourceErrorKind::Validation(_) | ResourceErrorKind::BuildRequest(_)
        )
    }
}
