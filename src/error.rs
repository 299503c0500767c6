//! Error types for slab and remnant operations.

use std::path::PathBuf;
use thiserror::Error;

/// Error categories, grouped the way callers react to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Operator input was rejected; re-prompt and retry (E100).
    Validation = 100,
    /// Geometry edit could not be applied (E101).
    Geometry = 101,
    /// Referenced slab does not exist for the tenant (E200).
    NotFound = 200,
    /// Slab cannot be cut or consumed any further (E201).
    Exhausted = 201,
    /// No authenticated operator (E202).
    Identity = 202,
    /// Storage backend failure (E300).
    Storage = 300,
}

/// Main error type for the tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("A cut needs at least 3 points, the draft has {count}")]
    InsufficientVertices { count: usize },

    #[error("Client name is required")]
    MissingClientName,

    #[error("Project description is required")]
    MissingProject,

    #[error("No operator is signed in")]
    MissingIdentity,

    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Draft outline has no finite area ({area})")]
    NonFiniteArea { area: f64 },

    #[error("Edge length must be a positive number, got {length}")]
    InvalidLength { length: f64 },

    #[error("Edge {index} does not exist in a polygon with {count} points")]
    EdgeOutOfRange { index: usize, count: usize },

    #[error("Invalid slab dimensions ({width} x {height})")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Cannot consume {requested} unit(s) from slab {slab_id}: only {available} in stock")]
    InsufficientQuantity {
        slab_id: String,
        requested: i64,
        available: i64,
    },

    #[error("Slab not found: {slab_id} (tenant {tenant_id})")]
    SlabNotFound { tenant_id: String, slab_id: String },

    #[error("Slab {slab_id} is exhausted")]
    SlabExhausted { slab_id: String },

    #[error("Store file error at {path}: {source}")]
    StoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid store data: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TrackerError::InsufficientVertices { .. } => ErrorCode::Validation,
            TrackerError::MissingClientName => ErrorCode::Validation,
            TrackerError::MissingProject => ErrorCode::Validation,
            TrackerError::MissingField { .. } => ErrorCode::Validation,
            TrackerError::InvalidDimensions { .. } => ErrorCode::Validation,
            TrackerError::InvalidQuantity { .. } => ErrorCode::Validation,
            TrackerError::NonFiniteArea { .. } => ErrorCode::Validation,
            TrackerError::InvalidLength { .. } => ErrorCode::Geometry,
            TrackerError::EdgeOutOfRange { .. } => ErrorCode::Geometry,
            TrackerError::MissingIdentity => ErrorCode::Identity,
            TrackerError::SlabNotFound { .. } => ErrorCode::NotFound,
            TrackerError::SlabExhausted { .. } => ErrorCode::Exhausted,
            TrackerError::InsufficientQuantity { .. } => ErrorCode::Exhausted,
            TrackerError::StoreFile { .. } => ErrorCode::Storage,
            TrackerError::Io(_) => ErrorCode::Storage,
            TrackerError::Json(_) => ErrorCode::Storage,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether the operator can fix this by correcting input.
    pub fn is_validation(&self) -> bool {
        self.code() == ErrorCode::Validation
    }
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
