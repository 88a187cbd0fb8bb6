//! Error types for menus operations

use crate::EntityType;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {entity_type:?} with id {id}")]
    NotFound { entity_type: EntityType, id: String },

    #[error("Insert failed for {entity_type:?}: {reason}")]
    InsertFailed { entity_type: EntityType, reason: String },

    #[error("Update failed for {entity_type:?} with id {id}: {reason}")]
    UpdateFailed {
        entity_type: EntityType,
        id: String,
        reason: String,
    },

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Shorthand for a missing entity keyed by any displayable id.
    pub fn not_found(entity_type: EntityType, id: impl ToString) -> Self {
        StorageError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Validation errors raised on admin input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Field {field} is too long: {len} characters, max {max}")]
    TooLong { field: String, len: usize, max: usize },

    #[error("Field {field} does not match pattern {pattern}")]
    PatternMismatch { field: String, pattern: String },

    #[error("Value {value:?} of {field} is a reserved word")]
    ReservedWord { field: String, value: String },

    #[error("Value {value:?} of {field} is already in use")]
    NotUnique { field: String, value: String },

    #[error("Invalid depth {value}: expected a value between 0 and {max}")]
    InvalidDepth { value: i32, max: i32 },

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Unauthorized property: {property}")]
    UnauthorizedProperty { property: String },

    #[error("Circular reference detected in {entity_type:?}: {ids:?}")]
    CircularReference {
        entity_type: EntityType,
        ids: Vec<i32>,
    },
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        ValidationError::RequiredFieldMissing {
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the violation is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredFieldMissing { field }
            | ValidationError::InvalidValue { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::PatternMismatch { field, .. }
            | ValidationError::ReservedWord { field, .. }
            | ValidationError::NotUnique { field, .. }
            | ValidationError::InvalidNumber { field, .. } => Some(field),
            ValidationError::InvalidDepth { .. }
            | ValidationError::UnauthorizedProperty { .. }
            | ValidationError::CircularReference { .. } => None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read configuration from {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse configuration: {reason}")]
    Parse { reason: String },
}

/// Master error type for all menus errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MenusError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Several violations reported together by a form validator.
    #[error("Validation failed with {} violation(s)", .0.len())]
    Violations(Vec<ValidationError>),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl MenusError {
    /// Whether this error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MenusError::Storage(StorageError::NotFound { .. }))
    }
}

/// Result type alias for menus operations.
pub type MenusResult<T> = Result<T, MenusError>;

// =============================================================================
// TESTS
// =============================================================================
