use std::fmt;

use thiserror::Error;

/// Errors raised by a key-value store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached (refused, dropped, timed out)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backend answered but rejected the command
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

/// A single failed field from schema validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Errors surfaced by the inventory repository and query layer
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Invalid Inventory data: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Stored inventory could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    UnsupportedMedia(String),

    /// An aggregate does not fit in an `i64`
    #[error("{0}")]
    Overflow(String),
}

impl InventoryError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InventoryError::Validation(ValidationErrors::single(field, message))
    }
}

impl From<ValidationErrors> for InventoryError {
    fn from(errors: ValidationErrors) -> Self {
        InventoryError::Validation(errors)
    }
}

pub type InventoryResult<T> = std::result::Result<T, InventoryError>;
