use crate::field::Field;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Vocabulary for field {field} is unusable: {reason}")]
    Vocabulary { field: Field, reason: String },

    #[error("Encoder field order mismatch: expected {expected:?}, got {actual:?}")]
    FieldOrder { expected: Vec<Field>, actual: Vec<Field> },

    #[error("Invalid model schema: {0}")]
    InvalidSchema(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Schema mismatch: expected {expected} columns, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl Error {
    /// Startup errors mean the process must not serve predictions.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Vocabulary { .. } | Error::FieldOrder { .. } | Error::InvalidSchema(_)
        )
    }
}
