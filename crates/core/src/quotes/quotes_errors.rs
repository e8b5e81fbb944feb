use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for quote-related operations
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for QuoteError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => QuoteError::NotFound("Record not found".to_string()),
            _ => QuoteError::DatabaseError(err.to_string()),
        }
    }
}
