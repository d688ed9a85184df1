use thiserror::Error;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: &'static str, message: String },

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

impl SearchError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        SearchError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<SearchError> for HttpError {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::Validation { .. } => HttpError::bad_request(error.to_string()),
            SearchError::Store(_) => HttpError::server_error(error.to_string()),
        }
    }
}
