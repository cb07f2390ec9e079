use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Please select a base and at least one ingredient")]
    IncompleteSelection,

    #[error("You must be signed in to {0}")]
    NotSignedIn(&'static str),
}

impl OrderError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        OrderError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
