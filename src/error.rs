//! Error taxonomy for the retrieval adapter boundary.
//!
//! Batch errors (one unreadable file during indexing) are contained and
//! logged by the loader; errors on the query path always cross the process
//! boundary as structured data. Each variant maps to a stable machine
//! readable code carried in the JSON `error` field.

use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Invalid caller input: empty query, bad top_k, path traversal attempt.
    #[error("{0}")]
    Validation(String),

    /// The requested document does not exist in the corpus.
    #[error("{0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl RetrievalError {
    /// Stable code used in the JSON error shape.
    pub fn code(&self) -> &'static str {
        match self {
            RetrievalError::Validation(_) => "validation_error",
            RetrievalError::NotFound(_) => "not_found",
            RetrievalError::Io(_) => "io_error",
            RetrievalError::Db(_) => "db_error",
        }
    }
}

impl From<&RetrievalError> for ErrorResponse {
    fn from(err: &RetrievalError) -> Self {
        ErrorResponse {
            error: err.code().to_string(),
            details: Some(err.to_string()),
        }
    }
}

/// Marshal an error across the process boundary and exit non-zero.
///
/// Tool callers (`--json`) get the structured shape on stdout; interactive
/// callers get plain text on stderr.
pub fn report_and_exit(err: &RetrievalError, json: bool) -> ! {
    if json {
        let body = serde_json::to_string(&ErrorResponse::from(err))
            .unwrap_or_else(|_| r#"{"error":"internal"}"#.to_string());
        println!("{}", body);
    } else {
        eprintln!("Error: {}", err);
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(RetrievalError::Validation("x".into()).code(), "validation_error");
        assert_eq!(RetrievalError::NotFound("x".into()).code(), "not_found");
    }

    #[test]
    fn test_error_response_shape() {
        let err = RetrievalError::Validation("query must not be empty".into());
        let resp = ErrorResponse::from(&err);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""error":"validation_error""#));
        assert!(json.contains("query must not be empty"));
    }
}
