//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid {what}: {value}")]
    Parse { what: String, value: String },

    #[error("invalid json: {payload}")]
    Json { payload: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub(crate) fn parse(what: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            value: value.into(),
        }
    }

    /// True when the error is an I/O "file not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_field_and_value() {
        let err = Error::parse("id", "invalid");
        assert_eq!(err.to_string(), "invalid id: invalid");
    }

    #[test]
    fn test_json_error_carries_payload() {
        let err = Error::Json {
            payload: "{not json".to_string(),
        };
        assert_eq!(err.to_string(), "invalid json: {not json");
    }

    #[test]
    fn test_is_not_found() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.is_not_found());
        assert!(!Error::Storage("x".to_string()).is_not_found());
    }
}
