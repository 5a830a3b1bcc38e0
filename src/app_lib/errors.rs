use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Message suitable for a transient notice, without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::Network(message)
            | Self::Timeout(message)
            | Self::Parse(message)
            | Self::Serialization(message)
            | Self::Validation(message)
            | Self::Storage(message)
            | Self::Http { message, .. } => message,
        }
    }

    /// True when the server rejected the credential itself.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn message_strips_variant_prefix() {
        let err = AppError::Http {
            status: 500,
            message: "Failed to fetch fraud logs".to_string(),
        };
        assert_eq!(err.message(), "Failed to fetch fraud logs");
        assert_eq!(
            err.to_string(),
            "Request failed (500): Failed to fetch fraud logs"
        );
    }

    #[test]
    fn classification_helpers() {
        let unauthorized = AppError::Http {
            status: 401,
            message: "Token has expired".to_string(),
        };
        assert!(unauthorized.is_unauthorized());

        let invalid = AppError::Validation("Enter a valid amount".to_string());
        assert!(!invalid.is_unauthorized());
        assert_eq!(invalid.to_string(), "Enter a valid amount");
    }
}
