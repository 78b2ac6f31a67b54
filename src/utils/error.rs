use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Feed unavailable: {message}")]
    FeedUnavailable {
        status: Option<u16>,
        message: String,
    },

    #[error("Feed malformed: {message}")]
    FeedMalformed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserInput,
    Network,
    Data,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GalleryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::UserInput,
            Self::FeedUnavailable { .. } => ErrorCategory::Network,
            Self::FeedMalformed { .. } => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::FeedUnavailable { .. } | Self::FeedMalformed { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Feed failures collapse into one message; the two kinds differ only in logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::FeedUnavailable { .. } | Self::FeedMalformed { .. } => {
                "Could not load images. Check the feed URL or your connection.".to_string()
            }
            Self::IoError(e) => format!("Could not write the gallery: {}", e),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::ConfigError { message } | Self::ConfigValidationError { message, .. } => {
                format!("Configuration problem: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Pick both a start and an end date, then load again.",
            Self::FeedUnavailable { .. } => {
                "Check your network connection and the feed URL, then try again."
            }
            Self::FeedMalformed { .. } => "Make sure the feed URL points at a JSON document.",
            Self::IoError(_) => "Check that the output directory exists and is writable.",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => {
                "Review the command-line flags and the TOML configuration file."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_errors_share_user_message() {
        let unavailable = GalleryError::FeedUnavailable {
            status: Some(503),
            message: "HTTP 503".to_string(),
        };
        let malformed = GalleryError::FeedMalformed {
            message: "expected value".to_string(),
        };

        assert_eq!(
            unavailable.user_friendly_message(),
            malformed.user_friendly_message()
        );
        assert_eq!(unavailable.category(), ErrorCategory::Network);
        assert_eq!(malformed.category(), ErrorCategory::Data);
    }

    #[test]
    fn test_validation_error_is_low_severity() {
        let err = GalleryError::validation("Please select both dates.");
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Please select both dates.");
    }
}
