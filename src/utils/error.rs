use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealerError {
    #[error("No eligible participants for this round")]
    NoEligibleParticipants,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Group announcement failed: {message}")]
    AnnouncementError { message: String },
}

/// Failure of a single private delivery. The `Display` text is the reason
/// recorded in the round report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("invalid address '{address}'")]
    InvalidAddress { address: String },

    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("recipient unreachable: {0}")]
    Unreachable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Round,
    Configuration,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code; only `Low` counts as success.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DealerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DealerError::NoEligibleParticipants => ErrorCategory::Round,
            DealerError::ConfigError { .. }
            | DealerError::ConfigValidationError { .. }
            | DealerError::InvalidConfigValueError { .. }
            | DealerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DealerError::HttpError(_) | DealerError::AnnouncementError { .. } => {
                ErrorCategory::Network
            }
            DealerError::IoError(_) | DealerError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DealerError::HttpError(_) | DealerError::AnnouncementError { .. } => {
                ErrorSeverity::Medium
            }
            DealerError::NoEligibleParticipants
            | DealerError::ConfigError { .. }
            | DealerError::ConfigValidationError { .. }
            | DealerError::InvalidConfigValueError { .. }
            | DealerError::MissingConfigError { .. } => ErrorSeverity::High,
            DealerError::IoError(_) | DealerError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Round => "Join the voice channel with the other players and start again",
            ErrorCategory::Configuration => "Check the config file and the environment variables it references",
            ErrorCategory::Network => "Check the bot token and network access, then retry",
            ErrorCategory::System => "Check that the theme and config files exist and are readable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DealerError::NoEligibleParticipants => {
                "No players found in the voice channel.".to_string()
            }
            DealerError::MissingConfigError { field } => {
                format!("The config is missing '{}'.", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DealerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_participants_is_fatal_round_error() {
        let err = DealerError::NoEligibleParticipants;
        assert_eq!(err.category(), ErrorCategory::Round);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_ne!(err.severity().exit_code(), 0);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = DealerError::InvalidConfigValueError {
            field: "game.card_max".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("game.card_max"));
    }

    #[test]
    fn test_delivery_error_reason_text() {
        let err = DeliveryError::Rejected {
            status: 403,
            body: "Cannot send messages to this user".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rejected with status 403: Cannot send messages to this user"
        );
    }
}
