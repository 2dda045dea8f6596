use thiserror::Error;

#[derive(Error, Debug)]
pub enum NegotiationError {
    #[error("Invalid price: {value} (price must be a finite number greater than 0)")]
    InvalidPrice { value: f64 },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid listing URL '{url}': {reason}")]
    InvalidListingUrl { url: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl NegotiationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NegotiationError::InvalidPrice { .. }
            | NegotiationError::MissingField { .. }
            | NegotiationError::InvalidValue { .. }
            | NegotiationError::InvalidListingUrl { .. } => ErrorCategory::Input,
            NegotiationError::ConfigError { .. } => ErrorCategory::Configuration,
            NegotiationError::IoError(_) | NegotiationError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 缺少欄位或網址無法辨識時，改用其他參數即可繼續
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NegotiationError::MissingField { .. } | NegotiationError::InvalidListingUrl { .. } => {
                ErrorSeverity::Medium
            }
            _ => match self.category() {
                ErrorCategory::Input => ErrorSeverity::High,
                ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            NegotiationError::InvalidPrice { .. } => {
                "Enter the asking price as a positive number, e.g. --price 1200".to_string()
            }
            NegotiationError::MissingField { field } => {
                format!("Provide a value for '{}' and try again", field)
            }
            NegotiationError::InvalidValue { field, .. } => {
                format!("Check the value given for '{}'", field)
            }
            NegotiationError::InvalidListingUrl { .. } => {
                "Paste the full listing URL, or pass --platform directly".to_string()
            }
            NegotiationError::ConfigError { .. } => {
                "Check that the config file exists and is valid TOML".to_string()
            }
            NegotiationError::IoError(_) => "Check file paths and permissions".to_string(),
            NegotiationError::SerializationError(_) => {
                "Retry with --format text".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Listing details need attention: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, NegotiationError>;
