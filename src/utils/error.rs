use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Schedule error: {message}")]
    ScheduleError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorSeverity::Medium,
            EtlError::CsvError(_) | EtlError::SerializationError(_) => ErrorSeverity::High,
            EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::ScheduleError { .. } => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(_) => "Could not reach the library data API".to_string(),
            EtlError::HttpStatusError { status, .. } => {
                format!("The library data API answered with HTTP {}", status)
            }
            EtlError::MissingConfigError { field } => format!("Missing setting: {}", field),
            EtlError::IoError(_) => "Could not write the output file".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) => "Check network connectivity and the API base URL",
            EtlError::HttpStatusError { status: 401, .. }
            | EtlError::HttpStatusError { status: 403, .. } => {
                "Check that the access token (GOLEMIO_API_KEY) is valid"
            }
            EtlError::HttpStatusError { .. } => "The API may be unavailable, try again later",
            EtlError::MissingConfigError { .. } => {
                "Pass --api-key or set the GOLEMIO_API_KEY environment variable"
            }
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again"
            }
            EtlError::ScheduleError { .. } => "Use a trigger time in HH:MM format",
            EtlError::IoError(_) => "Check permissions and free space in the output directory",
            EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                "Re-run with --verbose and inspect the API response"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
