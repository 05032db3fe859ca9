use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SyncError::IoError(_) => ErrorCategory::Io,
            SyncError::CsvError(_)
            | SyncError::SerializationError(_)
            | SyncError::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorSeverity::High,
            SyncError::IoError(_) => ErrorSeverity::Critical,
            SyncError::CsvError(_) => ErrorSeverity::High,
            SyncError::SerializationError(_) => ErrorSeverity::Medium,
            SyncError::ProcessingError { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SyncError::CsvError(e) => format!("Could not parse a CSV export: {}", e),
            SyncError::IoError(e) => format!("File access failed: {}", e),
            SyncError::SerializationError(e) => format!("Could not write the sync report: {}", e),
            SyncError::ConfigValidationError { field, message } => {
                format!("Configuration problem with '{}': {}", field, message)
            }
            SyncError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' has invalid value '{}': {}", field, value, reason)
            }
            SyncError::MissingConfigError { field } => {
                format!("Required setting '{}' was not provided", field)
            }
            SyncError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line arguments and profile file".to_string()
            }
            ErrorCategory::Io => {
                "Verify the export file paths exist and the output directory is writable"
                    .to_string()
            }
            ErrorCategory::Data => {
                "Re-export the library from the platform and try again".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
