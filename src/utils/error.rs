use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input bundle rejected: {}", problems.join("; "))]
    ValidationFailed { problems: Vec<String> },

    #[error("Parsing error: {message}")]
    ParsingError { message: String },

    #[error("Mapping error: {message}")]
    MappingError { message: String },

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parsing,
    Mapping,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ValidationFailed { .. } => ErrorCategory::Input,
            EtlError::ZipError(_) | EtlError::CsvError(_) | EtlError::ParsingError { .. } => {
                ErrorCategory::Parsing
            }
            EtlError::MappingError { .. } => ErrorCategory::Mapping,
            EtlError::XlsxError(_) | EtlError::SerializationError(_) => ErrorCategory::Output,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Parsing | ErrorCategory::Mapping | ErrorCategory::Output => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ValidationFailed { .. } => {
                "Re-export the bundle from Payhawk including the CSV file and the PDF invoices"
                    .to_string()
            }
            EtlError::ZipError(_) => "Check that the upload is a complete, valid ZIP archive".to_string(),
            EtlError::CsvError(_) | EtlError::ParsingError { .. } => {
                "Check that the CSV export is comma-delimited UTF-8 text with a header row".to_string()
            }
            EtlError::MappingError { .. } => {
                "Export the CSV with the 'Document Type' and 'Payment Type' columns enabled".to_string()
            }
            EtlError::XlsxError(_) | EtlError::SerializationError(_) => {
                "Inspect the source values for oversized text cells".to_string()
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Review the command line arguments and the TOML settings file".to_string()
            }
            EtlError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    /// Single human-readable message; validation problems are listed one per line.
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ValidationFailed { problems } => {
                let mut message = String::from("Errors found in the uploaded bundle:");
                for problem in problems {
                    message.push_str("\n- ");
                    message.push_str(problem);
                }
                message
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
