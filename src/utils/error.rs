use thiserror::Error;

/// 表單上顯示的錯誤訊息 (馬來文: 請輸入有效的體重數字)
pub const INVALID_WEIGHT_MESSAGE: &str = "Sila masukkan nombor berat yang sah";

#[derive(Error, Debug)]
pub enum DoseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown concentration '{value}' (expected 120 or 250 mg/5ml)")]
    UnknownConcentration { value: String },

    #[error("Batch input error at row {row}: {message}")]
    BatchInputError { row: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    FileSystem,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序結束碼；Low 視為警告，仍以 0 結束
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DoseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DoseError::IoError(_) => ErrorCategory::FileSystem,
            DoseError::CsvError(_) | DoseError::SerializationError(_) => ErrorCategory::Data,
            DoseError::ConfigValidationError { .. }
            | DoseError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DoseError::UnknownConcentration { .. } | DoseError::BatchInputError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DoseError::UnknownConcentration { .. } | DoseError::BatchInputError { .. } => {
                ErrorSeverity::Medium
            }
            DoseError::CsvError(_)
            | DoseError::SerializationError(_)
            | DoseError::ConfigValidationError { .. }
            | DoseError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            DoseError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DoseError::IoError(e) => format!("Could not access file: {}", e),
            DoseError::CsvError(e) => format!("The CSV file could not be processed: {}", e),
            DoseError::SerializationError(e) => format!("Could not serialize the result: {}", e),
            DoseError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            DoseError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}' ({})", value, field, reason)
            }
            DoseError::UnknownConcentration { value } => {
                format!("'{}' is not an available concentration", value)
            }
            DoseError::BatchInputError { row, message } => {
                format!("Row {} of the input file is invalid: {}", row, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => match self {
                DoseError::UnknownConcentration { .. } => "Choose 120 or 250 (mg/5ml)",
                _ => "Fix the row: 'weight' in kilograms, 'concentration' 120, 250 or empty",
            },
            ErrorCategory::Configuration => "Check the TOML configuration file and its values",
            ErrorCategory::FileSystem => "Make sure the path exists and is readable/writable",
            ErrorCategory::Data => "Check that the CSV has a 'weight' header and well-formed rows",
        }
    }
}

pub type Result<T> = std::result::Result<T, DoseError>;
