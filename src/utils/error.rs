use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("Invalid grade: '{raw}' is not a finite decimal number")]
    InvalidGrade { raw: String },

    #[error("Activity '{name}' has already been recorded")]
    DuplicateName { name: String },

    #[error("Activity name cannot be empty")]
    EmptyName,

    #[error("No activities recorded, average is not available")]
    EmptyRoster,

    #[error("Invalid passing threshold: '{raw}'")]
    InvalidThreshold { raw: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
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
    /// 使用者輸入 (單筆提交) 問題
    Input,
    /// 資料狀態問題, 例如空的 roster
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GradeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GradeError::InvalidGrade { .. }
            | GradeError::DuplicateName { .. }
            | GradeError::EmptyName => ErrorCategory::Input,
            GradeError::EmptyRoster
            | GradeError::CsvError(_)
            | GradeError::ProcessingError { .. } => ErrorCategory::Data,
            GradeError::InvalidThreshold { .. }
            | GradeError::ConfigValidationError { .. }
            | GradeError::InvalidConfigValueError { .. }
            | GradeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GradeError::IoError(_) | GradeError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Data => match self {
                GradeError::EmptyRoster => ErrorSeverity::Low,
                _ => ErrorSeverity::Medium,
            },
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 單筆提交被拒絕: roster 不變, 使用者可修正後重送
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GradeError::InvalidGrade { .. } | GradeError::DuplicateName { .. } | GradeError::EmptyName
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GradeError::InvalidGrade { raw } => {
                format!("The grade \"{}\" is not a number", raw)
            }
            GradeError::DuplicateName { name } => {
                format!("The activity \"{}\" was already entered", name)
            }
            GradeError::EmptyName => "Please type an activity name".to_string(),
            GradeError::EmptyRoster => "No data yet".to_string(),
            GradeError::InvalidThreshold { raw } => {
                format!("The passing grade \"{}\" is not a number", raw)
            }
            GradeError::IoError(e) => format!("Could not access a file: {}", e),
            GradeError::CsvError(e) => format!("The input file is not valid CSV: {}", e),
            GradeError::SerializationError(e) => format!("Could not write the report: {}", e),
            GradeError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            GradeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for {} is invalid: {}", field, reason)
            }
            GradeError::MissingConfigError { field } => {
                format!("Configuration value {} is required", field)
            }
            GradeError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GradeError::InvalidGrade { .. } => {
                "Use digits with '.' or ',' as decimal separator, e.g. 7,5".to_string()
            }
            GradeError::DuplicateName { .. } => {
                "Pick a different activity name".to_string()
            }
            GradeError::EmptyName => "Enter the name before the grade".to_string(),
            GradeError::EmptyRoster => "Add at least one activity".to_string(),
            GradeError::InvalidThreshold { .. } => {
                "Pass --threshold with a number such as 7 or 6,5".to_string()
            }
            GradeError::IoError(_) => {
                "Check that the path exists and is readable/writable".to_string()
            }
            GradeError::CsvError(_) => {
                "The file needs a 'name,grade' header; use --delimiter ';' for decimal commas"
                    .to_string()
            }
            GradeError::SerializationError(_) => "Retry the run".to_string(),
            GradeError::ConfigValidationError { .. }
            | GradeError::InvalidConfigValueError { .. }
            | GradeError::MissingConfigError { .. } => {
                "Fix the configuration and run again".to_string()
            }
            GradeError::ProcessingError { .. } => "Check the input data".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_low_severity_input_errors() {
        let errors = vec![
            GradeError::InvalidGrade { raw: "abc".to_string() },
            GradeError::DuplicateName { name: "Homework1".to_string() },
            GradeError::EmptyName,
        ];

        for e in errors {
            assert!(e.is_rejection());
            assert_eq!(e.category(), ErrorCategory::Input);
            assert_eq!(e.severity(), ErrorSeverity::Low);
        }
    }

    #[test]
    fn test_empty_roster_is_not_a_rejection() {
        let e = GradeError::EmptyRoster;
        assert!(!e.is_rejection());
        assert_eq!(e.category(), ErrorCategory::Data);
        assert_eq!(e.user_friendly_message(), "No data yet");
    }

    #[test]
    fn test_system_errors_are_critical() {
        let e = GradeError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(e.severity(), ErrorSeverity::Critical);
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
    }

    #[test]
    fn test_messages_mention_offending_value() {
        let e = GradeError::DuplicateName { name: "Quiz".to_string() };
        assert!(e.to_string().contains("Quiz"));
        assert!(e.user_friendly_message().contains("Quiz"));
    }
}
