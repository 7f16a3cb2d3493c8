use crate::utils::error::{GradeError, Result};
use std::collections::HashSet;

pub const SUPPORTED_OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    let allowed: HashSet<&str> = SUPPORTED_OUTPUT_FORMATS.iter().copied().collect();
    for format in formats {
        if !allowed.contains(format.as_str()) {
            return Err(GradeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

/// CSV 分隔符必須是單一 ASCII 字元, 且不能是引號或換行
pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
        return Err(GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character other than quote or newline"
                .to_string(),
        });
    }
    Ok(delimiter as u8)
}

pub fn validate_threshold_text(field_name: &str, raw: &str) -> Result<()> {
    crate::core::evaluator::parse_threshold(raw).map_err(|_| {
        GradeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Threshold must be a finite decimal number".to_string(),
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "out\0put").is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let ok = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_output_formats("output_formats", &ok).is_ok());

        let bad = vec!["xml".to_string()];
        assert!(validate_output_formats("output_formats", &bad).is_err());
        assert!(validate_output_formats("output_formats", &[]).is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert_eq!(validate_delimiter("delimiter", ';').unwrap(), b';');
        assert_eq!(validate_delimiter("delimiter", '\t').unwrap(), b'\t');
        assert!(validate_delimiter("delimiter", '"').is_err());
        assert!(validate_delimiter("delimiter", 'é').is_err());
    }

    #[test]
    fn test_validate_threshold_text() {
        assert!(validate_threshold_text("threshold", "7").is_ok());
        assert!(validate_threshold_text("threshold", "6,5").is_ok());
        assert!(validate_threshold_text("threshold", "seven").is_err());
        assert!(validate_threshold_text("threshold", "inf").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("session.name", "Term 1").is_ok());
        assert!(validate_non_empty_string("session.name", "   ").is_err());
    }
}
