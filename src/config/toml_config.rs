use crate::core::ConfigProvider;
use crate::domain::model::Labels;
use crate::utils::error::{GradeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub session: SessionConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub display: Option<DisplayConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: Option<String>,
    /// 以文字保存, 與成績使用相同的解析規則 (接受 "6,5")
    pub threshold: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub pass_label: Option<String>,
    pub fail_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GradeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GradeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PASSING_GRADE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GradeError::ProcessingError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_threshold_text("session.threshold", &self.session.threshold)?;
        if let Some(name) = &self.session.name {
            validation::validate_non_empty_string("session.name", name)?;
        }
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_delimiter("input.delimiter", self.delimiter())?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;

        if let Some(display) = &self.display {
            if let Some(pass) = &display.pass_label {
                validation::validate_non_empty_string("display.pass_label", pass)?;
            }
            if let Some(fail) = &display.fail_label {
                validation::validate_non_empty_string("display.fail_label", fail)?;
            }
        }

        Ok(())
    }

    pub fn session_name(&self) -> &str {
        self.session.name.as_deref().unwrap_or("grades")
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn threshold(&self) -> Option<&str> {
        Some(&self.session.threshold)
    }

    fn input_file(&self) -> Option<&str> {
        Some(&self.input.path)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn delimiter(&self) -> char {
        self.input.delimiter.unwrap_or(',')
    }

    fn labels(&self) -> Labels {
        let defaults = Labels::default();
        match &self.display {
            Some(display) => Labels::new(
                display.pass_label.clone().unwrap_or(defaults.pass),
                display.fail_label.clone().unwrap_or(defaults.fail),
            ),
            None => defaults,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
