pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::core::ConfigProvider;
    use crate::domain::model::Labels;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "grade-tally")]
    #[command(about = "Record activity grades and compute the final average")]
    pub struct CliConfig {
        /// Minimum passing grade (asked once on stdin when omitted)
        #[arg(long)]
        pub threshold: Option<String>,

        /// CSV file with `name,grade` columns; runs in batch mode when given
        #[arg(long)]
        pub input: Option<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "json")]
        pub output_formats: Vec<String>,

        #[arg(long, default_value_t = ',')]
        pub delimiter: char,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn threshold(&self) -> Option<&str> {
            self.threshold.as_deref()
        }

        fn input_file(&self) -> Option<&str> {
            self.input.as_deref()
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn delimiter(&self) -> char {
            self.delimiter
        }

        fn labels(&self) -> Labels {
            Labels::default()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(threshold) = &self.threshold {
                validation::validate_threshold_text("threshold", threshold)?;
            }
            if let Some(input) = &self.input {
                validation::validate_path("input", input)?;
            }
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_output_formats("output_formats", &self.output_formats)?;
            validation::validate_delimiter("delimiter", self.delimiter)?;
            Ok(())
        }
    }

}
