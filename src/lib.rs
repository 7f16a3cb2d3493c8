pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use app::console::{read_threshold, run_console, ConsoleStats};
pub use app::pipelines::csv_pipeline::CsvPipeline;
pub use crate::core::{engine::GradeEngine, evaluator::Evaluator, roster::Roster, session::Session};
pub use domain::model::{Entry, Labels, Report, SessionView, Submission, Threshold, Verdict};
pub use utils::error::{GradeError, Result};
