pub mod engine;
pub mod evaluator;
pub mod render;
pub mod roster;
pub mod session;

pub use crate::domain::model::{Entry, Labels, Report, Submission, Threshold, Verdict};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
