use crate::utils::error::{GradeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub grade: f64,
}

impl Entry {
    pub fn new(name: impl Into<String>, grade: f64) -> Self {
        Self {
            name: name.into(),
            grade,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

/// Minimum passing grade, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(GradeError::InvalidThreshold {
                raw: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Threshold {
    type Error = GradeError;

    fn try_from(value: f64) -> Result<Self> {
        Threshold::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> f64 {
        threshold.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregate over a non-empty roster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub average: f64,
    pub verdict: Verdict,
    pub count: usize,
}

/// Raw text pair as typed by the user, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    #[serde(alias = "nota", alias = "score")]
    pub grade: String,
}

impl Submission {
    pub fn new(name: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
        }
    }
}

/// Display text for each verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub pass: String,
    pub fail: String,
}

impl Labels {
    pub fn new(pass: impl Into<String>, fail: impl Into<String>) -> Self {
        Self {
            pass: pass.into(),
            fail: fail.into(),
        }
    }

    pub fn for_verdict(&self, verdict: Verdict) -> &str {
        match verdict {
            Verdict::Pass => &self.pass,
            Verdict::Fail => &self.fail,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::new("Pass", "Fail")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub name: String,
    pub grade: f64,
    pub grade_display: String,
    pub verdict: Verdict,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SummaryView {
    NoData,
    Average {
        average: f64,
        average_display: String,
        verdict: Verdict,
        label: String,
        count: usize,
    },
}

/// Full re-render after a submission: every row plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub rows: Vec<RowView>,
    pub summary: SummaryView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub name: String,
    pub raw_grade: String,
    pub reason: String,
}

/// Batch export of a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub threshold: Threshold,
    pub rows: Vec<RowView>,
    pub average: Option<f64>,
    pub verdict: Option<Verdict>,
    pub rejected: Vec<Rejection>,
}
