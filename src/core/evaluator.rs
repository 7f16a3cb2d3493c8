use crate::core::roster::Roster;
use crate::domain::model::{Summary, Threshold, Verdict};
use crate::utils::error::{GradeError, Result};

/// `Pass` iff `grade >= threshold` (boundary inclusive).
pub fn classify(grade: f64, threshold: Threshold) -> Verdict {
    if grade >= threshold.value() {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

/// Same rule as [`classify`], applied to an aggregate.
pub fn verdict(average: f64, threshold: Threshold) -> Verdict {
    classify(average, threshold)
}

/// Arithmetic mean of every grade, in insertion order.
pub fn average(roster: &Roster) -> Result<f64> {
    if roster.is_empty() {
        return Err(GradeError::EmptyRoster);
    }

    let n = roster.count() as f64;
    let sum: f64 = roster.all().iter().map(|e| e.grade).sum();
    if sum.is_finite() {
        return Ok(sum / n);
    }

    // 總和溢位時逐項先除, 結果不超過 max |grade|
    Ok(roster.all().iter().map(|e| e.grade / n).sum())
}

// "7,5" 與 "7.5" 視為相同
fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses grade text, accepting `.` or `,` as the decimal separator.
pub fn parse_grade(raw: &str) -> Result<f64> {
    parse_decimal(raw).ok_or_else(|| GradeError::InvalidGrade {
        raw: raw.to_string(),
    })
}

pub fn parse_threshold(raw: &str) -> Result<Threshold> {
    let value = parse_decimal(raw).ok_or_else(|| GradeError::InvalidThreshold {
        raw: raw.to_string(),
    })?;
    Threshold::new(value)
}

/// Classification and aggregation bound to one threshold.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    threshold: Threshold,
}

impl Evaluator {
    pub fn new(threshold: Threshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn classify(&self, grade: f64) -> Verdict {
        classify(grade, self.threshold)
    }

    pub fn summarize(&self, roster: &Roster) -> Result<Summary> {
        let average = average(roster)?;
        Ok(Summary {
            average,
            verdict: verdict(average, self.threshold),
            count: roster.count(),
        })
    }
}
