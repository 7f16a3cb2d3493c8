use crate::core::evaluator::{self, Evaluator};
use crate::core::render;
use crate::core::roster::Roster;
use crate::domain::model::{Entry, Labels, RowView, SessionView, Summary, Threshold};
use crate::utils::error::{GradeError, Result};

/// One grading session: owns the roster and a threshold fixed at construction.
#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,
    evaluator: Evaluator,
    labels: Labels,
}

impl Session {
    pub fn new(threshold: Threshold) -> Self {
        Self::with_labels(threshold, Labels::default())
    }

    pub fn with_labels(threshold: Threshold, labels: Labels) -> Self {
        tracing::debug!("New session with passing threshold {}", threshold);
        Self {
            roster: Roster::new(),
            evaluator: Evaluator::new(threshold),
            labels,
        }
    }

    /// Validates and records one submission, returning the full re-render.
    ///
    /// On any error the roster is left exactly as it was.
    pub fn submit(&mut self, name: &str, raw_grade: &str) -> Result<SessionView> {
        if name.trim().is_empty() {
            return Err(GradeError::EmptyName);
        }
        let grade = evaluator::parse_grade(raw_grade)?;

        self.roster.add(Entry::new(name, grade))?;
        tracing::info!(
            "Recorded '{}' = {} ({})",
            name,
            grade,
            self.evaluator.classify(grade)
        );

        Ok(self.view())
    }

    pub fn rows(&self) -> Vec<RowView> {
        render::render_rows(self.roster.all(), self.threshold(), &self.labels)
    }

    pub fn summary(&self) -> Result<Summary> {
        self.evaluator.summarize(&self.roster)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            rows: self.rows(),
            summary: render::render_summary(&self.roster, self.threshold(), &self.labels),
        }
    }

    pub fn threshold(&self) -> Threshold {
        self.evaluator.threshold()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SummaryView, Verdict};

    fn session() -> Session {
        Session::new(Threshold::new(7.0).unwrap())
    }

    #[test]
    fn test_submit_returns_full_rerender() {
        let mut session = session();
        session.submit("Homework1", "8").unwrap();
        let view = session.submit("Homework2", "6,5").unwrap();

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].grade, 6.5);
        assert_eq!(view.rows[1].verdict, Verdict::Fail);
        match view.summary {
            SummaryView::Average { average, .. } => assert_eq!(average, 7.25),
            other => panic!("expected average, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_grade_does_not_mutate_roster() {
        let mut session = session();
        let err = session.submit("Quiz", "abc").unwrap_err();
        assert!(matches!(err, GradeError::InvalidGrade { .. }));
        assert_eq!(session.roster().count(), 0);
        assert_eq!(session.view().summary, SummaryView::NoData);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut session = session();
        assert!(matches!(
            session.submit("  ", "9").unwrap_err(),
            GradeError::EmptyName
        ));
        assert!(session.roster().is_empty());
    }

    #[test]
    fn test_grade_is_parsed_before_duplicate_check() {
        let mut session = session();
        session.submit("Quiz", "9").unwrap();
        let err = session.submit("Quiz", "oops").unwrap_err();
        assert!(matches!(err, GradeError::InvalidGrade { .. }));
    }

    #[test]
    fn test_huge_grades_keep_a_finite_average() {
        let mut session = session();
        session.submit("A", "1e308").unwrap();
        let view = session.submit("B", "1e308").unwrap();

        let summary = session.summary().unwrap();
        assert!(summary.average.is_finite());
        assert_eq!(summary.verdict, Verdict::Pass);
        assert_eq!(view.rows[0].grade_display, "1e308");
        match view.summary {
            SummaryView::Average { average, .. } => assert_eq!(average, 1e308),
            other => panic!("expected average, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_on_empty_session() {
        assert!(matches!(
            session().summary().unwrap_err(),
            GradeError::EmptyRoster
        ));
    }
}
