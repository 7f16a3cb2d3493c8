use crate::core::Pipeline;
use crate::core::session::Session;
use crate::domain::model::{Labels, Rejection, Report, Threshold};
use crate::utils::error::Result;
use chrono::Utc;

pub struct GradeEngine<P: Pipeline> {
    pipeline: P,
    threshold: Threshold,
    labels: Labels,
}

impl<P: Pipeline> GradeEngine<P> {
    pub fn new(pipeline: P, threshold: Threshold) -> Self {
        Self::with_labels(pipeline, threshold, Labels::default())
    }

    pub fn with_labels(pipeline: P, threshold: Threshold, labels: Labels) -> Self {
        Self {
            pipeline,
            threshold,
            labels,
        }
    }

    /// Feeds every submission through a fresh session; rejected lines are
    /// reported, not fatal.
    pub async fn build_report(&self) -> Result<Report> {
        tracing::info!("Reading submissions...");
        let submissions = self.pipeline.extract().await?;
        tracing::info!("Read {} submissions", submissions.len());

        let mut session = Session::with_labels(self.threshold, self.labels.clone());
        let mut rejected = Vec::new();

        for submission in submissions {
            match session.submit(&submission.name, &submission.grade) {
                Ok(_) => {}
                Err(e) if e.is_rejection() => {
                    tracing::warn!("⚠️ Rejected '{}': {}", submission.name, e);
                    rejected.push(Rejection {
                        name: submission.name,
                        raw_grade: submission.grade,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let summary = session.summary().ok();
        match &summary {
            Some(s) => tracing::info!(
                "Average {:.2} over {} activities: {}",
                s.average,
                s.count,
                s.verdict
            ),
            None => tracing::warn!("No valid activities, average not available"),
        }

        Ok(Report {
            generated_at: Utc::now(),
            threshold: self.threshold,
            rows: session.rows(),
            average: summary.map(|s| s.average),
            verdict: summary.map(|s| s.verdict),
            rejected,
        })
    }

    pub async fn run(&self) -> Result<String> {
        let report = self.build_report().await?;

        tracing::info!("Writing report...");
        let output = self.pipeline.load(report).await?;
        tracing::info!("Report saved to: {}", output);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Submission, Verdict};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockPipeline {
        submissions: Vec<Submission>,
        loaded: Arc<Mutex<Option<Report>>>,
    }

    #[async_trait::async_trait]
    impl Pipeline for MockPipeline {
        async fn extract(&self) -> Result<Vec<Submission>> {
            Ok(self.submissions.clone())
        }

        async fn load(&self, report: Report) -> Result<String> {
            *self.loaded.lock().await = Some(report);
            Ok("memory".to_string())
        }
    }

    fn pipeline(submissions: Vec<Submission>) -> (MockPipeline, Arc<Mutex<Option<Report>>>) {
        let loaded = Arc::new(Mutex::new(None));
        (
            MockPipeline {
                submissions,
                loaded: loaded.clone(),
            },
            loaded,
        )
    }

    #[tokio::test]
    async fn test_run_collects_rejections_and_aggregate() {
        let (pipeline, loaded) = pipeline(vec![
            Submission::new("Homework1", "8"),
            Submission::new("Homework1", "5"),
            Submission::new("Homework2", "6"),
            Submission::new("Homework3", "n/a"),
        ]);
        let engine = GradeEngine::new(pipeline, Threshold::new(7.0).unwrap());

        let output = engine.run().await.unwrap();
        assert_eq!(output, "memory");

        let report = loaded.lock().await.clone().unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.average, Some(7.0));
        assert_eq!(report.verdict, Some(Verdict::Pass));
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].raw_grade, "5");
        assert_eq!(report.rejected[1].name, "Homework3");
    }

    #[tokio::test]
    async fn test_report_average_survives_sum_overflow() {
        let (pipeline, _) = pipeline(vec![
            Submission::new("A", "1e308"),
            Submission::new("B", "1e308"),
        ]);
        let engine = GradeEngine::new(pipeline, Threshold::new(7.0).unwrap());

        let report = engine.build_report().await.unwrap();
        assert_eq!(report.average, Some(1e308));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["average"], 1e308);
        assert_eq!(json["verdict"], "pass");
    }

    #[tokio::test]
    async fn test_empty_input_has_no_average() {
        let (pipeline, _) = pipeline(vec![]);
        let engine = GradeEngine::new(pipeline, Threshold::new(5.0).unwrap());

        let report = engine.build_report().await.unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.average, None);
        assert_eq!(report.verdict, None);
    }
}
