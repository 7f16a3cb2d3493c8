use crate::core::{ConfigProvider, Pipeline, Report, Storage, Submission};
use crate::utils::error::{GradeError, Result};
use crate::utils::validation;

pub const JSON_REPORT: &str = "report.json";
pub const CSV_REPORT: &str = "report.csv";

/// Reads `name,grade` submissions from a CSV file and writes the report
/// in every configured format.
pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn parse_submissions(&self, data: &[u8]) -> Result<Vec<Submission>> {
        let delimiter = validation::validate_delimiter("delimiter", self.config.delimiter())?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::Headers)
            .from_reader(data);

        let mut submissions = Vec::new();
        for record in reader.deserialize() {
            let submission: Submission = record?;
            submissions.push(submission);
        }
        Ok(submissions)
    }

    fn output_file(&self, file: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), file)
    }

    fn render_csv(&self, report: &Report) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["name", "grade", "verdict", "label"])?;
        for row in &report.rows {
            let verdict = row.verdict.to_string();
            writer.write_record([
                row.name.as_str(),
                row.grade_display.as_str(),
                verdict.as_str(),
                row.label.as_str(),
            ])?;
        }

        writer.into_inner().map_err(|e| GradeError::ProcessingError {
            message: format!("Failed to flush CSV report: {}", e),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Submission>> {
        let input = self
            .config
            .input_file()
            .ok_or_else(|| GradeError::MissingConfigError {
                field: "input".to_string(),
            })?;

        tracing::debug!("Loading submissions from: {}", input);
        let data = self.storage.read_file(input).await?;
        self.parse_submissions(&data)
    }

    async fn load(&self, report: Report) -> Result<String> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            match format.as_str() {
                "json" => {
                    let target = self.output_file(JSON_REPORT);
                    let json = serde_json::to_string_pretty(&report)?;
                    self.storage.write_file(&target, json.as_bytes()).await?;
                    written.push(target);
                }
                "csv" => {
                    let target = self.output_file(CSV_REPORT);
                    let csv = self.render_csv(&report)?;
                    self.storage.write_file(&target, &csv).await?;
                    written.push(target);
                }
                other => {
                    return Err(GradeError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            }
        }

        tracing::debug!("Report files written: {:?}", written);
        Ok(written.join(", "))
    }
}
