use anyhow::Result;
use grade_tally::core::evaluator;
use grade_tally::core::ConfigProvider;
use grade_tally::utils::validation::Validate;
use grade_tally::{CsvPipeline, GradeEngine, LocalStorage, TomlConfig};
use tempfile::TempDir;

fn write_config(dir: &TempDir, extra: &str, formats: &str) -> Result<TomlConfig> {
    let root = dir.path().to_str().unwrap().replace('\\', "/");
    let content = format!(
        r#"
[session]
name = "batch-test"
threshold = "7"

[input]
path = "{root}/grades.csv"
delimiter = ";"

[output]
path = "{root}/out"
formats = {formats}
{extra}
"#
    );
    let config_path = dir.path().join("grades.toml");
    std::fs::write(&config_path, content)?;
    Ok(TomlConfig::from_file(&config_path)?)
}

#[tokio::test]
async fn test_batch_report_with_rejections() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(
        dir.path().join("grades.csv"),
        "name;grade\nHomework1;8\nHomework1;5\nHomework2;6\nEssay;n/a\n;9\n",
    )
    .await?;

    let config = write_config(&dir, "", r#"["json", "csv"]"#)?;
    config.validate()?;
    let threshold = evaluator::parse_threshold(config.threshold().unwrap())?;

    let pipeline = CsvPipeline::new(LocalStorage::new("."), config);
    let engine = GradeEngine::new(pipeline, threshold);
    let output = engine.run().await?;
    assert!(output.contains("report.json"));
    assert!(output.contains("report.csv"));

    let json = std::fs::read_to_string(dir.path().join("out/report.json"))?;
    let report: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(report["rows"].as_array().unwrap().len(), 2);
    assert_eq!(report["average"], 7.0);
    assert_eq!(report["verdict"], "pass");

    let rejected = report["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 3);
    assert_eq!(rejected[0]["name"], "Homework1");
    assert_eq!(rejected[1]["raw_grade"], "n/a");
    assert_eq!(rejected[2]["name"], "");

    let csv = std::fs::read_to_string(dir.path().join("out/report.csv"))?;
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec![
            "name,grade,verdict,label",
            "Homework1,8,pass,Pass",
            "Homework2,6,fail,Fail"
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_batch_report_uses_configured_labels() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(dir.path().join("grades.csv"), "name;grade\nProva;6,9\nTrabalho;9,5\n").await?;

    let extra = r#"
[display]
pass_label = "Aprovado"
fail_label = "Reprovado"
"#;
    let config = write_config(&dir, extra, r#"["csv"]"#)?;
    let threshold = evaluator::parse_threshold(config.threshold().unwrap())?;
    let labels = config.labels();

    let pipeline = CsvPipeline::new(LocalStorage::new("."), config);
    GradeEngine::with_labels(pipeline, threshold, labels).run().await?;

    let csv = std::fs::read_to_string(dir.path().join("out/report.csv"))?;
    assert!(csv.contains("Prova,6.9,fail,Reprovado"));
    assert!(csv.contains("Trabalho,9.5,pass,Aprovado"));
    assert!(!dir.path().join("out/report.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_only_invalid_rows_produce_no_average() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::write(dir.path().join("grades.csv"), "name;grade\nLab;???\n").await?;

    let config = write_config(&dir, "", r#"["json"]"#)?;
    let pipeline = CsvPipeline::new(LocalStorage::new("."), config);
    let report = GradeEngine::new(pipeline, evaluator::parse_threshold("7")?)
        .build_report()
        .await?;

    assert!(report.rows.is_empty());
    assert_eq!(report.average, None);
    assert_eq!(report.rejected.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_fails_run() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(&dir, "", r#"["json"]"#)?;
    let pipeline = CsvPipeline::new(LocalStorage::new("."), config);

    let err = GradeEngine::new(pipeline, evaluator::parse_threshold("7")?)
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, grade_tally::GradeError::IoError(_)));
    Ok(())
}
