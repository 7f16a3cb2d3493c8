use clap::Parser;
use grade_tally::core::evaluator;
use grade_tally::core::ConfigProvider;
use grade_tally::utils::error::{ErrorSeverity, GradeError};
use grade_tally::utils::{logger, validation::Validate};
use grade_tally::{CliConfig, CsvPipeline, GradeEngine, LocalStorage, Session, Threshold};

fn exit_code(e: &GradeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_failure(e: &GradeError) {
    tracing::error!(
        "❌ grade-tally failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

/// 取得門檻: 優先使用 --threshold, 否則在 stdin 詢問一次
fn resolve_threshold(config: &CliConfig) -> Result<Threshold, GradeError> {
    match config.threshold() {
        Some(raw) => evaluator::parse_threshold(raw),
        None => {
            let stdin = std::io::stdin();
            let mut reader = stdin.lock();
            let mut stdout = std::io::stdout();
            grade_tally::read_threshold(&mut reader, &mut stdout)
        }
    }
}

async fn run(config: CliConfig) -> Result<(), GradeError> {
    let threshold = resolve_threshold(&config)?;
    tracing::info!("Passing threshold: {}", threshold);

    if config.input.is_some() {
        let labels = config.labels();
        let storage = LocalStorage::new(".");
        let pipeline = CsvPipeline::new(storage, config);
        let engine = GradeEngine::with_labels(pipeline, threshold, labels);

        let output = engine.run().await?;
        println!("✅ Report saved to: {}", output);
    } else {
        let mut session = Session::with_labels(threshold, config.labels());
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut stdout = std::io::stdout();

        let stats = grade_tally::run_console(&mut session, &mut reader, &mut stdout)?;
        tracing::info!(
            "Session closed: {} accepted, {} rejected",
            stats.accepted,
            stats.rejected
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json_logs);
    tracing::info!("Starting grade-tally");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        report_failure(&e);
        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }
}
