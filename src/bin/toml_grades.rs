use clap::Parser;
use grade_tally::core::evaluator;
use grade_tally::core::ConfigProvider;
use grade_tally::utils::{logger, validation::Validate};
use grade_tally::{CsvPipeline, GradeEngine, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-grades")]
#[command(about = "Batch grade report driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "grades.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the passing threshold from config
    #[arg(long)]
    threshold: Option<String>,

    /// Dry run - print the report instead of writing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 先讀設定, 才知道要用哪種日誌格式
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(level) = config.log_level() {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", format!("grade_tally={}", level));
        }
    }
    logger::init_logger(args.verbose, config.json_logs());

    tracing::info!("🚀 Starting TOML-based grade report");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Some(threshold) = args.threshold {
        tracing::info!("🔧 Threshold overridden to: {}", threshold);
        config.session.threshold = threshold;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    let threshold = evaluator::parse_threshold(&config.session.threshold)?;
    let labels = config.labels();
    let pipeline = CsvPipeline::new(LocalStorage::new("."), config);
    let engine = GradeEngine::with_labels(pipeline, threshold, labels);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no report will be written");
        let report = engine.build_report().await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match engine.run().await {
        Ok(output) => {
            println!("✅ Report saved to: {}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Session: {}", config.session_name());
    tracing::info!("   Passing threshold: {}", config.session.threshold);
    tracing::info!(
        "   Input: {} (delimiter '{}')",
        config.input.path,
        config.delimiter()
    );
    tracing::info!(
        "   Output: {} [{}]",
        config.output_path(),
        config.output_formats().join(", ")
    );
    let labels = config.labels();
    tracing::info!("   Labels: {} / {}", labels.pass, labels.fail);
}
