use clap::Parser;
use xml_report_etl::core::{ConfigProvider, ReportStore};
use xml_report_etl::utils::error::{EtlError, ErrorSeverity};
use xml_report_etl::utils::logger;
use xml_report_etl::{
    CliConfig, Command, DocumentReportStore, EtlEngine, IngestPipeline, LocalStorage, Settings,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(cli.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level.as_deref());
    }
    tracing::debug!("Settings: {:?}", settings);

    let store = DocumentReportStore::new(LocalStorage::new(settings.store_path()));

    let outcome = match &cli.command {
        Command::Ingest { files } => ingest(files, &settings, &store).await,
        Command::List => list(&store).await,
        Command::Show { id } => match store.get(*id).await {
            Ok(report) => serde_json::to_string_pretty(&report)
                .map(|json| println!("{}", json))
                .map_err(EtlError::from),
            Err(e) => Err(e),
        },
        Command::Delete { id } => store.delete(*id).await.map(|_| {
            println!("✅ Report deleted successfully");
        }),
    };

    if let Err(e) = outcome {
        report_failure(&e);
        std::process::exit(exit_code(e.severity()));
    }
}

async fn ingest(
    files: &[std::path::PathBuf],
    settings: &Settings,
    store: &DocumentReportStore<LocalStorage>,
) -> xml_report_etl::Result<()> {
    let mut worst: Option<EtlError> = None;

    for file in files {
        let path = file.to_string_lossy().to_string();
        let pipeline = IngestPipeline::new(
            LocalStorage::new(""),
            store.clone(),
            settings.clone(),
            path.clone(),
        );

        match EtlEngine::new(pipeline).run().await {
            Ok(saved) => {
                let kind = if saved.report.is_generic() { "generic" } else { "credit report" };
                println!("✅ {} -> {} ({})", path, saved.id, kind);
            }
            Err(e) => {
                report_failure(&e);
                let replace = worst
                    .as_ref()
                    .map_or(true, |current| e.severity() > current.severity());
                if replace {
                    worst = Some(e);
                }
            }
        }
    }

    match worst {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn list(store: &DocumentReportStore<LocalStorage>) -> xml_report_etl::Result<()> {
    let reports = store.list().await?;
    if reports.is_empty() {
        println!("No reports stored yet");
        return Ok(());
    }

    for report in reports {
        let kind = if report.report.is_generic() { "generic" } else { "credit" };
        println!(
            "{}  {}  {:<8} {}",
            report.id,
            report.created_at.format("%Y-%m-%d %H:%M:%S"),
            kind,
            report.file_name
        );
    }
    Ok(())
}

fn report_failure(e: &EtlError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
