use carrier_track::core::extractor::{DhlExtractor, FedExExtractor};
use carrier_track::core::source;
use carrier_track::utils::error::{ErrorSeverity, Result, TrackError};
use carrier_track::utils::{logger, validation::Validate};
use carrier_track::{
    BatchRunner, Carrier, CliConfig, DhlClient, FedExClient, LocalStorage, SummaryExporter,
    TrackerConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting carrier-track CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Tracking run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::from_file(path)?,
        None => TrackerConfig::from_env()?,
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    // 缺少憑證時每筆查詢都會被略過，這裡先提醒
    if let Err(e) = config.require_credentials(cli.carrier) {
        tracing::warn!("🔶 {}; every {} lookup will be skipped", e, cli.carrier);
    }

    let mut requests = source::from_args(&cli.tracking_ids);
    if let Some(path) = &cli.input_file {
        requests.extend(source::read_tracking_file(&LocalStorage::new("."), path).await?);
    }
    if requests.is_empty() {
        return Err(TrackError::ConfigError {
            message: "no tracking numbers given; pass them as arguments or use --input-file"
                .to_string(),
        });
    }

    let delay = config.batch.delay();
    let summary = match cli.carrier {
        Carrier::Dhl => {
            BatchRunner::new(DhlClient::new(config.dhl.clone()), DhlExtractor)
                .with_delay(delay)
                .run(&requests)
                .await
        }
        Carrier::Fedex => {
            BatchRunner::new(FedExClient::new(config.fedex.clone()), FedExExtractor)
                .with_delay(delay)
                .run(&requests)
                .await
        }
    };

    println!("\nSummary:");
    println!("{}", summary);

    if let Some(output_path) = &config.output.output_path {
        let exporter = SummaryExporter::new(
            LocalStorage::new(output_path.as_str()),
            config.output.formats.clone(),
        );
        let files = exporter
            .export(cli.carrier, &summary, chrono::Utc::now())
            .await?;

        for file in files {
            tracing::info!("📁 Output saved to: {}/{}", output_path, file);
            println!("📁 Output saved to: {}/{}", output_path, file);
        }
    }

    Ok(())
}
