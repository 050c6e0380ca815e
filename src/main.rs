use catch_stats::config::resolve_target_dates;
use catch_stats::utils::logger;
use catch_stats::{AppSyncClient, CliConfig, FetchOptions, FetchPipeline, LocalStorage, LogNotifier};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting catch-stats CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let api_key = match config.api_key.clone().or_else(|| std::env::var("APPSYNC_API_KEY").ok()) {
        Some(key) if !key.is_empty() => key,
        _ => {
            eprintln!("❌ No API key: pass --api-key or set APPSYNC_API_KEY");
            std::process::exit(1);
        }
    };

    let dates = match resolve_target_dates(
        config.date.as_deref(),
        config.from.as_deref(),
        config.to.as_deref(),
    ) {
        Ok(dates) => dates,
        Err(e) => {
            tracing::error!("❌ Invalid date selection: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let source = AppSyncClient::new(config.appsync_url.clone(), api_key)?;
    let storage = LocalStorage::new(config.output_path.clone());
    let options = FetchOptions {
        fetch_field_condition: config.fetch_field_condition,
        fetch_fishing_report: config.fetch_fishing_report,
    };
    let pipeline = FetchPipeline::new(source, storage.clone(), storage, LogNotifier, options);

    match pipeline.run(&config.facility, &dates).await {
        Ok(report) => {
            tracing::info!("✅ Fetch completed");
            println!(
                "✅ Fetch completed: {}/{} dates, {} catches",
                report.processed_dates.len(),
                report.total_dates,
                report.total_catches
            );
            println!("📁 Output saved under: {}", config.output_path);
            if !report.errors.is_empty() {
                for failure in &report.errors {
                    eprintln!("⚠️  {}: {}", failure.date, failure.error);
                }
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!("❌ Fetch failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
