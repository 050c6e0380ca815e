use aws_config::BehaviorVersion;
use catch_stats::adapters::dynamodb::DynamoStore;
use catch_stats::adapters::s3::S3Archive;
use catch_stats::adapters::secrets;
use catch_stats::adapters::ses::SesNotifier;
use catch_stats::core::fetcher::RunReport;
use catch_stats::utils::logger;
use catch_stats::utils::validation::Validate;
use catch_stats::{AppSyncClient, FetchOptions, FetchPipeline, FetcherConfig};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Request {
    pub facility: Option<String>,
}

fn boxed(e: catch_stats::StatsError) -> Error {
    Box::new(e) as Error
}

async fn function_handler(event: LambdaEvent<Request>) -> Result<RunReport, Error> {
    tracing::info!("Starting fetch Lambda");

    let config = FetcherConfig::from_env().map_err(boxed)?;
    config.validate().map_err(boxed)?;

    let facility = event
        .payload
        .facility
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| config.facility_default.clone());

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let api_key = match &config.appsync_api_key {
        Some(key) => key.clone(),
        None => match &config.appsync_api_key_secret_id {
            Some(secret_id) => secrets::resolve_api_key(&aws_config, secret_id)
                .await
                .map_err(boxed)?,
            // validate() rules this combination out
            None => {
                return Err(boxed(catch_stats::StatsError::MissingConfigError {
                    field: "APPSYNC_API_KEY or APPSYNC_API_KEY_SECRET_ID".to_string(),
                }))
            }
        },
    };

    let source = AppSyncClient::new(config.appsync_url.clone(), api_key).map_err(boxed)?;
    let archive = S3Archive::new(
        aws_sdk_s3::Client::new(&aws_config),
        config.s3_bucket.clone(),
    );
    let store = DynamoStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.ddb_daily_table.clone(),
        config.ddb_catch_table.clone(),
    );
    let notifier = SesNotifier::new(
        aws_sdk_sesv2::Client::new(&aws_config),
        config.ses_from.clone(),
        config.ses_to.clone(),
    );
    let options = FetchOptions {
        fetch_field_condition: config.fetch_field_condition,
        fetch_fishing_report: config.fetch_fishing_report,
    };
    let pipeline = FetchPipeline::new(source, archive, store, notifier, options);

    let dates = match config.target_dates() {
        Ok(dates) => dates,
        Err(e) => {
            // bad date configuration still deserves an operator mail
            if let Err(mail_err) = pipeline.notify_failure(&facility, &e).await {
                tracing::error!(error = %mail_err, "failed to send failure mail");
            }
            return Err(boxed(e));
        }
    };

    let report = pipeline.run(&facility, &dates).await.map_err(boxed)?;

    tracing::info!(
        status = ?report.status,
        dates = report.total_dates,
        catches = report.total_catches,
        "fetch Lambda finished"
    );
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    run(service_fn(function_handler)).await
}
