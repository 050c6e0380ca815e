use aws_config::BehaviorVersion;
use catch_stats::adapters::dynamodb::DynamoStore;
use catch_stats::api::{HttpRequest, HttpResponse};
use catch_stats::utils::logger;
use catch_stats::utils::validation::Validate;
use catch_stats::{ApiConfig, ApiRouter};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = ApiConfig::from_env()?;
    config.validate()?;

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.ddb_daily_table.clone(),
        config.ddb_catch_table.clone(),
    );
    let router = Arc::new(ApiRouter::new(store, config.facility_default.clone()));

    run(service_fn(move |event: LambdaEvent<HttpRequest>| {
        let router = Arc::clone(&router);
        async move { Ok::<HttpResponse, Error>(router.handle(&event.payload).await) }
    }))
    .await
}
