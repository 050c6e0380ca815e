// Adapters layer: concrete implementations of the domain ports for external
// systems (AppSync, S3, DynamoDB, SES, local filesystem).

pub mod appsync;
pub mod local;

#[cfg(feature = "lambda")]
pub mod dynamodb;
#[cfg(feature = "lambda")]
pub mod s3;
#[cfg(feature = "lambda")]
pub mod secrets;
#[cfg(feature = "lambda")]
pub mod ses;
