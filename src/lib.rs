pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::{ApiConfig, FetcherConfig};

pub use adapters::appsync::AppSyncClient;
pub use adapters::local::{LocalStorage, LogNotifier};
pub use api::ApiRouter;
pub use core::fetcher::{FetchOptions, FetchPipeline, RunReport};
pub use utils::error::{Result, StatsError};
