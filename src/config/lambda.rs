use crate::config::resolve_target_dates;
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_s3_bucket_name, validate_url, Validate,
};
use chrono::NaiveDate;
use std::env;

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| StatsError::MissingConfigError {
        field: name.to_string(),
    })
}

fn flag(name: &str) -> bool {
    matches!(
        env::var(name).ok().as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}

/// Environment of the fetcher Lambda.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub appsync_url: String,
    /// Direct API key; takes precedence over the secret id.
    pub appsync_api_key: Option<String>,
    /// Secrets Manager secret (name or ARN) holding the API key.
    pub appsync_api_key_secret_id: Option<String>,
    pub s3_bucket: String,
    pub ddb_daily_table: String,
    pub ddb_catch_table: String,
    pub ses_from: String,
    pub ses_to: String,
    pub facility_default: String,
    pub fetch_field_condition: bool,
    pub fetch_fishing_report: bool,
    pub target_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FetcherConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            appsync_url: required("APPSYNC_URL")?,
            appsync_api_key: env::var("APPSYNC_API_KEY").ok(),
            appsync_api_key_secret_id: env::var("APPSYNC_API_KEY_SECRET_ID").ok(),
            s3_bucket: required("S3_BUCKET")?,
            ddb_daily_table: required("DDB_DAILY_TABLE")?,
            ddb_catch_table: required("DDB_CATCH_TABLE")?,
            ses_from: required("SES_FROM")?,
            ses_to: required("SES_TO")?,
            facility_default: env::var("FACILITY_DEFAULT")
                .unwrap_or_else(|_| "honmoku".to_string()),
            fetch_field_condition: flag("FETCH_FIELD_CONDITION"),
            fetch_fishing_report: flag("FETCH_FISHING_REPORT"),
            target_date: env::var("TARGET_DATE").ok(),
            start_date: env::var("START_DATE").ok(),
            end_date: env::var("END_DATE").ok(),
        })
    }

    pub fn target_dates(&self) -> Result<Vec<NaiveDate>> {
        resolve_target_dates(
            self.target_date.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
    }
}

impl Validate for FetcherConfig {
    fn validate(&self) -> Result<()> {
        validate_url("appsync_url", &self.appsync_url)?;
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_non_empty_string("ddb_daily_table", &self.ddb_daily_table)?;
        validate_non_empty_string("ddb_catch_table", &self.ddb_catch_table)?;
        validate_email("ses_from", &self.ses_from)?;
        validate_email("ses_to", &self.ses_to)?;
        validate_non_empty_string("facility_default", &self.facility_default)?;

        if self.appsync_api_key.is_none() && self.appsync_api_key_secret_id.is_none() {
            return Err(StatsError::MissingConfigError {
                field: "APPSYNC_API_KEY or APPSYNC_API_KEY_SECRET_ID".to_string(),
            });
        }

        Ok(())
    }
}

/// Environment of the query-API Lambda.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub ddb_daily_table: String,
    pub ddb_catch_table: String,
    pub facility_default: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ddb_daily_table: required("DDB_DAILY_TABLE")?,
            ddb_catch_table: required("DDB_CATCH_TABLE")?,
            facility_default: env::var("FACILITY_DEFAULT")
                .unwrap_or_else(|_| "honmoku".to_string()),
        })
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("ddb_daily_table", &self.ddb_daily_table)?;
        validate_non_empty_string("ddb_catch_table", &self.ddb_catch_table)?;
        validate_non_empty_string("facility_default", &self.facility_default)?;
        Ok(())
    }
}
