use crate::core::normalize::{
    normalize_catch_count, normalize_field_condition, normalize_fishes,
    normalize_fishing_reports, pick_latest,
};
use crate::domain::model::{DailyRecord, QueryKind};
use crate::domain::ports::{CatchWriter, Notifier, PostSource, RawArchive};
use crate::utils::dates::ymd_dash;
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which optional post kinds a run fetches on top of the catch count.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    pub fetch_field_condition: bool,
    pub fetch_fishing_report: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateResult {
    pub date: String,
    pub catches: usize,
    pub raw_keys: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateFailure {
    pub date: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Ok,
    Partial,
}

/// Outcome of one batch run, also the fetcher Lambda's response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub processed_dates: Vec<String>,
    pub total_dates: usize,
    pub total_catches: usize,
    pub results: Vec<DateResult>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<DateFailure>,
}

fn archive_key(facility: &str, kind: QueryKind, date: &str) -> String {
    format!("raw/{}/{}/{}.json", facility, date, kind.as_str())
}

/// One batch run: per date, fetch the posts, archive the raw responses,
/// normalize, persist, and finally report the whole run by mail.
pub struct FetchPipeline<P, A, W, N>
where
    P: PostSource,
    A: RawArchive,
    W: CatchWriter,
    N: Notifier,
{
    source: P,
    archive: A,
    store: W,
    notifier: N,
    options: FetchOptions,
}

impl<P, A, W, N> FetchPipeline<P, A, W, N>
where
    P: PostSource,
    A: RawArchive,
    W: CatchWriter,
    N: Notifier,
{
    pub fn new(source: P, archive: A, store: W, notifier: N, options: FetchOptions) -> Self {
        Self {
            source,
            archive,
            store,
            notifier,
            options,
        }
    }

    /// Process every date independently; one bad date never blocks the
    /// rest. Exactly one report mail goes out per run.
    pub async fn run(&self, facility: &str, dates: &[NaiveDate]) -> Result<RunReport> {
        let mut results: Vec<DateResult> = Vec::new();
        let mut errors: Vec<DateFailure> = Vec::new();

        for &date in dates {
            let date_dash = ymd_dash(date);
            tracing::info!(facility, date = %date_dash, "processing date");

            match self.process_date(facility, date).await {
                Ok(result) => {
                    tracing::info!(date = %date_dash, catches = result.catches, "date done");
                    results.push(result);
                }
                Err(e) => {
                    tracing::error!(date = %date_dash, error = %e, "date failed");
                    errors.push(DateFailure {
                        date: date_dash,
                        error: e.to_string(),
                    });
                }
            }
        }

        let report = RunReport {
            status: if errors.is_empty() {
                RunStatus::Ok
            } else {
                RunStatus::Partial
            },
            processed_dates: results.iter().map(|r| r.date.clone()).collect(),
            total_dates: dates.len(),
            total_catches: results.iter().map(|r| r.catches).sum(),
            results,
            errors,
        };

        let (subject, body) = report_mail(facility, &report);
        self.notifier.notify(&subject, &body).await?;

        Ok(report)
    }

    /// Report a run that died before any date could be processed, e.g. on
    /// bad date configuration.
    pub async fn notify_failure(
        &self,
        facility: &str,
        error: impl std::fmt::Display,
    ) -> Result<()> {
        let subject = format!("[NG] catch batch {}", facility);
        let body = format!("Batch run failed\nfacility: {}\nerror: {}\n", facility, error);
        self.notifier.notify(&subject, &body).await
    }

    async fn process_date(&self, facility: &str, date: NaiveDate) -> Result<DateResult> {
        let date_dash = ymd_dash(date);
        let mut raw_keys: BTreeMap<String, String> = BTreeMap::new();

        // catch_count is the one post a day cannot do without
        let kind = QueryKind::CatchCount;
        let fetched = self.source.fetch_posts(kind, facility, date).await?;
        let latest = pick_latest(fetched.items)?;

        let key = archive_key(facility, kind, &date_dash);
        self.archive.put_json(&key, &fetched.raw).await?;
        raw_keys.insert(kind.as_str().to_string(), key);

        let mut summary = normalize_catch_count(&latest, facility, &date_dash)?;
        let catches = normalize_fishes(&latest, facility, &date_dash);
        if catches.is_empty() {
            // not fatal, but worth noticing in the logs
            tracing::warn!(date = %date_dash, "catch-count post has no named fish slots");
        }

        if self.options.fetch_field_condition {
            let kind = QueryKind::FieldCondition;
            match self.source.fetch_posts(kind, facility, date).await {
                Ok(fetched) if !fetched.items.is_empty() => {
                    let key = archive_key(facility, kind, &date_dash);
                    self.archive.put_json(&key, &fetched.raw).await?;
                    raw_keys.insert(kind.as_str().to_string(), key);

                    let latest = pick_latest(fetched.items)?;
                    summary.extra.extend(normalize_field_condition(&latest));
                }
                Ok(_) => tracing::debug!(date = %date_dash, "no field condition posts"),
                Err(e) => {
                    tracing::warn!(date = %date_dash, error = %e, "field condition fetch failed")
                }
            }
        }

        let mut fishing_report_log = Vec::new();
        if self.options.fetch_fishing_report {
            let kind = QueryKind::FishingReport;
            match self.source.fetch_posts(kind, facility, date).await {
                Ok(fetched) => {
                    let key = archive_key(facility, kind, &date_dash);
                    self.archive.put_json(&key, &fetched.raw).await?;
                    raw_keys.insert(kind.as_str().to_string(), key);

                    fishing_report_log = normalize_fishing_reports(&fetched.items);
                }
                Err(e) => {
                    tracing::warn!(date = %date_dash, error = %e, "fishing report fetch failed")
                }
            }
        }

        let record = DailyRecord {
            summary,
            raw_keys: raw_keys.clone(),
            fishing_report_log,
        };
        self.store.put_daily(&record).await?;
        self.store.put_catches(&catches).await?;

        Ok(DateResult {
            date: date_dash,
            catches: catches.len(),
            raw_keys,
        })
    }
}

fn report_mail(facility: &str, report: &RunReport) -> (String, String) {
    let dates = report.processed_dates.join(", ");

    if report.errors.is_empty() {
        let subject = format!(
            "[OK] catch batch {} ({} dates)",
            facility, report.total_dates
        );
        let body = format!(
            "Batch run succeeded\n\
             facility: {}\n\
             dates processed: {}\n\
             dates: {}\n\
             total catches: {}\n",
            facility, report.total_dates, dates, report.total_catches
        );
        (subject, body)
    } else {
        let error_lines: Vec<String> = report
            .errors
            .iter()
            .map(|e| format!("- {}: {}", e.date, e.error))
            .collect();
        let subject = format!(
            "[WARN] catch batch {} ({}/{} dates)",
            facility,
            report.results.len(),
            report.total_dates
        );
        let body = format!(
            "Batch run completed with errors\n\
             facility: {}\n\
             dates processed: {}/{}\n\
             succeeded: {}\n\
             total catches: {}\n\
             \n\
             errors:\n{}\n",
            facility,
            report.results.len(),
            report.total_dates,
            dates,
            report.total_catches,
            error_lines.join("\n")
        );
        (subject, body)
    }
}
