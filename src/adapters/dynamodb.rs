use crate::domain::model::{DailyRecord, FishCatch, StoredItem};
use crate::domain::ports::{CatchReader, CatchWriter};
use crate::utils::dates::ymd_dash;
use crate::utils::error::{Result, StatsError};
use crate::utils::keys::{catch_pk, catch_sk, daily_pk, daily_sk};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

/// BatchWriteItem accepts at most 25 requests per call.
const BATCH_SIZE: usize = 25;
const MAX_BATCH_RETRIES: usize = 3;

/// Catch data store on two DynamoDB tables (daily summaries and per-fish
/// catch records).
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: DynamoClient,
    daily_table: String,
    catch_table: String,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, daily_table: String, catch_table: String) -> Self {
        Self {
            client,
            daily_table,
            catch_table,
        }
    }
}

fn to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attr).collect()),
        Value::Object(map) => {
            AttributeValue::M(map.iter().map(|(k, v)| (k.clone(), to_attr(v))).collect())
        }
    }
}

fn number_from_str(n: &str) -> Value {
    if let Ok(i) = n.parse::<i64>() {
        return Value::Number(i.into());
    }
    n.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn from_attr(attr: &AttributeValue) -> Value {
    match attr {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_from_str(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(from_attr).collect()),
        AttributeValue::M(map) => {
            Value::Object(map.iter().map(|(k, v)| (k.clone(), from_attr(v))).collect())
        }
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        _ => Value::Null,
    }
}

fn item_to_map(item: &HashMap<String, AttributeValue>) -> StoredItem {
    item.iter().map(|(k, v)| (k.clone(), from_attr(v))).collect()
}

/// Serialize a record to a DynamoDB item and tack on the table keys.
fn to_item<T: serde::Serialize>(
    record: &T,
    pk: String,
    sk: String,
) -> Result<HashMap<String, AttributeValue>> {
    let value = serde_json::to_value(record)?;
    let Value::Object(map) = value else {
        return Err(StatsError::ProcessingError {
            message: "record did not serialize to an object".to_string(),
        });
    };

    let mut item: HashMap<String, AttributeValue> =
        map.iter().map(|(k, v)| (k.clone(), to_attr(v))).collect();
    item.insert("PK".to_string(), AttributeValue::S(pk));
    item.insert("SK".to_string(), AttributeValue::S(sk));
    Ok(item)
}

enum SortKeyCondition {
    All,
    From(String),
    To(String),
    Between(String, String),
}

impl SortKeyCondition {
    fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        // Catch sort keys extend past the date with `#SLOT#...`, so the
        // upper bound needs a suffix that sorts after every real key of
        // that day ('~' is above the whole key alphabet).
        let lo = from.map(|d| daily_sk(&ymd_dash(d)));
        let hi = to.map(|d| format!("{}#~", daily_sk(&ymd_dash(d))));
        match (lo, hi) {
            (Some(lo), Some(hi)) => SortKeyCondition::Between(lo, hi),
            (Some(lo), None) => SortKeyCondition::From(lo),
            (None, Some(hi)) => SortKeyCondition::To(hi),
            (None, None) => SortKeyCondition::All,
        }
    }

    fn expression(&self) -> &'static str {
        match self {
            SortKeyCondition::All => "#pk = :pk",
            SortKeyCondition::From(_) => "#pk = :pk AND #sk >= :lo",
            SortKeyCondition::To(_) => "#pk = :pk AND #sk <= :hi",
            SortKeyCondition::Between(_, _) => "#pk = :pk AND #sk BETWEEN :lo AND :hi",
        }
    }

    fn bind(&self, values: &mut Vec<(&'static str, String)>) {
        match self {
            SortKeyCondition::All => {}
            SortKeyCondition::From(lo) => values.push((":lo", lo.clone())),
            SortKeyCondition::To(hi) => values.push((":hi", hi.clone())),
            SortKeyCondition::Between(lo, hi) => {
                values.push((":lo", lo.clone()));
                values.push((":hi", hi.clone()));
            }
        }
    }
}

#[async_trait]
impl CatchWriter for DynamoStore {
    async fn put_daily(&self, record: &DailyRecord) -> Result<()> {
        let item = to_item(
            record,
            daily_pk(&record.summary.facility),
            daily_sk(&record.summary.date),
        )?;

        self.client
            .put_item()
            .table_name(&self.daily_table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StatsError::DatabaseError {
                message: format!("failed to put daily item: {}", e),
            })?;

        tracing::debug!(date = %record.summary.date, "stored daily summary");
        Ok(())
    }

    async fn put_catches(&self, catches: &[FishCatch]) -> Result<()> {
        for chunk in catches.chunks(BATCH_SIZE) {
            let mut requests = Vec::with_capacity(chunk.len());
            for c in chunk {
                let item = to_item(
                    c,
                    catch_pk(&c.facility, &c.fish),
                    catch_sk(&c.date, c.slot, c.place.as_deref()),
                )?;
                let put = PutRequest::builder().set_item(Some(item)).build().map_err(
                    |e| StatsError::DatabaseError {
                        message: format!("failed to build put request: {}", e),
                    },
                )?;
                requests.push(WriteRequest::builder().put_request(put).build());
            }

            let mut pending = requests;
            let mut retries = 0;
            while !pending.is_empty() {
                let output = self
                    .client
                    .batch_write_item()
                    .request_items(&self.catch_table, pending)
                    .send()
                    .await
                    .map_err(|e| StatsError::DatabaseError {
                        message: format!("failed to batch-write catches: {}", e),
                    })?;

                pending = output
                    .unprocessed_items()
                    .and_then(|m| m.get(&self.catch_table))
                    .cloned()
                    .unwrap_or_default();

                if pending.is_empty() {
                    break;
                }
                retries += 1;
                if retries > MAX_BATCH_RETRIES {
                    return Err(StatsError::DatabaseError {
                        message: format!(
                            "{} catch items still unprocessed after {} retries",
                            pending.len(),
                            MAX_BATCH_RETRIES
                        ),
                    });
                }
                tracing::warn!(unprocessed = pending.len(), retries, "retrying batch write");
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CatchReader for DynamoStore {
    async fn query_series(
        &self,
        facility: &str,
        fish: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<StoredItem>> {
        let condition = SortKeyCondition::new(from, to);
        let mut values: Vec<(&'static str, String)> = vec![(":pk", catch_pk(facility, fish))];
        condition.bind(&mut values);

        let mut items = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.catch_table)
                .key_condition_expression(condition.expression())
                .expression_attribute_names("#pk", "PK");
            if !matches!(condition, SortKeyCondition::All) {
                request = request.expression_attribute_names("#sk", "SK");
            }
            for (name, value) in &values {
                request = request
                    .expression_attribute_values(*name, AttributeValue::S(value.clone()));
            }

            let output = request
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StatsError::DatabaseError {
                    message: format!("failed to query catch series: {}", e),
                })?;

            items.extend(output.items().iter().map(item_to_map));

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn get_day(&self, facility: &str, date: &str) -> Result<Option<StoredItem>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.daily_table)
            .key("PK", AttributeValue::S(daily_pk(facility)))
            .key("SK", AttributeValue::S(daily_sk(date)))
            .send()
            .await
            .map_err(|e| StatsError::DatabaseError {
                message: format!("failed to get daily item: {}", e),
            })?;

        Ok(output.item().map(item_to_map))
    }
}
