// Entry service - Use cases for adding, removing and refreshing readings
use crate::application::stats_gateway::{
    GatewayError, MutationMethod, MutationResponse, RefreshOutcome, StatsGateway,
};
use crate::domain::metric::Metric;
use crate::domain::reading::{EntryReading, MeasurementKind};
use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use std::sync::Arc;

const ALREADY_REPORTED: u16 = 208;

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("{metric} entries need {expected}")]
    WrongReading {
        metric: Metric,
        expected: &'static str,
    },
}

#[derive(Clone)]
pub struct EntryService {
    gateway: Arc<dyn StatsGateway>,
}

impl EntryService {
    pub fn new(gateway: Arc<dyn StatsGateway>) -> Self {
        Self { gateway }
    }

    pub async fn add_entry(
        &self,
        metric: Metric,
        date: NaiveDate,
        reading: EntryReading,
    ) -> Result<MutationResponse, EntryError> {
        if !reading.fits(metric.kind()) {
            return Err(EntryError::WrongReading {
                metric,
                expected: match metric.kind() {
                    MeasurementKind::HighLowOnly => "high and low",
                    _ => "a value",
                },
            });
        }

        let mut body = entry_body(metric, date);
        match reading {
            EntryReading::Value { value } => {
                body.insert("value".to_string(), json!(value));
            }
            EntryReading::Range { high, low } => {
                body.insert("high".to_string(), json!(high));
                body.insert("low".to_string(), json!(low));
            }
        }

        tracing::info!("Adding {} entry for {}", metric, date);
        Ok(self
            .gateway
            .submit_mutation(&metric.endpoint(), MutationMethod::Post, Some(Value::Object(body)))
            .await?)
    }

    pub async fn remove_entry(
        &self,
        metric: Metric,
        date: NaiveDate,
    ) -> Result<MutationResponse, GatewayError> {
        let body = entry_body(metric, date);

        tracing::info!("Removing {} entry for {}", metric, date);
        self.gateway
            .submit_mutation(&metric.endpoint(), MutationMethod::Delete, Some(Value::Object(body)))
            .await
    }

    /// Ask the backend to pull fresh readings
    pub async fn refresh(&self, metric: Metric, force: bool) -> Result<RefreshOutcome, GatewayError> {
        let endpoint = if force {
            format!("{}?force=true", metric.endpoint())
        } else {
            metric.endpoint()
        };

        let response = self
            .gateway
            .submit_mutation(&endpoint, MutationMethod::Put, None)
            .await?;

        let outcome = if response.status == ALREADY_REPORTED {
            RefreshOutcome::UpToDate
        } else {
            RefreshOutcome::Refreshed
        };
        tracing::info!("Refresh of {} finished: {:?}", metric, outcome);
        Ok(outcome)
    }
}

fn entry_body(metric: Metric, date: NaiveDate) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(
        metric.entry_date_field().to_string(),
        Value::String(date.format("%Y-%m-%d").to_string()),
    );
    body
}
