// HTTP request handlers
use crate::application::stats_gateway::RefreshOutcome;
use crate::domain::metric::Metric;
use crate::domain::preferences::{parse_max_entries, Preferences, Theme};
use crate::domain::query::ChartRequest;
use crate::domain::reading::EntryReading;
use crate::domain::timeframe::Timeframe;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::ndjson_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    pub timeframe: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    #[serde(rename = "max-entries", alias = "count")]
    pub max_entries: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewEntry {
    #[serde(alias = "timestamp")]
    pub datestamp: NaiveDate,
    #[serde(flatten)]
    pub reading: EntryReading,
}

#[derive(Debug, Deserialize)]
pub struct EntryKey {
    #[serde(alias = "timestamp")]
    pub datestamp: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshParams {
    pub force: Option<bool>,
}

fn preferences(headers: &HeaderMap) -> Preferences {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(Preferences::from_cookie_header)
        .unwrap_or_default()
}

/// Resolve a chart request; the entry cap comes from the query, then the
/// cookie, then configuration
fn chart_request(
    params: &ChartParams,
    headers: &HeaderMap,
    default_max_entries: Option<usize>,
) -> Result<ChartRequest, ApiError> {
    let timeframe = match &params.timeframe {
        Some(t) => t.parse::<Timeframe>()?,
        None => Timeframe::Daily,
    };
    let max_entries = match &params.max_entries {
        Some(value) => parse_max_entries(value),
        None => preferences(headers).max_entries.or(default_max_entries),
    };

    Ok(ChartRequest {
        year: params.year.filter(|y| *y != 0),
        month: params.month.filter(|m| *m != 0),
        max_entries,
        ..ChartRequest::new(timeframe)
    })
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Chart configuration for one metric and timeframe
pub async fn get_chart(
    Path(metric): Path<String>,
    Query(params): Query<ChartParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let metric: Metric = metric.parse()?;
    let request = chart_request(&params, &headers, state.default_max_entries)?;

    let chart = state.chart_service.load_chart(metric, &request).await.map_err(|e| {
        tracing::error!("Error loading {} chart for {}: {}", request.timeframe, metric, e);
        ApiError::from(e)
    })?;

    Ok(match json_response(&chart, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    })
}

/// Stream every timeframe of a metric (progressive loading)
pub async fn stream_dashboard(
    Path(metric): Path<String>,
    Query(params): Query<ChartParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let metric: Metric = metric.parse()?;
    let request = chart_request(&params, &headers, state.default_max_entries)?;

    let rx = state.streaming_service.stream_dashboard(metric, request).await;
    Ok(stream_from_receiver(rx))
}

pub async fn add_entry(
    Path(metric): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewEntry>,
) -> Result<Response, ApiError> {
    let metric: Metric = metric.parse()?;
    let response = state
        .entry_service
        .add_entry(metric, entry.datestamp, entry.reading)
        .await?;

    Ok(passthrough(response.status, response.body))
}

pub async fn remove_entry(
    Path(metric): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(key): Json<EntryKey>,
) -> Result<Response, ApiError> {
    let metric: Metric = metric.parse()?;
    let response = state.entry_service.remove_entry(metric, key.datestamp).await?;

    Ok(passthrough(response.status, response.body))
}

/// `200` when the backend pulled new readings, `208` when it was already current
pub async fn refresh(
    Path(metric): Path<String>,
    Query(params): Query<RefreshParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let metric: Metric = metric.parse()?;
    let outcome = state
        .entry_service
        .refresh(metric, params.force.unwrap_or(false))
        .await?;

    let status = match outcome {
        RefreshOutcome::Refreshed => StatusCode::OK,
        RefreshOutcome::UpToDate => StatusCode::ALREADY_REPORTED,
    };
    Ok((status, Json(json!({ "outcome": outcome }))).into_response())
}

pub async fn get_theme(headers: HeaderMap) -> impl IntoResponse {
    Json(json!({ "theme": preferences(&headers).theme }))
}

pub async fn toggle_theme(headers: HeaderMap) -> impl IntoResponse {
    let theme = Theme::toggled(preferences(&headers).theme);
    (
        [(header::SET_COOKIE, theme.cookie())],
        Json(json!({ "theme": theme })),
    )
}

fn passthrough(status: u16, body: Option<serde_json::Value>) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    match body {
        Some(body) => (status, Json(body)).into_response(),
        None => status.into_response(),
    }
}
