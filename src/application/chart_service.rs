// Chart service - Use case for loading one chart of one metric
use crate::application::stats_gateway::{GatewayError, StatsGateway};
use crate::domain::builder::{DatasetError, StatsDatasetBuilder};
use crate::domain::chart::{ChartConfig, ChartTheme};
use crate::domain::metric::Metric;
use crate::domain::query::{ChartRequest, StatsQuery};
use crate::domain::reading::StatsResponse;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[derive(Clone)]
pub struct ChartService {
    gateway: Arc<dyn StatsGateway>,
    theme: ChartTheme,
    require_points: bool,
}

impl ChartService {
    pub fn new(gateway: Arc<dyn StatsGateway>, theme: ChartTheme) -> Self {
        Self {
            gateway,
            theme,
            require_points: false,
        }
    }

    /// Fail with `EmptyInput` instead of charting a period with no entries
    pub fn require_points(mut self, require: bool) -> Self {
        self.require_points = require;
        self
    }

    pub async fn load_chart(
        &self,
        metric: Metric,
        request: &ChartRequest,
    ) -> Result<ChartConfig, ChartError> {
        let endpoint = metric.stats_endpoint(request.timeframe);
        let query = StatsQuery::new(metric, request);

        let payload = self.gateway.fetch_stats(&endpoint, &query).await?;
        let response = StatsResponse::decode(metric.kind(), payload)?;

        let series = StatsDatasetBuilder::new()
            .max_entries(request.max_entries)
            .scale(metric.scale())
            .require_points(self.require_points)
            .build(request.timeframe, &response)?;

        tracing::debug!(
            "Built {} chart for {} with {} labels and {} datasets",
            request.timeframe,
            metric,
            series.labels.len(),
            series.datasets.len()
        );

        Ok(ChartConfig::new(
            series,
            metric.unit_suffix(),
            metric.axis_label(),
            &self.theme,
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::stats_gateway::{MutationMethod, MutationResponse};
    use crate::domain::dataset::{ChartPoint, SeriesKind};
    use crate::domain::timeframe::Timeframe;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Gateway answering every call from canned values and recording requests
    #[derive(Default)]
    pub(crate) struct FakeGateway {
        pub stats: Mutex<Vec<Result<serde_json::Value, GatewayError>>>,
        pub mutation: Mutex<Option<Result<MutationResponse, GatewayError>>>,
        pub calls: Mutex<Vec<String>>,
        pub bodies: Mutex<Vec<Option<serde_json::Value>>>,
    }

    impl FakeGateway {
        pub(crate) fn with_stats(payload: serde_json::Value) -> Self {
            let gateway = Self::default();
            gateway.stats.lock().unwrap().push(Ok(payload));
            gateway
        }
    }

    #[async_trait]
    impl StatsGateway for FakeGateway {
        async fn fetch_stats(
            &self,
            endpoint: &str,
            query: &StatsQuery,
        ) -> Result<serde_json::Value, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("GET {}?{}", endpoint, query.to_query_string()));
            let mut stats = self.stats.lock().unwrap();
            if stats.len() > 1 {
                stats.remove(0)
            } else {
                stats.first().cloned().unwrap_or_else(|| Ok(json!([])))
            }
        }

        async fn submit_mutation(
            &self,
            endpoint: &str,
            method: MutationMethod,
            body: Option<serde_json::Value>,
        ) -> Result<MutationResponse, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{:?} {}", method, endpoint));
            self.bodies.lock().unwrap().push(body);
            self.mutation.lock().unwrap().clone().unwrap_or(Ok(MutationResponse {
                status: 204,
                body: None,
            }))
        }
    }

    #[tokio::test]
    async fn test_load_solar_chart_scales_and_pairs() {
        let gateway = Arc::new(FakeGateway::with_stats(json!({
            "high": [
                {"datestamp": "2024-01-01", "value": "5000"},
                {"datestamp": "2024-02-01", "value": "8000"},
            ],
            "low": [
                {"datestamp": "2024-01-01", "value": 2000},
                {"datestamp": "2024-02-01", "value": 1000},
            ],
            "average": [],
        })));
        let service = ChartService::new(gateway.clone(), ChartTheme::default());

        let request = ChartRequest {
            year: Some(2024),
            ..ChartRequest::new(Timeframe::Monthly)
        };
        let chart = service.load_chart(Metric::Solar, &request).await.unwrap();

        assert_eq!(chart.labels, vec!["Jan 2024", "Feb 2024"]);
        assert_eq!(chart.unit_suffix, "lx");
        assert_eq!(chart.axis_label, "Lux (1000s)");
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].kind, SeriesKind::Bar);
        let ChartPoint::Range(high, low) = chart.datasets[0].data[0] else {
            panic!("expected range point");
        };
        assert!((high - 5.0).abs() < 1e-9);
        assert!((low - 2.0).abs() < 1e-9);
        assert_eq!(
            gateway.calls.lock().unwrap().as_slice(),
            ["GET /api/solar?timeframe=Monthly&year=2024&month=0"]
        );
    }

    #[tokio::test]
    async fn test_load_humidity_from_range_records() {
        let gateway = Arc::new(FakeGateway::with_stats(json!([
            {"datestamp": "2024-01-01", "high": 80, "low": 40},
            {"datestamp": "2024-01-02", "high": "85.5", "low": "45"},
        ])));
        let service = ChartService::new(gateway, ChartTheme::default());

        let chart = service
            .load_chart(Metric::Humidity, &ChartRequest::new(Timeframe::Daily))
            .await
            .unwrap();

        assert_eq!(chart.labels, vec!["1st Jan 2024", "2nd Jan 2024"]);
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].label, "High/Low");
        assert_eq!(
            chart.datasets[0].data,
            vec![ChartPoint::Range(80.0, 40.0), ChartPoint::Range(85.5, 45.0)]
        );
    }

    #[tokio::test]
    async fn test_empty_period_fails_when_points_required() {
        let gateway = Arc::new(FakeGateway::default());
        let lenient = ChartService::new(gateway.clone(), ChartTheme::default());
        let strict = lenient.clone().require_points(true);
        let request = ChartRequest::new(Timeframe::Daily);

        let chart = lenient.load_chart(Metric::Rainfall, &request).await.unwrap();
        assert!(chart.labels.is_empty());

        let err = strict.load_chart(Metric::Rainfall, &request).await.unwrap_err();
        assert!(matches!(err, ChartError::Dataset(DatasetError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_load_chart_applies_cap_client_side() {
        let gateway = Arc::new(FakeGateway::with_stats(json!([
            {"datestamp": "2024-01-01", "value": 1},
            {"datestamp": "2024-01-02", "value": 2},
            {"datestamp": "2024-01-03", "value": 3},
        ])));
        let service = ChartService::new(gateway, ChartTheme::default());

        let request = ChartRequest {
            max_entries: Some(2),
            ..ChartRequest::new(Timeframe::Daily)
        };
        let chart = service.load_chart(Metric::Rainfall, &request).await.unwrap();
        assert_eq!(chart.labels, vec!["2nd Jan 2024", "3rd Jan 2024"]);
    }

    #[tokio::test]
    async fn test_shape_mismatch_surfaces() {
        let gateway = Arc::new(FakeGateway::with_stats(json!({
            "high": [
                {"datestamp": "2024-01-01", "value": 9},
                {"datestamp": "2024-01-02", "value": 9},
            ],
            "low": [{"datestamp": "2024-01-01", "value": 1}],
        })));
        let service = ChartService::new(gateway, ChartTheme::default());

        let err = service
            .load_chart(Metric::Wind, &ChartRequest::new(Timeframe::Daily))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::Dataset(DatasetError::ShapeMismatch { series: "low", .. })
        ));
    }

    #[tokio::test]
    async fn test_gateway_errors_pass_through() {
        let gateway = FakeGateway::default();
        gateway.stats.lock().unwrap().push(Err(GatewayError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            details: "database unavailable".to_string(),
        }));
        let service = ChartService::new(Arc::new(gateway), ChartTheme::default());

        let err = service
            .load_chart(Metric::UvIndex, &ChartRequest::new(Timeframe::Yearly))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "500 Internal Server Error: database unavailable");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let gateway = Arc::new(FakeGateway::with_stats(json!({"high": []})));
        let service = ChartService::new(gateway, ChartTheme::default());

        let err = service
            .load_chart(Metric::Rainfall, &ChartRequest::new(Timeframe::Daily))
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::Decode(_)));
    }
}
