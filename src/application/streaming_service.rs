// Streaming dashboard service - Progressive loading of every timeframe of a metric
use crate::application::chart_service::ChartService;
use crate::domain::dashboard::DashboardMessage;
use crate::domain::metric::Metric;
use crate::domain::query::ChartRequest;
use crate::domain::timeframe::Timeframe;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct StreamingDashboardService {
    chart_service: ChartService,
}

impl StreamingDashboardService {
    pub fn new(chart_service: ChartService) -> Self {
        Self { chart_service }
    }

    /// Stream a skeleton, then one message per timeframe as its chart loads,
    /// then a completion event. `request.timeframe` is ignored.
    pub async fn stream_dashboard(
        &self,
        metric: Metric,
        request: ChartRequest,
    ) -> mpsc::Receiver<DashboardMessage> {
        let (tx, rx) = mpsc::channel(16);
        let start_time = Instant::now();

        // 1. Skeleton first so the page can lay out every chart
        let skeleton = DashboardMessage::Skeleton {
            metric: metric.slug().to_string(),
            timeframes: Timeframe::ALL.to_vec(),
            unit_suffix: metric.unit_suffix().to_string(),
            axis_label: metric.axis_label().to_string(),
        };
        let _ = tx.send(skeleton).await;

        // 2. One task, and one backend call, per timeframe
        let mut handles = Vec::with_capacity(Timeframe::ALL.len());
        for timeframe in Timeframe::ALL {
            let tx = tx.clone();
            let service = self.chart_service.clone();
            let request = request.with_timeframe(timeframe);

            handles.push(tokio::spawn(async move {
                let (msg, loaded) = match service.load_chart(metric, &request).await {
                    Ok(chart) => (DashboardMessage::Chart { timeframe, chart }, true),
                    Err(e) => {
                        tracing::warn!("Failed to load {} chart for {}: {}", timeframe, metric, e);
                        (
                            DashboardMessage::ChartFailed {
                                timeframe,
                                reason: e.to_string(),
                            },
                            false,
                        )
                    }
                };
                let _ = tx.send(msg).await;
                loaded
            }));
        }

        // 3. Completion once every chart task has ended
        tokio::spawn(async move {
            let charts = futures::future::join_all(handles)
                .await
                .into_iter()
                .filter(|result| matches!(result, Ok(true)))
                .count();

            let duration_ms = start_time.elapsed().as_millis() as u64;
            tracing::debug!("Dashboard for {} loaded {} charts in {}ms", metric, charts, duration_ms);
            let _ = tx.send(DashboardMessage::Complete { charts, duration_ms }).await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::tests::FakeGateway;
    use crate::application::stats_gateway::GatewayError;
    use crate::domain::chart::ChartTheme;
    use serde_json::json;
    use std::sync::Arc;

    async fn collect(mut rx: mpsc::Receiver<DashboardMessage>) -> Vec<DashboardMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn test_stream_loads_every_timeframe() {
        let gateway = Arc::new(FakeGateway::with_stats(json!([
            {"datestamp": "2024-01-01", "start_datestamp": "2024-01-01", "value": 2},
        ])));
        let service = StreamingDashboardService::new(ChartService::new(
            gateway.clone(),
            ChartTheme::default(),
        ));

        let messages = collect(
            service
                .stream_dashboard(Metric::Rainfall, ChartRequest::new(Timeframe::Daily))
                .await,
        )
        .await;

        assert_eq!(messages.len(), 6);
        assert!(matches!(messages[0], DashboardMessage::Skeleton { .. }));
        let charts = messages
            .iter()
            .filter(|m| matches!(m, DashboardMessage::Chart { .. }))
            .count();
        assert_eq!(charts, 4);
        assert!(matches!(
            messages.last(),
            Some(DashboardMessage::Complete { charts: 4, .. })
        ));
        assert_eq!(gateway.calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_timeframes_are_reported() {
        let gateway = FakeGateway::default();
        gateway.stats.lock().unwrap().push(Err(GatewayError::Network {
            endpoint: "/api/wind".to_string(),
            message: "connection refused".to_string(),
        }));
        let service = StreamingDashboardService::new(ChartService::new(
            Arc::new(gateway),
            ChartTheme::default(),
        ));

        let messages = collect(
            service
                .stream_dashboard(Metric::Wind, ChartRequest::new(Timeframe::Daily))
                .await,
        )
        .await;

        let failed = messages
            .iter()
            .filter(|m| matches!(m, DashboardMessage::ChartFailed { .. }))
            .count();
        assert_eq!(failed, 4);
        assert!(matches!(
            messages.last(),
            Some(DashboardMessage::Complete { charts: 0, .. })
        ));
    }
}
