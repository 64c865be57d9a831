// Dashboard domain model - progressive loading of every timeframe of a metric
use serde::Serialize;

use super::chart::ChartConfig;
use super::timeframe::Timeframe;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardMessage {
    Skeleton {
        metric: String,
        timeframes: Vec<Timeframe>,
        unit_suffix: String,
        axis_label: String,
    },
    Chart {
        timeframe: Timeframe,
        chart: ChartConfig,
    },
    ChartFailed {
        timeframe: Timeframe,
        reason: String,
    },
    Complete {
        charts: usize,
        duration_ms: u64,
    },
}
