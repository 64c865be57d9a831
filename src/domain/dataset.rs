// Chart dataset domain models
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Scalar(f64),
    /// High and low of one period, drawn as a floating bar
    Range(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub series_label: String,
    pub kind: SeriesKind,
    pub points: Vec<ChartPoint>,
}

impl ChartDataset {
    pub fn new(series_label: impl Into<String>, kind: SeriesKind, points: Vec<ChartPoint>) -> Self {
        Self {
            series_label: series_label.into(),
            kind,
            points,
        }
    }
}

/// Labels shared by every dataset on one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartSeries {
    pub fn new(labels: Vec<String>, datasets: Vec<ChartDataset>) -> Self {
        Self { labels, datasets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_serialization() {
        let points = vec![ChartPoint::Scalar(1.5), ChartPoint::Range(9.0, 3.0)];
        assert_eq!(serde_json::to_string(&points).unwrap(), "[1.5,[9.0,3.0]]");
        assert_eq!(serde_json::to_string(&SeriesKind::Bar).unwrap(), "\"bar\"");
    }
}
