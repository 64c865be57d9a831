// Chart configuration domain models - the document handed to the chart renderer
use serde::{Deserialize, Serialize};

use super::dataset::{ChartDataset, ChartPoint, ChartSeries, SeriesKind};

const BORDER_WIDTH: u32 = 2;

/// Colour palette for chart datasets, cycled by dataset index
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartTheme {
    #[serde(default = "default_background_colours")]
    pub background_colours: Vec<String>,
    #[serde(default = "default_border_colours")]
    pub border_colours: Vec<String>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_colours: default_background_colours(),
            border_colours: default_border_colours(),
        }
    }
}

impl ChartTheme {
    fn background(&self, index: usize) -> Option<String> {
        pick(&self.background_colours, index)
    }

    fn border(&self, index: usize) -> Option<String> {
        pick(&self.border_colours, index)
    }
}

fn pick(colours: &[String], index: usize) -> Option<String> {
    if colours.is_empty() {
        return None;
    }
    Some(colours[index % colours.len()].clone())
}

fn default_background_colours() -> Vec<String> {
    vec![
        "rgba(65,105,225,0.1)".to_string(),
        "rgba(255,65,105,0.1)".to_string(),
        "rgba(105,255,65,0.1)".to_string(),
    ]
}

fn default_border_colours() -> Vec<String> {
    vec![
        "rgba(65,105,225,1)".to_string(),
        "rgba(255,65,105,1)".to_string(),
        "rgba(105,255,65,1)".to_string(),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDataset {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub border_width: u32,
    pub border_skipped: bool,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: String,
}

impl RenderedDataset {
    fn new(index: usize, dataset: ChartDataset, theme: &ChartTheme) -> Self {
        Self {
            label: dataset.series_label,
            kind: dataset.kind,
            data: dataset.points,
            background_color: theme.background(index),
            border_color: theme.border(index),
            border_width: BORDER_WIDTH,
            border_skipped: false,
            y_axis_id: "y".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<RenderedDataset>,
    pub unit_suffix: String,
    pub axis_label: String,
    pub show_legend: bool,
}

impl ChartConfig {
    pub fn new(
        series: ChartSeries,
        unit_suffix: impl Into<String>,
        axis_label: impl Into<String>,
        theme: &ChartTheme,
    ) -> Self {
        let datasets: Vec<RenderedDataset> = series
            .datasets
            .into_iter()
            .enumerate()
            .map(|(index, dataset)| RenderedDataset::new(index, dataset, theme))
            .collect();

        Self {
            labels: series.labels,
            show_legend: datasets.len() > 1,
            datasets,
            unit_suffix: unit_suffix.into(),
            axis_label: axis_label.into(),
        }
    }
}
