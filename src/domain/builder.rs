// Stats dataset builder - turns decoded stats responses into chart series
use std::ops::Range;

use chrono::NaiveDate;

use super::dataset::{ChartDataset, ChartPoint, ChartSeries, SeriesKind};
use super::reading::{HighLowSeries, RawPoint, StatsResponse};
use super::timeframe::Timeframe;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("{series} series has {actual} entries but high has {expected}")]
    ShapeMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("no entries to chart")]
    EmptyInput,
    #[error("entry {index} has no date to label it with")]
    MissingDate { index: usize },
}

/// Builds chart series from a stats response.
///
/// The builder is a pure function of its settings and the response: it never
/// re-sorts entries, and truncation keeps the most recent `max_entries`
/// using one index window shared by every parallel array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsDatasetBuilder {
    max_entries: Option<usize>,
    scale: f64,
    require_points: bool,
}

impl Default for StatsDatasetBuilder {
    fn default() -> Self {
        Self {
            max_entries: None,
            scale: 1.0,
            require_points: false,
        }
    }
}

impl StatsDatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the last `max_entries` entries; `None` or `0` keeps all
    pub fn max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.filter(|n| *n > 0);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn require_points(mut self, require: bool) -> Self {
        self.require_points = require;
        self
    }

    pub fn build(
        &self,
        timeframe: Timeframe,
        response: &StatsResponse,
    ) -> Result<ChartSeries, DatasetError> {
        let series = match response {
            StatsResponse::Total(entries) => self.build_total(timeframe, entries)?,
            StatsResponse::HighLow(series) => self.build_high_low(timeframe, series)?,
        };

        if self.require_points && series.labels.is_empty() {
            return Err(DatasetError::EmptyInput);
        }
        Ok(series)
    }

    fn build_total(
        &self,
        timeframe: Timeframe,
        entries: &[RawPoint],
    ) -> Result<ChartSeries, DatasetError> {
        let window = self.retained_window(entries.len());
        let labels = labels_for(timeframe, entries, window.clone())?;
        let points = entries[window]
            .iter()
            .map(|entry| ChartPoint::Scalar(self.scaled(entry.value)))
            .collect();

        Ok(ChartSeries::new(
            labels,
            vec![ChartDataset::new("Total", SeriesKind::Line, points)],
        ))
    }

    fn build_high_low(
        &self,
        timeframe: Timeframe,
        series: &HighLowSeries,
    ) -> Result<ChartSeries, DatasetError> {
        let expected = series.high.len();
        check_aligned("low", &series.low, expected)?;
        check_aligned("average", &series.average, expected)?;

        let window = self.retained_window(expected);
        let labels = labels_for(timeframe, &series.high, window.clone())?;
        let high = &series.high[window.clone()];

        let mut datasets = Vec::with_capacity(2);
        if series.low.is_empty() {
            let points = high
                .iter()
                .map(|h| ChartPoint::Scalar(self.scaled(h.value)))
                .collect();
            datasets.push(ChartDataset::new("High", SeriesKind::Line, points));
        } else {
            let points = high
                .iter()
                .zip(&series.low[window.clone()])
                .map(|(h, l)| ChartPoint::Range(self.scaled(h.value), self.scaled(l.value)))
                .collect();
            datasets.push(ChartDataset::new("High/Low", SeriesKind::Bar, points));
        }

        if !series.average.is_empty() {
            let points = series.average[window]
                .iter()
                .map(|a| ChartPoint::Scalar(self.scaled(a.value)))
                .collect();
            datasets.push(ChartDataset::new("Average", SeriesKind::Line, points));
        }

        Ok(ChartSeries::new(labels, datasets))
    }

    fn retained_window(&self, len: usize) -> Range<usize> {
        match self.max_entries {
            Some(n) if n < len => len - n..len,
            _ => 0..len,
        }
    }

    fn scaled(&self, value: f64) -> f64 {
        value * self.scale
    }
}

fn check_aligned(series: &'static str, points: &[RawPoint], expected: usize) -> Result<(), DatasetError> {
    if !points.is_empty() && points.len() != expected {
        return Err(DatasetError::ShapeMismatch {
            series,
            expected,
            actual: points.len(),
        });
    }
    Ok(())
}

fn labels_for(
    timeframe: Timeframe,
    entries: &[RawPoint],
    window: Range<usize>,
) -> Result<Vec<String>, DatasetError> {
    window
        .map(|index| {
            label_date(timeframe, &entries[index])
                .map(|date| timeframe.format_label(date))
                .ok_or(DatasetError::MissingDate { index })
        })
        .collect()
}

// Weeks are labelled by their first day
fn label_date(timeframe: Timeframe, entry: &RawPoint) -> Option<NaiveDate> {
    match timeframe {
        Timeframe::Weekly => entry.start_datestamp.or(entry.datestamp),
        _ => entry.datestamp.or(entry.start_datestamp),
    }
}
