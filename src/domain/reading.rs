// Raw reading domain models - decoded shapes of backend stats responses
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Shape of a metric's historical record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    /// One value per period
    Total,
    /// High/low per period, optionally with an average series
    HighLow,
    /// One record per period carrying both high and low, no average
    HighLowOnly,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPoint {
    #[serde(alias = "timestamp")]
    pub datestamp: Option<NaiveDate>,
    #[serde(alias = "start_timestamp")]
    pub start_datestamp: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub value: f64,
}

/// A period's high and low in one record, as range metrics are stored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangePoint {
    #[serde(alias = "timestamp")]
    pub datestamp: Option<NaiveDate>,
    #[serde(alias = "start_timestamp")]
    pub start_datestamp: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub high: f64,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub low: f64,
}

impl RangePoint {
    fn split(self) -> (RawPoint, RawPoint) {
        let point = |value| RawPoint {
            datestamp: self.datestamp,
            start_datestamp: self.start_datestamp,
            value,
        };
        (point(self.high), point(self.low))
    }
}

/// The reading carried by a new entry: a single value, or a high/low pair
/// for range metrics
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntryReading {
    Range { high: f64, low: f64 },
    Value { value: f64 },
}

impl EntryReading {
    pub fn fits(&self, kind: MeasurementKind) -> bool {
        matches!(
            (self, kind),
            (EntryReading::Range { .. }, MeasurementKind::HighLowOnly)
                | (EntryReading::Value { .. }, MeasurementKind::Total | MeasurementKind::HighLow)
        )
    }
}

#[cfg(test)]
impl RawPoint {
    pub fn new(datestamp: NaiveDate, value: f64) -> Self {
        Self {
            datestamp: Some(datestamp),
            start_datestamp: None,
            value,
        }
    }

    pub fn week(start: NaiveDate, value: f64) -> Self {
        Self {
            datestamp: None,
            start_datestamp: Some(start),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HighLowSeries {
    #[serde(default)]
    pub high: Vec<RawPoint>,
    #[serde(default)]
    pub low: Vec<RawPoint>,
    #[serde(default)]
    pub average: Vec<RawPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatsResponse {
    Total(Vec<RawPoint>),
    HighLow(HighLowSeries),
}

impl StatsResponse {
    /// Decode a backend payload into the shape `kind` expects
    pub fn decode(kind: MeasurementKind, payload: serde_json::Value) -> serde_json::Result<Self> {
        match kind {
            MeasurementKind::Total => Ok(Self::Total(serde_json::from_value(payload)?)),
            MeasurementKind::HighLow => Ok(Self::HighLow(serde_json::from_value(payload)?)),
            MeasurementKind::HighLowOnly => {
                let records: Vec<RangePoint> = serde_json::from_value(payload)?;
                let (high, low) = records.into_iter().map(RangePoint::split).unzip();
                Ok(Self::HighLow(HighLowSeries {
                    high,
                    low,
                    average: Vec::new(),
                }))
            }
        }
    }
}

// Backend decimals arrive either as JSON numbers or as numeric strings
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Decimal::deserialize(deserializer)? {
        Decimal::Number(n) => Ok(n),
        Decimal::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
