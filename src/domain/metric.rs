// Metric catalogue - per-measurement endpoints, shapes and display units
use std::fmt;
use std::str::FromStr;

use super::reading::MeasurementKind;
use super::timeframe::Timeframe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Rainfall,
    Solar,
    UvIndex,
    Wind,
    Humidity,
    /// Older `/api/stats/*` rainfall endpoints
    LegacyStats,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Rainfall,
        Metric::Solar,
        Metric::UvIndex,
        Metric::Wind,
        Metric::Humidity,
        Metric::LegacyStats,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Metric::Rainfall => "rainfall",
            Metric::Solar => "solar",
            Metric::UvIndex => "uv-index",
            Metric::Wind => "wind",
            Metric::Humidity => "humidity",
            Metric::LegacyStats => "stats",
        }
    }

    pub fn kind(&self) -> MeasurementKind {
        match self {
            Metric::Rainfall | Metric::LegacyStats => MeasurementKind::Total,
            Metric::Solar | Metric::UvIndex | Metric::Wind => MeasurementKind::HighLow,
            Metric::Humidity => MeasurementKind::HighLowOnly,
        }
    }

    /// Endpoint for mutations (add, remove, refresh)
    pub fn endpoint(&self) -> String {
        format!("/api/{}", self.slug())
    }

    /// Endpoint for reading stats at `timeframe`
    pub fn stats_endpoint(&self, timeframe: Timeframe) -> String {
        match self {
            Metric::LegacyStats => format!(
                "/api/stats/{}",
                timeframe.as_str().to_ascii_lowercase()
            ),
            _ => self.endpoint(),
        }
    }

    /// Query parameter capping the number of returned entries
    pub fn max_entries_param(&self) -> &'static str {
        match self {
            Metric::LegacyStats => "count",
            _ => "max-entries",
        }
    }

    /// Body field naming the date of an entry
    pub fn entry_date_field(&self) -> &'static str {
        match self {
            Metric::LegacyStats => "timestamp",
            _ => "datestamp",
        }
    }

    pub fn unit_suffix(&self) -> &'static str {
        match self {
            Metric::Rainfall | Metric::LegacyStats => "mm",
            Metric::Solar => "lx",
            Metric::UvIndex => "",
            Metric::Wind => "km/h",
            Metric::Humidity => "%",
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::Rainfall => "Millimeters",
            Metric::LegacyStats => "Rainfall (mm)",
            Metric::Solar => "Lux (1000s)",
            Metric::UvIndex => "Index",
            Metric::Wind => "Kilometers per Hour",
            Metric::Humidity => "Humidity (%)",
        }
    }

    /// Display scale applied to every value before charting
    pub fn scale(&self) -> f64 {
        match self {
            Metric::Solar => 0.001,
            _ => 1.0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.slug() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}
