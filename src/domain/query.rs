// Stats query parameters sent to the backend
use super::metric::Metric;
use super::timeframe::Timeframe;

/// What a caller asks to chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRequest {
    pub timeframe: Timeframe,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub max_entries: Option<usize>,
}

impl ChartRequest {
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            year: None,
            month: None,
            max_entries: None,
        }
    }

    pub fn with_timeframe(self, timeframe: Timeframe) -> Self {
        Self { timeframe, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    params: Vec<(&'static str, String)>,
}

impl StatsQuery {
    /// `year` and `month` are always sent, `0` meaning unfiltered; the entry
    /// cap is only sent when set
    pub fn new(metric: Metric, request: &ChartRequest) -> Self {
        let mut params = vec![
            ("timeframe", request.timeframe.to_string()),
            ("year", request.year.unwrap_or(0).to_string()),
            ("month", request.month.unwrap_or(0).to_string()),
        ];
        if let Some(max_entries) = request.max_entries {
            params.push((metric.max_entries_param(), max_entries.to_string()));
        }
        Self { params }
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        let request = ChartRequest {
            timeframe: Timeframe::Monthly,
            year: Some(2024),
            month: None,
            max_entries: Some(12),
        };
        let query = StatsQuery::new(Metric::Solar, &request);
        assert_eq!(
            query.to_query_string(),
            "timeframe=Monthly&year=2024&month=0&max-entries=12"
        );
    }

    #[test]
    fn test_legacy_count_and_unset_cap() {
        let request = ChartRequest {
            max_entries: Some(28),
            ..ChartRequest::new(Timeframe::Daily)
        };
        let query = StatsQuery::new(Metric::LegacyStats, &request);
        assert_eq!(query.to_query_string(), "timeframe=Daily&year=0&month=0&count=28");

        let query = StatsQuery::new(Metric::Rainfall, &ChartRequest::new(Timeframe::Daily));
        assert_eq!(query.to_query_string(), "timeframe=Daily&year=0&month=0");
    }
}
