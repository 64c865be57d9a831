// HTTP error responses
use crate::application::chart_service::ChartError;
use crate::application::entry_service::EntryError;
use crate::application::stats_gateway::GatewayError;
use crate::domain::metric::UnknownMetric;
use crate::domain::timeframe::UnknownTimeframe;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error body shown to the user: status, reason phrase and details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub status_text: String,
    pub details: String,
}

impl ApiError {
    pub fn new(status: StatusCode, details: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            details: details.into(),
        }
    }
}

fn serialize_status<S: serde::Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Http {
                status,
                status_text,
                details,
            } => Self {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                status_text,
                details,
            },
            other => Self::new(StatusCode::BAD_GATEWAY, other.to_string()),
        }
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::Gateway(e) => e.into(),
            other => Self::new(StatusCode::UNPROCESSABLE_ENTITY, other.to_string()),
        }
    }
}

impl From<EntryError> for ApiError {
    fn from(err: EntryError) -> Self {
        match err {
            EntryError::Gateway(e) => e.into(),
            other => Self::new(StatusCode::UNPROCESSABLE_ENTITY, other.to_string()),
        }
    }
}

impl From<UnknownMetric> for ApiError {
    fn from(err: UnknownMetric) -> Self {
        Self::new(StatusCode::NOT_FOUND, err.to_string())
    }
}

impl From<UnknownTimeframe> for ApiError {
    fn from(err: UnknownTimeframe) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::DatasetError;

    #[test]
    fn test_upstream_status_passes_through() {
        let err: ApiError = GatewayError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            details: "Reading doesn't exist".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.details, "Reading doesn't exist");
    }

    #[test]
    fn test_network_and_shape_errors() {
        let err: ApiError = GatewayError::Network {
            endpoint: "/api/wind".to_string(),
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);

        let err: ApiError = ChartError::Dataset(DatasetError::EmptyInput).into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({
                "status": 422,
                "status_text": "Unprocessable Entity",
                "details": "no entries to chart",
            })
        );
    }
}
