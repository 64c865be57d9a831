// Gateway trait for the Weatherdan backend API
use async_trait::async_trait;
use serde::Serialize;

use crate::domain::query::StatsQuery;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    #[error("{status} {status_text}: {details}")]
    Http {
        status: u16,
        status_text: String,
        details: String,
    },

    #[error("invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMethod {
    Post,
    Delete,
    Put,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationResponse {
    pub status: u16,
    /// `None` for `204`, `208` and empty bodies
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    Refreshed,
    /// Backend answered `208`: data was already current
    UpToDate,
}

#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// Fetch a stats payload, resolving with the decoded JSON on 2xx
    async fn fetch_stats(
        &self,
        endpoint: &str,
        query: &StatsQuery,
    ) -> Result<serde_json::Value, GatewayError>;

    /// Send a create/delete/refresh request
    async fn submit_mutation(
        &self,
        endpoint: &str,
        method: MutationMethod,
        body: Option<serde_json::Value>,
    ) -> Result<MutationResponse, GatewayError>;
}
