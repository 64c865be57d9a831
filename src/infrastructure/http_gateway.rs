// Weatherdan backend gateway implementation over HTTP
use crate::application::stats_gateway::{
    GatewayError, MutationMethod, MutationResponse, StatsGateway,
};
use crate::domain::query::StatsQuery;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;

const JSON_UTF8: &str = "application/json; charset=UTF-8";

#[derive(Debug, Clone)]
pub struct HttpStatsGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStatsGateway {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(ACCEPT, JSON_UTF8)
            .header(CONTENT_TYPE, JSON_UTF8)
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let response = request.send().await.map_err(|e| GatewayError::Network {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Backend {} answered {}: {}", endpoint, status, body);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                details: error_details(&body),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl StatsGateway for HttpStatsGateway {
    async fn fetch_stats(&self, endpoint: &str, query: &StatsQuery) -> Result<Value, GatewayError> {
        let url = format!("{}{}?{}", self.base_url, endpoint, query.to_query_string());
        tracing::debug!("Fetching stats: {}", url);

        let response = self.send(endpoint, self.request(Method::GET, &url)).await?;
        response.json::<Value>().await.map_err(|e| GatewayError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    async fn submit_mutation(
        &self,
        endpoint: &str,
        method: MutationMethod,
        body: Option<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let method = match method {
            MutationMethod::Post => Method::POST,
            MutationMethod::Delete => Method::DELETE,
            MutationMethod::Put => Method::PUT,
        };
        tracing::debug!("Submitting {} {}", method, url);

        let mut request = self.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = self.send(endpoint, request).await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::ALREADY_REPORTED {
            return Ok(MutationResponse {
                status: status.as_u16(),
                body: None,
            });
        }

        let text = response.text().await.map_err(|e| GatewayError::Network {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).map_err(|e| GatewayError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?)
        };

        Ok(MutationResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Pull the human-readable part out of an error body
fn error_details(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["details", "detail", "reason"]
                .iter()
                .find_map(|key| value.get(*key).cloned())
        })
        .map(|details| match details {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .unwrap_or_else(|| body.to_string())
}
