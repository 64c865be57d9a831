// Newline-delimited JSON streaming utilities
use crate::domain::dashboard::DashboardMessage;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::mpsc;

/// Create a chunked response writing one JSON document per line
pub fn ndjson_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = DashboardMessage> + Send + 'static,
{
    let body = Body::from_stream(stream.map(serialize_line));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn serialize_line(msg: DashboardMessage) -> Result<Bytes, serde_json::Error> {
    let payload = serde_json::to_vec(&msg)?;

    let mut chunk = BytesMut::with_capacity(payload.len() + 1);
    chunk.put_slice(&payload);
    chunk.put_u8(b'\n');

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub fn stream_from_receiver(mut rx: mpsc::Receiver<DashboardMessage>) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match ndjson_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_messages_become_lines() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(DashboardMessage::Complete {
            charts: 4,
            duration_ms: 12,
        })
        .await
        .unwrap();
        drop(tx);

        let response = stream_from_receiver(rx).into_response();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/x-ndjson");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            "{\"type\":\"complete\",\"charts\":4,\"duration_ms\":12}\n"
        );
    }
}
