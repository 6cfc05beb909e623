// src/middleware/request_log.rs

use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Abre um span por requisição com um request id, e loga status e latência.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let started = Instant::now();
        let response = next.run(request).await;
        let elapsed_ms = elapsed_millis(started.elapsed());

        if response.status().is_server_error() {
            tracing::warn!(status = response.status().as_u16(), elapsed_ms, "requisição falhou");
        } else {
            tracing::info!(status = response.status().as_u16(), elapsed_ms, "requisição concluída");
        }
        response
    }
    .instrument(span)
    .await
}

// Milissegundos para o campo do log, sem truncar em silêncio
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_millis_saturates() {
        assert_eq!(elapsed_millis(Duration::from_millis(1_250)), 1_250);
        assert_eq!(elapsed_millis(Duration::MAX), u64::MAX);
    }
}
