//! Health Check Endpoint

/// Liveness probe. The process answering is all it reports.
pub async fn health_check() -> &'static str {
    "OK"
}
