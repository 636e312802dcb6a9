// HTTP request handlers
pub mod chart_data;
pub mod charts;
pub mod dashboards;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}
