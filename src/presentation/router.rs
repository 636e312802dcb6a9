// Route table
use crate::infrastructure::http_response::panic_response;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_data, charts, dashboards, health_check};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route(
            "/dashboards",
            get(dashboards::list_dashboards).post(dashboards::create_dashboard),
        )
        .route(
            "/dashboards/:id",
            get(dashboards::get_dashboard)
                .put(dashboards::update_dashboard)
                .delete(dashboards::delete_dashboard),
        )
        .route("/dashboards/:id/charts", post(dashboards::add_chart))
        .route("/dashboards/:id/charts/reorder", put(dashboards::reorder_charts))
        .route("/charts", get(charts::list_charts).post(charts::create_chart))
        .route(
            "/charts/:id",
            get(charts::get_chart)
                .put(charts::update_chart)
                .delete(charts::delete_chart),
        )
        .route("/charts/:id/content", put(charts::edit_chart_content))
        .route(
            "/chart-data",
            get(chart_data::get_chart_data)
                .post(chart_data::create_chart_data)
                .put(chart_data::upsert_chart_data),
        )
        .route("/data/:endpoint", get(chart_data::get_endpoint_data))
        .route("/api/data/:endpoint", get(chart_data::get_endpoint_data))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
