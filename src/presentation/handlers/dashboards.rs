// Dashboard endpoints, including chart creation and reordering within a dashboard
use crate::application::chart_editor::{ChartDraft, ChartWithData};
use crate::application::dashboard_service::{DashboardChanges, DashboardListParams, NewDashboard};
use crate::application::error::ServiceError;
use crate::application::reorder::parse_chart_ids;
use crate::domain::chart::Chart;
use crate::domain::dashboard::HydratedDashboard;
use crate::infrastructure::http_response::{created, done, ok, Envelope};
use crate::presentation::app_state::AppState;
use crate::presentation::extract::{JsonBody, QueryParams};
use axum::extract::{Path, State};
use serde_json::Value;
use std::sync::Arc;

pub async fn list_dashboards(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<DashboardListParams>,
) -> Result<Envelope<Vec<HydratedDashboard>>, ServiceError> {
    let dashboards = state.dashboard_service.list(params).await?;
    Ok(ok(dashboards, "Dashboards retrieved successfully"))
}

pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<NewDashboard>,
) -> Result<Envelope<HydratedDashboard>, ServiceError> {
    let dashboard = state.dashboard_service.create(input).await?;
    Ok(created(dashboard, "Dashboard created successfully"))
}

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Envelope<HydratedDashboard>, ServiceError> {
    let dashboard = state.dashboard_service.get(&id).await?;
    Ok(ok(dashboard, "Dashboard retrieved successfully"))
}

pub async fn update_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(changes): JsonBody<DashboardChanges>,
) -> Result<Envelope<HydratedDashboard>, ServiceError> {
    let dashboard = state.dashboard_service.update(&id, changes).await?;
    Ok(ok(dashboard, "Dashboard updated successfully"))
}

pub async fn delete_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Envelope<()>, ServiceError> {
    state.dashboard_service.delete(&id).await?;
    Ok(done("Dashboard deleted successfully"))
}

pub async fn add_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<ChartDraft>,
) -> Result<Envelope<ChartWithData>, ServiceError> {
    let chart = state.chart_editor.create_chart(&id, draft).await?;
    Ok(created(chart, "Chart created successfully"))
}

/// Body: `{ "chartIds": [...] }`. Shape is checked here so a bad array is
/// reported before the dashboard lookup.
pub async fn reorder_charts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Envelope<Vec<Chart>>, ServiceError> {
    let chart_ids = parse_chart_ids(&body)?;
    let charts = state.reconciler.reorder(&id, &chart_ids).await?;
    Ok(ok(charts, "Charts reordered successfully"))
}
