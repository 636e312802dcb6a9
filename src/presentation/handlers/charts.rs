// Chart endpoints
use crate::application::chart_editor::{ChartDraft, ChartWithData};
use crate::application::chart_service::{ChartChanges, ChartListParams, NewChart};
use crate::application::error::ServiceError;
use crate::domain::chart::Chart;
use crate::infrastructure::http_response::{created, done, ok, Envelope};
use crate::presentation::app_state::AppState;
use crate::presentation::extract::{JsonBody, QueryParams};
use axum::extract::{Path, State};
use std::sync::Arc;

pub async fn list_charts(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ChartListParams>,
) -> Result<Envelope<Vec<Chart>>, ServiceError> {
    let charts = state.chart_service.list(params).await?;
    Ok(ok(charts, "Charts retrieved successfully"))
}

pub async fn create_chart(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<NewChart>,
) -> Result<Envelope<Chart>, ServiceError> {
    let chart = state.chart_service.create(input).await?;
    Ok(created(chart, "Chart created successfully"))
}

pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Envelope<Chart>, ServiceError> {
    let chart = state.chart_service.get(&id).await?;
    Ok(ok(chart, "Chart retrieved successfully"))
}

pub async fn update_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(changes): JsonBody<ChartChanges>,
) -> Result<Envelope<Chart>, ServiceError> {
    let chart = state.chart_service.update(&id, changes).await?;
    Ok(ok(chart, "Chart updated successfully"))
}

pub async fn delete_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Envelope<()>, ServiceError> {
    state.chart_service.delete(&id).await?;
    Ok(done("Chart deleted successfully"))
}

/// Edit a chart together with its data, keeping the data endpoint.
pub async fn edit_chart_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<ChartDraft>,
) -> Result<Envelope<ChartWithData>, ServiceError> {
    let chart = state.chart_editor.edit_chart(&id, draft).await?;
    Ok(ok(chart, "Chart updated successfully"))
}
