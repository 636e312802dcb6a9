// Chart data endpoints
use crate::application::chart_data_binding::UpsertOutcome;
use crate::application::error::ServiceError;
use crate::application::validation;
use crate::domain::chart_data::{ChartDataRecord, ChartPayload};
use crate::infrastructure::http_response::{created, ok, Envelope};
use crate::presentation::app_state::AppState;
use crate::presentation::extract::{JsonBody, QueryParams};
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct EndpointQuery {
    pub endpoint: Option<String>,
}

#[derive(Deserialize)]
pub struct ChartDataInput {
    pub endpoint: Option<String>,
    pub data: Option<Value>,
}

impl ChartDataInput {
    fn into_parts(self) -> Result<(String, ChartPayload), ServiceError> {
        let endpoint = validation::required_text(self.endpoint.as_deref(), "Endpoint is required")?;
        let payload = validation::payload(self.data)?;
        Ok((endpoint, payload))
    }
}

pub async fn get_chart_data(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<EndpointQuery>,
) -> Result<Envelope<ChartPayload>, ServiceError> {
    let endpoint = validation::required_text(query.endpoint.as_deref(), "Endpoint parameter is required")?;
    let data = state.chart_data.resolve(&endpoint).await?;
    Ok(ok(data, "Chart data retrieved successfully"))
}

/// Always creates a record, even when the endpoint already has one.
pub async fn create_chart_data(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ChartDataInput>,
) -> Result<Envelope<ChartDataRecord>, ServiceError> {
    let (endpoint, payload) = input.into_parts()?;
    let record = state.chart_data.create(&endpoint, payload).await?;
    Ok(created(record, "Chart data created successfully"))
}

pub async fn upsert_chart_data(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ChartDataInput>,
) -> Result<Envelope<ChartDataRecord>, ServiceError> {
    let (endpoint, payload) = input.into_parts()?;
    let (outcome, record) = state.chart_data.upsert(&endpoint, payload).await?;
    Ok(match outcome {
        UpsertOutcome::Updated => ok(record, "Chart data updated successfully"),
        UpsertOutcome::Created => created(record, "Chart data created successfully"),
    })
}

/// Data behind a chart's `dataEndpoint`.
pub async fn get_endpoint_data(
    State(state): State<Arc<AppState>>,
    Path(endpoint): Path<String>,
) -> Result<Envelope<ChartPayload>, ServiceError> {
    let data = state.chart_data.resolve(&endpoint).await?;
    Ok(ok(data, "Chart data retrieved successfully"))
}
