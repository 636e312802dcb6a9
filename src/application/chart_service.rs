// Chart service - chart CRUD over the repository
use crate::application::error::ServiceError;
use crate::application::repository::Repository;
use crate::application::store::{ListQuery, SortOrder};
use crate::application::validation::{self, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::domain::chart::{Chart, ChartConfig, ChartPatch};
use crate::domain::ids::chart_id;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartListParams {
    pub dashboard_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChart {
    pub dashboard_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub data_endpoint: Option<String>,
    pub order: Option<i64>,
    pub config: Option<ChartConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartChanges {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub data_endpoint: Option<String>,
    pub order: Option<i64>,
    pub config: Option<ChartConfig>,
}

#[derive(Clone)]
pub struct ChartService {
    repository: Repository,
}

impl ChartService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, params: ChartListParams) -> Result<Vec<Chart>, ServiceError> {
        let order = validation::sort_order(params.sort_order.as_deref(), SortOrder::Asc)?;
        let mut query = ListQuery::new()
            .search(params.search)
            .sort_by(params.sort_by.unwrap_or_else(|| "order".to_string()), order)
            .paginate(params.page, params.limit);
        if let Some(dashboard_id) = params.dashboard_id {
            query = query.filter("dashboardId", dashboard_id);
        }
        if let Some(kind) = validation::chart_type(params.kind.as_deref())? {
            query = query.filter("type", kind.as_str());
        }
        self.repository.list_charts(&query).await
    }

    pub async fn get(&self, id: &str) -> Result<Chart, ServiceError> {
        self.repository
            .find_chart(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chart not found"))
    }

    pub async fn create(&self, input: NewChart) -> Result<Chart, ServiceError> {
        let title = validation::required_text(input.title.as_deref(), "Chart title is required")?;
        validation::max_len("Chart title", Some(title.as_str()), MAX_NAME_LEN)?;
        let dashboard_id =
            validation::required_text(input.dashboard_id.as_deref(), "Dashboard ID is required")?;
        let kind = validation::chart_type(input.kind.as_deref())?
            .ok_or_else(|| ServiceError::validation("Chart type must be bar, line, or number"))?;
        let data_endpoint =
            validation::required_text(input.data_endpoint.as_deref(), "Data endpoint is required")?;
        validation::max_len("Description", input.description.as_deref(), MAX_DESCRIPTION_LEN)?;

        if self.repository.find_dashboard(&dashboard_id).await?.is_none() {
            return Err(ServiceError::not_found("Dashboard not found"));
        }
        let order = match input.order {
            Some(order) => order,
            None => self.repository.charts_for_dashboard(&dashboard_id).await?.len() as i64,
        };

        let now = self.repository.now();
        let chart = Chart {
            id: chart_id(),
            dashboard_id,
            kind,
            title,
            description: input.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            data_endpoint,
            order,
            config: input.config,
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.insert_chart(&chart).await?;
        tracing::info!(chart_id = %created.id, dashboard_id = %created.dashboard_id, "chart created");
        Ok(created)
    }

    /// Partial update. The data endpoint is fixed once a chart exists; sending
    /// the same value again is accepted.
    pub async fn update(&self, id: &str, changes: ChartChanges) -> Result<Chart, ServiceError> {
        let current = self.get(id).await?;

        let title = validation::optional_text(changes.title.as_deref(), "Chart title cannot be empty")?;
        validation::max_len("Chart title", title.as_deref(), MAX_NAME_LEN)?;
        validation::max_len("Description", changes.description.as_deref(), MAX_DESCRIPTION_LEN)?;
        let kind = validation::chart_type(changes.kind.as_deref())?;
        if let Some(kind) = kind {
            validation::kind_change_without_data(current.kind, kind)?;
        }
        if let Some(endpoint) = changes.data_endpoint.as_deref() {
            if endpoint.trim() != current.data_endpoint {
                return Err(ServiceError::validation("Data endpoint cannot be changed"));
            }
        }

        let patch = ChartPatch {
            kind,
            title,
            description: changes.description.map(|d| d.trim().to_string()),
            data_endpoint: None,
            order: changes.order,
            config: changes.config,
        };
        let updated = self
            .repository
            .patch_chart(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chart not found"))?;
        tracing::info!(chart_id = id, "chart updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.repository.delete_chart(id).await? {
            return Err(ServiceError::not_found("Chart not found"));
        }
        tracing::info!(chart_id = id, "chart deleted");
        Ok(())
    }
}
