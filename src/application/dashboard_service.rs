// Dashboard service - dashboard CRUD over the repository
use crate::application::error::ServiceError;
use crate::application::repository::Repository;
use crate::application::store::{ListQuery, SortOrder};
use crate::application::validation::{self, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::domain::dashboard::{Dashboard, DashboardPatch, HydratedDashboard};
use crate::domain::ids::dashboard_id;
use futures::future::try_join_all;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardListParams {
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDashboard {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub charts: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dashboards with their charts, newest first unless asked otherwise.
    pub async fn list(&self, params: DashboardListParams) -> Result<Vec<HydratedDashboard>, ServiceError> {
        let order = validation::sort_order(params.sort_order.as_deref(), SortOrder::Desc)?;
        let sort_by = params.sort_by.unwrap_or_else(|| "createdAt".to_string());
        let query = ListQuery::new()
            .search(params.q)
            .sort_by(sort_by, order)
            .paginate(params.page, params.limit);

        let dashboards = self.repository.list_dashboards(&query).await?;
        try_join_all(dashboards.into_iter().map(|dashboard| self.hydrate(dashboard))).await
    }

    pub async fn get(&self, id: &str) -> Result<HydratedDashboard, ServiceError> {
        let dashboard = self.find(id).await?;
        self.hydrate(dashboard).await
    }

    pub async fn create(&self, input: NewDashboard) -> Result<HydratedDashboard, ServiceError> {
        let name = validation::required_text(input.name.as_deref(), "Dashboard name is required")?;
        validation::max_len("Dashboard name", Some(name.as_str()), MAX_NAME_LEN)?;
        let description = input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        validation::max_len("Description", description.as_deref(), MAX_DESCRIPTION_LEN)?;

        let now = self.repository.now();
        let dashboard = Dashboard {
            id: dashboard_id(),
            name,
            description,
            charts: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.insert_dashboard(&dashboard).await?;
        tracing::info!(dashboard_id = %created.id, "dashboard created");
        Ok(HydratedDashboard::new(created, Vec::new()))
    }

    pub async fn update(&self, id: &str, changes: DashboardChanges) -> Result<HydratedDashboard, ServiceError> {
        let name = validation::optional_text(changes.name.as_deref(), "Dashboard name cannot be empty")?;
        validation::max_len("Dashboard name", name.as_deref(), MAX_NAME_LEN)?;
        let description = changes.description.map(|d| d.trim().to_string());
        validation::max_len("Description", description.as_deref(), MAX_DESCRIPTION_LEN)?;

        let patch = DashboardPatch {
            name,
            description,
            charts: changes.charts,
        };
        let updated = self
            .repository
            .patch_dashboard(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Dashboard not found"))?;
        tracing::info!(dashboard_id = id, "dashboard updated");
        self.hydrate(updated).await
    }

    /// Delete the dashboard and every chart that belongs to it. Chart data
    /// records are kept.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.find(id).await?;
        let charts = self.repository.charts_for_dashboard(id).await?;
        for chart in &charts {
            self.repository.delete_chart(&chart.id).await?;
        }
        if !self.repository.delete_dashboard(id).await? {
            return Err(ServiceError::not_found("Dashboard not found"));
        }
        tracing::info!(dashboard_id = id, charts = charts.len(), "dashboard deleted");
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Dashboard, ServiceError> {
        self.repository
            .find_dashboard(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Dashboard not found"))
    }

    async fn hydrate(&self, dashboard: Dashboard) -> Result<HydratedDashboard, ServiceError> {
        let charts = self.repository.charts_for_dashboard(&dashboard.id).await?;
        Ok(HydratedDashboard::new(dashboard, charts))
    }
}
