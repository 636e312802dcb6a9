// Typed repository over the collection store
use crate::application::error::ServiceError;
use crate::application::store::{Collection, CollectionStore, ListQuery, SortOrder};
use crate::domain::chart::{Chart, ChartPatch};
use crate::domain::chart_data::{ChartDataRecord, ChartPayload};
use crate::domain::dashboard::{Dashboard, DashboardPatch};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Maps domain types to store records and stamps `updatedAt` on every patch.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CollectionStore>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Repository {
    pub fn new(store: Arc<dyn CollectionStore>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    // Dashboards

    pub async fn list_dashboards(&self, query: &ListQuery) -> Result<Vec<Dashboard>, ServiceError> {
        self.list(Collection::Dashboards, query).await
    }

    pub async fn find_dashboard(&self, id: &str) -> Result<Option<Dashboard>, ServiceError> {
        self.find(Collection::Dashboards, id).await
    }

    pub async fn insert_dashboard(&self, dashboard: &Dashboard) -> Result<Dashboard, ServiceError> {
        self.insert(Collection::Dashboards, dashboard).await
    }

    pub async fn patch_dashboard(
        &self,
        id: &str,
        patch: &DashboardPatch,
    ) -> Result<Option<Dashboard>, ServiceError> {
        self.patch(Collection::Dashboards, id, serde_json::to_value(patch)?, self.now())
            .await
    }

    pub async fn delete_dashboard(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.store.delete(Collection::Dashboards, id).await?)
    }

    // Charts

    pub async fn list_charts(&self, query: &ListQuery) -> Result<Vec<Chart>, ServiceError> {
        self.list(Collection::Charts, query).await
    }

    /// Every chart whose `dashboardId` points at the dashboard, ascending by order.
    pub async fn charts_for_dashboard(&self, dashboard_id: &str) -> Result<Vec<Chart>, ServiceError> {
        let query = ListQuery::new()
            .filter("dashboardId", dashboard_id)
            .sort_by("order", SortOrder::Asc);
        self.list_charts(&query).await
    }

    pub async fn find_chart(&self, id: &str) -> Result<Option<Chart>, ServiceError> {
        self.find(Collection::Charts, id).await
    }

    pub async fn insert_chart(&self, chart: &Chart) -> Result<Chart, ServiceError> {
        self.insert(Collection::Charts, chart).await
    }

    pub async fn patch_chart(&self, id: &str, patch: &ChartPatch) -> Result<Option<Chart>, ServiceError> {
        self.patch(Collection::Charts, id, serde_json::to_value(patch)?, self.now())
            .await
    }

    /// Write a chart's position with an explicit `updatedAt`, used both to apply
    /// a reorder and to restore the previous values after a failed one.
    pub async fn set_chart_order(
        &self,
        id: &str,
        order: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Chart>, ServiceError> {
        self.patch(Collection::Charts, id, json!({ "order": order }), updated_at)
            .await
    }

    pub async fn delete_chart(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.store.delete(Collection::Charts, id).await?)
    }

    // Chart data

    /// All records stored under `endpoint`, in store order.
    pub async fn chart_data_by_endpoint(
        &self,
        endpoint: &str,
    ) -> Result<Vec<ChartDataRecord>, ServiceError> {
        let query = ListQuery::new().filter("endpoint", endpoint);
        self.list(Collection::ChartData, &query).await
    }

    pub async fn insert_chart_data(&self, record: &ChartDataRecord) -> Result<ChartDataRecord, ServiceError> {
        self.insert(Collection::ChartData, record).await
    }

    /// Replace the record's `data` wholesale; nested fields are not merged.
    pub async fn patch_chart_data(
        &self,
        id: &str,
        payload: &ChartPayload,
    ) -> Result<Option<ChartDataRecord>, ServiceError> {
        let changes = json!({ "data": payload });
        self.patch(Collection::ChartData, id, changes, self.now()).await
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<T>, ServiceError> {
        let records = self.store.list(collection, query).await?;
        records
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(ServiceError::from))
            .collect()
    }

    async fn find<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<T>, ServiceError> {
        match self.store.get(collection, id).await? {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }

    async fn insert<T: Serialize + DeserializeOwned>(
        &self,
        collection: Collection,
        item: &T,
    ) -> Result<T, ServiceError> {
        let created = self
            .store
            .create(collection, serde_json::to_value(item)?)
            .await?;
        Ok(serde_json::from_value(created)?)
    }

    async fn patch<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        mut changes: Value,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<T>, ServiceError> {
        if let Value::Object(fields) = &mut changes {
            fields.insert("updatedAt".to_string(), serde_json::to_value(updated_at)?);
        }
        match self.store.patch(collection, id, changes).await? {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }
}
