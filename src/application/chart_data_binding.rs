// Chart data lookup and upsert by endpoint key
use crate::application::error::ServiceError;
use crate::application::repository::Repository;
use crate::domain::chart_data::{ChartDataRecord, ChartPayload};
use crate::domain::endpoint::endpoint_key;
use crate::domain::ids::chart_data_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Binds charts to their data records. Endpoints may be given as bare keys
/// (`total_revenue`) or as chart data paths (`/api/data/total_revenue`).
#[derive(Clone)]
pub struct ChartDataBinding {
    repository: Repository,
}

impl ChartDataBinding {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn resolve(&self, endpoint: &str) -> Result<ChartPayload, ServiceError> {
        Ok(self.resolve_record(endpoint).await?.data)
    }

    /// First record stored under the endpoint. Duplicates are left alone.
    pub async fn resolve_record(&self, endpoint: &str) -> Result<ChartDataRecord, ServiceError> {
        let key = endpoint_key(endpoint.trim());
        self.first_match(key).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Chart data for endpoint '{}' not found", key))
        })
    }

    /// Always inserts a new record, even if one already exists for the endpoint.
    pub async fn create(
        &self,
        endpoint: &str,
        payload: ChartPayload,
    ) -> Result<ChartDataRecord, ServiceError> {
        let key = required_key(endpoint)?;
        payload.validate().map_err(ServiceError::Validation)?;

        let now = self.repository.now();
        let record = ChartDataRecord {
            id: chart_data_id(),
            endpoint: key.to_string(),
            data: payload,
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.insert_chart_data(&record).await?;
        tracing::info!(endpoint = key, id = %created.id, "chart data created");
        Ok(created)
    }

    /// Replace the first match's data, or create a record when nothing matches.
    pub async fn upsert(
        &self,
        endpoint: &str,
        payload: ChartPayload,
    ) -> Result<(UpsertOutcome, ChartDataRecord), ServiceError> {
        let key = required_key(endpoint)?;
        payload.validate().map_err(ServiceError::Validation)?;

        if let Some(existing) = self.first_match(key).await? {
            // The record can vanish between lookup and patch; fall through to create.
            if let Some(updated) = self.repository.patch_chart_data(&existing.id, &payload).await? {
                tracing::info!(endpoint = key, id = %updated.id, "chart data updated");
                return Ok((UpsertOutcome::Updated, updated));
            }
            tracing::warn!(endpoint = key, id = %existing.id, "chart data vanished before update");
        }

        let created = self.create(key, payload).await?;
        Ok((UpsertOutcome::Created, created))
    }

    async fn first_match(&self, key: &str) -> Result<Option<ChartDataRecord>, ServiceError> {
        let mut records = self.repository.chart_data_by_endpoint(key).await?;
        if records.len() > 1 {
            tracing::warn!(endpoint = key, count = records.len(), "duplicate chart data records");
        }
        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(records.swap_remove(0)))
    }
}

fn required_key(endpoint: &str) -> Result<&str, ServiceError> {
    let key = endpoint_key(endpoint.trim());
    if key.is_empty() {
        return Err(ServiceError::validation("Endpoint is required"));
    }
    Ok(key)
}
