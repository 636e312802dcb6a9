// Chart create/edit flow: a chart and its data record are written together
use crate::application::chart_data_binding::ChartDataBinding;
use crate::application::error::ServiceError;
use crate::application::repository::Repository;
use crate::application::validation::{self, MIN_NEW_CHART_TITLE_LEN};
use crate::domain::chart::{Chart, ChartConfig, ChartPatch};
use crate::domain::chart_data::ChartDataRecord;
use crate::domain::endpoint::{data_endpoint_path, derive_endpoint, timestamped_endpoint};
use crate::domain::ids::chart_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the chart editor submits: chart fields plus the raw data payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDraft {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub config: Option<ChartConfig>,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartWithData {
    pub chart: Chart,
    pub data: Option<ChartDataRecord>,
}

#[derive(Clone)]
pub struct ChartEditor {
    repository: Repository,
    binding: ChartDataBinding,
}

impl ChartEditor {
    pub fn new(repository: Repository) -> Self {
        let binding = ChartDataBinding::new(repository.clone());
        Self { repository, binding }
    }

    /// Create a chart at the end of the dashboard. Its data endpoint is derived
    /// from the title once, here, and never changes afterwards.
    pub async fn create_chart(
        &self,
        dashboard_id: &str,
        draft: ChartDraft,
    ) -> Result<ChartWithData, ServiceError> {
        let title = validation::required_text(draft.title.as_deref(), "Chart title is required")?;
        if title.chars().count() < MIN_NEW_CHART_TITLE_LEN {
            return Err(ServiceError::Validation(format!(
                "Chart title must be at least {} characters",
                MIN_NEW_CHART_TITLE_LEN
            )));
        }
        validation::max_len("Chart title", Some(title.as_str()), validation::MAX_NAME_LEN)?;
        validation::max_len(
            "Description",
            draft.description.as_deref(),
            validation::MAX_DESCRIPTION_LEN,
        )?;
        let kind = validation::chart_type(draft.kind.as_deref())?
            .ok_or_else(|| ServiceError::validation("Chart type must be bar, line, or number"))?;
        let payload = validation::payload(draft.data)?;
        validation::payload_fits(kind, &payload)?;

        if self.repository.find_dashboard(dashboard_id).await?.is_none() {
            return Err(ServiceError::not_found("Dashboard not found"));
        }
        let order = self.repository.charts_for_dashboard(dashboard_id).await?.len() as i64;

        let now = self.repository.now();
        let key = self.unused_endpoint(&title, now.timestamp_millis()).await?;
        let record = self.binding.create(&key, payload).await?;

        let chart = Chart {
            id: chart_id(),
            dashboard_id: dashboard_id.to_string(),
            kind,
            title,
            description: trimmed(draft.description),
            data_endpoint: data_endpoint_path(&key),
            order,
            config: draft.config,
            created_at: now,
            updated_at: now,
        };
        let chart = self.repository.insert_chart(&chart).await?;
        tracing::info!(dashboard_id, chart_id = %chart.id, endpoint = %key, "chart created");

        Ok(ChartWithData {
            chart,
            data: Some(record),
        })
    }

    /// Update a chart's presentation and, when given, replace its data at the
    /// chart's existing endpoint.
    pub async fn edit_chart(
        &self,
        chart_id: &str,
        draft: ChartDraft,
    ) -> Result<ChartWithData, ServiceError> {
        let current = self
            .repository
            .find_chart(chart_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chart not found"))?;

        let title = validation::optional_text(draft.title.as_deref(), "Chart title cannot be empty")?;
        validation::max_len("Chart title", title.as_deref(), validation::MAX_NAME_LEN)?;
        validation::max_len(
            "Description",
            draft.description.as_deref(),
            validation::MAX_DESCRIPTION_LEN,
        )?;
        let kind = validation::chart_type(draft.kind.as_deref())?;
        let effective = kind.unwrap_or(current.kind);

        let payload = draft.data.map(|data| validation::payload(Some(data))).transpose()?;
        match &payload {
            Some(payload) => validation::payload_fits(effective, payload)?,
            None => validation::kind_change_without_data(current.kind, effective)?,
        }

        let data = match payload {
            Some(payload) => {
                let (outcome, record) = self.binding.upsert(current.data_key(), payload).await?;
                tracing::debug!(chart_id, ?outcome, "chart data saved");
                Some(record)
            }
            None => match self.binding.resolve_record(current.data_key()).await {
                Ok(record) => Some(record),
                Err(ServiceError::NotFound(_)) => None,
                Err(err) => return Err(err),
            },
        };

        let patch = ChartPatch {
            kind,
            title,
            description: trimmed(draft.description),
            config: draft.config,
            ..Default::default()
        };
        let chart = self
            .repository
            .patch_chart(chart_id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chart not found"))?;
        tracing::info!(chart_id, "chart edited");

        Ok(ChartWithData { chart, data })
    }

    /// Endpoint key derived from the title. A key that already holds data
    /// belongs to another chart, so it gets the timestamp suffix instead.
    async fn unused_endpoint(&self, title: &str, timestamp_ms: i64) -> Result<String, ServiceError> {
        let key = derive_endpoint(title, timestamp_ms);
        if self.repository.chart_data_by_endpoint(&key).await?.is_empty() {
            return Ok(key);
        }
        let suffixed = timestamped_endpoint(&key, timestamp_ms);
        if !self.repository.chart_data_by_endpoint(&suffixed).await?.is_empty() {
            return Err(ServiceError::Validation(format!(
                "Data endpoint '{}' is already in use",
                suffixed
            )));
        }
        tracing::debug!(taken = %key, endpoint = %suffixed, "derived endpoint already in use");
        Ok(suffixed)
    }
}

fn trimmed(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{fixed_clock, seeded_repository};
    use crate::domain::chart::ChartType;
    use crate::domain::chart_data::ChartPayload;
    use crate::infrastructure::memory_store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn draft(kind: &str, title: &str, data: Value) -> ChartDraft {
        ChartDraft {
            kind: Some(kind.to_string()),
            title: Some(title.to_string()),
            data: Some(data),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_appends_chart_with_derived_endpoint() {
        let repository = seeded_repository();
        let editor = ChartEditor::new(repository.clone());

        let created = editor
            .create_chart(
                "dashboard-1",
                draft("bar", "Q1 Sales", json!({ "labels": ["Jan"], "values": [10] })),
            )
            .await
            .unwrap();

        assert_eq!(created.chart.order, 3);
        assert_eq!(created.chart.data_endpoint, "/api/data/q1_sales");
        assert_eq!(created.data.unwrap().endpoint, "q1_sales");
        let binding = ChartDataBinding::new(repository);
        assert!(binding.resolve("q1_sales").await.unwrap().is_series());
    }

    #[tokio::test]
    async fn test_create_title_length_and_stamps() {
        let clock = fixed_clock(1_718_000_000_000);
        let now = clock.0;
        let repository = Repository::new(Arc::new(MemoryStore::seeded()), clock);
        let editor = ChartEditor::new(repository);

        let err = editor
            .create_chart("dashboard-1", draft("number", "A!", json!({ "value": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = editor
            .create_chart("dashboard-1", draft("number", "   Ü  ", json!({ "value": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let created = editor
            .create_chart("dashboard-1", draft("number", "é!!", json!({ "value": 1 })))
            .await
            .unwrap();
        assert_eq!(created.chart.data_endpoint, "/api/data/___");
        assert_eq!(created.chart.created_at, now);
        assert_eq!(created.data.unwrap().updated_at, now);
    }

    #[tokio::test]
    async fn test_create_with_taken_slug_gets_own_endpoint() {
        let repository = Repository::new(Arc::new(MemoryStore::seeded()), fixed_clock(1_718_000_000_000));
        let editor = ChartEditor::new(repository.clone());

        let created = editor
            .create_chart("dashboard-2", draft("number", "Total Revenue", json!({ "value": 1 })))
            .await
            .unwrap();

        assert_eq!(created.chart.data_endpoint, "/api/data/total_revenue_1718000000000");
        let binding = ChartDataBinding::new(repository.clone());
        match binding.resolve(created.chart.data_key()).await.unwrap() {
            ChartPayload::Scalar(scalar) => assert_eq!(scalar.value, 1.0),
            other => panic!("unexpected payload: {other:?}"),
        }
        match binding.resolve("total_revenue").await.unwrap() {
            ChartPayload::Scalar(scalar) => assert_eq!(scalar.value, 98123.0),
            other => panic!("unexpected payload: {other:?}"),
        }
        assert_eq!(repository.chart_data_by_endpoint("total_revenue").await.unwrap().len(), 1);

        // Editing the new chart must not touch the seeded record.
        editor
            .edit_chart(
                &created.chart.id,
                ChartDraft {
                    data: Some(json!({ "value": 2 })),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        match binding.resolve("total_revenue").await.unwrap() {
            ChartPayload::Scalar(scalar) => assert_eq!(scalar.value, 98123.0),
            other => panic!("unexpected payload: {other:?}"),
        }

        // Same title at the same instant: both keys are taken.
        let err = editor
            .create_chart("dashboard-2", draft("number", "Total Revenue", json!({ "value": 3 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_mismatched_payload() {
        let editor = ChartEditor::new(seeded_repository());
        let err = editor
            .create_chart("dashboard-1", draft("number", "Revenue", json!({ "labels": [], "values": [] })))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = editor
            .create_chart("missing", draft("number", "Revenue", json!({ "value": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_edit_keeps_endpoint_across_rename() {
        let repository = seeded_repository();
        let editor = ChartEditor::new(repository.clone());

        let edited = editor
            .edit_chart(
                "chart-3",
                ChartDraft {
                    title: Some("Revenue (all time)".into()),
                    data: Some(json!({ "value": 500 })),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.chart.title, "Revenue (all time)");
        assert_eq!(edited.chart.data_endpoint, "/api/data/total_revenue");
        let binding = ChartDataBinding::new(repository.clone());
        match binding.resolve("total_revenue").await.unwrap() {
            ChartPayload::Scalar(scalar) => {
                assert_eq!(scalar.value, 500.0);
                assert_eq!(scalar.label, None);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
        assert_eq!(repository.chart_data_by_endpoint("total_revenue").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_type_change_needs_matching_data() {
        let editor = ChartEditor::new(seeded_repository());

        let err = editor
            .edit_chart(
                "chart-3",
                ChartDraft {
                    kind: Some("bar".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let edited = editor
            .edit_chart(
                "chart-1",
                ChartDraft {
                    kind: Some("line".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.chart.kind, ChartType::Line);
        assert!(edited.data.is_some());
    }

    #[tokio::test]
    async fn test_edit_missing_chart() {
        let editor = ChartEditor::new(seeded_repository());
        let err = editor.edit_chart("nope", ChartDraft::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(m) if m == "Chart not found"));
    }
}
