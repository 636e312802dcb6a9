// Chart ordering within a dashboard
use crate::application::error::ServiceError;
use crate::application::repository::Repository;
use crate::domain::chart::{sort_by_order, Chart};
use serde_json::Value;

/// Read `chartIds` from a reorder request body.
pub fn parse_chart_ids(body: &Value) -> Result<Vec<String>, ServiceError> {
    let invalid = || ServiceError::validation("Invalid chartIds array");
    let items = body
        .get("chartIds")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

/// Give each chart its position in `ordered_ids`. Charts missing from the list
/// keep their current order, so repeated partial reorders can leave gaps or
/// even equal orders behind.
pub fn apply_order(charts: &[Chart], ordered_ids: &[String]) -> Vec<Chart> {
    charts
        .iter()
        .map(|chart| {
            let mut chart = chart.clone();
            if let Some(position) = ordered_ids.iter().position(|id| *id == chart.id) {
                chart.order = position as i64;
            }
            chart
        })
        .collect()
}

#[derive(Clone)]
pub struct ChartOrderReconciler {
    repository: Repository,
}

impl ChartOrderReconciler {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Reorder a dashboard's charts and return the full set sorted by order.
    ///
    /// Every requested id is checked against the dashboard before anything is
    /// written. All member charts are then written with one shared `updatedAt`,
    /// listed or not. If a write fails, charts already written get their old
    /// `order` and `updatedAt` back before the error is returned.
    pub async fn reorder(
        &self,
        dashboard_id: &str,
        ordered_ids: &[String],
    ) -> Result<Vec<Chart>, ServiceError> {
        tracing::debug!(dashboard_id, requested = ordered_ids.len(), "reorder requested");

        if self.repository.find_dashboard(dashboard_id).await?.is_none() {
            return Err(ServiceError::not_found("Dashboard not found"));
        }

        let current = self.repository.charts_for_dashboard(dashboard_id).await?;
        let missing: Vec<&str> = ordered_ids
            .iter()
            .filter(|id| !current.iter().any(|chart| chart.id == **id))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            tracing::warn!(dashboard_id, ?missing, "reorder references unknown charts");
            return Err(ServiceError::NotFound(format!(
                "Charts not found: {}",
                missing.join(", ")
            )));
        }

        let planned = apply_order(&current, ordered_ids);
        let stamp = self.repository.now();
        let mut written: Vec<&Chart> = Vec::with_capacity(current.len());
        let mut updated = Vec::with_capacity(current.len());

        for (previous, next) in current.iter().zip(&planned) {
            let result = self
                .repository
                .set_chart_order(&next.id, next.order, stamp)
                .await
                .and_then(|chart| {
                    chart.ok_or_else(|| {
                        ServiceError::NotFound(format!("Charts not found: {}", next.id))
                    })
                });

            match result {
                Ok(chart) => {
                    tracing::debug!(chart_id = %chart.id, from = previous.order, to = chart.order, "chart order written");
                    written.push(previous);
                    updated.push(chart);
                }
                Err(err) => {
                    tracing::error!(dashboard_id, chart_id = %next.id, error = %err, "reorder write failed, restoring");
                    self.restore(&written).await;
                    return Err(err);
                }
            }
        }

        sort_by_order(&mut updated);
        tracing::info!(dashboard_id, charts = updated.len(), "charts reordered");
        Ok(updated)
    }

    async fn restore(&self, written: &[&Chart]) {
        for chart in written.iter().rev() {
            if let Err(err) = self
                .repository
                .set_chart_order(&chart.id, chart.order, chart.updated_at)
                .await
            {
                tracing::error!(chart_id = %chart.id, error = %err, "could not restore chart order");
            }
        }
    }
}
