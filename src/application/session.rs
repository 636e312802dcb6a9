// Optimistic view of one dashboard, reconciled with the store after each change
use crate::application::error::ServiceError;
use crate::application::reorder::{apply_order, ChartOrderReconciler};
use crate::application::repository::Repository;
use crate::domain::chart::{sort_by_order, Chart};
use crate::domain::dashboard::HydratedDashboard;

#[derive(Debug)]
pub enum SyncState {
    /// Applied locally, not yet sent.
    Pending,
    /// Local state matches what the store returned.
    Committed(Vec<Chart>),
    /// The store rejected the change. The optimistic charts are still shown;
    /// `DashboardSession::revert` brings back the pre-change state.
    Failed {
        optimistic: Vec<Chart>,
        error: ServiceError,
    },
}

impl SyncState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

pub struct DashboardSession {
    repository: Repository,
    reconciler: ChartOrderReconciler,
    dashboard: HydratedDashboard,
    /// Local order differs from what the store last confirmed.
    staged: bool,
    snapshot: Option<Vec<Chart>>,
    state: SyncState,
}

impl DashboardSession {
    pub async fn open(repository: Repository, dashboard_id: &str) -> Result<Self, ServiceError> {
        let dashboard = load(&repository, dashboard_id).await?;
        let state = SyncState::Committed(dashboard.charts.clone());
        Ok(Self {
            reconciler: ChartOrderReconciler::new(repository.clone()),
            repository,
            dashboard,
            staged: false,
            snapshot: None,
            state,
        })
    }

    pub fn dashboard(&self) -> &HydratedDashboard {
        &self.dashboard
    }

    pub fn charts(&self) -> &[Chart] {
        &self.dashboard.charts
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Apply a new order locally without touching the store. The state before
    /// the first unconfirmed change is kept for `revert`.
    pub fn stage_reorder(&mut self, ordered_ids: Vec<String>) {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.dashboard.charts.clone());
        }
        let mut charts = apply_order(&self.dashboard.charts, &ordered_ids);
        sort_by_order(&mut charts);
        self.dashboard.charts = charts;
        self.staged = true;
        self.state = SyncState::Pending;
    }

    /// Send the whole local order to the store, so every staged change since
    /// the last commit is persisted at once. Nothing happens unless a change
    /// is pending. After a failure the change stays staged and `commit` can
    /// be called again.
    pub async fn commit(&mut self) -> &SyncState {
        if !self.staged {
            return &self.state;
        }

        let ordered_ids: Vec<String> = self.dashboard.charts.iter().map(|c| c.id.clone()).collect();
        let result = self.reconciler.reorder(&self.dashboard.id, &ordered_ids).await;
        match result {
            Ok(charts) => {
                if let Err(err) = self.refresh().await {
                    tracing::warn!(dashboard_id = %self.dashboard.id, error = %err, "refresh after reorder failed");
                    self.dashboard.charts = charts;
                }
                self.staged = false;
                self.snapshot = None;
                self.state = SyncState::Committed(self.dashboard.charts.clone());
            }
            Err(error) => {
                tracing::warn!(dashboard_id = %self.dashboard.id, error = %error, "reorder not persisted, keeping local order");
                self.state = SyncState::Failed {
                    optimistic: self.dashboard.charts.clone(),
                    error,
                };
            }
        }
        &self.state
    }

    pub async fn reorder(&mut self, ordered_ids: Vec<String>) -> &SyncState {
        self.stage_reorder(ordered_ids);
        self.commit().await
    }

    /// Restore the charts as they were before the unconfirmed changes.
    /// Returns false when there is nothing to revert.
    pub fn revert(&mut self) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        self.dashboard.charts = snapshot;
        self.staged = false;
        self.state = SyncState::Committed(self.dashboard.charts.clone());
        true
    }

    /// Reload the dashboard and its charts from the store.
    pub async fn refresh(&mut self) -> Result<(), ServiceError> {
        self.dashboard = load(&self.repository, &self.dashboard.id).await?;
        Ok(())
    }
}

async fn load(repository: &Repository, dashboard_id: &str) -> Result<HydratedDashboard, ServiceError> {
    let dashboard = repository
        .find_dashboard(dashboard_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Dashboard not found"))?;
    let charts = repository.charts_for_dashboard(dashboard_id).await?;
    Ok(HydratedDashboard::new(dashboard, charts))
}
