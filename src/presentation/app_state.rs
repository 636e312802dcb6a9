// Application state for HTTP handlers
use crate::application::chart_data_binding::ChartDataBinding;
use crate::application::chart_editor::ChartEditor;
use crate::application::chart_service::ChartService;
use crate::application::dashboard_service::DashboardService;
use crate::application::reorder::ChartOrderReconciler;
use crate::application::repository::Repository;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub chart_service: ChartService,
    pub reconciler: ChartOrderReconciler,
    pub chart_data: ChartDataBinding,
    pub chart_editor: ChartEditor,
}

impl AppState {
    pub fn new(repository: Repository) -> Self {
        Self {
            dashboard_service: DashboardService::new(repository.clone()),
            chart_service: ChartService::new(repository.clone()),
            reconciler: ChartOrderReconciler::new(repository.clone()),
            chart_data: ChartDataBinding::new(repository.clone()),
            chart_editor: ChartEditor::new(repository),
        }
    }
}
