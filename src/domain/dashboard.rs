// Dashboard domain model
use super::chart::{sort_by_order, Chart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard as stored. `charts` is a denormalised list of chart ids and may lag
/// behind the charts that actually point at this dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub charts: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dashboard with its member charts resolved by `dashboardId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedDashboard {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub charts: Vec<Chart>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HydratedDashboard {
    pub fn new(dashboard: Dashboard, mut charts: Vec<Chart>) -> Self {
        sort_by_order(&mut charts);
        Self {
            id: dashboard.id,
            name: dashboard.name,
            description: dashboard.description,
            charts,
            created_at: dashboard.created_at,
            updated_at: dashboard.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Vec<String>>,
}
