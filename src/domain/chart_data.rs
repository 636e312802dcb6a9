// Chart data payloads, stored apart from charts and keyed by endpoint
use super::chart::ChartType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScalarData {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Data behind a chart. On the wire the variant is recognised by its fields:
/// `labels` + `values` for a series, `value` for a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPayload {
    Series(ChartSeriesData),
    Scalar(ChartScalarData),
}

impl ChartPayload {
    pub fn from_value(value: Value) -> Result<Self, String> {
        serde_json::from_value(value).map_err(|_| {
            "Chart data must contain either labels and values, or a numeric value".to_string()
        })
    }

    pub fn is_series(&self) -> bool {
        matches!(self, Self::Series(_))
    }

    pub fn fits(&self, kind: ChartType) -> bool {
        self.is_series() == kind.expects_series()
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Series(series) if series.labels.len() != series.values.len() => Err(format!(
                "Number of labels must match number of values ({} labels, {} values)",
                series.labels.len(),
                series.values.len()
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataRecord {
    pub id: String,
    pub endpoint: String,
    pub data: ChartPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
