// Input checks shared by the services
use crate::application::error::ServiceError;
use crate::application::store::SortOrder;
use crate::domain::chart::ChartType;
use crate::domain::chart_data::ChartPayload;
use serde_json::Value;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MIN_NEW_CHART_TITLE_LEN: usize = 3;

/// Trimmed text that must be present and non-empty.
pub fn required_text(value: Option<&str>, message: &str) -> Result<String, ServiceError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ServiceError::validation(message)),
    }
}

/// Trimmed text that may be absent, but not blank when given.
pub fn optional_text(value: Option<&str>, message: &str) -> Result<Option<String>, ServiceError> {
    value.map(|text| required_text(Some(text), message)).transpose()
}

pub fn max_len(field: &str, value: Option<&str>, max: usize) -> Result<(), ServiceError> {
    match value {
        Some(text) if text.chars().count() > max => Err(ServiceError::validation(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

pub fn chart_type(value: Option<&str>) -> Result<Option<ChartType>, ServiceError> {
    value
        .map(|kind| {
            kind.parse::<ChartType>()
                .map_err(|_| ServiceError::validation("Chart type must be bar, line, or number"))
        })
        .transpose()
}

pub fn sort_order(value: Option<&str>, default: SortOrder) -> Result<SortOrder, ServiceError> {
    match value {
        None => Ok(default),
        Some(order) => SortOrder::parse(order)
            .ok_or_else(|| ServiceError::validation("sortOrder must be asc or desc")),
    }
}

/// Parse and check a chart data payload from a request body.
pub fn payload(value: Option<Value>) -> Result<ChartPayload, ServiceError> {
    let value = match value {
        None | Some(Value::Null) => return Err(ServiceError::validation("Chart data is required")),
        Some(value) => value,
    };
    let payload = ChartPayload::from_value(value).map_err(ServiceError::Validation)?;
    payload.validate().map_err(ServiceError::Validation)?;
    Ok(payload)
}

pub fn payload_fits(kind: ChartType, payload: &ChartPayload) -> Result<(), ServiceError> {
    if payload.fits(kind) {
        return Ok(());
    }
    let message = if kind.expects_series() {
        format!("{} charts require labels and values", kind)
    } else {
        "number charts require a numeric value".to_string()
    };
    Err(ServiceError::Validation(message))
}

/// Moving between a scalar and a series chart type needs a new payload.
pub fn kind_change_without_data(current: ChartType, next: ChartType) -> Result<(), ServiceError> {
    if current.expects_series() == next.expects_series() {
        return Ok(());
    }
    Err(ServiceError::Validation(format!(
        "Changing a {} chart to {} requires new data",
        current, next
    )))
}
