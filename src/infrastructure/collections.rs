// In-process collection tables shared by the memory and file stores
use crate::application::store::{Collection, ListQuery, SortOrder, StoreError};
use crate::domain::ids::generate_id;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

const DEFAULT_PAGE_LIMIT: usize = 10;

/// The `db.json` document: one array of records per collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub dashboards: Vec<Value>,
    #[serde(default)]
    pub charts: Vec<Value>,
    #[serde(default, rename = "chartData")]
    pub chart_data: Vec<Value>,
}

impl Collections {
    pub fn table(&self, collection: Collection) -> &Vec<Value> {
        match collection {
            Collection::Dashboards => &self.dashboards,
            Collection::Charts => &self.charts,
            Collection::ChartData => &self.chart_data,
        }
    }

    fn table_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Dashboards => &mut self.dashboards,
            Collection::Charts => &mut self.charts,
            Collection::ChartData => &mut self.chart_data,
        }
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.table(*c).is_empty())
    }

    pub fn list(&self, collection: Collection, query: &ListQuery) -> Vec<Value> {
        let mut records: Vec<Value> = self
            .table(collection)
            .iter()
            .filter(|record| matches_filters(record, &query.filters))
            .filter(|record| matches_search(record, query.search.as_deref()))
            .cloned()
            .collect();

        if let Some((field, order)) = &query.sort {
            records.sort_by(|a, b| {
                let ordering = compare_field(a.get(field), b.get(field));
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        paginate(records, query.page, query.limit)
    }

    pub fn get(&self, collection: Collection, id: &str) -> Option<Value> {
        self.table(collection)
            .iter()
            .find(|record| record_id(record) == Some(id))
            .cloned()
    }

    /// Insert a record, assigning an id when it has none.
    pub fn insert(&mut self, collection: Collection, record: Value) -> Result<Value, StoreError> {
        let Value::Object(mut fields) = record else {
            return Err(StoreError::Unavailable(format!(
                "{} records must be JSON objects",
                collection.as_str()
            )));
        };
        match fields.get("id").and_then(Value::as_str) {
            Some(id) if self.get(collection, id).is_some() => {
                return Err(StoreError::Unavailable(format!(
                    "duplicate id '{}' in {}",
                    id,
                    collection.as_str()
                )));
            }
            Some(_) => {}
            None => {
                fields.insert("id".to_string(), Value::String(generate_id(collection.as_str())));
            }
        }
        let record = Value::Object(fields);
        self.table_mut(collection).push(record.clone());
        Ok(record)
    }

    /// Shallow merge of `changes` into the record; `id` cannot be changed.
    pub fn patch(&mut self, collection: Collection, id: &str, changes: Value) -> Option<Value> {
        let record = self
            .table_mut(collection)
            .iter_mut()
            .find(|record| record_id(record) == Some(id))?;
        if let (Value::Object(fields), Value::Object(changes)) = (record, changes) {
            merge_fields(fields, changes);
            return Some(Value::Object(fields.clone()));
        }
        None
    }

    pub fn remove(&mut self, collection: Collection, id: &str) -> bool {
        let table = self.table_mut(collection);
        let before = table.len();
        table.retain(|record| record_id(record) != Some(id));
        table.len() != before
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn merge_fields(fields: &mut Map<String, Value>, changes: Map<String, Value>) {
    for (key, value) in changes {
        if key != "id" {
            fields.insert(key, value);
        }
    }
}

/// Filter values arrive as strings, so compare against the field's text form.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches_filters(record: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(field, expected)| {
        record
            .get(field)
            .map(|value| field_text(value) == *expected)
            .unwrap_or(false)
    })
}

fn matches_search(record: &Value, term: Option<&str>) -> bool {
    let Some(term) = term else {
        return true;
    };
    let needle = term.to_lowercase();
    match record {
        Value::Object(fields) => fields.values().any(|value| match value {
            Value::String(s) => s.to_lowercase().contains(&needle),
            _ => false,
        }),
        _ => false,
    }
}

/// Numbers compare numerically, strings lexically; missing fields sort last.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => field_text(x).cmp(&field_text(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn paginate(records: Vec<Value>, page: Option<usize>, limit: Option<usize>) -> Vec<Value> {
    let limit = match (page, limit) {
        (None, None) => return records,
        (_, Some(limit)) => limit,
        (Some(_), None) => DEFAULT_PAGE_LIMIT,
    };
    let start = page.unwrap_or(1).saturating_sub(1).saturating_mul(limit);
    records.into_iter().skip(start).take(limit).collect()
}
