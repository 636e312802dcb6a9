// Store port - generic access to JSON record collections
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Dashboards,
    Charts,
    ChartData,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Dashboards, Self::Charts, Self::ChartData];

    /// Collection name as used in `db.json` and json-server routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboards => "dashboards",
            Self::Charts => "charts",
            Self::ChartData => "chartData",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Listing criteria, modelled on json-server query strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Field equality filters (`?field=value`).
    pub filters: Vec<(String, String)>,
    /// Case-insensitive substring search over string fields (`?q=`).
    pub search: Option<String>,
    /// `_sort` / `_order`.
    pub sort: Option<(String, SortOrder)>,
    /// 1-based page (`_page`), only meaningful with `limit`.
    pub page: Option<usize>,
    /// `_limit`.
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn search(mut self, term: Option<String>) -> Self {
        self.search = term.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    pub fn paginate(mut self, page: Option<usize>, limit: Option<usize>) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Render as json-server query parameters.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some(term) = &self.search {
            pairs.push(("q".to_string(), term.clone()));
        }
        if let Some((field, order)) = &self.sort {
            pairs.push(("_sort".to_string(), field.clone()));
            pairs.push(("_order".to_string(), order.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("_page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("_limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),
    #[error("store answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Unavailable(String),
}

/// Key-value-by-id JSON collections. Records are JSON objects carrying a
/// string `id`; `patch` is a shallow merge of top-level fields.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Value>, StoreError>;

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StoreError>;

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, StoreError>;

    /// Returns `None` when no record has this id.
    async fn patch(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError>;

    /// Returns whether a record was removed.
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError>;
}
