// Data endpoint keys and the chart-facing data path

/// Prefix under which charts reference their data.
pub const DATA_PATH_PREFIX: &str = "/api/data/";

/// Slugs shorter than this get a timestamp suffix.
const MIN_SLUG_LEN: usize = 3;

/// Lower-case `title` and replace every character outside `[a-z0-9]` with `_`.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Derive the data endpoint key for a new chart.
///
/// Only called when a chart is created; the key then stays fixed for the
/// chart's lifetime, whatever later happens to its title.
pub fn derive_endpoint(title: &str, timestamp_ms: i64) -> String {
    let slug = slugify(title);
    if slug.len() < MIN_SLUG_LEN {
        format!("chart_{}_{}", slug, timestamp_ms)
    } else {
        slug
    }
}

/// Suffix a taken key with the creation timestamp.
pub fn timestamped_endpoint(key: &str, timestamp_ms: i64) -> String {
    format!("{}_{}", key, timestamp_ms)
}

/// Strip the data path prefix, if any, leaving the bare key.
pub fn endpoint_key(endpoint: &str) -> &str {
    endpoint.strip_prefix(DATA_PATH_PREFIX).unwrap_or(endpoint)
}

pub fn data_endpoint_path(key: &str) -> String {
    format!("{}{}", DATA_PATH_PREFIX, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_endpoint() {
        assert_eq!(derive_endpoint("Q1 Sales", 1), "q1_sales");
        assert_eq!(derive_endpoint("Total Revenue ($)", 1), "total_revenue____");
        assert_eq!(derive_endpoint("A", 1718000000000), "chart_a_1718000000000");
        assert_eq!(derive_endpoint("", 42), "chart__42");
    }

    #[test]
    fn test_derive_endpoint_is_deterministic() {
        assert_eq!(derive_endpoint("Orders", 1), derive_endpoint("Orders", 2));
        assert_eq!(derive_endpoint("ab", 7), derive_endpoint("ab", 7));
        assert_ne!(derive_endpoint("ab", 7), derive_endpoint("ab", 8));
    }

    #[test]
    fn test_three_char_slug_skips_suffix() {
        assert_eq!(derive_endpoint("KPI", 99), "kpi");
        assert_eq!(derive_endpoint("é!", 5), "chart____5");
    }

    #[test]
    fn test_endpoint_key() {
        assert_eq!(endpoint_key("/api/data/total_revenue"), "total_revenue");
        assert_eq!(endpoint_key("total_revenue"), "total_revenue");
        assert_eq!(data_endpoint_path("q1_sales"), "/api/data/q1_sales");
        assert_eq!(timestamped_endpoint("total_revenue", 7), "total_revenue_7");
    }
}
