// Sample dashboards, charts and chart data
use crate::infrastructure::collections::Collections;
use serde_json::{json, Value};

struct SeedChart {
    id: &'static str,
    dashboard_id: &'static str,
    kind: &'static str,
    title: &'static str,
    description: &'static str,
    endpoint: &'static str,
    order: i64,
    colors: &'static [&'static str],
}

const CHARTS: &[SeedChart] = &[
    SeedChart { id: "chart-1", dashboard_id: "dashboard-1", kind: "bar", title: "Signups by Region", description: "User signups broken down by geographic region", endpoint: "signups_by_region", order: 0, colors: &["#3B82F6", "#10B981", "#F59E0B"] },
    SeedChart { id: "chart-2", dashboard_id: "dashboard-1", kind: "line", title: "Orders Over Time", description: "Daily order volume trends", endpoint: "orders_over_time", order: 1, colors: &["#8B5CF6"] },
    SeedChart { id: "chart-3", dashboard_id: "dashboard-1", kind: "number", title: "Total Revenue", description: "Current total revenue", endpoint: "total_revenue", order: 2, colors: &["#10B981"] },
    SeedChart { id: "chart-4", dashboard_id: "dashboard-2", kind: "bar", title: "Sales by Product", description: "Sales performance by product category", endpoint: "sales_by_product", order: 0, colors: &["#EF4444", "#F97316", "#EAB308"] },
    SeedChart { id: "chart-5", dashboard_id: "dashboard-2", kind: "line", title: "Monthly Growth", description: "Month-over-month growth rate", endpoint: "monthly_growth", order: 1, colors: &["#06B6D4"] },
    SeedChart { id: "chart-6", dashboard_id: "dashboard-3", kind: "bar", title: "Page Views by Device", description: "Page views broken down by device type", endpoint: "page_views_by_device", order: 0, colors: &["#6366F1", "#8B5CF6", "#EC4899"] },
    SeedChart { id: "chart-7", dashboard_id: "dashboard-3", kind: "line", title: "Session Duration", description: "Average session duration over time", endpoint: "session_duration", order: 1, colors: &["#F59E0B"] },
    SeedChart { id: "chart-8", dashboard_id: "dashboard-3", kind: "number", title: "Active Users", description: "Current number of active users", endpoint: "active_users", order: 2, colors: &["#10B981"] },
];

fn dashboards() -> Vec<Value> {
    let rows = [
        ("dashboard-1", "Marketing KPIs", "Key performance indicators for marketing campaigns", "2024-01-15T10:00:00Z", "2024-01-20T14:30:00Z"),
        ("dashboard-2", "Sales Analytics", "Sales performance and revenue tracking", "2024-01-10T09:00:00Z", "2024-01-18T16:45:00Z"),
        ("dashboard-3", "User Engagement", "User behavior and engagement metrics", "2024-01-12T11:30:00Z", "2024-01-19T13:20:00Z"),
    ];
    rows.iter()
        .map(|(id, name, description, created_at, updated_at)| {
            let charts: Vec<&str> = CHARTS
                .iter()
                .filter(|chart| chart.dashboard_id == *id)
                .map(|chart| chart.id)
                .collect();
            json!({
                "id": id,
                "name": name,
                "description": description,
                "charts": charts,
                "createdAt": created_at,
                "updatedAt": updated_at,
            })
        })
        .collect()
}

fn charts() -> Vec<Value> {
    CHARTS
        .iter()
        .map(|chart| {
            let (created_at, updated_at) = dashboard_stamps(chart.dashboard_id);
            let mut config = json!({ "colors": chart.colors });
            if chart.kind != "number" {
                config["showLegend"] = json!(chart.kind == "bar");
                config["showGrid"] = json!(true);
                config["animate"] = json!(true);
            }
            json!({
                "id": chart.id,
                "dashboardId": chart.dashboard_id,
                "type": chart.kind,
                "title": chart.title,
                "description": chart.description,
                "dataEndpoint": format!("/api/data/{}", chart.endpoint),
                "order": chart.order,
                "config": config,
                "createdAt": created_at,
                "updatedAt": updated_at,
            })
        })
        .collect()
}

fn dashboard_stamps(dashboard_id: &str) -> (&'static str, &'static str) {
    match dashboard_id {
        "dashboard-1" => ("2024-01-15T10:00:00Z", "2024-01-20T14:30:00Z"),
        "dashboard-2" => ("2024-01-10T09:00:00Z", "2024-01-18T16:45:00Z"),
        _ => ("2024-01-12T11:30:00Z", "2024-01-19T13:20:00Z"),
    }
}

fn chart_data() -> Vec<Value> {
    let payloads = [
        ("signups_by_region", json!({ "labels": ["North America", "Europe", "Asia", "South America", "Africa"], "values": [120, 95, 180, 65, 45] })),
        ("orders_over_time", json!({ "labels": ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05", "2024-01-06", "2024-01-07", "2024-01-08", "2024-01-09", "2024-01-10"], "values": [32, 45, 41, 58, 67, 72, 68, 75, 82, 89] })),
        ("total_revenue", json!({ "value": 98123, "label": "Total Revenue", "unit": "USD" })),
        ("sales_by_product", json!({ "labels": ["Electronics", "Clothing", "Books", "Home & Garden", "Sports"], "values": [45000, 32000, 18000, 25000, 15000] })),
        ("monthly_growth", json!({ "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun"], "values": [12, 15, 18, 22, 25, 28] })),
        ("page_views_by_device", json!({ "labels": ["Desktop", "Mobile", "Tablet"], "values": [45000, 68000, 12000] })),
        ("session_duration", json!({ "labels": ["00:00", "04:00", "08:00", "12:00", "16:00", "20:00"], "values": [120, 180, 240, 300, 280, 200] })),
        ("active_users", json!({ "value": 15420, "label": "Active Users", "unit": "users" })),
    ];
    payloads
        .into_iter()
        .enumerate()
        .map(|(index, (endpoint, data))| {
            json!({
                "id": format!("chart-data-{}", index + 1),
                "endpoint": endpoint,
                "data": data,
                "createdAt": "2024-01-15T10:00:00Z",
                "updatedAt": "2024-01-15T10:00:00Z",
            })
        })
        .collect()
}

pub fn seed_collections() -> Collections {
    Collections {
        dashboards: dashboards(),
        charts: charts(),
        chart_data: chart_data(),
    }
}
