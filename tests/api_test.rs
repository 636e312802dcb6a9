//! API integration tests
//!
//! Drive the router end to end against seeded stores.

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use chart_dashboard::application::repository::Repository;
use chart_dashboard::application::store::CollectionStore;
use chart_dashboard::infrastructure::json_file_store::JsonFileStore;
use chart_dashboard::infrastructure::memory_store::MemoryStore;
use chart_dashboard::presentation::app_state::AppState;
use chart_dashboard::presentation::router::build_router;
use mockable::DefaultClock;
use serde_json::{json, Value};

fn server_for(store: Arc<dyn CollectionStore>) -> Result<TestServer> {
    let repository = Repository::new(store, Arc::new(DefaultClock));
    let app = build_router(Arc::new(AppState::new(repository)));
    TestServer::new(app)
}

fn setup_test_server() -> Result<TestServer> {
    server_for(Arc::new(MemoryStore::seeded()))
}

fn chart_orders(body: &Value) -> Vec<(String, i64)> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["id"].as_str().unwrap().to_string(), c["order"].as_i64().unwrap()))
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let server = setup_test_server()?;
    let response = server.get("/healthz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "ok");
    Ok(())
}

#[tokio::test]
async fn test_reorder_charts() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .put("/dashboards/dashboard-1/charts/reorder")
        .json(&json!({ "chartIds": ["chart-3", "chart-1", "chart-2"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Charts reordered successfully");
    assert_eq!(
        chart_orders(&body),
        vec![
            ("chart-3".to_string(), 0),
            ("chart-1".to_string(), 1),
            ("chart-2".to_string(), 2),
        ]
    );

    let dashboard: Value = server.get("/dashboards/dashboard-1").await.json();
    let ids: Vec<&str> = dashboard["data"]["charts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["chart-3", "chart-1", "chart-2"]);
    Ok(())
}

#[tokio::test]
async fn test_reorder_rejects_bad_input() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .put("/dashboards/dashboard-1/charts/reorder")
        .json(&json!({ "chartIds": "chart-1" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Invalid chartIds array");

    // Array shape is checked before the dashboard exists check.
    let response = server
        .put("/dashboards/nope/charts/reorder")
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .put("/dashboards/nope/charts/reorder")
        .json(&json!({ "chartIds": [] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Dashboard not found");

    let response = server
        .put("/dashboards/dashboard-1/charts/reorder")
        .json(&json!({ "chartIds": ["chart-1", "missing-id"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Charts not found: missing-id");

    let charts: Value = server.get("/charts?dashboardId=dashboard-1").await.json();
    assert_eq!(
        chart_orders(&charts),
        vec![
            ("chart-1".to_string(), 0),
            ("chart-2".to_string(), 1),
            ("chart-3".to_string(), 2),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_chart_data_upsert_and_resolve() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .put("/chart-data")
        .json(&json!({ "endpoint": "total_revenue", "data": { "value": 500 } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Chart data updated successfully");

    let body: Value = server.get("/data/total_revenue").await.json();
    assert_eq!(body["data"]["value"].as_f64(), Some(500.0));
    assert!(body["data"].get("label").is_none());

    let body: Value = server.get("/chart-data?endpoint=total_revenue").await.json();
    assert_eq!(body["data"]["value"].as_f64(), Some(500.0));

    let response = server
        .put("/chart-data")
        .json(&json!({ "endpoint": "q1_sales", "data": { "labels": ["Jan"], "values": [3] } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = server.get("/api/data/q1_sales").await.json();
    assert_eq!(body["data"]["labels"], json!(["Jan"]));
    Ok(())
}

#[tokio::test]
async fn test_chart_data_errors() -> Result<()> {
    let server = setup_test_server()?;

    let response = server.get("/chart-data").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Endpoint parameter is required");

    let response = server.get("/data/unknown_endpoint").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "NOT_FOUND");

    let response = server
        .post("/chart-data")
        .json(&json!({ "endpoint": "kpi" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Chart data is required");

    let response = server
        .post("/chart-data")
        .json(&json!({ "data": { "value": 1 } }))
        .await;
    assert_eq!(response.json::<Value>()["message"], "Endpoint is required");

    let response = server
        .post("/chart-data")
        .json(&json!({ "endpoint": "kpi", "data": { "labels": ["a", "b"], "values": [1] } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_post_chart_data_always_creates() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .post("/chart-data")
        .json(&json!({ "endpoint": "active_users", "data": { "value": 1 } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // The seeded record is still the first match.
    let body: Value = server.get("/data/active_users").await.json();
    assert_eq!(body["data"]["value"].as_f64(), Some(15420.0));
    Ok(())
}

#[tokio::test]
async fn test_dashboard_crud_with_cascade() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .post("/dashboards")
        .json(&json!({ "name": "Ops", "description": "Service health" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["charts"], json!([]));

    let response = server
        .post("/charts")
        .json(&json!({
            "dashboardId": id,
            "type": "number",
            "title": "Uptime",
            "dataEndpoint": "/api/data/uptime"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let chart_id = response.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .put(&format!("/dashboards/{}", id))
        .json(&json!({ "name": "Operations" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["data"]["name"], "Operations");
    assert_eq!(updated["data"]["charts"][0]["id"], chart_id.as_str());

    let list: Value = server.get("/dashboards").await.json();
    assert_eq!(list["data"].as_array().unwrap().len(), 4);
    assert_eq!(list["data"][0]["id"], id.as_str());

    let response = server.delete(&format!("/dashboards/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"], Value::Null);

    let response = server.get(&format!("/charts/{}", chart_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let response = server.get(&format!("/dashboards/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_invalid_json_body_is_a_validation_error() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .post("/dashboards")
        .json(&json!({ "name": 12 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "VALIDATION_ERROR");

    let response = server.post("/dashboards").json(&json!({})).await;
    assert_eq!(response.json::<Value>()["message"], "Dashboard name is required");
    Ok(())
}

#[tokio::test]
async fn test_chart_editor_flow() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .post("/dashboards/dashboard-2/charts")
        .json(&json!({
            "type": "bar",
            "title": "Q1 Sales",
            "data": { "labels": ["Jan", "Feb"], "values": [10, 20] }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let chart_id = body["data"]["chart"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["chart"]["dataEndpoint"], "/api/data/q1_sales");
    assert_eq!(body["data"]["chart"]["order"], 2);

    let response = server
        .put(&format!("/charts/{}/content", chart_id))
        .json(&json!({
            "title": "First Quarter Sales",
            "data": { "labels": ["Jan", "Feb", "Mar"], "values": [10, 20, 30] }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["chart"]["title"], "First Quarter Sales");
    assert_eq!(body["data"]["chart"]["dataEndpoint"], "/api/data/q1_sales");

    let data: Value = server.get("/api/data/q1_sales").await.json();
    assert_eq!(data["data"]["labels"], json!(["Jan", "Feb", "Mar"]));

    let response = server
        .put(&format!("/charts/{}", chart_id))
        .json(&json!({ "dataEndpoint": "/api/data/first_quarter_sales" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_file_store_persists_reorder() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("db.json");

    let store = JsonFileStore::open(&path, true).await?;
    let server = server_for(Arc::new(store))?;
    let response = server
        .put("/dashboards/dashboard-3/charts/reorder")
        .json(&json!({ "chartIds": ["chart-8"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let chart_8 = document["charts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "chart-8")
        .unwrap();
    assert_eq!(chart_8["order"], 0);
    Ok(())
}
