use serde_json::Value;

use super::support::{BASE_ENDPOINT, WEBSITES_MODEL, spawn_server};

#[tokio::test]
async fn healthz_reports_catalog_counts() {
    let server = spawn_server("websites.json", Some(WEBSITES_MODEL)).await;

    let response = reqwest::get(server.url("/healthz"))
        .await
        .expect("healthz endpoint should respond");
    assert!(response.status().is_success());

    let payload: Value = response.json().await.expect("healthz should return json");
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["service"], "WebSiteManagementClient");
    assert_eq!(payload["baseEndpoint"], BASE_ENDPOINT);
    assert_eq!(payload["operations"]["visible"], 3);
    assert_eq!(payload["operations"]["hidden"], 1);
    assert_eq!(payload["operations"]["skipped"], 1);

    server.stop().await;
}

#[tokio::test]
async fn missing_model_file_returns_service_unavailable() {
    let server = spawn_server("absent.json", None).await;

    let response = reqwest::get(server.url("/healthz"))
        .await
        .expect("healthz endpoint should respond");
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let payload: Value = response.json().await.expect("error should be json");
    assert_eq!(payload["ok"], false);

    server.stop().await;
}
