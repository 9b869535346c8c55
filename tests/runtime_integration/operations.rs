use serde_json::{Value, json};

use super::support::{WEBSITES_MODEL, spawn_server};

async fn get_json(url: String) -> Value {
    let response = reqwest::get(url).await.expect("endpoint should respond");
    assert!(response.status().is_success());
    response.json().await.expect("response should be json")
}

#[tokio::test]
async fn visible_operations_are_served_with_expanded_urls() {
    let server = spawn_server("websites.json", Some(WEBSITES_MODEL)).await;

    let payload = get_json(server.url("/api/operations")).await;
    assert_eq!(
        payload,
        json!([
            {
                "MethodName": "GetWidget",
                "HttpMethod": "GET",
                "Url": "https://management.test/widgets/{widgetName}",
                "ResponseBody": { "name": "(string)" }
            },
            {
                "MethodName": "CreateOrUpdateSite",
                "HttpMethod": "PUT",
                "Url": "https://management.test/sites/{siteName}/slots/{slot}",
                "RequestBody": { "location": "(string)", "state": "(Running|Stopped)" }
            },
            {
                "MethodName": "CreateOrUpdateSite",
                "HttpMethod": "PUT",
                "Url": "https://management.test/sites/{siteName}",
                "RequestBody": { "location": "(string)", "state": "(Running|Stopped)" }
            }
        ])
    );

    let again = get_json(server.url("/api/operations?hidden=false")).await;
    assert_eq!(again, payload);

    server.stop().await;
}

#[tokio::test]
async fn hidden_operations_are_a_distinct_result() {
    let server = spawn_server("websites.json", Some(WEBSITES_MODEL)).await;

    let hidden = get_json(server.url("/api/operations?hidden=true")).await;
    assert_eq!(
        hidden,
        json!([
            {
                "MethodName": "BackupSite",
                "HttpMethod": "POST",
                "Url": "https://management.test/sites/backup"
            }
        ])
    );

    let visible = get_json(server.url("/api/operations")).await;
    let names: Vec<&str> = visible
        .as_array()
        .expect("array expected")
        .iter()
        .filter_map(|record| record["MethodName"].as_str())
        .collect();
    assert!(!names.contains(&"BackupSite"));

    server.stop().await;
}

#[tokio::test]
async fn toml_models_are_served() {
    let model = r#"
name = "Widgets"

[[methods]]
name = "ListWidgets"
httpVerb = "GET"
url = { kind = "concat", items = [{ kind = "literal", text = "{BaseUri}" }, { kind = "literal", text = "/widgets" }] }
responseBodies = [{ kind = "array", elementFormat = { kind = "dictionary" } }]
"#;
    let server = spawn_server("widgets.toml", Some(model)).await;

    let payload = get_json(server.url("/api/operations")).await;
    assert_eq!(
        payload,
        json!([
            {
                "MethodName": "ListWidgets",
                "HttpMethod": "GET",
                "Url": "https://management.test/widgets",
                "ResponseBody": [{}]
            }
        ])
    );

    server.stop().await;
}
