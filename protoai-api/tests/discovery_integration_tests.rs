//! Discovery intents resolved over real HTTP.
//!
//! The server is bound on an ephemeral port and its discovery client points
//! back at that same address, so a discovery intent travels through the
//! server's own `/search` endpoint.


use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use protoai_api::{create_api_router, ApiConfig, SharedCatalog};
use protoai_test_utils::fixtures::sample_catalog;
use serde_json::Value;
use test_support::*;
use tokio::task::JoinHandle;

async fn spawn_self_discovering_server(
    catalog: SharedCatalog,
) -> Result<(SocketAddr, JoinHandle<()>), String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|e| e.to_string())?;
    let addr = listener.local_addr().map_err(|e| e.to_string())?;

    let state = test_state(catalog, &format!("http://{}", addr));
    let app: Router = create_api_router(state, &ApiConfig::default(), &test_telemetry_config())
        .map_err(|e| e.to_string())?;

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((addr, handle))
}

async fn post_intent(addr: SocketAddr, body: Value) -> Result<Value, String> {
    let response = reqwest::Client::new()
        .post(format!("http://{}/intent", addr))
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    assert!(response.status().is_success());
    response.json::<Value>().await.map_err(|e| e.to_string())
}

async fn get_search(addr: SocketAddr, query: &str) -> Result<Value, String> {
    reqwest::Client::new()
        .get(format!("http://{}/search{}", addr, query))
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json::<Value>()
        .await
        .map_err(|e| e.to_string())
}

#[tokio::test]
async fn test_discovery_matches_search_by_tags() -> Result<(), String> {
    let (addr, server) = spawn_self_discovering_server(Arc::new(sample_catalog())).await?;

    let intent = post_intent(addr, serde_json::json!({ "type": "discovery", "tags": ["api"] })).await?;
    let search = get_search(addr, "?tags=api").await?;

    assert_eq!(intent["success"], true);
    assert_eq!(intent["message"], "services found");
    assert_eq!(intent["error"], Value::Null);
    assert_eq!(intent["data"]["services"], search["results"]);
    assert_eq!(result_names(&intent["data"]["services"]), vec!["gateway"]);

    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_discovery_with_several_tags() -> Result<(), String> {
    let (addr, server) = spawn_self_discovering_server(Arc::new(sample_catalog())).await?;

    let intent = post_intent(
        addr,
        serde_json::json!({ "type": "discovery", "tags": ["api", "python"] }),
    )
    .await?;

    assert_eq!(
        result_names(&intent["data"]["services"]),
        vec!["repo-A", "gateway"]
    );

    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_discovery_without_tags_lists_catalog() -> Result<(), String> {
    let (addr, server) = spawn_self_discovering_server(Arc::new(sample_catalog())).await?;

    let intent = post_intent(addr, serde_json::json!({ "type": "discovery" })).await?;

    assert_eq!(intent["success"], true);
    assert_eq!(
        result_names(&intent["data"]["services"]),
        vec!["repo-A", "gateway", "docs-site"]
    );

    server.abort();
    Ok(())
}

#[tokio::test]
async fn test_discovery_surfaces_catalog_errors() -> Result<(), String> {
    let (addr, server) =
        spawn_self_discovering_server(Arc::new(protoai_test_utils::FailingCatalog::missing())).await?;

    let intent = post_intent(addr, serde_json::json!({ "type": "discovery", "tags": ["api"] })).await?;

    assert_eq!(intent["success"], false);
    assert_eq!(intent["message"], "Service discovery failed");
    let error = intent["error"].as_str().ok_or("error is not a string")?;
    assert!(error.contains("503"), "unexpected error: {}", error);

    server.abort();
    Ok(())
}
