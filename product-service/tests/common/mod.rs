#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use product_service::config::{MongoConfig, ProductConfig, StoreBackend, StoreConfig};
use product_service::services::InMemoryProductRepository;
use product_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TABLE_BODY: &str =
    r#"{"prodname":"table","prodprice":"1500","supplier":{"name":"Harry","country":"USA"}}"#;

/// Router wired to a fresh in-memory store, returned alongside the store.
pub fn in_memory_app() -> (Router, InMemoryProductRepository) {
    let repo = InMemoryProductRepository::new();
    let state = AppState::new(Arc::new(repo.clone()));
    (build_router(state), repo)
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Sends the request and decodes the JSON body, `Value::Null` when empty.
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = send(app, request).await;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

pub async fn create(app: &Router, body: &str) -> serde_json::Value {
    let (status, product) = send_json(app, json_request(Method::POST, "/api/product", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    product
}

/// Full application against a throwaway MongoDB database.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mongo_uri: String,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        dotenvy::dotenv().ok();
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("product_test_{}", Uuid::new_v4());

        let config = ProductConfig {
            common: CoreConfig { port: 0 },
            mongodb: MongoConfig {
                uri: mongo_uri.clone(),
                database: db_name.clone(),
            },
            store: StoreConfig {
                backend: StoreBackend::Mongo,
            },
            log_level: "error".to_string(),
            otlp_endpoint: None,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to answer its health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            mongo_uri,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        if let Ok(client) = mongodb::Client::with_uri_str(&self.mongo_uri).await {
            let _ = client.database(&self.db_name).drop(None).await;
        }
    }
}
