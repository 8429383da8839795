//! End-to-end tests against a real MongoDB. Run with `--ignored` once
//! `MONGODB_URI` points at a reachable server.

mod common;

use common::{TestApp, TABLE_BODY};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn product_lifecycle_round_trips_through_mongo() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let created: Value = client
        .post(format!("{}/api/product", app.address))
        .header("content-type", "application/json")
        .body(TABLE_BODY)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    let id = created["id"].as_str().expect("missing id").to_string();
    assert_eq!(created["supplier"], json!({ "name": "Harry", "country": "USA" }));

    let fetched: Value = client
        .get(format!("{}/api/product/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(fetched, created);

    let updated: Value = client
        .put(format!("{}/api/product/{}/2000", app.address, id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(updated["prodprice"], "2000");
    assert_eq!(updated["prodname"], "table");

    let deleted = client
        .delete(format!("{}/api/product/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = client
        .get(format!("{}/api/product/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn listing_is_capped_and_empty_is_an_array() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let empty: Value = client
        .get(format!("{}/api/products", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(empty, json!([]));

    for name in ["table", "chair", "lamp"] {
        let response = client
            .post(format!("{}/api/product", app.address))
            .json(&json!({ "prodname": name, "prodprice": "10" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed: Value = client
        .get(format!("{}/api/products", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(listed.as_array().map(Vec::len), Some(2));

    app.cleanup().await;
}
