//! Integration tests for the control service.
//!
//! Each test drives the router in-process and checks the registry behind
//! it directly.

mod common;

use axum::http::{Method, StatusCode};
use common::Harness;

const CATS: &str = "test:type=Cat,name=*";

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let harness = Harness::new();
    let (status, body) = harness.send(Method::GET, "/health", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn register_and_clear_whiskers() {
    let harness = Harness::new();

    let (status, body) = harness.post("/cat", r#"{"name":"whiskers"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok!");
    assert_eq!(harness.count("test:type=Cat,name=whiskers"), 1);

    let (status, body) = harness.clear().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok!");
    assert_eq!(harness.count("test:type=Cat,name=whiskers"), 0);
}

#[tokio::test]
async fn register_without_name_is_rejected() {
    let harness = Harness::new();

    let (status, _) = harness.post("/cat", r#"{"color":"black"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = harness.post("/cat", r#"{"name":null}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = harness.post("/cat", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(harness.server.bean_count(), 0);
}

#[tokio::test]
async fn register_with_illegal_name_is_rejected() {
    let harness = Harness::new();

    for body in [
        r#"{"name":""}"#,
        r#"{"name":"a,b"}"#,
        r#"{"name":"a=b"}"#,
        r#"{"name":"*"}"#,
        r#"{"name":"x,color=black"}"#,
        r#"{"name":"x,*"}"#,
    ] {
        let (status, _) = harness.post("/cat", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
    }
    assert_eq!(harness.server.bean_count(), 0);
}

#[tokio::test]
async fn duplicate_name_reports_conflict() {
    let harness = Harness::new();

    let (status, _) = harness.post("/cat", r#"{"name":"Isidoro"}"#).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = harness.post("/cat", r#"{"name":"Isidoro"}"#).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already exists"), "got: {body}");
    assert_eq!(harness.count(CATS), 1);
}

#[tokio::test]
async fn register_after_clear_succeeds_again() {
    let harness = Harness::new();

    harness.post("/cat", r#"{"name":"Isidoro"}"#).await;
    harness.clear().await;
    let (status, _) = harness.post("/cat", r#"{"name":"Isidoro"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.count(CATS), 1);
}

#[tokio::test]
async fn clear_removes_every_cat() {
    let harness = Harness::new();

    harness.post("/cat", r#"{"name":"a"}"#).await;
    harness.post("/cat", r#"{"name":"b"}"#).await;
    assert_eq!(harness.count(CATS), 2);

    harness.clear().await;

    assert_eq!(harness.count("test:type=Cat,name=a"), 0);
    assert_eq!(harness.count("test:type=Cat,name=b"), 0);
}

#[tokio::test]
async fn clear_leaves_no_accepted_cat_behind() {
    let harness = Harness::new();

    for name in ["a", "x,color=black", "b\\c", "\"quoted\"", "Isidoro"] {
        let body = serde_json::json!({ "name": name }).to_string();
        harness.post("/cat", &body).await;
    }
    assert!(harness.server.bean_count() > 0);

    let (status, _) = harness.clear().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.server.bean_count(), 0);
}

#[tokio::test]
async fn register_accepts_decimal_number_value() {
    let harness = Harness::new();

    let (status, _) = harness
        .post("/cat", r#"{"name":"Garfield","numberValue":1.5}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.count(CATS), 1);
}

#[tokio::test]
async fn clear_is_idempotent() {
    let harness = Harness::new();

    let (status, body) = harness.clear().await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "ok!"));

    harness.post("/cat", r#"{"name":"Heathcliff"}"#).await;
    harness.clear().await;
    let (status, body) = harness.clear().await;

    assert_eq!((status, body.as_str()), (StatusCode::OK, "ok!"));
    assert_eq!(harness.count(CATS), 0);
}

#[tokio::test]
async fn clear_leaves_other_bean_kinds() {
    let harness = Harness::new();

    harness.post("/cat", r#"{"name":"Garfield"}"#).await;
    harness
        .post("/composite_data_cat", r#"{"name":"Garfield","boolValue":true}"#)
        .await;
    harness
        .post("/exceptional_cat", r#"{"name":"Garfield","doubleValue":1.5}"#)
        .await;

    harness.clear().await;

    assert_eq!(harness.count(CATS), 0);
    assert_eq!(harness.count("test:type=CompositeDataCat,*"), 1);
    assert_eq!(harness.count("test:type=ExceptionalCat,*"), 1);
}

#[tokio::test]
async fn batch_registers_every_cat() {
    let harness = Harness::new();

    let (status, body) = harness
        .post("/cat_batch", r#"[{"name":"a"},{"name":"b"},{"name":"c"}]"#)
        .await;

    assert_eq!((status, body.as_str()), (StatusCode::OK, "ok!"));
    assert_eq!(harness.count(CATS), 3);
}

#[tokio::test]
async fn batch_requires_an_array() {
    let harness = Harness::new();

    let (status, _) = harness.post("/cat_batch", r#"{"name":"a"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(harness.server.bean_count(), 0);
}

#[tokio::test]
async fn custom_cat_registers_under_requested_name() {
    let harness = Harness::new();

    let (status, _) = harness
        .post("/custom_cat", r#"{"mBeanName":"zoo:kind=Feline,id=42","name":"Felix"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harness.count("zoo:kind=Feline,id=42"), 1);

    let (status, _) = harness
        .post("/custom_cat", r#"{"mBeanName":"no-colon","name":"Felix"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn beans_endpoint_reports_attributes_and_errors() {
    let harness = Harness::new();
    harness
        .post("/cat", r#"{"name":"Isidoro","doubleValue":2.5}"#)
        .await;
    harness
        .post("/exceptional_cat", r#"{"name":"Tom","doubleValue":1.5}"#)
        .await;

    let (status, body) = harness
        .send(Method::GET, "/beans?query=test%3A*", "")
        .await;
    assert_eq!(status, StatusCode::OK);

    let beans: serde_json::Value = serde_json::from_str(&body).unwrap();
    let beans = beans.as_array().unwrap();
    assert_eq!(beans.len(), 2);

    let cat = &beans[0];
    assert_eq!(cat["objectName"], "test:type=Cat,name=Isidoro");
    assert_eq!(cat["className"], "Cat");
    assert_eq!(cat["attributes"]["Name"]["value"], "Isidoro");
    assert_eq!(cat["attributes"]["DoubleValue"]["value"], 2.5);
    assert!(cat["attributes"]["BoolValue"]["value"].is_null());

    let exceptional = &beans[1];
    assert_eq!(exceptional["className"], "ExceptionalCat");
    assert!(exceptional["attributes"]["NotSerializable"]["error"].is_string());
}

#[tokio::test]
async fn beans_endpoint_defaults_to_everything() {
    let harness = Harness::new();
    harness.post("/cat", r#"{"name":"a"}"#).await;
    harness
        .post("/custom_cat", r#"{"mBeanName":"zoo:kind=Feline","name":"b"}"#)
        .await;

    let (status, body) = harness.send(Method::GET, "/beans", "").await;
    assert_eq!(status, StatusCode::OK);

    let beans: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(beans.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn beans_endpoint_rejects_malformed_pattern() {
    let harness = Harness::new();

    let (status, _) = harness
        .send(Method::GET, "/beans?query=no-colon", "")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_and_methods_are_handled_by_axum() {
    let harness = Harness::new();

    let (status, _) = harness.post("/dog", r#"{"name":"Rex"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = harness.send(Method::GET, "/cat", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = harness.send(Method::POST, "/clear", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn concurrent_registrations_are_all_visible() {
    let harness = Harness::new();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let app = harness.app.clone();
        let server = harness.server.clone();
        tasks.push(tokio::spawn(async move {
            let helper = Harness { app, server };
            helper.post("/cat", &format!(r#"{{"name":"cat{i}"}}"#)).await
        }));
    }
    for task in tasks {
        let (status, _) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(harness.count(CATS), 32);
    harness.clear().await;
    assert_eq!(harness.count(CATS), 0);
}

#[tokio::test]
async fn concurrent_duplicates_admit_one_winner() {
    let harness = Harness::new();

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let helper = Harness {
            app: harness.app.clone(),
            server: harness.server.clone(),
        };
        tasks.push(tokio::spawn(async move {
            helper.post("/cat", r#"{"name":"contended"}"#).await.0
        }));
    }

    let mut ok = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::OK => ok += 1,
            status => assert_eq!(status, StatusCode::CONFLICT),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(harness.count(CATS), 1);
}
