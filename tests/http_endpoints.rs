//! HTTP endpoint tests against a live gateway.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use common::{fixture, missing, spawn_server};
use tokio_test::assert_ok;

#[tokio::test]
async fn health_reports_version() {
    let addr = spawn_server(missing(), missing()).await;

    let resp = assert_ok!(reqwest::get(format!("http://{addr}/health")).await);
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = assert_ok!(resp.json().await);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn request_types_lists_configured_commands() {
    let simulate = fixture("echo_stdin.sh");
    let addr = spawn_server(missing(), simulate.clone()).await;

    let resp = assert_ok!(reqwest::get(format!("http://{addr}/config/request-types")).await);
    let body: serde_json::Value = assert_ok!(resp.json().await);
    let Some(types) = body.as_array() else {
        panic!("expected array, got {body}");
    };
    assert_eq!(types.len(), 2);

    assert_eq!(types[0]["request_type"], "randomization");
    assert_eq!(types[0]["takes_stdin"], false);
    assert_eq!(types[0]["command"], "/definitely/not/a/tool");

    assert_eq!(types[1]["request_type"], "simulation");
    assert_eq!(types[1]["takes_stdin"], true);
    assert_eq!(types[1]["command"], simulate.to_string());
}
