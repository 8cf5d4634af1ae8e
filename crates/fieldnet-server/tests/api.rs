//! HTTP API served on a loopback port.

mod common;

use common::LaggingController;
use fieldnet_server::api::{self, AppState};
use fieldnet_server::config::AccessPointConfig;
use fieldnet_server::{AccessPoint, DeviceHandle, Switch};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;

async fn serve(controller: &LaggingController) -> SocketAddr {
    let device = DeviceHandle::spawn("unifi", controller.clone());
    let config = AccessPointConfig {
        poll_interval: Duration::from_millis(20),
        retry_interval: Duration::from_millis(20),
        ..AccessPointConfig::default()
    };
    let (access_point, _task) = AccessPoint::spawn("ap", device.clone(), config);
    let state = AppState {
        access_point,
        switch: Switch::new("switch", device),
        metrics_state: None,
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = api::create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_health() {
    let addr = serve(&LaggingController::default()).await;
    let body = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_wifi_submit_then_status_converges() {
    let controller = LaggingController::with_lag(1);
    let addr = serve(&controller).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/api/wifi"))
        .json(&json!({"teams": [254, null, null, null, null, 973]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 202);

    let status = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let body: Value = client
                .get(format!("http://{addr}/api/wifi/status"))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            if body["progress"]["completed"] == 1 {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("access point never converged");

    assert_eq!(status["accessPoint"], "ap");
    assert_eq!(status["status"]["initialized"], true);
    assert_eq!(status["status"]["slots"][0]["teamId"], 254);
    assert_eq!(status["status"]["slots"][5]["teamId"], 973);
    assert_eq!(status["progress"]["lastAttempts"], 2);
}

#[tokio::test]
async fn test_wifi_rejects_invalid_team() {
    let addr = serve(&LaggingController::default()).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/wifi"))
        .json(&json!({"teams": [30000, null, null, null, null, null]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("red1"));
}

#[tokio::test]
async fn test_ethernet_passthrough() {
    let controller = LaggingController::default();
    let addr = serve(&controller).await;
    let client = reqwest::Client::new();
    let body = json!({"teams": [null, null, 1114, null, null, null]});

    let ok = client
        .post(format!("http://{addr}/api/ethernet"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);
    assert_eq!(controller.ethernet_pushes().len(), 1);

    controller.fail_ethernet(true);
    let failed = client
        .post(format!("http://{addr}/api/ethernet"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(failed.status(), 502);
    let error: Value = failed.json().await.unwrap();
    assert!(error["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_metrics_unavailable_without_recorder() {
    let addr = serve(&LaggingController::default()).await;
    let url = format!("http://{addr}/metrics");
    let response = reqwest::get(url).await.unwrap();
    assert_eq!(response.status(), 503);
}
