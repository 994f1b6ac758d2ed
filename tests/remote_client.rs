use inference_proxy::client::{ClientError, InferenceBackend, RemoteInferenceClient};
use inference_proxy::config::RemoteConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with_config_probe() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "3.0" })))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> RemoteConfig {
    RemoteConfig {
        base_url: server.uri(),
        predict_timeout: Duration::from_secs(2),
        connect_timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn test_connect_probes_endpoint() {
    let server = server_with_config_probe().await;

    let client = RemoteInferenceClient::connect(&config_for(&server)).await;
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_connect_fails_when_endpoint_unreachable() {
    // Nothing listens on this port
    let config = RemoteConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        predict_timeout: Duration::from_secs(1),
        connect_timeout: Duration::from_millis(500),
    };

    let err = RemoteInferenceClient::connect(&config).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn test_connect_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .mount(&server)
        .await;

    let err = RemoteInferenceClient::connect(&config_for(&server))
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "warming up");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_predict_success() {
    let server = server_with_config_probe().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(body_json(json!({ "data": ["quantum computing"] })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": ["quantum computing and related topics"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = RemoteInferenceClient::connect(&config_for(&server))
        .await
        .unwrap();

    let result = client.predict("quantum computing").await.unwrap();
    assert_eq!(result, "quantum computing and related topics");
}

#[tokio::test]
async fn test_predict_non_success_status_carries_body() {
    let server = server_with_config_probe().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream worker crashed"))
        .mount(&server)
        .await;

    let client = RemoteInferenceClient::connect(&config_for(&server))
        .await
        .unwrap();

    let err = client.predict("hello").await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream worker crashed");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_predict_malformed_response() {
    let server = server_with_config_probe().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "outputs": ["wrong"] })))
        .mount(&server)
        .await;

    let client = RemoteInferenceClient::connect(&config_for(&server))
        .await
        .unwrap();

    let err = client.predict("hello").await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_predict_times_out() {
    let server = server_with_config_probe().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": ["slow"] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = RemoteConfig {
        predict_timeout: Duration::from_millis(300),
        ..config_for(&server)
    };
    let client = RemoteInferenceClient::connect(&config).await.unwrap();

    let err = client.predict("hello").await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
