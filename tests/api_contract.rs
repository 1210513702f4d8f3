//! Contract tests for the remote invocation layer: error classification,
//! per-call timeouts, and the transport-level session cookie.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use salonpost::api::ApiClient;
use salonpost::error::ApiError;

fn client(uri: &str) -> ApiClient {
    ApiClient::new(uri, Duration::from_secs(30), Duration::from_secs(60)).unwrap()
}

#[tokio::test]
async fn login_establishes_cookie_session_for_later_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "owner@salon.example", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"user_id": "u1", "email": "owner@salon.example"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/salons/me"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Salon A", "location": "", "strengths": "", "services": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server.uri());
    let user = api.login("owner@salon.example", "pw").await.unwrap();
    assert_eq!(user.user_id, "u1");

    // The cookie rides along without the caller doing anything.
    let profile = api.fetch_profile().await.unwrap().unwrap();
    assert_eq!(profile.name, "Salon A");

    server.verify().await;
}

#[tokio::test]
async fn login_error_body_on_2xx_is_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "invalid_credentials",
            "message": "unknown email or password"
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .login("owner@salon.example", "wrong")
        .await
        .unwrap_err();
    match err {
        ApiError::AuthRequired { message } => {
            assert_eq!(message.as_deref(), Some("unknown email or password"));
        }
        other => panic!("unexpected classification: {other:?}"),
    }
}

#[tokio::test]
async fn http_401_classifies_as_auth_required() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .generate_topics("spring campaign", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthRequired { .. }));
    assert!(err.to_string().contains("log in again"));
}

#[tokio::test]
async fn http_500_classifies_as_server_error_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .generate_topics("spring campaign", None)
        .await
        .unwrap_err();

    match err {
        ApiError::Server { status, .. } => assert_eq!(status, 503),
        other => panic!("unexpected classification: {other:?}"),
    }
}

#[tokio::test]
async fn server_message_is_preferred_over_default_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "backend_down",
            "message": "the generator is being redeployed"
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .generate_topics("x", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "the generator is being redeployed");
}

#[tokio::test]
async fn generate_timeout_carries_the_generation_timeout_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({"results": []})),
        )
        .mount(&server)
        .await;

    // Distinct default vs generation timeouts: the classification must carry
    // the value configured for the call type that fired.
    let api = ApiClient::new(
        &server.uri(),
        Duration::from_millis(80),
        Duration::from_millis(150),
    )
    .unwrap();

    let err = api.generate_topics("spring", None).await.unwrap_err();
    match err {
        ApiError::Timeout { endpoint, timeout_ms } => {
            assert_eq!(endpoint, "/generate");
            assert_eq!(timeout_ms, 150);
        }
        other => panic!("unexpected classification: {other:?}"),
    }
}

#[tokio::test]
async fn plain_fetch_timeout_carries_the_default_timeout_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/salons/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(
        &server.uri(),
        Duration::from_millis(80),
        Duration::from_millis(150),
    )
    .unwrap();

    let err = api.fetch_profile().await.unwrap_err();
    match err {
        ApiError::Timeout { endpoint, timeout_ms } => {
            assert_eq!(endpoint, "/salons/me");
            assert_eq!(timeout_ms, 80);
        }
        other => panic!("unexpected classification: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_classifies_as_network_error() {
    // Nothing listens on this port.
    let api = client("http://127.0.0.1:9");

    let err = api.fetch_profile().await.unwrap_err();
    match err {
        ApiError::Network { hint, detail } => {
            assert!(hint.contains("base URL"));
            assert!(!detail.is_empty());
        }
        other => panic!("unexpected classification: {other:?}"),
    }
}

#[tokio::test]
async fn profile_not_found_means_no_profile_yet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/salons/me"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let profile = client(&server.uri()).fetch_profile().await.unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/salons/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let err = client(&server.uri()).fetch_profile().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn topic_request_sends_tag_or_empty_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_json(json!({
            "context": "spring campaign",
            "topic_suggestion": "seasonal"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"summary": "s", "context": "c"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    use salonpost::workflow::types::TopicSuggestionTag;
    client(&server.uri())
        .generate_topics("spring campaign", Some(TopicSuggestionTag::Seasonal))
        .await
        .unwrap();

    server.verify().await;
}
