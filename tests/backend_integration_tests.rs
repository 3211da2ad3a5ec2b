use std::time::Duration;

use chatbox::api::{
    ApiError, ChatBackend, ExplainRequest, FurtherRequest, HttpBackend, SaveResponseRequest,
    UserProfile,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(server.uri(), None, Duration::from_secs(5)).unwrap()
}

fn first_question_request() -> SaveResponseRequest {
    SaveResponseRequest {
        user: UserProfile {
            role: "student".to_string(),
        },
        role: "student".to_string(),
        step: 0,
    }
}

// ============================================================================
// Request shapes
// ============================================================================

#[tokio::test]
async fn test_save_response_posts_user_role_and_step() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat/saveResponse"))
        .and(body_json(json!({
            "user": { "role": "student" },
            "role": "student",
            "step": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextQuestion": "What subject are you studying?"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = backend_for(&mock_server)
        .save_response(&first_question_request())
        .await
        .unwrap();

    assert_eq!(reply.next_question, "What subject are you studying?");
}

#[tokio::test]
async fn test_explain_posts_topic_and_reads_both_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain"))
        .and(body_json(json!({ "topic": "photosynthesis" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "explanation": "Plants turn light into sugar.",
            "diagram": "graph TD\nLight-->Leaf\nLeaf-->Sugar",
            "model": "ignored-extra-field"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = backend_for(&mock_server)
        .explain(&ExplainRequest {
            topic: "photosynthesis".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(reply.explanation, "Plants turn light into sugar.");
    assert_eq!(reply.diagram, "graph TD\nLight-->Leaf\nLeaf-->Sugar");
}

#[tokio::test]
async fn test_further_request_posts_message_and_role() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat/furtherRequest"))
        .and(body_json(json!({ "message": "hello", "role": "student" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "Hi there!" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = backend_for(&mock_server)
        .further_request(&FurtherRequest {
            message: "hello".to_string(),
            role: Some("student".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(reply.reply, "Hi there!");
}

#[tokio::test]
async fn test_further_request_without_role_omits_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat/furtherRequest"))
        .and(body_json(json!({ "message": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = backend_for(&mock_server)
        .further_request(&FurtherRequest {
            message: "hello".to_string(),
            role: None,
        })
        .await
        .unwrap();

    assert_eq!(reply.reply, "ok");
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "explanation": "e",
            "diagram": "d"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(
        mock_server.uri(),
        Some("secret-token"),
        Duration::from_secs(5),
    )
    .unwrap();

    let result = backend
        .explain(&ExplainRequest {
            topic: "rain".to_string(),
        })
        .await;
    assert!(result.is_ok());
}

// ============================================================================
// Error classification
// ============================================================================

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model unavailable"))
        .mount(&mock_server)
        .await;

    let result = backend_for(&mock_server)
        .explain(&ExplainRequest {
            topic: "gravity".to_string(),
        })
        .await;

    match result {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("model unavailable"));
        }
        other => panic!("Expected ApiError::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_api_error() {
    let mock_server = MockServer::start().await;

    let result = backend_for(&mock_server)
        .save_response(&first_question_request())
        .await;

    assert!(matches!(result, Err(ApiError::Api { status: 404, .. })));
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat/furtherRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let result = backend_for(&mock_server)
        .further_request(&FurtherRequest {
            message: "hello".to_string(),
            role: None,
        })
        .await;

    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_missing_field_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "explanation": "no diagram" })))
        .mount(&mock_server)
        .await;

    let result = backend_for(&mock_server)
        .explain(&ExplainRequest {
            topic: "tides".to_string(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP connections
    let backend = HttpBackend::new("http://127.0.0.1:9", None, Duration::from_secs(2)).unwrap();

    let result = backend
        .further_request(&FurtherRequest {
            message: "hello".to_string(),
            role: None,
        })
        .await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_slow_server_times_out_as_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "explanation": "late", "diagram": "" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let backend =
        HttpBackend::new(mock_server.uri(), None, Duration::from_millis(200)).unwrap();
    let result = backend
        .explain(&ExplainRequest {
            topic: "time".to_string(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}
