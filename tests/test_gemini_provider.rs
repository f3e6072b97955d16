//! Contract tests for the Gemini design provider against a mock HTTP server

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cardforge::config::GenerativeConfig;
use cardforge::domain::design::{DesignBrief, DesignProvider, GenerativeError};
use cardforge::infrastructure::generative::GeminiDesignProvider;

fn provider_for(server: &MockServer) -> GeminiDesignProvider {
    GeminiDesignProvider::new(GenerativeConfig {
        api_url: server.uri(),
        model: "gemini-2.0-flash".to_string(),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 5,
    })
}

fn brief() -> DesignBrief {
    DesignBrief {
        logo: vec![0x89, 0x50, 0x4E, 0x47],
        logo_mime: "image/png".to_string(),
        display_name: Some("Ada Lovelace".to_string()),
    }
}

fn design_json() -> &'static str {
    r##"{
        "name": "Midnight",
        "background": {"kind": "linear_gradient", "colors": ["#101020", "#3040A0"], "angle_degrees": 135.0},
        "text_color": "#FFFFFF",
        "accent_color": "#D0A040",
        "logo_placement": {"x": 0.85, "y": 0.15, "scale": 0.2},
        "style_notes": "Deep navy with brass accents"
    }"##
}

#[tokio::test]
async fn parses_a_fenced_design_response() {
    let server = MockServer::start().await;
    let model_text = format!("Here is your design:\n```json\n{}\n```", design_json());

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": model_text}]}}]
        })))
        .mount(&server)
        .await;

    let design = provider_for(&server).generate_design(&brief()).await.unwrap();
    assert_eq!(design.name, "Midnight");
    assert_eq!(design.background.colors.len(), 2);
    assert_eq!(design.text_color, "#FFFFFF");
}

#[tokio::test]
async fn parses_a_bare_json_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": design_json()}]}}]
        })))
        .mount(&server)
        .await;

    let design = provider_for(&server).generate_design(&brief()).await.unwrap();
    assert_eq!(design.name, "Midnight");
}

#[tokio::test]
async fn narrative_without_json_is_a_contract_violation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "I cannot design cards today."}]}}]
        })))
        .mount(&server)
        .await;

    let result = provider_for(&server).generate_design(&brief()).await;
    assert!(matches!(result, Err(GenerativeError::ContractViolation(_))));
}

#[tokio::test]
async fn schema_violations_are_rejected_after_parsing() {
    let server = MockServer::start().await;
    // Parses fine, but the text color is not a hex color
    let invalid = design_json().replace("#FFFFFF", "white");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": invalid}]}}]
        })))
        .mount(&server)
        .await;

    let result = provider_for(&server).generate_design(&brief()).await;
    assert!(matches!(result, Err(GenerativeError::ContractViolation(_))));
}

#[tokio::test]
async fn empty_candidate_list_is_a_contract_violation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let result = provider_for(&server).generate_design(&brief()).await;
    assert!(matches!(result, Err(GenerativeError::ContractViolation(_))));
}

#[tokio::test]
async fn auth_failures_map_to_authentication_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = provider_for(&server).generate_design(&brief()).await;
    assert!(matches!(result, Err(GenerativeError::Authentication(_))));
}

#[tokio::test]
async fn provider_throttling_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = provider_for(&server).generate_design(&brief()).await;
    assert!(matches!(result, Err(GenerativeError::RateLimited { .. })));
}

#[tokio::test]
async fn server_errors_map_to_service_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = provider_for(&server).generate_design(&brief()).await;
    assert!(matches!(result, Err(GenerativeError::ServiceUnavailable(_))));
}
