//! HTTP-level adapter tests against a mock vendor

use ai_text::{
    GenerationError, GenerationRequest, LlmConfig, MistralGenerator, OllamaGenerator,
    OpenAiGenerator, TextGenerator,
};
use domain::ToneLevel;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        openai_api_key: Some("sk-test".to_string()),
        openai_base_url: server.uri(),
        ..LlmConfig::default()
    }
}

fn mistral_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        mistral_api_key: Some("mk-test".to_string()),
        mistral_base_url: server.uri(),
        ..LlmConfig::default()
    }
}

fn ollama_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        ollama_url: Some(server.uri()),
        ..LlmConfig::default()
    }
}

#[tokio::test]
async fn openai_extracts_and_trims_completion_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "  En saga om regn.  "}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = OpenAiGenerator::new(openai_config(&server)).unwrap();
    let result = generator
        .generate(GenerationRequest::new("en saga om regn"))
        .await
        .unwrap();

    assert_eq!(result.text, "En saga om regn.");
}

#[tokio::test]
async fn openai_sends_model_and_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 1.0,
            "max_tokens": 1800
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = OpenAiGenerator::new(openai_config(&server)).unwrap();
    generator
        .generate(GenerationRequest::new("hi").with_tone(ToneLevel::MAX))
        .await
        .unwrap();
}

#[tokio::test]
async fn openai_missing_key_fails_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = openai_config(&server);
    config.openai_api_key = None;
    let generator = OpenAiGenerator::new(config).unwrap();
    let err = generator
        .generate(GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::MissingCredential(v) if v == "openai"));
}

#[tokio::test]
async fn openai_unauthorized_maps_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let generator = OpenAiGenerator::new(openai_config(&server)).unwrap();
    let err = generator
        .generate(GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Rejected { status: 401, .. }));
}

#[tokio::test]
async fn openai_server_error_maps_to_vendor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let generator = OpenAiGenerator::new(openai_config(&server)).unwrap();
    let err = generator
        .generate(GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Vendor { status: 503, .. }));
}

#[tokio::test]
async fn openai_missing_content_maps_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let generator = OpenAiGenerator::new(openai_config(&server)).unwrap();
    let err = generator
        .generate(GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn openai_empty_completion_is_a_valid_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "   "}}]
        })))
        .mount(&server)
        .await;

    let generator = OpenAiGenerator::new(openai_config(&server)).unwrap();
    let result = generator
        .generate(GenerationRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(result.text, "");
}

#[tokio::test]
async fn mistral_uses_its_own_model_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer mk-test"))
        .and(body_partial_json(json!({"model": "mistral-small-latest"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Bonjour"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = MistralGenerator::new(mistral_config(&server)).unwrap();
    let result = generator
        .generate(GenerationRequest::new("hi").with_language("fr"))
        .await
        .unwrap();

    assert_eq!(result.text, "Bonjour");
}

#[tokio::test]
async fn ollama_posts_generate_and_reads_response_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "mistral",
            "stream": false,
            "options": {"num_predict": 1800}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "mistral",
            "response": " En kort saga. ",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = OllamaGenerator::new(ollama_config(&server)).unwrap();
    let result = generator
        .generate(GenerationRequest::new("en kort saga"))
        .await
        .unwrap();

    assert_eq!(result.text, "En kort saga.");
}

#[tokio::test]
async fn ollama_missing_url_fails_with_missing_credential() {
    let generator = OllamaGenerator::new(LlmConfig::default()).unwrap();
    let err = generator
        .generate(GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::MissingCredential(v) if v == "ollama"));
}

#[tokio::test]
async fn ollama_missing_response_field_maps_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
        .mount(&server)
        .await;

    let generator = OllamaGenerator::new(ollama_config(&server)).unwrap();
    let err = generator
        .generate(GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}
