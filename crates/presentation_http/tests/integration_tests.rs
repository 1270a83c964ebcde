//! Router-level tests with counting fake adapters

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_speech::{
    AudioFormat, SpeechRequest, SpeechResult, SpeechSynthesizer, SynthesisError,
};
use ai_text::{GenerationError, GenerationRequest, GenerationResult, TextGenerator};
use application::{CachePort, CacheStats, Gateway, GatewayError};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain::{LlmVendor, TtsVendor};
use presentation_http::middleware::{BearerAuthLayer, OriginGuardLayer};
use presentation_http::{AppState, StatusInfo, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl CachePort for MemoryCache {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, GatewayError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), GatewayError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.lock().unwrap().len() as u64,
            ..CacheStats::default()
        }
    }
}

struct FakeGenerator {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GenerationError::Vendor {
                status: 503,
                detail: "vendor down".to_string(),
            });
        }
        Ok(GenerationResult::new(format!(
            "story({}, {}, {})",
            request.prompt,
            request.tone_level,
            request.language
        )))
    }

    fn vendor(&self) -> LlmVendor {
        LlmVendor::OpenAI
    }

    fn model(&self) -> &str {
        "fake-llm"
    }
}

struct FakeSynthesizer {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResult, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SpeechResult::new(vec![0, 0], request.format))
    }

    fn vendor(&self) -> TtsVendor {
        TtsVendor::OpenAI
    }

    fn model(&self) -> &str {
        "fake-tts"
    }

    fn default_voice(&self) -> &str {
        "alloy"
    }
}

struct TestApp {
    router: Router,
    llm_calls: Arc<AtomicUsize>,
    tts_calls: Arc<AtomicUsize>,
}

fn test_status(has_keys: bool) -> StatusInfo {
    StatusInfo {
        llm_provider: LlmVendor::OpenAI,
        llm_model: "fake-llm".to_string(),
        llm_has_key: has_keys,
        tts_provider: TtsVendor::OpenAI,
        tts_model: "fake-tts".to_string(),
        tts_voice: "alloy".to_string(),
        tts_format: AudioFormat::Mp3,
        tts_has_key: has_keys,
        allowed_origins: Vec::new(),
    }
}

fn build_app(fail_llm: bool) -> TestApp {
    let llm_calls = Arc::new(AtomicUsize::new(0));
    let tts_calls = Arc::new(AtomicUsize::new(0));
    let gateway = Arc::new(Gateway::new(
        Arc::new(FakeGenerator {
            calls: Arc::clone(&llm_calls),
            fail: fail_llm,
        }),
        Arc::new(FakeSynthesizer {
            calls: Arc::clone(&tts_calls),
        }),
        Arc::new(MemoryCache::default()),
        Duration::from_secs(3600),
    ));
    let state = AppState::new(gateway, test_status(false));
    TestApp {
        router: build_router(state),
        llm_calls,
        tts_calls,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn status_reports_vendors_without_credentials() {
    let app = build_app(false);
    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["llm"]["provider"], json!("openai"));
    assert_eq!(body["llm"]["has_key"], json!(false));
    assert_eq!(body["tts"]["voice"], json!("alloy"));
    assert_eq!(body["tts"]["format"], json!("mp3"));
}

#[tokio::test]
async fn generate_round_trip_then_cache_hit() {
    let app = build_app(false);

    let first = app
        .router
        .clone()
        .oneshot(post_json("/llm", json!({"prompt": "en saga", "lvl": 4, "lang": "en"})))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = body_json(first).await;
    assert_eq!(first_body["ok"], json!(true));
    assert_eq!(first_body["cached"], json!(false));
    assert_eq!(first_body["text"], json!("story(en saga, 4, en)"));

    let second = app
        .router
        .oneshot(post_json("/llm", json!({"prompt": "en saga", "lvl": 4, "lang": "en"})))
        .await
        .unwrap();
    let second_body = body_json(second).await;
    assert_eq!(second_body["cached"], json!(true));
    assert_eq!(second_body["text"], first_body["text"]);
    assert_eq!(app.llm_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_aliases_serve_the_same_handler() {
    let app = build_app(false);
    for uri in ["/generate", "/episodes/generate"] {
        let response = app
            .router
            .clone()
            .oneshot(post_json(uri, json!({"prompt": "hej"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn missing_prompt_is_400_and_never_reaches_the_vendor() {
    let app = build_app(false);
    let response = app
        .router
        .oneshot(post_json("/llm", json!({"lvl": 3})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("invalid_request"));
    assert_eq!(app.llm_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn vendor_failure_maps_to_502_and_is_not_cached() {
    let app = build_app(true);

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/llm", json!({"prompt": "hej"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"], json!("vendor_error"));
    }

    assert_eq!(app.llm_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn tts_returns_base64_json_by_default() {
    let app = build_app(false);
    let response = app
        .router
        .oneshot(post_json("/tts", json!({"text": "hej", "format": "wav"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["cached"], json!(false));
    assert_eq!(body["audio"]["format"], json!("wav"));
    assert_eq!(body["audio"]["mime"], json!("audio/wav"));
    assert_eq!(body["audio"]["base64"], json!("AAA="));
}

#[tokio::test]
async fn tts_serves_raw_bytes_when_audio_is_accepted() {
    let app = build_app(false);
    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tts")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "audio/*")
                .body(Body::from(json!({"text": "hej", "format": "wav"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/wav"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), &[0, 0]);
}

#[tokio::test]
async fn tts_repeat_request_hits_the_cache() {
    let app = build_app(false);
    let request = json!({"text": "hej", "format": "wav"});

    app.router
        .clone()
        .oneshot(post_json("/tts", request.clone()))
        .await
        .unwrap();
    let second = app
        .router
        .oneshot(post_json("/tts", request))
        .await
        .unwrap();

    let body = body_json(second).await;
    assert_eq!(body["cached"], json!(true));
    assert_eq!(app.tts_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_text_is_400() {
    let app = build_app(false);
    let response = app
        .router
        .oneshot(post_json("/tts", json!({"format": "mp3"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.tts_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_route_gets_the_json_envelope() {
    let app = build_app(false);
    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn auth_gates_capability_routes_but_not_status() {
    let app = build_app(false);
    let router = app
        .router
        .layer(BearerAuthLayer::new(Some("secret".to_string())));

    let denied = router
        .clone()
        .oneshot(post_json("/llm", json!({"prompt": "hej"})))
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let allowed = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/llm")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer secret")
                .body(Body::from(json!({"prompt": "hej"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);

    let status = router
        .oneshot(
            Request::builder()
                .uri("/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(status.status(), StatusCode::OK);
}

#[tokio::test]
async fn origin_guard_refuses_unlisted_origins_end_to_end() {
    let app = build_app(false);
    let router = app
        .router
        .layer(OriginGuardLayer::new(vec!["https://app.example".to_string()]));

    let refused = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/llm")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::from(json!({"prompt": "hej"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(refused.status(), StatusCode::FORBIDDEN);
    let body = body_json(refused).await;
    assert_eq!(body["error"], json!("origin_forbidden"));

    let accepted = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/llm")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, "https://app.example")
                .body(Body::from(json!({"prompt": "hej"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(accepted.status(), StatusCode::OK);
    assert_eq!(
        accepted
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://app.example"
    );
}
