//! Bridge gateway
//!
//! One façade for both capabilities. Each request is validated, looked up
//! in the cache, forwarded to the selected adapter on a miss, and the
//! successful result cached under a vendor-scoped key. Failures are never
//! cached, and a broken cache degrades to pass-through rather than taking
//! requests down with it.

use std::sync::Arc;
use std::time::Duration;

use ai_speech::{SpeechRequest, SpeechResult, SpeechSynthesizer};
use ai_text::{GenerationRequest, GenerationResult, TextGenerator};
use domain::{LlmVendor, TtsVendor};
use tracing::{debug, instrument, warn};

use crate::cache_key;
use crate::error::GatewayError;
use crate::ports::{CachePort, CachePortExt, CacheStats};

/// A result plus whether it was served from cache
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    /// The payload
    pub value: T,
    /// True when the value came out of the cache
    pub cached: bool,
}

/// Orchestrates text generation and speech synthesis
pub struct Gateway {
    llm: Arc<dyn TextGenerator>,
    tts: Arc<dyn SpeechSynthesizer>,
    cache: Arc<dyn CachePort>,
    ttl: Duration,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("llm", &self.llm.vendor())
            .field("tts", &self.tts.vendor())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Wire the gateway up with its adapters and cache
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        tts: Arc<dyn SpeechSynthesizer>,
        cache: Arc<dyn CachePort>,
        ttl: Duration,
    ) -> Self {
        Self { llm, tts, cache, ttl }
    }

    /// The text-generation vendor in use
    #[must_use]
    pub fn llm_vendor(&self) -> LlmVendor {
        self.llm.vendor()
    }

    /// The text-generation model in use
    #[must_use]
    pub fn llm_model(&self) -> &str {
        self.llm.model()
    }

    /// The speech-synthesis vendor in use
    #[must_use]
    pub fn tts_vendor(&self) -> TtsVendor {
        self.tts.vendor()
    }

    /// The speech-synthesis model in use
    #[must_use]
    pub fn tts_model(&self) -> &str {
        self.tts.model()
    }

    /// The voice used when requests do not name one
    #[must_use]
    pub fn tts_voice(&self) -> &str {
        self.tts.default_voice()
    }

    /// Current cache counters
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Generate text, serving repeats from the cache
    #[instrument(skip(self, request), fields(vendor = %self.llm.vendor()))]
    pub async fn handle_generate(
        &self,
        request: GenerationRequest,
    ) -> Result<Cached<GenerationResult>, GatewayError> {
        if !request.has_prompt() {
            return Err(GatewayError::InvalidRequest("prompt is required".to_string()));
        }

        let key = cache_key::generation_key(self.llm.vendor(), &request);
        if let Some(hit) = self.cache_lookup::<GenerationResult>(&key).await {
            return Ok(Cached { value: hit, cached: true });
        }

        let result = self.llm.generate(request).await?;
        self.cache_store(&key, &result).await;
        Ok(Cached { value: result, cached: false })
    }

    /// Synthesize speech, serving repeats from the cache
    #[instrument(skip(self, request), fields(vendor = %self.tts.vendor()))]
    pub async fn handle_speak(
        &self,
        request: SpeechRequest,
    ) -> Result<Cached<SpeechResult>, GatewayError> {
        if !request.has_text() {
            return Err(GatewayError::InvalidRequest("text is required".to_string()));
        }

        let key = cache_key::speech_key(self.tts.vendor(), &request);
        if let Some(hit) = self.cache_lookup::<SpeechResult>(&key).await {
            return Ok(Cached { value: hit, cached: true });
        }

        let result = self.tts.synthesize(request).await?;
        self.cache_store(&key, &result).await;
        Ok(Cached { value: result, cached: false })
    }

    async fn cache_lookup<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(key, error = %err, "cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn cache_store<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(err) = self.cache.set(key, value, self.ttl).await {
            warn!(key, error = %err, "cache store failed, result served uncached");
        }
    }
}
