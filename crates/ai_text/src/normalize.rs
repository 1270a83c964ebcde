//! Vendor response normalization
//!
//! Every vendor has its own envelope; these helpers pull the generated
//! text out and fail loudly when the payload does not match. A 2xx with
//! an empty string is a valid (if useless) generation and passes through.

use serde::Deserialize;

use crate::error::GenerationError;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Extract `choices[0].message.content` from an OpenAI-style chat
/// completion body
pub fn chat_completion_text(body: &[u8]) -> Result<String, GenerationError> {
    let completion: ChatCompletion = serde_json::from_slice(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid completion body: {e}")))?;
    let text = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            GenerationError::MalformedResponse(
                "completion body has no choices[0].message.content".to_string(),
            )
        })?;
    Ok(text.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct OllamaGenerate {
    response: Option<String>,
}

/// Extract the `response` field from an Ollama `/api/generate` body
pub fn ollama_generate_text(body: &[u8]) -> Result<String, GenerationError> {
    let generate: OllamaGenerate = serde_json::from_slice(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid generate body: {e}")))?;
    let text = generate.response.ok_or_else(|| {
        GenerationError::MalformedResponse("generate body has no response field".to_string())
    })?;
    Ok(text.trim().to_string())
}
