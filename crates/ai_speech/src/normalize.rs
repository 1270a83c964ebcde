//! Audio payload normalization

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::SynthesisError;

/// Decode a base64 audio payload returned by a vendor
pub fn decode_base64_audio(encoded: &str) -> Result<Vec<u8>, SynthesisError> {
    BASE64
        .decode(encoded.trim())
        .map_err(|e| SynthesisError::MalformedResponse(format!("invalid base64 audio: {e}")))
}

/// MIME type for a vendor-facing format name, with a binary fallback for
/// names the bridge does not recognize
#[must_use]
pub fn mime_for_format(name: &str) -> &'static str {
    match name.to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}
