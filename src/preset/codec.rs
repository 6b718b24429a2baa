//! Compact, URL-and-storage-safe encoding of a filter state.
//!
//! Tokens are JSON serialized then base64-encoded with the URL-safe
//! alphabet, unpadded. Decoding is total: malformed or stale tokens from
//! shared links are expected input, so every rejection is `None` and the
//! caller degrades to "no filters applied".

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::types::FilterState;

/// Tokens longer than this are rejected before any decoding work.
pub const MAX_TOKEN_LEN: usize = 2000;

/// Encode a filter state into a URL-safe token. Enum fields make invalid
/// type/sort values unrepresentable; the only failure mode is JSON
/// serialization itself.
pub fn encode(state: &FilterState) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(state)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token back into a filter state. Rejects oversized tokens,
/// characters outside the safe alphabet, undecodable payloads, and schema
/// violations (unknown type/sort values). Never panics.
#[must_use]
pub fn decode(token: &str) -> Option<FilterState> {
    if token.is_empty() || token.len() > MAX_TOKEN_LEN {
        return None;
    }
    if !token.bytes().all(is_safe_alphabet) {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(token).ok()?;
    serde_json::from_slice(&payload).ok()
}

/// Compose a shareable URL carrying the encoded state as a `filters` query
/// parameter. On encode failure the base URL comes back unchanged.
#[must_use]
pub fn shareable_url(state: &FilterState, base_url: &str) -> String {
    match encode(state) {
        Ok(token) => format!("{}/?filters={token}", base_url.trim_end_matches('/')),
        Err(_) => base_url.to_string(),
    }
}

fn is_safe_alphabet(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}
