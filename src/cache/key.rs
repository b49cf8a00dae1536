//! Cache key generation using SHA-256 hashes

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Generate a deterministic cache key for a request.
///
/// The key is a SHA-256 hash over method, path, sorted query parameters, and
/// the serialized body (if any). Sorting makes the key independent of
/// parameter order.
pub fn cache_key(method: &str, path: &str, params: &[(&str, String)], body: Option<&Value>) -> String {
    let mut hasher = Sha256::new();

    hasher.update(method.as_bytes());
    hasher.update(b"|");
    hasher.update(path.as_bytes());
    hasher.update(b"|");

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort_by_key(|(k, _)| *k);

    for (k, v) in sorted_params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    hasher.update(b"|");
    if let Some(body) = body {
        // serde_json serialization of a Value is deterministic (map keys
        // keep insertion order), good enough for same-shaped request bodies.
        hasher.update(body.to_string().as_bytes());
    }

    format!("{:x}", hasher.finalize())
}
