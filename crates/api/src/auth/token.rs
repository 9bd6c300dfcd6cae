//! One-time magic-link tokens.
//!
//! Tokens are opaque random strings; only their SHA-256 hash is stored
//! server-side so a database leak does not compromise pending sign-ins.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random login token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext is
/// embedded in the emailed link; only the hash is persisted server-side.
pub fn generate_login_token() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    let plaintext = hex_encode(&bytes);
    let hash = hash_login_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a login token.
///
/// Use this to compare an incoming token against the stored hash.
pub fn hash_login_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
