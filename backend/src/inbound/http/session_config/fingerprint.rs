//! Session key fingerprints for startup logs.
//!
//! Operators compare the fingerprint across replicas to confirm they share a
//! key; the key material itself never reaches the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of the SHA-256 digest of the signing key, as lowercase
/// hex.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use grievance_backend::inbound::http::session_config::key_fingerprint;
///
/// let key = Key::derive_from(&[7; 64]);
/// assert_eq!(key_fingerprint(&key), key_fingerprint(&key.clone()));
/// assert_eq!(key_fingerprint(&key).len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_short_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[rstest]
    fn fingerprint_matches_hex_of_digest_prefix() {
        let key = Key::derive_from(&[b'a'; 64]);
        let digest = Sha256::digest(key.signing());
        let expected: String = digest
            .iter()
            .take(FINGERPRINT_BYTES)
            .map(|byte| format!("{byte:02x}"))
            .collect();
        assert_eq!(key_fingerprint(&key), expected);
    }

    #[rstest]
    fn distinct_keys_have_distinct_fingerprints() {
        let first = Key::derive_from(&[b'a'; 64]);
        let second = Key::derive_from(&[b'b'; 64]);
        assert_ne!(key_fingerprint(&first), key_fingerprint(&second));
    }
}
