//! Personal API key generation and hashing.

use rand::Rng;

/// Length of the generated key string (alphanumeric characters).
pub const KEY_LENGTH: usize = 40;

/// Number of leading characters stored as a human-visible prefix.
pub const KEY_PREFIX_LENGTH: usize = 8;

/// A freshly generated key. Only `hash` and `prefix` are ever persisted.
pub struct GeneratedApiKey {
    pub plaintext: String,
    pub prefix: String,
    pub hash: String,
}

/// Generate a new random API key.
pub fn generate_api_key() -> GeneratedApiKey {
    let key: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect();

    GeneratedApiKey {
        prefix: key[..KEY_PREFIX_LENGTH].to_string(),
        hash: hash_api_key(&key),
        plaintext: key,
    }
}

/// SHA-256 hex digest of a plaintext key.
pub fn hash_api_key(key: &str) -> String {
    crate::hashing::sha256_hex(key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_has_expected_shape() {
        let key = generate_api_key();
        assert_eq!(key.plaintext.len(), KEY_LENGTH);
        assert!(key.plaintext.starts_with(&key.prefix));
        assert_eq!(key.hash, hash_api_key(&key.plaintext));
    }

    #[test]
    fn keys_are_unique() {
        assert_ne!(generate_api_key().plaintext, generate_api_key().plaintext);
    }
}
