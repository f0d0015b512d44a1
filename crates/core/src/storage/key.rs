//! Object key generation.
//!
//! Keys are `{unix_millis}_{suffix}.{extension}` where the suffix is drawn
//! from a base-36 alphabet. Collisions are not checked up front; the upload
//! itself refuses to overwrite an existing key.

use chrono::Utc;
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces a fresh object key for every upload.
pub trait ObjectKeyGenerator: Send + Sync {
    /// Generate the next key.
    fn generate(&self) -> String;
}

/// Time-plus-random key generator.
#[derive(Debug, Clone)]
pub struct TimestampKeyGenerator {
    extension: String,
    suffix_len: usize,
}

impl TimestampKeyGenerator {
    /// Default random suffix length.
    pub const DEFAULT_SUFFIX_LEN: usize = 8;

    /// Create a generator producing keys with the given file extension.
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            suffix_len: Self::DEFAULT_SUFFIX_LEN,
        }
    }

    /// Set the random suffix length.
    #[must_use]
    pub fn with_suffix_len(mut self, len: usize) -> Self {
        self.suffix_len = len;
        self
    }
}

impl Default for TimestampKeyGenerator {
    fn default() -> Self {
        Self::new("jpg")
    }
}

impl ObjectKeyGenerator for TimestampKeyGenerator {
    fn generate(&self) -> String {
        format!(
            "{}_{}.{}",
            Utc::now().timestamp_millis(),
            random_suffix(self.suffix_len),
            self.extension
        )
    }
}

/// Random lowercase base-36 string of `len` characters.
fn random_suffix(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn split_key(key: &str) -> (&str, &str, &str) {
        let (stem, extension) = key.rsplit_once('.').expect("key has an extension");
        let (millis, suffix) = stem.split_once('_').expect("key has a separator");
        (millis, suffix, extension)
    }

    #[test]
    fn test_default_key_shape() {
        let before = Utc::now().timestamp_millis();
        let key = TimestampKeyGenerator::default().generate();
        let after = Utc::now().timestamp_millis();

        let (millis, suffix, extension) = split_key(&key);
        let millis: i64 = millis.parse().expect("numeric timestamp");
        assert!((before..=after).contains(&millis));
        assert_eq!(suffix.len(), TimestampKeyGenerator::DEFAULT_SUFFIX_LEN);
        assert_eq!(extension, "jpg");
    }

    #[test]
    fn test_keys_differ_within_same_millisecond() {
        let keys = TimestampKeyGenerator::default();
        let generated: HashSet<String> = (0..256).map(|_| keys.generate()).collect();
        assert_eq!(generated.len(), 256);
    }

    proptest! {
        #[test]
        fn prop_suffix_is_lowercase_base36(len in 1usize..32) {
            let key = TimestampKeyGenerator::new("png").with_suffix_len(len).generate();
            let (millis, suffix, extension) = split_key(&key);

            prop_assert!(millis.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(suffix.len(), len);
            prop_assert!(suffix.bytes().all(|b| ALPHABET.contains(&b)));
            prop_assert_eq!(extension, "png");
        }
    }
}
