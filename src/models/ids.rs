//! Identifier types and deterministic request keys.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// osu! user id.
pub type PlayerId = u64;

/// osu! beatmap (difficulty) id.
pub type BeatmapId = u64;

/// osu! multiplayer match id.
pub type MatchId = u64;

/// Tournament record id, as assigned by the persistence layer.
pub type TournamentId = u64;

/// A deterministic key derived from the identity of a computation's inputs.
///
/// The engine keeps no cache of its own; callers that memoize comparison
/// results key them on this value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Generate a key from input fields.
    /// Uses SHA256 and keeps the first 16 hex characters.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        let k1 = CacheKey::generate(&["111", "222", "0", "1"]);
        let k2 = CacheKey::generate(&["111", "222", "0", "1"]);
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_cache_key_field_boundaries_matter() {
        // "1|11" and "11|1" must not collide
        let k1 = CacheKey::generate(&["1", "11"]);
        let k2 = CacheKey::generate(&["11", "1"]);
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_cache_key_shape() {
        let key = CacheKey::generate(&["match"]);
        assert_eq!(key.as_str().len(), 16);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cache_key_display_and_debug() {
        let key = CacheKey::generate(&["match"]);
        assert_eq!(format!("{}", key), key.as_str());
        assert!(format!("{:?}", key).starts_with("CacheKey("));
    }
}
