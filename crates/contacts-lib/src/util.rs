//! ID generation.
//!
//! IDs look like `<prefix>-<hash>`, where hash is lowercase base36 taken from
//! a SHA256 of the seed text, creation time and a nonce. The hash grows with
//! the collection so collisions stay unlikely; actual collisions are retried
//! against the caller's `exists` check.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

const MIN_HASH_LENGTH: usize = 3;
const MAX_HASH_LENGTH: usize = 8;
const FALLBACK_HASH_LENGTH: usize = 12;
const MAX_COLLISION_PROB: f64 = 0.25;

/// Produces unique ids for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    prefix: String,
}

impl IdGenerator {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generator for contact ids (`ct-...`).
    #[must_use]
    pub fn contacts() -> Self {
        Self::new("ct")
    }

    /// Generator for interaction ids (`ix-...`).
    #[must_use]
    pub fn interactions() -> Self {
        Self::new("ix")
    }

    /// Generate an id that `exists` reports as free.
    ///
    /// `count` is the current collection size and picks the starting hash
    /// length.
    pub fn generate<F>(&self, seed: &str, created_at: DateTime<Utc>, count: usize, exists: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let mut length = optimal_hash_length(count);

        loop {
            for nonce in 0..10 {
                let id = self.candidate(seed, created_at, nonce, length);
                if !exists(&id) {
                    return id;
                }
            }

            if length < MAX_HASH_LENGTH {
                length += 1;
                continue;
            }

            let mut nonce = 10u32;
            loop {
                let id = self.candidate(seed, created_at, nonce, FALLBACK_HASH_LENGTH);
                if !exists(&id) {
                    return id;
                }
                nonce += 1;
                if nonce > 1000 {
                    return format!("{id}{nonce}");
                }
            }
        }
    }

    fn candidate(&self, seed: &str, created_at: DateTime<Utc>, nonce: u32, length: usize) -> String {
        let input = format!(
            "{}|{}|{}",
            seed,
            created_at.timestamp_nanos_opt().unwrap_or(0),
            nonce
        );
        format!("{}-{}", self.prefix, compute_id_hash(&input, length))
    }
}

/// Shortest hash length whose birthday-collision probability stays under
/// `MAX_COLLISION_PROB` for `count` ids.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn optimal_hash_length(count: usize) -> usize {
    let n = count as f64;
    for len in MIN_HASH_LENGTH..=MAX_HASH_LENGTH {
        let space = 36_f64.powi(len as i32);
        let prob = 1.0 - (-n * n / (2.0 * space)).exp();
        if prob < MAX_COLLISION_PROB {
            return len;
        }
    }
    MAX_HASH_LENGTH
}

fn compute_id_hash(input: &str, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();

    let mut num = 0u64;
    for &byte in result.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let encoded = base36_encode(num);
    let padded = if encoded.len() < length {
        format!("{encoded:0>length$}")
    } else {
        encoded
    };
    padded.chars().take(length).collect()
}

#[allow(clippy::cast_possible_truncation)]
fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.into_iter().rev().collect()
}
