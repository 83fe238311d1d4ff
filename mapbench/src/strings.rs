//! Random string generation for the harnesses.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// A random alphanumeric (`0-9A-Za-z`) string of exactly `len` bytes.
///
/// Generator state is the process-local, lazily-initialized one behind
/// [`thread_rng`]; callers that need reproducibility should build keys from
/// a seeded rng themselves.
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// `count` random alphanumeric strings of `len` bytes each.
pub fn random_strings(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_string(len)).collect()
}
