//! Per-side series tokens.
//!
//! Tokens are 24-character strings over Crockford's Base32 alphabet, which
//! is URL-safe and avoids look-alike characters.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
const TOKEN_LEN: usize = 24;

/// Generate a random side token from the thread-local CSPRNG.
pub fn generate_side_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Generate the blue/red token pair for a new series; never equal.
pub fn generate_token_pair() -> (String, String) {
    let first = generate_side_token();
    let mut second = generate_side_token();
    while second == first {
        second = generate_side_token();
    }
    (first, second)
}
