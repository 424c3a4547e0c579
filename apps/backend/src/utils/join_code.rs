//! Join codes for games.
//!
//! Codes are 6 characters of Crockford's Base32 alphabet, so they can be read
//! aloud and typed on a phone without ambiguous glyphs.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
pub const JOIN_CODE_LEN: usize = 6;

/// Generate a join code from the thread-local CSPRNG.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..JOIN_CODE_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Canonicalise user input: uppercase, drop separators, fold I/L to 1 and O to 0.
///
/// Returns `None` if anything outside the alphabet remains.
pub fn normalize_join_code(input: &str) -> Option<String> {
    let mut out = String::with_capacity(JOIN_CODE_LEN);
    for ch in input.chars() {
        let ch = match ch.to_ascii_uppercase() {
            '-' | ' ' => continue,
            'I' | 'L' => '1',
            'O' => '0',
            other => other,
        };
        if !ch.is_ascii() || !CROCKFORD.contains(&(ch as u8)) {
            return None;
        }
        out.push(ch);
    }
    (out.len() == JOIN_CODE_LEN).then_some(out)
}
