//! bcrypt's radix-64 text encoding.
//!
//! bcrypt uses the same bit layout as standard Base64 without padding, only
//! with a different alphabet. Bytes are encoded with the standard alphabet and
//! then translated character by character, and the other way round for
//! decoding.

use std::collections::HashMap;

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine};
use once_cell::sync::Lazy;

use crate::errors::{BcryptError, BcryptResult};
use crate::pairs::zip_chars;

pub const BCRYPT_ALPHABET: &str =
    "./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const STANDARD_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard alphabet, no padding. The unused low bits of a final partial
/// group are ignored when decoding: a 22 character salt carries 132 bits for
/// 128 bits of payload.
const STANDARD_NO_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

static TO_BCRYPT: Lazy<HashMap<char, char>> =
    Lazy::new(|| table(STANDARD_ALPHABET, BCRYPT_ALPHABET));
static TO_STANDARD: Lazy<HashMap<char, char>> =
    Lazy::new(|| table(BCRYPT_ALPHABET, STANDARD_ALPHABET));

fn table(from: &str, to: &str) -> HashMap<char, char> {
    zip_chars(from, to)
        .expect("both alphabets have 64 characters")
        .into_iter()
        .collect()
}

fn translate(input: &str, table: &HashMap<char, char>) -> BcryptResult<String> {
    input
        .chars()
        .map(|c| {
            table
                .get(&c)
                .copied()
                .ok_or(BcryptError::InvalidRadix64Char(c))
        })
        .collect()
}

/// Rewrites standard Base64 text (without `=` padding) in the bcrypt alphabet.
pub fn to_bcrypt_alphabet(standard: &str) -> BcryptResult<String> {
    translate(standard, &TO_BCRYPT)
}

/// Rewrites bcrypt radix-64 text in the standard Base64 alphabet.
pub fn to_standard_alphabet(bcrypt: &str) -> BcryptResult<String> {
    translate(bcrypt, &TO_STANDARD)
}

/// Encodes bytes as bcrypt radix-64 text.
pub fn encode(bytes: &[u8]) -> String {
    let standard = STANDARD_NO_PAD.encode(bytes);
    // Base64 output only ever uses the standard alphabet
    standard.chars().map(|c| TO_BCRYPT[&c]).collect()
}

/// Decodes bcrypt radix-64 text into `output`, returning the number of bytes
/// written.
pub fn decode_into(text: &str, output: &mut [u8]) -> BcryptResult<usize> {
    let standard = to_standard_alphabet(text)?;
    Ok(STANDARD_NO_PAD.decode_slice(standard, output)?)
}
