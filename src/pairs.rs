use crate::errors::{BcryptError, BcryptResult};

/// Pairs up the characters of two strings index by index.
///
/// Both strings must hold the same number of characters; this is checked
/// before any pair is produced.
pub fn zip_chars(first: &str, second: &str) -> BcryptResult<Vec<(char, char)>> {
    let left = first.chars().count();
    let right = second.chars().count();
    if left != right {
        return Err(BcryptError::LengthMismatch { left, right });
    }

    Ok(first.chars().zip(second.chars()).collect())
}
