use core::fmt;
use core::ops::Deref;

use crate::errors::{BcryptError, BcryptResult};

/// Text whose length in bytes never exceeds `MAX`.
///
/// The length is checked once, in [`BoundedString::new`]; the value is
/// read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundedString<const MAX: usize>(String);

/// A password, at most 72 bytes long.
pub type Password = BoundedString<72>;
/// An encoded salt such as `$2b$10$CPCPCPCPCPCPCPCPCPCPCO`.
pub type EncodedSalt = BoundedString<29>;
/// A complete bcrypt hash.
pub type EncodedHash = BoundedString<60>;

impl<const MAX: usize> BoundedString<MAX> {
    pub fn new<T: Into<String>>(text: T) -> BcryptResult<Self> {
        let text = text.into();
        if text.len() > MAX {
            return Err(BcryptError::BoundedLengthExceeded {
                max: MAX,
                len: text.len(),
            });
        }
        Ok(BoundedString(text))
    }

    /// The maximum length in bytes of this type.
    pub const fn max_len() -> usize {
        MAX
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const MAX: usize> Deref for BoundedString<MAX> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> AsRef<str> for BoundedString<MAX> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const MAX: usize> AsRef<[u8]> for BoundedString<MAX> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl<const MAX: usize> fmt::Display for BoundedString<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const MAX: usize> TryFrom<&str> for BoundedString<MAX> {
    type Error = BcryptError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl<const MAX: usize> TryFrom<String> for BoundedString<MAX> {
    type Error = BcryptError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl<const MAX: usize> PartialEq<str> for BoundedString<MAX> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl<const MAX: usize> PartialEq<&str> for BoundedString<MAX> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
