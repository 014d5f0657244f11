use core::fmt;
use std::error;

/// Library generic result type.
pub type BcryptResult<T> = Result<T, BcryptError>;

#[derive(Debug)]
/// All the errors we can encounter while generating salts, hashing and
/// verifying passwords
pub enum BcryptError {
    /// Two sequences that must be paired up have different lengths.
    LengthMismatch {
        left: usize,
        right: usize,
    },
    /// The character after the leading `$` is not the major version `2`.
    InvalidSaltVersion,
    /// Minor version or cost field of a salt is not acceptable.
    InvalidSaltFormat,
    /// The salt does not have the `$`-delimited layout at all.
    InvalidSalt,
    RoundsExceeded(u32),
    CostNotAllowed(u32),
    BoundedLengthExceeded {
        max: usize,
        len: usize,
    },
    InvalidRadix64Char(char),
    InvalidBase64(base64::DecodeSliceError),
    Rand(getrandom::Error),
}

macro_rules! impl_from_error {
    ($f: ty, $e: expr) => {
        impl From<$f> for BcryptError {
            fn from(f: $f) -> BcryptError {
                $e(f)
            }
        }
    };
}

impl_from_error!(base64::DecodeSliceError, BcryptError::InvalidBase64);
impl_from_error!(getrandom::Error, BcryptError::Rand);

impl fmt::Display for BcryptError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BcryptError::LengthMismatch { left, right } => {
                write!(f, "Strings must be of equal length ({} vs {})", left, right)
            }
            BcryptError::InvalidSaltVersion => write!(f, "Invalid salt version"),
            BcryptError::InvalidSaltFormat => {
                write!(f, "Invalid salt format. Salt must match BCrypt format.")
            }
            BcryptError::InvalidSalt => write!(f, "Invalid salt"),
            BcryptError::RoundsExceeded(_) => {
                write!(f, "log_rounds exceeds maximum ({})", crate::MAX_COST)
            }
            BcryptError::CostNotAllowed(ref cost) => write!(
                f,
                "Cost needs to be between {} and {}, got {}",
                crate::MIN_COST,
                crate::MAX_COST,
                cost
            ),
            BcryptError::BoundedLengthExceeded { max, len } => write!(
                f,
                "Text of {} bytes exceeds the maximum of {} bytes",
                len, max
            ),
            BcryptError::InvalidRadix64Char(c) => write!(f, "Invalid radix-64 character: {:?}", c),
            BcryptError::InvalidBase64(ref err) => write!(f, "Base64 error: {}", err),
            BcryptError::Rand(ref err) => write!(f, "Random source error: {}", err),
        }
    }
}

impl error::Error for BcryptError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            BcryptError::InvalidBase64(ref err) => Some(err),
            BcryptError::Rand(ref err) => Some(err),
            BcryptError::LengthMismatch { .. }
            | BcryptError::InvalidSaltVersion
            | BcryptError::InvalidSaltFormat
            | BcryptError::InvalidSalt
            | BcryptError::RoundsExceeded(_)
            | BcryptError::CostNotAllowed(_)
            | BcryptError::BoundedLengthExceeded { .. }
            | BcryptError::InvalidRadix64Char(_) => None,
        }
    }
}
