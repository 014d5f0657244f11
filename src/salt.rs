use core::{fmt, str::FromStr};

use crate::bounded::EncodedSalt;
use crate::errors::{BcryptError, BcryptResult};
use crate::{radix64, MAX_COST, MIN_COST};

/// Length of an encoded salt: `$2b$10$` followed by 22 radix-64 characters.
pub const ENCODED_SALT_LEN: usize = 29;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// BCrypt hash version
/// https://en.wikipedia.org/wiki/Bcrypt#Versioning_history
pub enum Version {
    TwoA,
    TwoX,
    TwoY,
    TwoB,
}

impl Version {
    pub fn as_static_str(self) -> &'static str {
        match self {
            Version::TwoA => "2a",
            Version::TwoB => "2b",
            Version::TwoX => "2x",
            Version::TwoY => "2y",
        }
    }

    fn from_minor(minor: u8) -> Option<Self> {
        match minor {
            b'a' => Some(Version::TwoA),
            b'b' => Some(Version::TwoB),
            b'x' => Some(Version::TwoX),
            b'y' => Some(Version::TwoY),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_static_str())
    }
}

/// The settings carried by an encoded salt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedSalt {
    version: Version,
    cost: u32,
    salt: [u8; 16],
}

impl ParsedSalt {
    /// Reads the leading `$2?$??$` + 22 character salt of `encoded`.
    ///
    /// Whatever follows the salt is ignored, so a full hash parses too.
    pub fn parse(encoded: &str) -> BcryptResult<Self> {
        let bytes = encoded.as_bytes();

        if bytes.len() < 7 || bytes[3] != b'$' || bytes[6] != b'$' {
            return Err(BcryptError::InvalidSalt);
        }

        if bytes[0] != b'$' || bytes[1] != b'2' {
            return Err(BcryptError::InvalidSaltVersion);
        }

        let version = Version::from_minor(bytes[2]).ok_or(BcryptError::InvalidSaltFormat)?;
        let cost = parse_cost(bytes[4], bytes[5]).ok_or(BcryptError::InvalidSaltFormat)?;

        let field = encoded
            .get(7..ENCODED_SALT_LEN)
            .ok_or(BcryptError::InvalidSalt)?;
        let mut salt = [0; 16];
        if radix64::decode_into(field, &mut salt)? != salt.len() {
            return Err(BcryptError::InvalidSalt);
        }

        Ok(ParsedSalt {
            version,
            cost,
            salt,
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Get the bcrypt cost
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Get the raw salt bytes
    pub fn salt(&self) -> &[u8; 16] {
        &self.salt
    }
}

fn parse_cost(tens: u8, ones: u8) -> Option<u32> {
    if !tens.is_ascii_digit() || !ones.is_ascii_digit() {
        return None;
    }
    let cost = u32::from(tens - b'0') * 10 + u32::from(ones - b'0');
    if (MIN_COST..=MAX_COST).contains(&cost) {
        Some(cost)
    } else {
        None
    }
}

impl FromStr for ParsedSalt {
    type Err = BcryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedSalt::parse(s)
    }
}

impl fmt::Display for ParsedSalt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Cost need to have a length of 2 so padding with a 0 if cost < 10
        write!(
            f,
            "${}${:02}${}",
            self.version,
            self.cost,
            radix64::encode(&self.salt)
        )
    }
}

/// Builds a `$2b$` salt for `cost`, drawing the salt bytes from the OS when
/// none are given.
pub fn salt(cost: u32, salt_bytes: Option<[u8; 16]>) -> BcryptResult<EncodedSalt> {
    if cost > MAX_COST {
        return Err(BcryptError::RoundsExceeded(cost));
    }
    if cost < MIN_COST {
        return Err(BcryptError::CostNotAllowed(cost));
    }

    let salt = match salt_bytes {
        Some(bytes) => bytes,
        None => {
            let mut bytes = [0; 16];
            getrandom::getrandom(&mut bytes)?;
            bytes
        }
    };

    let parsed = ParsedSalt {
        version: Version::TwoB,
        cost,
        salt,
    };
    EncodedSalt::new(parsed.to_string())
}
