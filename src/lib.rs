//! Hash and verify passwords with bcrypt
//!
//! Everything below the string format is implemented here: the Blowfish
//! cipher, the Eks-Blowfish key schedule and bcrypt's radix-64 alphabet.
//!
//! ```
//! use bcrypt_radix::{check, hash, salt, Password};
//!
//! let password = Password::new("hunter2").unwrap();
//! let hashed = hash(&password, &salt(4, None).unwrap()).unwrap();
//! assert!(check(&password, &hashed).unwrap());
//! ```

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

mod bcrypt;
mod blowfish;
mod blowfish_consts;
mod bounded;
mod errors;
mod pairs;
pub mod radix64;
mod salt;

pub use crate::bcrypt::{bcrypt, expand_key, setup};
pub use crate::blowfish::CipherState;
pub use crate::bounded::{BoundedString, EncodedHash, EncodedSalt, Password};
pub use crate::errors::{BcryptError, BcryptResult};
pub use crate::pairs::zip_chars;
pub use crate::salt::{salt, ParsedSalt, Version, ENCODED_SALT_LEN};

// Cost constants
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;
pub const DEFAULT_COST: u32 = 10;

/// Length of a complete hash: the encoded salt followed by 31 digest characters.
pub const ENCODED_HASH_LEN: usize = 60;

/// Runs bcrypt over the NUL terminated password, capped at 72 bytes.
fn _hash_password(password: &[u8], cost: u32, salt: [u8; 16]) -> [u8; 24] {
    let mut truncated = [0; 72];
    let capped_len = password.len().min(truncated.len());

    truncated[..capped_len].copy_from_slice(&password[..capped_len]);

    let borrowed_len = (capped_len + 1).min(truncated.len());

    let output = bcrypt::bcrypt(cost, salt, &truncated[..borrowed_len]);

    truncated.zeroize();

    output
}

/// Hashes `password` with the settings of `salt`.
///
/// `salt` is an encoded salt such as the output of [`salt`], or a complete
/// hash, in which case only its leading 29 characters are used. The minor
/// version of `salt` is carried over to the result.
pub fn hash(password: &Password, salt: &str) -> BcryptResult<EncodedHash> {
    let parsed = ParsedSalt::parse(salt)?;

    let digest = _hash_password(password.as_bytes(), parsed.cost(), *parsed.salt());

    // remember to remove the last byte
    EncodedHash::new(format!("{}{}", parsed, radix64::encode(&digest[..23])))
}

/// Hashes `password` under a fresh random salt.
pub fn hash_with_cost(password: &Password, cost: u32) -> BcryptResult<EncodedHash> {
    hash(password, &salt(cost, None)?)
}

/// Verify that a password is equivalent to the hash provided
pub fn check(password: &Password, stored_hash: &EncodedHash) -> BcryptResult<bool> {
    check_with(password, stored_hash, hash)
}

/// Same as [`check`], with the hashing step supplied by the caller.
///
/// `hash_fn` receives the password and the salt part of `stored_hash`; its
/// output must equal `stored_hash` for the password to be accepted.
pub fn check_with<F>(
    password: &Password,
    stored_hash: &EncodedHash,
    hash_fn: F,
) -> BcryptResult<bool>
where
    F: Fn(&Password, &str) -> BcryptResult<EncodedHash>,
{
    let stored = stored_hash.as_str();
    let salt = stored.get(..ENCODED_SALT_LEN).unwrap_or(stored);

    let generated = hash_fn(password, salt)?;

    Ok(generated.as_bytes().ct_eq(stored.as_bytes()).into())
}

#[cfg(test)]
mod tests {
    use super::{
        check, check_with, hash, hash_with_cost, salt, BcryptError, EncodedHash, ParsedSalt,
        Password, Version, ENCODED_HASH_LEN,
    };
    use std::cell::RefCell;
    use std::thread;

    fn pw(text: &str) -> Password {
        Password::new(text).unwrap()
    }

    fn stored(text: &str) -> EncodedHash {
        EncodedHash::new(text).unwrap()
    }

    #[test]
    fn known_vectors() {
        let vectors = [
            (
                "test",
                "$2a$06$taUt9mNQN/OEJqHUQw7hEu",
                "$2a$06$taUt9mNQN/OEJqHUQw7hEuHmqdNbKkdT1LC54VcV4TLM6ctI6XI4C",
            ),
            (
                "Hello",
                "$2a$04$Ple0QwxiRAJSclOT8yq4r.",
                "$2a$04$Ple0QwxiRAJSclOT8yq4r.SuhyoAaZtEOS64rgLQRsVaJJ3UnXT4u",
            ),
            (
                "",
                "$2a$06$DCq7YPn5Rq63x1Lad4cll.",
                "$2a$06$DCq7YPn5Rq63x1Lad4cll.TV4S6ytwfsfvkgY8jIucDrjc8deX1s.",
            ),
            (
                "a",
                "$2a$06$m0CrhHm10qJ3lXRY.5zDGO",
                "$2a$06$m0CrhHm10qJ3lXRY.5zDGO3rS2KdeeWLuGmsfGlMfOxih58VYVfxe",
            ),
        ];

        for &(password, salt, expected) in &vectors {
            let hashed = hash(&pw(password), salt).unwrap();
            assert_eq!(hashed, expected);
            assert_eq!(hashed.len(), ENCODED_HASH_LEN);
            assert!(check(&pw(password), &hashed).unwrap());
            assert!(!check(&pw("wrongPassword"), &hashed).unwrap());
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let salt = salt(4, None).unwrap();
        let first = hash(&pw("testpassword"), &salt).unwrap();
        let second = hash(&pw("testpassword"), &salt).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(salt.as_str()));
    }

    #[test]
    fn round_trips_through_a_random_salt() {
        let hashed = hash_with_cost(&pw("correct horse battery staple"), 5).unwrap();
        assert!(hashed.starts_with("$2b$05$"));
        assert!(check(&pw("correct horse battery staple"), &hashed).unwrap());
        for wrong in &[
            "",
            "correct horse battery stapl",
            "Correct horse battery staple",
        ] {
            assert!(!check(&pw(wrong), &hashed).unwrap());
        }
    }

    #[test]
    fn keeps_the_minor_version_of_the_salt() {
        let digest = "kqsx/caaQ2ooGaGUPBIUMKYjFvRA7Wi";
        for version in &[Version::TwoA, Version::TwoB, Version::TwoX, Version::TwoY] {
            let salt = format!("${}$04$......................", version);
            let hashed = hash(&pw("hunter2"), &salt).unwrap();
            assert_eq!(hashed.as_str(), format!("{}{}", salt, digest));
        }
    }

    #[test]
    fn accepts_a_full_hash_as_salt() {
        let full = "$2a$04$Ple0QwxiRAJSclOT8yq4r.SuhyoAaZtEOS64rgLQRsVaJJ3UnXT4u";
        assert_eq!(hash(&pw("Hello"), full).unwrap(), full);
    }

    #[test]
    fn can_verify_hash_generated_from_some_online_tool() {
        let hash = stored("$2a$04$UuTkLRZZ6QofpDOlMz32MuuxEHA43WOemOYHPz6.SjsVsyO1tDU96");
        assert!(check(&pw("password"), &hash).unwrap());
    }

    #[test]
    fn can_verify_hash_generated_from_python() {
        let hash = stored("$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie");
        assert!(check(&pw("correctbatteryhorsestapler"), &hash).unwrap());
    }

    #[test]
    fn can_verify_hash_generated_from_node() {
        let hash = stored("$2a$04$n4Uy0eSnMfvnESYL.bLwuuj0U/ETSsoTpRT9GVk5bektyVVa5xnIi");
        assert!(check(&pw("correctbatteryhorsestapler"), &hash).unwrap());
    }

    #[test]
    fn a_wrong_password_is_false() {
        let hash = stored("$2b$04$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie");
        assert!(!check(&pw("wrong"), &hash).unwrap());
    }

    #[test]
    fn full_length_passwords_lose_the_terminator() {
        // python: bcrypt.hashpw(b"x" * 100, b"$2a$05$...............................")
        let hash = stored("$2a$05$......................YgIDy4hFBdVlc/6LHnD9mX488r9cLd2");
        assert!(check(&pw(&"x".repeat(72)), &hash).unwrap());
        assert!(!check(&pw(&"x".repeat(71)), &hash).unwrap());
    }

    #[test]
    fn passwords_over_72_bytes_cannot_be_built() {
        assert!(matches!(
            Password::new("x".repeat(73)),
            Err(BcryptError::BoundedLengthExceeded { max: 72, len: 73 })
        ));
    }

    #[test]
    fn allow_null_bytes() {
        let salt = salt(4, Some([0x11; 16])).unwrap();
        let hashed = hash(&pw("\0"), &salt).unwrap();
        assert_eq!(
            hashed,
            "$2b$04$CPCPCPCPCPCPCPCPCPCPCOWBtSCRfqPTnYaIRLwup6e8cH66p1nI6"
        );

        // bcrypt should consider all of these distinct:
        let test_passwords = [
            "\0",
            "passw0rd\0",
            "password\0with tail",
            "\0passw0rd",
            "a",
            "a\0",
            "a\0b\0",
        ];
        let hashes: Vec<_> = test_passwords
            .iter()
            .map(|p| hash(&pw(p), &salt).unwrap())
            .collect();

        for (i, p1) in test_passwords.iter().enumerate() {
            for (j, hashed) in hashes.iter().enumerate() {
                assert_eq!(
                    check(&pw(p1), hashed).unwrap(),
                    i == j,
                    "{:?} vs {:?}",
                    p1,
                    hashed
                );
            }
        }

        // this is a quirk of the bcrypt algorithm: passwords that are entirely null
        // bytes hash to the same value, even if they are different lengths:
        assert!(check(&pw("\0\0\0\0\0\0\0\0"), &hashes[0]).unwrap());
    }

    #[test]
    fn invalid_salt_version() {
        let err = hash(&pw("testpassword"), "*1b$10$salt_string_that_is_22").unwrap_err();
        assert!(matches!(err, BcryptError::InvalidSaltVersion));
        assert_eq!(err.to_string(), "Invalid salt version");
    }

    #[test]
    fn invalid_minor_version() {
        let err = hash(&pw("testpassword"), "$2c$10$salt_string_that_is_22").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid salt format. Salt must match BCrypt format."
        );
    }

    #[test]
    fn rounds_not_a_number() {
        let err = hash(&pw("testpassword"), "$2b$xx$salt_stri").unwrap_err();
        assert!(matches!(err, BcryptError::InvalidSaltFormat));
    }

    #[test]
    fn missing_delimiter() {
        assert!(matches!(
            ParsedSalt::parse("$2b10$salt_string_that_is_22_chars"),
            Err(BcryptError::InvalidSalt)
        ));
    }

    #[test]
    fn check_uses_the_supplied_hash_function() {
        let mock = stored("$2b$10$salt_string_that_is_22_chars");
        let seen = RefCell::new(String::new());

        let matched = check_with(&pw("testpassword"), &mock, |_, salt| {
            seen.replace(salt.to_string());
            Ok(mock.clone())
        });
        assert!(matched.unwrap());
        assert_eq!(seen.into_inner(), "$2b$10$salt_string_that_is_22");

        let different = check_with(&pw("testpassword"), &mock, |_, _| {
            EncodedHash::new("different_hash")
        });
        assert!(!different.unwrap());
    }

    #[test]
    fn check_propagates_malformed_hashes() {
        let result = check(
            &pw("testpassword"),
            &stored("$2c$10$salt_string_that_is_22_chars"),
        );
        assert!(matches!(result, Err(BcryptError::InvalidSaltFormat)));

        // there is another $ in the salt part
        let result = check(
            &pw("correctbatteryhorsestapler"),
            &stored("$2a$04$n4Uy0eSnMfv$ESYL.bLwuuj0U/ETSsoTpRT9GVk5bektyVVa5xnIi"),
        );
        assert!(matches!(result, Err(BcryptError::InvalidRadix64Char('$'))));

        let result = check(&pw(""), &stored("$2a$"));
        assert!(matches!(result, Err(BcryptError::InvalidSalt)));
    }

    #[test]
    fn truncated_hash_does_not_match() {
        let result = check(
            &pw("password"),
            &stored("$2a$04$UuTkLRZZ6QofpDOlMz32MuuxEHA43WOemOY"),
        );
        assert!(!result.unwrap());
    }

    #[test]
    fn does_no_error_on_char_boundary_splitting() {
        // Just checks that it does not panic
        let _ = check(
            &pw(""),
            &stored("$2a$04$OOOOOOOOOOOOOOOOOOOOOÂ£OOOOOOOOOOOOOOOOOOOOOOOOOO"),
        );
    }

    #[test]
    fn independent_hashes_run_in_parallel() {
        const SALT: &str = "$2a$04$Ple0QwxiRAJSclOT8yq4r.";

        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| hash(&pw("Hello"), SALT).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                "$2a$04$Ple0QwxiRAJSclOT8yq4r.SuhyoAaZtEOS64rgLQRsVaJJ3UnXT4u"
            );
        }
    }
}
