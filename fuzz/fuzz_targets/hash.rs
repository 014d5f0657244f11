#![no_main]
use bcrypt_radix::{hash, salt, Password};
use libfuzzer_sys::fuzz_target;

static SALT: [u8; 16] = *b"hello world salt";

fuzz_target!(|data: &str| {
    if let Ok(password) = Password::new(data) {
        let salt = salt(4, Some(SALT)).unwrap();
        let _ = hash(&password, &salt);
    }
});
