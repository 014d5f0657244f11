#![no_main]
use bcrypt_radix::{check, EncodedHash, ParsedSalt, Password};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // high costs only make the fuzzer slow
    if matches!(ParsedSalt::parse(data), Ok(parsed) if parsed.cost() > 6) {
        return;
    }
    let password = Password::new("hunter2").unwrap();
    if let Ok(stored) = EncodedHash::new(data) {
        let _ = check(&password, &stored);
    }
});
