extern crate bcrypt_radix;

use bcrypt_radix::{check, hash, salt, Password, DEFAULT_COST};

static SALT: [u8; 16] = *b"abcdefghijklmnop";

fn main() {
    let password = Password::new("hunter2").unwrap();
    let salt = salt(DEFAULT_COST, Some(SALT)).unwrap();
    let hashed = hash(&password, &salt).unwrap();
    println!("{}", hashed);
    let valid = check(&password, &hashed).unwrap();
    println!("{:?}", valid);
}
