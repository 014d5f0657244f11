#![feature(test)]
extern crate bcrypt_radix;
extern crate test;

use bcrypt_radix::{check, hash, salt, EncodedSalt, Password, DEFAULT_COST};

static SALT: [u8; 16] = *b"hello world salt";

fn fixed_salt(cost: u32) -> EncodedSalt {
    salt(cost, Some(SALT)).unwrap()
}

#[bench]
fn bench_cost_4(b: &mut test::Bencher) {
    let password = Password::new("hunter2").unwrap();
    let salt = fixed_salt(4);
    b.iter(|| hash(&password, &salt));
}

#[bench]
fn bench_cost_10(b: &mut test::Bencher) {
    let password = Password::new("hunter2").unwrap();
    let salt = fixed_salt(10);
    b.iter(|| hash(&password, &salt));
}

#[bench]
fn bench_cost_default(b: &mut test::Bencher) {
    let password = Password::new("hunter2").unwrap();
    let salt = fixed_salt(DEFAULT_COST);
    b.iter(|| hash(&password, &salt));
}

#[bench]
fn bench_check_cost_4(b: &mut test::Bencher) {
    let password = Password::new("hunter2").unwrap();
    let hashed = hash(&password, &fixed_salt(4)).unwrap();
    b.iter(|| check(&password, &hashed));
}

#[bench]
fn bench_salt_generation(b: &mut test::Bencher) {
    b.iter(|| salt(DEFAULT_COST, None));
}
