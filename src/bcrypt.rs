use crate::blowfish::CipherState;

/// The plaintext encrypted by bcrypt, as six big-endian words.
const MAGIC: &[u8; 24] = b"OrpheanBeholderScryDoubt";

/// Reads big-endian words from `bytes`, wrapping around at the end.
struct WordCycle<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> WordCycle<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        WordCycle { bytes, index: 0 }
    }

    fn next_word(&mut self) -> u32 {
        let mut word = 0;
        for _ in 0..4 {
            word = (word << 8) | u32::from(self.bytes[self.index]);
            self.index = (self.index + 1) % self.bytes.len();
        }
        word
    }
}

/// The Blowfish key schedule, with bcrypt's optional salt mixing.
///
/// With an empty `salt` this is the plain Blowfish expansion. Otherwise every
/// block is XORed with the next 64 bits of the salt before it is encrypted.
pub fn expand_key(state: &mut CipherState, salt: &[u8], key: &[u8]) {
    if !key.is_empty() {
        let mut key_words = WordCycle::new(key);
        for p in state.p.iter_mut() {
            *p ^= key_words.next_word();
        }
    }

    let mut salt_words = if salt.is_empty() {
        None
    } else {
        Some(WordCycle::new(salt))
    };
    let mut l = 0;
    let mut r = 0;

    for i in (0..state.p.len()).step_by(2) {
        (l, r) = next_block(state, &mut salt_words, l, r);
        state.p[i] = l;
        state.p[i + 1] = r;
    }

    for sbox in 0..state.s.len() {
        for i in (0..256).step_by(2) {
            (l, r) = next_block(state, &mut salt_words, l, r);
            state.s[sbox][i] = l;
            state.s[sbox][i + 1] = r;
        }
    }
}

fn next_block(
    state: &CipherState,
    salt_words: &mut Option<WordCycle>,
    mut l: u32,
    mut r: u32,
) -> (u32, u32) {
    if let Some(words) = salt_words {
        l ^= words.next_word();
        r ^= words.next_word();
    }
    state.encrypt_block(l, r)
}

/// Eks-Blowfish: key the cipher with `key` and `salt`, then rekey it
/// `2^cost` times, alternating between the key and the salt.
///
/// Panics if `cost` is 32 or more.
pub fn setup(cost: u32, salt: &[u8; 16], key: &[u8]) -> CipherState {
    assert!(cost < 32);
    let mut state = CipherState::initialize();

    expand_key(&mut state, salt, key);
    for _ in 0..1u64 << cost {
        expand_key(&mut state, &[], key);
        expand_key(&mut state, &[], salt);
    }

    state
}

/// Raw bcrypt: returns the 24 byte ciphertext of the magic string under the
/// state derived from `cost`, `salt` and `password`.
///
/// `password` is used as is; callers append the NUL terminator and cap it at
/// 72 bytes.
pub fn bcrypt(cost: u32, salt: [u8; 16], password: &[u8]) -> [u8; 24] {
    assert!(!password.is_empty() && password.len() <= 72);

    let state = setup(cost, &salt, password);

    let mut ctext = [0u32; 6];
    for (word, chunk) in ctext.iter_mut().zip(MAGIC.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in (0..ctext.len()).step_by(2) {
        for _ in 0..64 {
            let (l, r) = state.encrypt_block(ctext[i], ctext[i + 1]);
            ctext[i] = l;
            ctext[i + 1] = r;
        }
    }

    let mut output = [0; 24];
    for (chunk, word) in output.chunks_exact_mut(4).zip(ctext.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    output
}
