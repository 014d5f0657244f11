use zeroize::Zeroize;

use crate::blowfish_consts::{P_ARRAY, S_BOXES};

const ROUNDS: usize = 16;

/// Blowfish subkeys: the P-array and the four S-boxes.
///
/// Each hash computation builds its own state, mutates it during the key
/// schedule and drops it at the end. The words are wiped on drop.
#[derive(Clone)]
pub struct CipherState {
    pub(crate) p: [u32; ROUNDS + 2],
    pub(crate) s: [[u32; 256]; 4],
}

impl CipherState {
    /// The unkeyed state, seeded from the digits of pi.
    pub fn initialize() -> Self {
        CipherState {
            p: P_ARRAY,
            s: S_BOXES,
        }
    }

    #[inline(always)]
    fn round(&self, x: u32) -> u32 {
        let [a, b, c, d] = x.to_be_bytes();
        let h = self.s[0][usize::from(a)].wrapping_add(self.s[1][usize::from(b)]);
        (h ^ self.s[2][usize::from(c)]).wrapping_add(self.s[3][usize::from(d)])
    }

    /// Encrypts one 64-bit block given as its two big-endian halves.
    pub fn encrypt_block(&self, mut l: u32, mut r: u32) -> (u32, u32) {
        for i in (0..ROUNDS).step_by(2) {
            l ^= self.p[i];
            r ^= self.round(l);
            r ^= self.p[i + 1];
            l ^= self.round(r);
        }

        l ^= self.p[ROUNDS];
        r ^= self.p[ROUNDS + 1];

        (r, l)
    }
}

impl Drop for CipherState {
    fn drop(&mut self) {
        self.p.zeroize();
        for sbox in self.s.iter_mut() {
            sbox.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CipherState;

    #[test]
    fn initial_state_holds_the_digits_of_pi() {
        let state = CipherState::initialize();
        assert_eq!(state.p[0], 0x243f6a88);
        assert_eq!(state.p[17], 0x8979fb1b);
        assert_eq!(state.s[0][0], 0xd1310ba6);
        assert_eq!(state.s[0][255], 0x6e85076a);
        assert_eq!(state.s[1][0], 0x4b7a70e9);
        assert_eq!(state.s[3][255], 0x3ac372e6);
    }

    #[test]
    fn matches_the_reference_blowfish_cipher() {
        use ::blowfish::Blowfish;

        let ours = CipherState::initialize();
        let theirs = Blowfish::bc_init_state();
        for &(l, r) in &[(0, 0), (0x6518a1f5, 0xc8d9b63c), (u32::MAX, 1)] {
            let (el, er) = ours.encrypt_block(l, r);
            assert_eq!([el, er], theirs.bc_encrypt([l, r]));
        }
    }

    #[test]
    fn encryption_is_deterministic() {
        let state = CipherState::initialize();
        assert_eq!(state.encrypt_block(1, 2), state.encrypt_block(1, 2));
        assert_ne!(state.encrypt_block(1, 2), (1, 2));
    }
}
