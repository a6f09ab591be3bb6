// Copyright (C) Microsoft Corporation. All rights reserved.

//! AES block cipher (FIPS-197).
//!
//! Byte-oriented implementation. The S-boxes are derived at compile time
//! from the field inverse and affine map rather than written out.

use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

use super::*;

const AES_BLOCK_SIZE: usize = 16;
const AES_MAX_ROUNDS: usize = 14;

const fn xtime(x: u8) -> u8 {
    (x << 1) ^ (((x >> 7) & 1) * 0x1b)
}

const fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            p ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    p
}

/// Multiplicative inverse in GF(2^8) as x^254; maps 0 to 0.
const fn ginv(x: u8) -> u8 {
    let mut result = 1u8;
    let mut base = x;
    let mut exp = 254u32;
    while exp != 0 {
        if exp & 1 != 0 {
            result = gmul(result, base);
        }
        base = gmul(base, base);
        exp >>= 1;
    }
    result
}

const fn sbox_entry(x: u8) -> u8 {
    let b = ginv(x);
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ 0x63
}

const SBOX: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = sbox_entry(i as u8);
        i += 1;
    }
    table
};

const INV_SBOX: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[SBOX[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// AES key schedule.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Aes {
    round_keys: [[u8; AES_BLOCK_SIZE]; AES_MAX_ROUNDS + 1],
    rounds: usize,
    key_len: usize,
}

impl Aes {
    /// Returns the number of rounds (10, 12 or 14).
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn expand(key: &[u8]) -> Self {
        let nk = key.len() / 4;
        let rounds = nk + 6;
        let total = 4 * (rounds + 1);

        let mut w = [[0u8; 4]; 4 * (AES_MAX_ROUNDS + 1)];
        for (i, word) in w.iter_mut().take(nk).enumerate() {
            word.copy_from_slice(&key[4 * i..4 * i + 4]);
        }

        let mut rcon = 1u8;
        for i in nk..total {
            let mut t = w[i - 1];
            if i % nk == 0 {
                t.rotate_left(1);
                for b in t.iter_mut() {
                    *b = SBOX[*b as usize];
                }
                t[0] ^= rcon;
                rcon = xtime(rcon);
            } else if nk > 6 && i % nk == 4 {
                for b in t.iter_mut() {
                    *b = SBOX[*b as usize];
                }
            }
            for j in 0..4 {
                w[i][j] = w[i - nk][j] ^ t[j];
            }
            t.zeroize();
        }

        let mut round_keys = [[0u8; AES_BLOCK_SIZE]; AES_MAX_ROUNDS + 1];
        for (r, rk) in round_keys.iter_mut().take(rounds + 1).enumerate() {
            for c in 0..4 {
                rk[4 * c..4 * c + 4].copy_from_slice(&w[4 * r + c]);
            }
        }
        w.zeroize();

        Self {
            round_keys,
            rounds,
            key_len: key.len(),
        }
    }

    fn add_round_key(state: &mut [u8; AES_BLOCK_SIZE], rk: &[u8; AES_BLOCK_SIZE]) {
        for (s, k) in state.iter_mut().zip(rk) {
            *s ^= k;
        }
    }

    fn sub_bytes(state: &mut [u8; AES_BLOCK_SIZE], table: &[u8; 256]) {
        for s in state.iter_mut() {
            *s = table[*s as usize];
        }
    }

    // State is column-major: byte (row r, column c) lives at r + 4c.
    fn shift_rows(state: &mut [u8; AES_BLOCK_SIZE]) {
        let old = *state;
        for c in 0..4 {
            for r in 0..4 {
                state[r + 4 * c] = old[r + 4 * ((c + r) % 4)];
            }
        }
    }

    fn inv_shift_rows(state: &mut [u8; AES_BLOCK_SIZE]) {
        let old = *state;
        for c in 0..4 {
            for r in 0..4 {
                state[r + 4 * ((c + r) % 4)] = old[r + 4 * c];
            }
        }
    }

    fn mix_columns(state: &mut [u8; AES_BLOCK_SIZE]) {
        for col in state.chunks_exact_mut(4) {
            let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
            col[0] = xtime(a0) ^ xtime(a1) ^ a1 ^ a2 ^ a3;
            col[1] = a0 ^ xtime(a1) ^ xtime(a2) ^ a2 ^ a3;
            col[2] = a0 ^ a1 ^ xtime(a2) ^ xtime(a3) ^ a3;
            col[3] = xtime(a0) ^ a0 ^ a1 ^ a2 ^ xtime(a3);
        }
    }

    fn inv_mix_columns(state: &mut [u8; AES_BLOCK_SIZE]) {
        for col in state.chunks_exact_mut(4) {
            let [a0, a1, a2, a3] = [col[0], col[1], col[2], col[3]];
            col[0] = gmul(a0, 14) ^ gmul(a1, 11) ^ gmul(a2, 13) ^ gmul(a3, 9);
            col[1] = gmul(a0, 9) ^ gmul(a1, 14) ^ gmul(a2, 11) ^ gmul(a3, 13);
            col[2] = gmul(a0, 13) ^ gmul(a1, 9) ^ gmul(a2, 14) ^ gmul(a3, 11);
            col[3] = gmul(a0, 11) ^ gmul(a1, 13) ^ gmul(a2, 9) ^ gmul(a3, 14);
        }
    }
}

impl Key for Aes {
    fn size(&self) -> usize {
        self.key_len
    }
}

impl BlockCipher for Aes {
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if !matches!(key.len(), 16 | 24 | 32) {
            tracing::error!(len = key.len(), "unsupported AES key length");
            return Err(CryptoError::UnsupportedAlgorithm);
        }
        tracing::debug!(bits = key.len() * 8, "AES key schedule");
        Ok(Self::expand(key))
    }

    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) {
        let mut state = [0u8; AES_BLOCK_SIZE];
        state.copy_from_slice(&input[..AES_BLOCK_SIZE]);

        Self::add_round_key(&mut state, &self.round_keys[0]);
        for round in 1..=self.rounds {
            Self::sub_bytes(&mut state, &SBOX);
            Self::shift_rows(&mut state);
            if round != self.rounds {
                Self::mix_columns(&mut state);
            }
            Self::add_round_key(&mut state, &self.round_keys[round]);
        }

        output[..AES_BLOCK_SIZE].copy_from_slice(&state);
        state.zeroize();
    }

    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) {
        let mut state = [0u8; AES_BLOCK_SIZE];
        state.copy_from_slice(&input[..AES_BLOCK_SIZE]);

        Self::add_round_key(&mut state, &self.round_keys[self.rounds]);
        for round in (0..self.rounds).rev() {
            Self::inv_shift_rows(&mut state);
            Self::sub_bytes(&mut state, &INV_SBOX);
            Self::add_round_key(&mut state, &self.round_keys[round]);
            if round != 0 {
                Self::inv_mix_columns(&mut state);
            }
        }

        output[..AES_BLOCK_SIZE].copy_from_slice(&state);
        state.zeroize();
    }
}
