// Copyright (C) Microsoft Corporation. All rights reserved.

//! DES and EDE triple DES.
//!
//! The round function uses the combined S-box/P-box tables and the
//! bit-sliced initial and final permutations of the classic
//! Outerbridge implementation. A key schedule holds 16 rounds of two
//! pre-shuffled 24-bit halves, in encryption or decryption order.

use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

use super::des_tables::*;
use super::*;

const DES_BLOCK_SIZE: usize = 8;
const DES_KEY_SIZE: usize = 8;
const SCHEDULE_WORDS: usize = 32;

type Schedule = [u32; SCHEDULE_WORDS];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Expands an 8-byte key into a round schedule for `dir`.
fn deskey(key: &[u8], dir: Direction) -> Schedule {
    let mut pc1m = [0u8; 56];
    let mut pcr = [0u8; 56];
    let mut kn = [0u32; SCHEDULE_WORDS];

    for (bit, &l) in pc1m.iter_mut().zip(PC1.iter()) {
        let l = l as usize;
        *bit = u8::from(key[l >> 3] & (0x80 >> (l & 7)) != 0);
    }

    for i in 0..16 {
        let m = match dir {
            Direction::Decrypt => (15 - i) << 1,
            Direction::Encrypt => i << 1,
        };
        let n = m + 1;
        let rot = TOTROT[i] as usize;

        for j in 0..28 {
            let l = j + rot;
            pcr[j] = if l < 28 { pc1m[l] } else { pc1m[l - 28] };
        }
        for j in 28..56 {
            let l = j + rot;
            pcr[j] = if l < 56 { pc1m[l] } else { pc1m[l - 28] };
        }
        for j in 0..24 {
            let bigbyte = 1u32 << (23 - j);
            if pcr[PC2[j] as usize] != 0 {
                kn[m] |= bigbyte;
            }
            if pcr[PC2[j + 24] as usize] != 0 {
                kn[n] |= bigbyte;
            }
        }
    }

    let schedule = cookey(&kn);
    pc1m.zeroize();
    pcr.zeroize();
    kn.zeroize();
    schedule
}

/// Regroups the raw 6-bit subkey chunks into the layout `desfunc` indexes.
fn cookey(raw: &Schedule) -> Schedule {
    let mut out = [0u32; SCHEDULE_WORDS];
    for (pair, dough) in raw.chunks_exact(2).zip(out.chunks_exact_mut(2)) {
        let (raw0, raw1) = (pair[0], pair[1]);
        dough[0] = ((raw0 & 0x00fc_0000) << 6)
            | ((raw0 & 0x0000_0fc0) << 10)
            | ((raw1 & 0x00fc_0000) >> 10)
            | ((raw1 & 0x0000_0fc0) >> 6);
        dough[1] = ((raw0 & 0x0003_f000) << 12)
            | ((raw0 & 0x0000_003f) << 16)
            | ((raw1 & 0x0003_f000) >> 4)
            | (raw1 & 0x0000_003f);
    }
    out
}

fn f_odd(w: u32) -> u32 {
    SP7[(w & 0x3f) as usize]
        ^ SP5[((w >> 8) & 0x3f) as usize]
        ^ SP3[((w >> 16) & 0x3f) as usize]
        ^ SP1[((w >> 24) & 0x3f) as usize]
}

fn f_even(w: u32) -> u32 {
    SP8[(w & 0x3f) as usize]
        ^ SP6[((w >> 8) & 0x3f) as usize]
        ^ SP4[((w >> 16) & 0x3f) as usize]
        ^ SP2[((w >> 24) & 0x3f) as usize]
}

/// Runs the 16 rounds over one block held as two big-endian words.
fn desfunc(block: &mut [u32; 2], keys: &Schedule) {
    let mut left = block[0];
    let mut right = block[1];

    let mut work = ((left >> 4) ^ right) & 0x0f0f_0f0f;
    right ^= work;
    left ^= work << 4;
    work = ((left >> 16) ^ right) & 0x0000_ffff;
    right ^= work;
    left ^= work << 16;
    work = ((right >> 2) ^ left) & 0x3333_3333;
    left ^= work;
    right ^= work << 2;
    work = ((right >> 8) ^ left) & 0x00ff_00ff;
    left ^= work;
    right ^= work << 8;
    right = right.rotate_left(1);
    work = (left ^ right) & 0xaaaa_aaaa;
    left ^= work;
    right ^= work;
    left = left.rotate_left(1);

    for round in keys.chunks_exact(4) {
        left ^= f_odd(right.rotate_right(4) ^ round[0]);
        left ^= f_even(right ^ round[1]);
        right ^= f_odd(left.rotate_right(4) ^ round[2]);
        right ^= f_even(left ^ round[3]);
    }

    right = right.rotate_right(1);
    work = (left ^ right) & 0xaaaa_aaaa;
    left ^= work;
    right ^= work;
    left = left.rotate_right(1);
    work = ((left >> 8) ^ right) & 0x00ff_00ff;
    right ^= work;
    left ^= work << 8;
    work = ((left >> 2) ^ right) & 0x3333_3333;
    right ^= work;
    left ^= work << 2;
    work = ((right >> 16) ^ left) & 0x0000_ffff;
    left ^= work;
    right ^= work << 16;
    work = ((right >> 4) ^ left) & 0x0f0f_0f0f;
    left ^= work;
    right ^= work << 4;

    block[0] = right;
    block[1] = left;
}

fn crypt_block(schedules: &[Schedule], input: &[u8], output: &mut [u8]) {
    let mut block = [load32_be(&input[0..4]), load32_be(&input[4..8])];
    for keys in schedules {
        desfunc(&mut block, keys);
    }
    store32_be(block[0], &mut output[0..4]);
    store32_be(block[1], &mut output[4..8]);
    block.zeroize();
}

/// Weak and semi-weak DES keys, with odd parity.
const WEAK_KEYS: [[u8; DES_KEY_SIZE]; 16] = [
    [0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01],
    [0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe],
    [0xe0, 0xe0, 0xe0, 0xe0, 0xf1, 0xf1, 0xf1, 0xf1],
    [0x1f, 0x1f, 0x1f, 0x1f, 0x0e, 0x0e, 0x0e, 0x0e],
    [0x01, 0x1f, 0x01, 0x1f, 0x01, 0x0e, 0x01, 0x0e],
    [0x1f, 0x01, 0x1f, 0x01, 0x0e, 0x01, 0x0e, 0x01],
    [0x01, 0xe0, 0x01, 0xe0, 0x01, 0xf1, 0x01, 0xf1],
    [0xe0, 0x01, 0xe0, 0x01, 0xf1, 0x01, 0xf1, 0x01],
    [0x01, 0xfe, 0x01, 0xfe, 0x01, 0xfe, 0x01, 0xfe],
    [0xfe, 0x01, 0xfe, 0x01, 0xfe, 0x01, 0xfe, 0x01],
    [0x1f, 0xe0, 0x1f, 0xe0, 0x0e, 0xf1, 0x0e, 0xf1],
    [0xe0, 0x1f, 0xe0, 0x1f, 0xf1, 0x0e, 0xf1, 0x0e],
    [0x1f, 0xfe, 0x1f, 0xfe, 0x0e, 0xfe, 0x0e, 0xfe],
    [0xfe, 0x1f, 0xfe, 0x1f, 0xfe, 0x0e, 0xfe, 0x0e],
    [0xe0, 0xfe, 0xe0, 0xfe, 0xf1, 0xfe, 0xf1, 0xfe],
    [0xfe, 0xe0, 0xfe, 0xe0, 0xfe, 0xf1, 0xfe, 0xf1],
];

/// Single DES key schedule.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Des {
    ek: Schedule,
    dk: Schedule,
}

impl Des {
    /// Sets the low bit of every key byte so that each byte has odd parity.
    pub fn set_odd_parity(key: &mut [u8]) {
        for b in key.iter_mut() {
            let high = *b & 0xfe;
            *b = high | u8::from(high.count_ones() % 2 == 0);
        }
    }

    /// Returns true if any 8-byte component of `key` is a weak or semi-weak
    /// DES key. Parity bits are ignored.
    pub fn key_is_weak(key: &[u8]) -> bool {
        key.chunks_exact(DES_KEY_SIZE).any(|chunk| {
            let mut k = [0u8; DES_KEY_SIZE];
            k.copy_from_slice(chunk);
            Self::set_odd_parity(&mut k);
            WEAK_KEYS.contains(&k)
        })
    }
}

impl Key for Des {
    fn size(&self) -> usize {
        DES_KEY_SIZE
    }
}

impl BlockCipher for Des {
    const BLOCK_SIZE: usize = DES_BLOCK_SIZE;

    fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != DES_KEY_SIZE {
            tracing::error!(len = key.len(), "unsupported DES key length");
            return Err(CryptoError::UnsupportedAlgorithm);
        }
        tracing::debug!("DES key schedule");
        Ok(Self {
            ek: deskey(key, Direction::Encrypt),
            dk: deskey(key, Direction::Decrypt),
        })
    }

    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) {
        crypt_block(core::slice::from_ref(&self.ek), input, output);
    }

    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) {
        crypt_block(core::slice::from_ref(&self.dk), input, output);
    }
}

/// EDE triple DES key schedule.
///
/// A 24-byte key is K1 ‖ K2 ‖ K3. A 16-byte key is K1 ‖ K2 with K3 = K1.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct TripleDes {
    ek: [Schedule; 3],
    dk: [Schedule; 3],
    key_len: usize,
}

impl Key for TripleDes {
    fn size(&self) -> usize {
        self.key_len
    }
}

impl BlockCipher for TripleDes {
    const BLOCK_SIZE: usize = DES_BLOCK_SIZE;

    fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != 2 * DES_KEY_SIZE && key.len() != 3 * DES_KEY_SIZE {
            tracing::error!(len = key.len(), "unsupported triple DES key length");
            return Err(CryptoError::UnsupportedAlgorithm);
        }
        tracing::debug!(keys = key.len() / DES_KEY_SIZE, "triple DES key schedule");

        let k1 = &key[..8];
        let k2 = &key[8..16];
        let k3 = if key.len() == 24 { &key[16..24] } else { k1 };

        Ok(Self {
            ek: [
                deskey(k1, Direction::Encrypt),
                deskey(k2, Direction::Decrypt),
                deskey(k3, Direction::Encrypt),
            ],
            dk: [
                deskey(k3, Direction::Decrypt),
                deskey(k2, Direction::Encrypt),
                deskey(k1, Direction::Decrypt),
            ],
            key_len: key.len(),
        })
    }

    fn encrypt_block(&self, input: &[u8], output: &mut [u8]) {
        crypt_block(&self.ek, input, output);
    }

    fn decrypt_block(&self, input: &[u8], output: &mut [u8]) {
        crypt_block(&self.dk, input, output);
    }
}
