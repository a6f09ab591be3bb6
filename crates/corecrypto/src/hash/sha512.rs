// Copyright (C) Microsoft Corporation. All rights reserved.

//! SHA-512 and SHA-384 compression (FIPS 180-4 §6.4, §6.5).
//!
//! The eight 64-bit chaining words are kept as sixteen 32-bit halves,
//! high half first, so the engine's `[u32]` state and big-endian word
//! serialization work unchanged.

use super::*;

const SHA512_IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

const SHA384_IV: [u64; 8] = [
    0xcbbb9d5dc1059ed8,
    0x629a292a367cd507,
    0x9159015a3070dd17,
    0x152fecd8f70e5939,
    0x67332667ffc00b31,
    0x8eb44a8768581511,
    0xdb0c2e0d64f98fa7,
    0x47b5481dbefa4fa4,
];

const SHA512_INITIAL_STATE: [u32; 16] = split_words(&SHA512_IV);
const SHA384_INITIAL_STATE: [u32; 16] = split_words(&SHA384_IV);

/// Splits 64-bit words into high/low 32-bit halves.
const fn split_words(words: &[u64; 8]) -> [u32; 16] {
    let mut halves = [0u32; 16];
    let mut i = 0;
    while i < 8 {
        halves[2 * i] = (words[i] >> 32) as u32;
        halves[2 * i + 1] = words[i] as u32;
        i += 1;
    }
    halves
}

pub(crate) static SHA512: DigestAlgorithm = DigestAlgorithm {
    name: "SHA-512",
    block_size: 128,
    state_size: 16,
    output_size: 64,
    length_size: 16,
    length_order: ByteOrder::Big,
    initial_state: &SHA512_INITIAL_STATE,
    compress,
    finalize: store_words_be,
    oid: OID_SHA512,
};

pub(crate) static SHA384: DigestAlgorithm = DigestAlgorithm {
    name: "SHA-384",
    block_size: 128,
    state_size: 16,
    output_size: 48,
    length_size: 16,
    length_order: ByteOrder::Big,
    initial_state: &SHA384_INITIAL_STATE,
    compress,
    finalize: store_words_be,
    oid: OID_SHA384,
};

const K: [u64; 80] = [
    0x428a2f98d728ae22,
    0x7137449123ef65cd,
    0xb5c0fbcfec4d3b2f,
    0xe9b5dba58189dbbc,
    0x3956c25bf348b538,
    0x59f111f1b605d019,
    0x923f82a4af194f9b,
    0xab1c5ed5da6d8118,
    0xd807aa98a3030242,
    0x12835b0145706fbe,
    0x243185be4ee4b28c,
    0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f,
    0x80deb1fe3b1696b1,
    0x9bdc06a725c71235,
    0xc19bf174cf692694,
    0xe49b69c19ef14ad2,
    0xefbe4786384f25e3,
    0x0fc19dc68b8cd5b5,
    0x240ca1cc77ac9c65,
    0x2de92c6f592b0275,
    0x4a7484aa6ea6e483,
    0x5cb0a9dcbd41fbd4,
    0x76f988da831153b5,
    0x983e5152ee66dfab,
    0xa831c66d2db43210,
    0xb00327c898fb213f,
    0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2,
    0xd5a79147930aa725,
    0x06ca6351e003826f,
    0x142929670a0e6e70,
    0x27b70a8546d22ffc,
    0x2e1b21385c26c926,
    0x4d2c6dfc5ac42aed,
    0x53380d139d95b3df,
    0x650a73548baf63de,
    0x766a0abb3c77b2a8,
    0x81c2c92e47edaee6,
    0x92722c851482353b,
    0xa2bfe8a14cf10364,
    0xa81a664bbc423001,
    0xc24b8b70d0f89791,
    0xc76c51a30654be30,
    0xd192e819d6ef5218,
    0xd69906245565a910,
    0xf40e35855771202a,
    0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8,
    0x1e376c085141ab53,
    0x2748774cdf8eeb99,
    0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63,
    0x4ed8aa4ae3418acb,
    0x5b9cca4f7763e373,
    0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc,
    0x78a5636f43172f60,
    0x84c87814a1f0ab72,
    0x8cc702081a6439ec,
    0x90befffa23631e28,
    0xa4506cebde82bde9,
    0xbef9a3f7b2c67915,
    0xc67178f2e372532b,
    0xca273eceea26619c,
    0xd186b8c721c0c207,
    0xeada7dd6cde0eb1e,
    0xf57d4f7fee6ed178,
    0x06f067aa72176fba,
    0x0a637dc5a2c898a6,
    0x113f9804bef90dae,
    0x1b710b35131c471b,
    0x28db77f523047d84,
    0x32caab7b40c72493,
    0x3c9ebe0a15c9bebc,
    0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6,
    0x597f299cfc657e2a,
    0x5fcb6fab3ad6faec,
    0x6c44198c4a475817,
];

#[inline(always)]
fn ch(x: u64, y: u64, z: u64) -> u64 {
    z ^ (x & (y ^ z))
}

#[inline(always)]
fn maj(x: u64, y: u64, z: u64) -> u64 {
    (x & y) | (z & (x | y))
}

#[inline(always)]
fn big_sigma0(x: u64) -> u64 {
    x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

#[inline(always)]
fn big_sigma1(x: u64) -> u64 {
    x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

#[inline(always)]
fn small_sigma0(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

#[inline(always)]
fn small_sigma1(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

fn compress(state: &mut [u32], nblocks: usize, data: &[u8]) {
    let mut w = [0u64; 80];
    let mut s = [0u64; 8];
    for (word, halves) in s.iter_mut().zip(state.chunks_exact(2)) {
        *word = (u64::from(halves[0]) << 32) | u64::from(halves[1]);
    }

    for block in data.chunks_exact(128).take(nblocks) {
        for (t, chunk) in block.chunks_exact(8).enumerate() {
            w[t] = load64_be(chunk);
        }
        for t in 16..80 {
            w[t] = small_sigma1(w[t - 2])
                .wrapping_add(w[t - 7])
                .wrapping_add(small_sigma0(w[t - 15]))
                .wrapping_add(w[t - 16]);
        }

        let mut v = s;
        for t in 0..80 {
            let [a, b, c, d, e, f, g, h] = v;
            let t1 = h
                .wrapping_add(big_sigma1(e))
                .wrapping_add(ch(e, f, g))
                .wrapping_add(K[t])
                .wrapping_add(w[t]);
            let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
            v = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
        }

        for (word, v) in s.iter_mut().zip(v) {
            *word = word.wrapping_add(v);
        }
    }

    for (halves, word) in state.chunks_exact_mut(2).zip(s) {
        halves[0] = (word >> 32) as u32;
        halves[1] = word as u32;
    }

    w.zeroize();
    s.zeroize();
}
