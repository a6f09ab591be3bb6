// Copyright (C) Microsoft Corporation. All rights reserved.

//! MD5 compression (RFC 1321).

use super::*;

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

pub(crate) static MD5: DigestAlgorithm = DigestAlgorithm {
    name: "MD5",
    block_size: 64,
    state_size: 4,
    output_size: 16,
    length_size: 8,
    length_order: ByteOrder::Little,
    initial_state: &INITIAL_STATE,
    compress,
    finalize: store_words_le,
    oid: OID_MD5,
};

/// floor(|sin(i + 1)| * 2^32)
const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

const SHIFTS: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    z ^ (x & (y ^ z))
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    y ^ (z & (x ^ y))
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

fn compress(state: &mut [u32], nblocks: usize, data: &[u8]) {
    let mut x = [0u32; 16];

    for block in data.chunks_exact(64).take(nblocks) {
        for (w, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
            *w = load32_le(chunk);
        }

        let mut v = [state[0], state[1], state[2], state[3]];
        for step in 0..64 {
            let round = step / 16;
            let [a, b, c, d] = v;
            let (mixed, k) = match round {
                0 => (f(b, c, d), step),
                1 => (g(b, c, d), (5 * step + 1) % 16),
                2 => (h(b, c, d), (3 * step + 5) % 16),
                _ => (i(b, c, d), (7 * step) % 16),
            };
            let t = a
                .wrapping_add(mixed)
                .wrapping_add(x[k])
                .wrapping_add(T[step])
                .rotate_left(SHIFTS[round][step % 4])
                .wrapping_add(b);
            v = [d, t, b, c];
        }

        for (s, v) in state.iter_mut().zip(v) {
            *s = s.wrapping_add(v);
        }
    }

    x.zeroize();
}
