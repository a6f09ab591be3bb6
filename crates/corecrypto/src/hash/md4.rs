// Copyright (C) Microsoft Corporation. All rights reserved.

//! MD4 compression (RFC 1320).

use super::*;

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

pub(crate) static MD4: DigestAlgorithm = DigestAlgorithm {
    name: "MD4",
    block_size: 64,
    state_size: 4,
    output_size: 16,
    length_size: 8,
    length_order: ByteOrder::Little,
    initial_state: &INITIAL_STATE,
    compress,
    finalize: store_words_le,
    oid: OID_MD4,
};

const ROUND2: u32 = 0x5a82_7999;
const ROUND3: u32 = 0x6ed9_eba1;

const SHIFTS: [[u32; 4]; 3] = [[3, 7, 11, 19], [3, 5, 9, 13], [3, 9, 11, 15]];

const ORDER: [[usize; 16]; 3] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15],
    [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15],
];

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    z ^ (x & (y ^ z))
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (z & (x | y))
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

fn compress(state: &mut [u32], nblocks: usize, data: &[u8]) {
    let mut x = [0u32; 16];

    for block in data.chunks_exact(64).take(nblocks) {
        for (w, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
            *w = load32_le(chunk);
        }

        // v holds (a, b, c, d) in the roles of the next step.
        let mut v = [state[0], state[1], state[2], state[3]];
        for round in 0..3 {
            for i in 0..16 {
                let [a, b, c, d] = v;
                let mixed = match round {
                    0 => f(b, c, d),
                    1 => g(b, c, d).wrapping_add(ROUND2),
                    _ => h(b, c, d).wrapping_add(ROUND3),
                };
                let t = a
                    .wrapping_add(mixed)
                    .wrapping_add(x[ORDER[round][i]])
                    .rotate_left(SHIFTS[round][i % 4]);
                v = [d, t, b, c];
            }
        }

        for (s, v) in state.iter_mut().zip(v) {
            *s = s.wrapping_add(v);
        }
    }

    x.zeroize();
}
