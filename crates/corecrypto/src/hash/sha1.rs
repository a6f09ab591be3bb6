// Copyright (C) Microsoft Corporation. All rights reserved.

//! SHA-1 compression (FIPS 180-4 §6.1).

use super::*;

const INITIAL_STATE: [u32; 5] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476, 0xc3d2_e1f0];

pub(crate) static SHA1: DigestAlgorithm = DigestAlgorithm {
    name: "SHA-1",
    block_size: 64,
    state_size: 5,
    output_size: 20,
    length_size: 8,
    length_order: ByteOrder::Big,
    initial_state: &INITIAL_STATE,
    compress,
    finalize: store_words_be,
    oid: OID_SHA1,
};

const K: [u32; 4] = [0x5a82_7999, 0x6ed9_eba1, 0x8f1b_bcdc, 0xca62_c1d6];

fn compress(state: &mut [u32], nblocks: usize, data: &[u8]) {
    let mut w = [0u32; 80];

    for block in data.chunks_exact(64).take(nblocks) {
        for (t, chunk) in block.chunks_exact(4).enumerate() {
            w[t] = load32_be(chunk);
        }
        for t in 16..80 {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] =
            [state[0], state[1], state[2], state[3], state[4]];
        for (t, &wt) in w.iter().enumerate() {
            let f = match t / 20 {
                0 => d ^ (b & (c ^ d)),
                2 => (b & c) | (d & (b | c)),
                _ => b ^ c ^ d,
            };
            let tmp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(K[t / 20])
                .wrapping_add(wt);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = tmp;
        }

        for (s, v) in state.iter_mut().zip([a, b, c, d, e]) {
            *s = s.wrapping_add(v);
        }
    }

    w.zeroize();
}
