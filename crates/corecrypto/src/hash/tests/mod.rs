// Copyright (C) Microsoft Corporation. All rights reserved.



pub(crate) use vectors::*;

use super::*;

/// Known digest of [`pattern_message`] of a given length.
pub struct DigestTestVector {
    pub kind: DigestKind,
    pub msg_len: usize,
    pub digest: &'static str,
}

/// Deterministic test message: byte `i` is `7 * i + 3`.
pub fn pattern_message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

/// One-shot digest through the [`Hasher`] facade.
pub fn digest_hex(algo: HashAlgo, msg: &[u8]) -> String {
    let mut algo = algo;
    hex::encode(Hasher::hash_vec(&mut algo, msg).expect("hash"))
}
