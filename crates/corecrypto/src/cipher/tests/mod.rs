// Copyright (C) Microsoft Corporation. All rights reserved.

mod des_tests;

use super::*;

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("valid hex")
}

/// Encrypts then decrypts one block, returning the ciphertext hex.
fn ecb_roundtrip<C: BlockCipher>(cipher: &C, pt: &[u8]) -> String {
    let mut ct = vec![0u8; C::BLOCK_SIZE];
    cipher.encrypt_block(pt, &mut ct);
    let mut back = vec![0u8; C::BLOCK_SIZE];
    cipher.decrypt_block(&ct, &mut back);
    assert_eq!(back, pt, "decrypt(encrypt(pt)) != pt");
    hex::encode(ct)
}
