// Copyright (C) Microsoft Corporation. All rights reserved.

mod chain_tests;
mod xts_tests;

use super::*;

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("valid hex")
}

fn aes(key_hex: &str) -> Aes {
    Aes::new(&unhex(key_hex)).expect("aes key")
}

/// SP 800-38A AES-128 key.
const SP800_38A_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";

/// SP 800-38A four-block plaintext.
const SP800_38A_PLAINTEXT: &str = concat!(
    "6bc1bee22e409f96e93d7e117393172a",
    "ae2d8a571e03ac9c9eb76fac45af8e51",
    "30c81c46a35ce411e5fbc1191a0a52ef",
    "f69f2445df4f9b17ad2b417be66c3710",
);

const SP800_38A_IV: &str = "000102030405060708090a0b0c0d0e0f";
