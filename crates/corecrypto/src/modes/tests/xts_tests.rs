// Copyright (C) Microsoft Corporation. All rights reserved.

use openssl::symm::Cipher;
use rand::RngCore;
use test_with_tracing::test;

use super::*;

fn tweak_le(n: u128) -> [u8; 16] {
    n.to_le_bytes()
}

fn xts_encrypt(key: &XtsKey<Aes>, tweak: u128, dul: usize, pt: &[u8]) -> Vec<u8> {
    let mut algo = XtsAlgo::<Aes>::new(&tweak_le(tweak), dul).expect("xts");
    Encrypter::encrypt_vec(&mut algo, key, pt).expect("encrypt")
}

fn xts_decrypt(key: &XtsKey<Aes>, tweak: u128, dul: usize, ct: &[u8]) -> Vec<u8> {
    let mut algo = XtsAlgo::<Aes>::new(&tweak_le(tweak), dul).expect("xts");
    Decrypter::decrypt_vec(&mut algo, key, ct).expect("decrypt")
}

#[test]
fn test_xts_ieee1619_vector_2() {
    let mut key_bytes = [0x11u8; 32];
    key_bytes[16..].fill(0x22);
    let key = XtsKey::<Aes>::new(&key_bytes).expect("key");
    assert_eq!(key.size(), 32);

    let pt = [0x44u8; 32];
    let ct = xts_encrypt(&key, 0x33_3333_3333, 32, &pt);
    assert_eq!(
        hex::encode(&ct),
        "c454185e6a16936e39334038acef838bfb186fff7480adc4289382ecd6d394f0"
    );
    assert_eq!(xts_decrypt(&key, 0x33_3333_3333, 32, &ct), pt);
}

#[test]
fn test_xts_ciphertext_stealing() {
    let key = XtsKey::<Aes>::new(&unhex(concat!(
        "fffefdfcfbfaf9f8f7f6f5f4f3f2f1f0",
        "bfbebdbcbbbab9b8b7b6b5b4b3b2b1b0",
    )))
    .expect("key");
    let pt: Vec<u8> = (0u8..17).collect();
    let ct = xts_encrypt(&key, 0x9a_7856_3412, 17, &pt);
    assert_eq!(hex::encode(&ct), "641610679dcbf92e505c41333fb06c2a95");
    assert_eq!(xts_decrypt(&key, 0x9a_7856_3412, 17, &ct), pt);
}

#[test]
fn test_xts_matches_openssl() {
    let mut rng = rand::thread_rng();
    for len in [16usize, 31, 64, 100] {
        let mut key_bytes = [0u8; 64];
        let mut tweak = [0u8; 16];
        let mut pt = vec![0u8; len];
        rng.fill_bytes(&mut key_bytes);
        rng.fill_bytes(&mut tweak);
        rng.fill_bytes(&mut pt);

        let expected = openssl::symm::encrypt(Cipher::aes_256_xts(), &key_bytes, Some(&tweak), &pt)
            .expect("openssl");

        let key = XtsKey::<Aes>::new(&key_bytes).expect("key");
        let mut algo = XtsAlgo::<Aes>::new(&tweak, len).expect("xts");
        let ct = Encrypter::encrypt_vec(&mut algo, &key, &pt).expect("encrypt");
        assert_eq!(ct, expected, "length {len}");
    }
}

#[test]
fn test_xts_tweak_advances_per_data_unit() {
    let mut key_bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key_bytes);
    key_bytes[0] = 0;
    key_bytes[16] = 1;
    let key = XtsKey::<Aes>::new(&key_bytes).expect("key");
    let pt: Vec<u8> = (0..96).map(|i| i as u8).collect();

    let mut algo = XtsAlgo::<Aes>::new(&tweak_le(7), 32).expect("xts");
    let all = Encrypter::encrypt_vec(&mut algo, &key, &pt).expect("encrypt");
    assert_eq!(algo.tweak(), tweak_le(10));

    for (unit, chunk) in pt.chunks(32).enumerate() {
        let ct = xts_encrypt(&key, 7 + unit as u128, 32, chunk);
        assert_eq!(ct, all[unit * 32..(unit + 1) * 32], "unit {unit}");
    }

    let ctx_algo = XtsAlgo::<Aes>::new(&tweak_le(7), 32).expect("xts");
    let mut ctx = Decrypter::decrypt_init(ctx_algo, key).expect("init");
    let mut back = vec![0u8; 96];
    ctx.update(&all[..64], Some(&mut back[..64])).expect("update");
    ctx.update(&all[64..], Some(&mut back[64..])).expect("update");
    assert_eq!(ctx.algo().tweak(), tweak_le(10));
    assert_eq!(back, pt);
}

#[test]
fn test_xts_input_must_be_whole_data_units() {
    let key = XtsKey::<Aes>::new(&[[1u8; 16], [2u8; 16]].concat()).expect("key");
    let mut algo = XtsAlgo::<Aes>::new(&[0u8; 16], 32).expect("xts");
    assert_eq!(
        Encrypter::encrypt(&mut algo, &key, &[0u8; 48], None),
        Err(CryptoError::InvalidLength)
    );
    assert_eq!(
        XtsAlgo::<Aes>::new(&[0u8; 16], 15).err(),
        Some(CryptoError::InvalidLength)
    );
    assert!(XtsAlgo::<Aes>::new(&[0u8; 8], 32).is_err());
}

#[test]
fn test_xts_tweak_overflow_is_refused_before_writing() {
    let key = XtsKey::<Aes>::new(&[[1u8; 16], [2u8; 16]].concat()).expect("key");

    let mut algo = XtsAlgo::<Aes>::new(&tweak_le(u128::MAX - 1), 16).expect("xts");
    let mut out = [0xaau8; 32];
    assert_eq!(
        Encrypter::encrypt(&mut algo, &key, &[0u8; 32], Some(&mut out)),
        Err(CryptoError::InvalidState)
    );
    assert_eq!(out, [0xaau8; 32]);
    assert_eq!(algo.tweak(), tweak_le(u128::MAX - 1));

    assert!(Encrypter::encrypt(&mut algo, &key, &[0u8; 16], Some(&mut out)).is_ok());
}

#[test]
fn test_xts_key_rejections() {
    assert_eq!(
        XtsKey::<Aes>::new(&[0u8; 32]).err(),
        Some(CryptoError::InvalidLength),
        "equal halves"
    );
    assert_eq!(XtsKey::<Aes>::new(&[1u8; 33]).err(), Some(CryptoError::InvalidLength));
    assert_eq!(
        XtsKey::<Aes>::new(&[[1u8; 20], [2u8; 20]].concat()).err(),
        Some(CryptoError::UnsupportedAlgorithm)
    );
    assert_eq!(
        XtsKey::<Des>::new(&[[1u8; 8], [2u8; 8]].concat()).err(),
        Some(CryptoError::InvalidBlockSize)
    );
}
