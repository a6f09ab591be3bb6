// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_des_classic_vector() {
    let des = Des::new(&unhex("133457799bbcdff1")).expect("des");
    assert_eq!(des.size(), 8);
    assert_eq!(
        ecb_roundtrip(&des, &unhex("0123456789abcdef")),
        "85e813540f0ab405"
    );
}

#[test]
fn test_des_rejects_bad_key_length() {
    assert_eq!(Des::new(&[0u8; 7]).err(), Some(CryptoError::UnsupportedAlgorithm));
    assert_eq!(Des::new(&[0u8; 16]).err(), Some(CryptoError::UnsupportedAlgorithm));
}

#[test]
fn test_3des_sp800_67_example() {
    let key = unhex("0123456789abcdef23456789abcdef01456789abcdef0123");
    let tdes = TripleDes::new(&key).expect("3des");
    assert_eq!(tdes.size(), 24);
    assert_eq!(ecb_roundtrip(&tdes, b"The qufc"), "a826fd8ce53b855f");
}

#[test]
fn test_3des_equal_keys_degenerates_to_des() {
    let k = unhex("133457799bbcdff1");
    let tdes = TripleDes::new(&[k.as_slice(), &k, &k].concat()).expect("3des");
    assert_eq!(
        ecb_roundtrip(&tdes, &unhex("0123456789abcdef")),
        "85e813540f0ab405"
    );
}

#[test]
fn test_3des_two_key_uses_k1_as_k3() {
    let k1 = unhex("0123456789abcdef");
    let k2 = unhex("fedcba9876543210");
    let two = TripleDes::new(&[k1.as_slice(), &k2].concat()).expect("2-key");
    let three = TripleDes::new(&[k1.as_slice(), &k2, &k1].concat()).expect("3-key");
    let pt = *b"abcdefgh";
    assert_eq!(ecb_roundtrip(&two, &pt), ecb_roundtrip(&three, &pt));
    assert_eq!(two.size(), 16);
}

#[test]
fn test_3des_rejects_bad_key_length() {
    for len in [8usize, 15, 17, 23, 25, 32] {
        assert_eq!(
            TripleDes::new(&vec![1u8; len]).err(),
            Some(CryptoError::UnsupportedAlgorithm),
            "key length {len}"
        );
    }
}

#[test]
fn test_des_matches_openssl_3des() {
    use openssl::symm::Cipher;
    use openssl::symm::Crypter;
    use openssl::symm::Mode;
    use rand::RngCore;

    let mut rng = rand::thread_rng();
    for _ in 0..16 {
        let mut key = [0u8; 24];
        let mut pt = [0u8; 8];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut pt);

        let mut crypter =
            Crypter::new(Cipher::des_ede3(), Mode::Encrypt, &key, None).expect("crypter");
        crypter.pad(false);
        let mut expected = vec![0u8; 16];
        let mut n = crypter.update(&pt, &mut expected).expect("update");
        n += crypter.finalize(&mut expected[n..]).expect("finalize");
        expected.truncate(n);

        let tdes = TripleDes::new(&key).expect("3des");
        assert_eq!(ecb_roundtrip(&tdes, &pt), hex::encode(expected));
    }
}

#[test]
fn test_des_set_odd_parity() {
    let mut key = [0x00u8, 0x01, 0xfe, 0xff, 0x12, 0x13, 0x80, 0x81];
    Des::set_odd_parity(&mut key);
    assert_eq!(key, [0x01, 0x01, 0xfe, 0xfe, 0x13, 0x13, 0x80, 0x80]);
    assert!(key.iter().all(|b| b.count_ones() % 2 == 1));
}

#[test]
fn test_des_weak_keys() {
    assert!(Des::key_is_weak(&unhex("0101010101010101")));
    // Parity bits are ignored.
    assert!(Des::key_is_weak(&unhex("0000000000000000")));
    assert!(Des::key_is_weak(&unhex("e0fee0fef1fef1fe")));
    assert!(!Des::key_is_weak(&unhex("133457799bbcdff1")));

    // Any weak component makes a triple DES key weak.
    let mixed = unhex("133457799bbcdff1fefefefefefefefe0123456789abcdef");
    assert!(Des::key_is_weak(&mixed));
}
