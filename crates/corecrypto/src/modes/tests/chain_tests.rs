// Copyright (C) Microsoft Corporation. All rights reserved.

use openssl::symm::Cipher;
use openssl::symm::Crypter;
use openssl::symm::Mode;
use rand::RngCore;
use test_with_tracing::test;

use super::*;

fn encrypt_decrypt<A>(make: impl Fn() -> A, key: &<A as EncryptOp>::Key, pt: &[u8]) -> Vec<u8>
where
    A: EncryptOp + DecryptOp<Key = <A as EncryptOp>::Key>,
{
    let ct = Encrypter::encrypt_vec(&mut make(), key, pt).expect("encrypt");
    assert_eq!(ct.len(), pt.len());
    let back = Decrypter::decrypt_vec(&mut make(), key, &ct).expect("decrypt");
    assert_eq!(back, pt, "round trip");
    ct
}

#[test]
fn test_ecb_sp800_38a() {
    let key = aes(SP800_38A_KEY);
    let ct = encrypt_decrypt(EcbAlgo::<Aes>::new, &key, &unhex(SP800_38A_PLAINTEXT));
    assert_eq!(
        hex::encode(ct),
        concat!(
            "3ad77bb40d7a3660a89ecaf32466ef97",
            "f5d3d58503b9699de785895a96fdbaaf",
            "43b1cd7f598ece23881b00e3ed030688",
            "7b0c785e27e8ad3f8223207104725dd4",
        )
    );
}

#[test]
fn test_cbc_sp800_38a() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let ct = encrypt_decrypt(
        || CbcAlgo::<Aes>::new(&iv).expect("cbc"),
        &key,
        &unhex(SP800_38A_PLAINTEXT),
    );
    assert_eq!(
        hex::encode(ct),
        concat!(
            "7649abac8119b246cee98e9b12e9197d",
            "5086cb9b507219ee95db113a917678b2",
            "73bed6b8e3c1743b7116e69e22229516",
            "3ff1caa1681fac09120eca307586e1a7",
        )
    );
}

#[test]
fn test_cfb_sp800_38a() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let ct = encrypt_decrypt(
        || CfbAlgo::<Aes>::new(&iv).expect("cfb"),
        &key,
        &unhex(SP800_38A_PLAINTEXT),
    );
    assert_eq!(
        hex::encode(ct),
        concat!(
            "3b3fd92eb72dad20333449f8e83cfb4a",
            "c8a64537a0b3a93fcde3cdad9f1ce58b",
            "26751f67a3cbb140b1808cf187a4f4df",
            "c04b05357c5d1c0eeac4c66f9ff7f2e6",
        )
    );
}

#[test]
fn test_cfb8_sp800_38a() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let pt = &unhex(SP800_38A_PLAINTEXT)[..18];
    let ct = encrypt_decrypt(|| Cfb8Algo::<Aes>::new(&iv).expect("cfb8"), &key, pt);
    assert_eq!(hex::encode(ct), "3b79424c9c0dd436bace9e0ed4586a4f32b9");
}

#[test]
fn test_ofb_sp800_38a() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let ct = encrypt_decrypt(
        || OfbAlgo::<Aes>::new(&iv).expect("ofb"),
        &key,
        &unhex(SP800_38A_PLAINTEXT),
    );
    assert_eq!(
        hex::encode(ct),
        concat!(
            "3b3fd92eb72dad20333449f8e83cfb4a",
            "7789508d16918f03f53c52dac54ed825",
            "9740051e9c5fecf64344f7a82260edcc",
            "304c6528f659c77866a510d9c1d6ae5e",
        )
    );
}

#[test]
fn test_ctr_sp800_38a() {
    let key = aes(SP800_38A_KEY);
    let counter = unhex("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let ct = encrypt_decrypt(
        || CtrAlgo::<Aes>::new(&counter).expect("ctr"),
        &key,
        &unhex(SP800_38A_PLAINTEXT),
    );
    assert_eq!(
        hex::encode(ct),
        concat!(
            "874d6191b620e3261bef6864990db6ce",
            "9806f66b7970fdff8617187bb9fffdff",
            "5ae4df3edbd5d35e5b4f09020db03eab",
            "1e031dda2fbe03d1792170a0f3009cee",
        )
    );
}

#[test]
fn test_ctr_increment_carries_past_low_word() {
    let mut counter = unhex("000102030405060708090a0bffffffff");
    crate::modes::ctr::increment_be(&mut counter);
    assert_eq!(hex::encode(&counter), "000102030405060708090a0c00000000");

    let mut counter = unhex("0001020304050607ffffffffffffffff");
    crate::modes::ctr::increment_be(&mut counter);
    assert_eq!(hex::encode(&counter), "00010203040506080000000000000000");
}

#[test]
fn test_ctr_counter_wraps_whole_block() {
    let key = aes(SP800_38A_KEY);
    let mut algo = CtrAlgo::<Aes>::new(&[0xff; 16]).expect("ctr");
    let ks = Encrypter::encrypt_vec(&mut algo, &key, &[0u8; 48]).expect("encrypt");
    // E(ff..ff), E(00..00), E(00..01)
    assert_eq!(
        hex::encode(ks),
        concat!(
            "8af2860142f786f409307c1a3f7eaaac",
            "7df76b0c1ab899b33e42f047b91b546f",
            "57127d4034b1bebfaef466b9c7726fc6",
        )
    );
    let mut next = [0u8; 16];
    next[15] = 2;
    assert_eq!(algo.counter(), &next[..]);
}

#[test]
fn test_round_trip_zero_one_and_many_blocks() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    for blocks in [0usize, 1, 7] {
        let mut pt = vec![0u8; blocks * 16];
        rand::thread_rng().fill_bytes(&mut pt);
        encrypt_decrypt(EcbAlgo::<Aes>::new, &key, &pt);
        encrypt_decrypt(|| CbcAlgo::<Aes>::new(&iv).expect("cbc"), &key, &pt);
        encrypt_decrypt(|| CfbAlgo::<Aes>::new(&iv).expect("cfb"), &key, &pt);
        encrypt_decrypt(|| Cfb8Algo::<Aes>::new(&iv).expect("cfb8"), &key, &pt);
        encrypt_decrypt(|| OfbAlgo::<Aes>::new(&iv).expect("ofb"), &key, &pt);
        encrypt_decrypt(|| CtrAlgo::<Aes>::new(&iv).expect("ctr"), &key, &pt);
    }
}

#[test]
fn test_stream_modes_accept_unaligned_input() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let full = unhex(SP800_38A_PLAINTEXT);
    for len in [1usize, 15, 17, 33, 63] {
        let pt = &full[..len];
        let ct = encrypt_decrypt(|| CtrAlgo::<Aes>::new(&iv).expect("ctr"), &key, pt);
        let whole = Encrypter::encrypt_vec(&mut CtrAlgo::<Aes>::new(&iv).expect("ctr"), &key, &full)
            .expect("encrypt");
        assert_eq!(ct, whole[..len], "CTR prefix at {len}");

        encrypt_decrypt(|| CfbAlgo::<Aes>::new(&iv).expect("cfb"), &key, pt);
        encrypt_decrypt(|| OfbAlgo::<Aes>::new(&iv).expect("ofb"), &key, pt);
    }
}

#[test]
fn test_block_modes_reject_unaligned_input() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let pt = [0u8; 17];
    assert_eq!(
        Encrypter::encrypt(&mut EcbAlgo::<Aes>::new(), &key, &pt, None),
        Err(CryptoError::InvalidLength)
    );
    assert_eq!(
        Decrypter::decrypt_vec(&mut CbcAlgo::<Aes>::new(&iv).expect("cbc"), &key, &pt),
        Err(CryptoError::InvalidLength)
    );
}

#[test]
fn test_iv_must_be_one_block() {
    assert_eq!(CbcAlgo::<Aes>::new(&[0u8; 8]).err(), Some(CryptoError::InvalidLength));
    assert_eq!(CtrAlgo::<Aes>::new(&[0u8; 17]).err(), Some(CryptoError::InvalidLength));
    assert_eq!(CfbAlgo::<Des>::new(&[0u8; 16]).err(), Some(CryptoError::InvalidLength));
    assert!(Cfb8Algo::<Des>::new(&[0u8; 8]).is_ok());
}

#[test]
fn test_output_buffer_too_small() {
    let key = aes(SP800_38A_KEY);
    let mut out = [0u8; 15];
    assert_eq!(
        Encrypter::encrypt(&mut EcbAlgo::<Aes>::new(), &key, &[0u8; 16], Some(&mut out)),
        Err(CryptoError::BufferTooSmall)
    );
}

#[test]
fn test_one_shot_calls_continue_the_stream() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let pt = unhex(SP800_38A_PLAINTEXT);

    let whole = Encrypter::encrypt_vec(&mut CbcAlgo::<Aes>::new(&iv).expect("cbc"), &key, &pt)
        .expect("encrypt");

    let mut algo = CbcAlgo::<Aes>::new(&iv).expect("cbc");
    let mut split = Encrypter::encrypt_vec(&mut algo, &key, &pt[..32]).expect("first");
    assert_eq!(algo.iv(), &whole[16..32]);
    split.extend(Encrypter::encrypt_vec(&mut algo, &key, &pt[32..]).expect("second"));
    assert_eq!(split, whole);
}

#[test]
fn test_streaming_matches_one_shot() {
    let key = aes(SP800_38A_KEY);
    let iv = unhex(SP800_38A_IV);
    let mut pt = vec![0u8; 100];
    rand::thread_rng().fill_bytes(&mut pt);

    let one_shot = Encrypter::encrypt_vec(&mut CfbAlgo::<Aes>::new(&iv).expect("cfb"), &key, &pt)
        .expect("encrypt");

    let algo = CfbAlgo::<Aes>::new(&iv).expect("cfb");
    let mut ctx = Encrypter::encrypt_init(algo, aes(SP800_38A_KEY)).expect("init");
    let mut streamed = vec![0u8; pt.len()];
    let mut off = 0;
    for chunk in pt.chunks(7) {
        off += ctx
            .update(chunk, Some(&mut streamed[off..off + chunk.len()]))
            .expect("update");
    }
    assert!(ctx.finish_vec().expect("finish").is_empty());
    assert_eq!(streamed, one_shot);

    let mut dctx =
        Decrypter::decrypt_init(CfbAlgo::<Aes>::new(&iv).expect("cfb"), key).expect("init");
    let mut back = vec![0u8; pt.len()];
    let mut off = 0;
    for chunk in one_shot.chunks(13) {
        off += dctx
            .update(chunk, Some(&mut back[off..off + chunk.len()]))
            .expect("update");
    }
    assert_eq!(back, pt);
}

#[test]
fn test_triple_des_cbc_matches_reference() {
    let key = TripleDes::new(&unhex("0123456789abcdef23456789abcdef01456789abcdef0123"))
        .expect("3des");
    let iv = unhex("0001020304050607");
    let ct = encrypt_decrypt(
        || CbcAlgo::<TripleDes>::new(&iv).expect("cbc"),
        &key,
        b"The quick brown fox jump",
    );
    assert_eq!(hex::encode(ct), "29b01b011b9ebb6f10308a42938279068782e8bec97fe03f");
}

#[test]
fn test_modes_match_openssl() {
    let mut rng = rand::thread_rng();
    let mut key_bytes = [0u8; 32];
    let mut iv = [0u8; 16];
    let mut pt = vec![0u8; 80];
    rng.fill_bytes(&mut key_bytes);
    rng.fill_bytes(&mut iv);
    rng.fill_bytes(&mut pt);
    let key = Aes::new(&key_bytes).expect("aes-256");

    let expect = |cipher: Cipher| {
        let mut c = Crypter::new(cipher, Mode::Encrypt, &key_bytes, Some(&iv)).expect("crypter");
        c.pad(false);
        let mut out = vec![0u8; pt.len() + 16];
        let mut n = c.update(&pt, &mut out).expect("update");
        n += c.finalize(&mut out[n..]).expect("finalize");
        out.truncate(n);
        out
    };

    let cbc = Encrypter::encrypt_vec(&mut CbcAlgo::<Aes>::new(&iv).expect("cbc"), &key, &pt);
    assert_eq!(cbc.expect("cbc"), expect(Cipher::aes_256_cbc()));
    let cfb = Encrypter::encrypt_vec(&mut CfbAlgo::<Aes>::new(&iv).expect("cfb"), &key, &pt);
    assert_eq!(cfb.expect("cfb"), expect(Cipher::aes_256_cfb128()));
    let cfb8 = Encrypter::encrypt_vec(&mut Cfb8Algo::<Aes>::new(&iv).expect("cfb8"), &key, &pt);
    assert_eq!(cfb8.expect("cfb8"), expect(Cipher::aes_256_cfb8()));
    let ofb = Encrypter::encrypt_vec(&mut OfbAlgo::<Aes>::new(&iv).expect("ofb"), &key, &pt);
    assert_eq!(ofb.expect("ofb"), expect(Cipher::aes_256_ofb()));
    let ctr = Encrypter::encrypt_vec(&mut CtrAlgo::<Aes>::new(&iv).expect("ctr"), &key, &pt);
    assert_eq!(ctr.expect("ctr"), expect(Cipher::aes_256_ctr()));
}
