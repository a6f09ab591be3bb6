// Copyright (C) Microsoft Corporation. All rights reserved.

use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::rsa::Padding;
use openssl::rsa::Rsa;
use openssl::sign::Signer;
use test_with_tracing::test;

use super::*;

const SHA256_PREFIX: &str = "3031300d060960864801650304020105000420";

fn message_digest(kind: DigestKind) -> MessageDigest {
    match kind {
        DigestKind::Md5 => MessageDigest::md5(),
        DigestKind::Sha1 => MessageDigest::sha1(),
        DigestKind::Sha224 => MessageDigest::sha224(),
        DigestKind::Sha256 => MessageDigest::sha256(),
        DigestKind::Sha384 => MessageDigest::sha384(),
        DigestKind::Sha512 => MessageDigest::sha512(),
        DigestKind::Md4 => MessageDigest::from_nid(openssl::nid::Nid::MD4).expect("md4"),
    }
}

#[test]
fn test_pkcs1_encode_minimum_length() {
    let digest = [0xab; 32];
    let mut em = vec![0u8; 19 + 32 + 11];
    encode_pkcs1_v15(&mut em, &digest, DigestOid::Oid(DigestKind::Sha256)).expect("encode");

    let expected = format!("0001{}00{}{}", "ff".repeat(8), SHA256_PREFIX, "ab".repeat(32));
    assert_eq!(hex::encode(&em), expected);

    let mut short = vec![0u8; 19 + 32 + 10];
    assert_eq!(
        encode_pkcs1_v15(&mut short, &digest, DigestOid::Oid(DigestKind::Sha256)),
        Err(CryptoError::MessageTooShort)
    );
}

#[test]
fn test_pkcs1_encode_layout() {
    let digest = Hasher::digest(DigestKind::Sha256, b"abc").expect("digest");
    let mut em = vec![0u8; 128];
    encode_pkcs1_v15(&mut em, &digest, DigestKind::Sha256.into()).expect("encode");

    let t_start = 128 - 51;
    assert_eq!(&em[..2], &[0x00, 0x01]);
    assert!(em[2..t_start - 1].iter().all(|&b| b == 0xff));
    assert_eq!(em[t_start - 1], 0x00);
    assert_eq!(hex::encode(&em[t_start..t_start + 19]), SHA256_PREFIX);
    assert_eq!(
        hex::encode(&em[t_start + 19..]),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_pkcs1_rejects_wrong_digest_length() {
    let mut em = vec![0u8; 128];
    assert_eq!(
        encode_pkcs1_v15(&mut em, &[0u8; 20], DigestOid::Oid(DigestKind::Sha256)),
        Err(CryptoError::InvalidLength)
    );
    assert_eq!(
        encode_pkcs1_v15(&mut em, &[], DigestOid::NoDer),
        Err(CryptoError::InvalidLength)
    );
    assert!(!verify_pkcs1_v15(&em, &[0u8; 20], DigestOid::Oid(DigestKind::Sha256)));
}

#[test]
fn test_pkcs1_no_der() {
    let digest = [0x5c; 36];
    let mut em = vec![0u8; 47];
    encode_pkcs1_v15(&mut em, &digest, DigestOid::NoDer).expect("encode");
    assert_eq!(&em[11..], &digest);
    assert_eq!(em[10], 0x00);
    assert!(verify_pkcs1_v15(&em, &digest, DigestOid::NoDer));

    let mut short = vec![0u8; 46];
    assert_eq!(
        encode_pkcs1_v15(&mut short, &digest, DigestOid::NoDer),
        Err(CryptoError::MessageTooShort)
    );
}

#[test]
fn test_pkcs1_verify_round_trip() {
    for kind in DigestKind::ALL {
        let digest = Hasher::digest(kind, b"round trip").expect("digest");
        for em_len in [kind.output_size() + 30, 256, 512] {
            let mut em = vec![0u8; em_len];
            if encode_pkcs1_v15(&mut em, &digest, kind.into()).is_err() {
                continue;
            }
            assert!(verify_pkcs1_v15(&em, &digest, kind.into()), "{kind:?} {em_len}");

            let mut tampered = em.clone();
            tampered[em_len / 2] ^= 0x01;
            assert!(!verify_pkcs1_v15(&tampered, &digest, kind.into()));

            let other = if kind == DigestKind::Sha256 {
                DigestKind::Sha384
            } else {
                DigestKind::Sha256
            };
            assert!(!verify_pkcs1_v15(&em, &digest, other.into()));
        }
    }
}

#[test]
fn test_pkcs1_pad_algo_encode_decode() {
    let digest = Hasher::digest(DigestKind::Sha384, b"encoder").expect("digest");
    let mut algo = RsaPkcs1PadAlgo::new(384, DigestKind::Sha384.into(), &digest);

    assert_eq!(Encoder::encode(&mut algo, None), Ok(384));
    let mut small = vec![0u8; 383];
    assert_eq!(
        Encoder::encode(&mut algo, Some(&mut small)),
        Err(CryptoError::BufferTooSmall)
    );

    let em = Encoder::encode_vec(&mut algo).expect("encode");
    assert!(verify_pkcs1_v15(&em, &digest, DigestKind::Sha384.into()));

    let decoded = Decoder::decode::<RsaPkcs1PadAlgo>(
        &em,
        RsaPkcs1PadParams::new(DigestKind::Sha384.into()),
    )
    .expect("decode");
    assert_eq!(decoded, algo);
    assert_eq!(decoded.digest(), &digest[..]);
    assert_eq!(decoded.em_len(), 384);

    assert_eq!(
        Decoder::decode::<RsaPkcs1PadAlgo>(&em, RsaPkcs1PadParams::new(DigestKind::Sha512.into())),
        Err(CryptoError::InvalidSignature)
    );
}

#[test]
fn test_pkcs1_decode_rejects_malformed() {
    let digest = [0x33; 32];
    let params = RsaPkcs1PadParams::new(DigestKind::Sha256.into());
    let mut em = vec![0u8; 128];
    encode_pkcs1_v15(&mut em, &digest, DigestKind::Sha256.into()).expect("encode");

    let decode = |bytes: &[u8]| Decoder::decode::<RsaPkcs1PadAlgo>(bytes, params);
    assert!(decode(&em).is_ok());

    let mut bad = em.clone();
    bad[0] = 0x01;
    assert_eq!(decode(&bad), Err(CryptoError::InvalidSignature));

    let mut bad = em.clone();
    bad[1] = 0x02;
    assert_eq!(decode(&bad), Err(CryptoError::InvalidSignature));

    // Separator moved into the padding string.
    let mut bad = em.clone();
    bad[5] = 0x00;
    assert_eq!(decode(&bad), Err(CryptoError::InvalidSignature));

    // Only seven padding bytes before the separator.
    let mut bad = vec![0x00, 0x01];
    bad.extend([0xff; 7]);
    bad.push(0x00);
    bad.extend(hex::decode(SHA256_PREFIX).expect("hex"));
    bad.extend(digest);
    assert_eq!(decode(&bad), Err(CryptoError::InvalidSignature));

    assert_eq!(decode(&[0x00, 0x01]), Err(CryptoError::InvalidSignature));
    assert_eq!(decode(&[0xff; 64]), Err(CryptoError::InvalidSignature));
}

#[test]
fn test_pkcs1_openssl_verifies_our_padding() {
    let rsa = Rsa::generate(2048).expect("generate");
    let pkey = PKey::from_rsa(rsa.clone()).expect("pkey");
    let message = b"signed with raw RSA over our encoding";

    for kind in [DigestKind::Sha1, DigestKind::Sha256, DigestKind::Sha384, DigestKind::Sha512] {
        let digest = Hasher::digest(kind, message).expect("digest");
        let mut em = vec![0u8; rsa.size() as usize];
        encode_pkcs1_v15(&mut em, &digest, kind.into()).expect("encode");

        let mut signature = vec![0u8; rsa.size() as usize];
        rsa.private_encrypt(&em, &mut signature, Padding::NONE)
            .expect("private_encrypt");

        let mut verifier =
            openssl::sign::Verifier::new(message_digest(kind), &pkey).expect("verifier");
        verifier.set_rsa_padding(Padding::PKCS1).expect("padding");
        verifier.update(message).expect("update");
        assert!(verifier.verify(&signature).expect("verify"), "{kind:?}");
    }
}

#[test]
fn test_pkcs1_verify_openssl_signatures() {
    let rsa = Rsa::generate(2048).expect("generate");
    let pkey = PKey::from_rsa(rsa.clone()).expect("pkey");
    let message = b"signed by OpenSSL";

    for kind in [DigestKind::Md5, DigestKind::Sha224, DigestKind::Sha256, DigestKind::Sha512] {
        let mut signer = Signer::new(message_digest(kind), &pkey).expect("signer");
        signer.set_rsa_padding(Padding::PKCS1).expect("padding");
        signer.update(message).expect("update");
        let signature = signer.sign_to_vec().expect("sign");

        let mut em = vec![0u8; rsa.size() as usize];
        rsa.public_decrypt(&signature, &mut em, Padding::NONE)
            .expect("public_decrypt");

        let digest = Hasher::digest(kind, message).expect("digest");
        assert!(verify_pkcs1_v15(&em, &digest, kind.into()), "{kind:?}");

        let decoded = Decoder::decode::<RsaPkcs1PadAlgo>(&em, RsaPkcs1PadParams::new(kind.into()))
            .expect("decode");
        assert_eq!(decoded.digest(), &digest[..]);
    }
}

#[test]
fn test_pkcs1_no_der_matches_openssl_tls_signature() {
    let rsa = Rsa::generate(1024).expect("generate");
    let message = b"ServerKeyExchange params";

    let mut digest = Hasher::digest(DigestKind::Md5, message).expect("md5");
    digest.extend(Hasher::digest(DigestKind::Sha1, message).expect("sha1"));

    // OpenSSL's raw PKCS#1 type 1 padding has no DigestInfo.
    let mut signature = vec![0u8; rsa.size() as usize];
    rsa.private_encrypt(&digest, &mut signature, Padding::PKCS1)
        .expect("private_encrypt");
    let mut em = vec![0u8; rsa.size() as usize];
    rsa.public_decrypt(&signature, &mut em, Padding::NONE)
        .expect("public_decrypt");

    assert!(verify_pkcs1_v15(&em, &digest, DigestOid::NoDer));

    let mut ours = vec![0u8; rsa.size() as usize];
    encode_pkcs1_v15(&mut ours, &digest, DigestOid::NoDer).expect("encode");
    assert_eq!(ours, em);
}
