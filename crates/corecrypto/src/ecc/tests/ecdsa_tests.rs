// Copyright (C) Microsoft Corporation. All rights reserved.

use openssl::ecdsa::EcdsaSig;
use test_with_tracing::test;

use super::*;

fn ossl_sign(key: &OsslKey, digest: &[u8]) -> Vec<u8> {
    EcdsaSig::sign(digest, &key.key)
        .expect("sign")
        .to_der()
        .expect("der")
}

#[test]
fn test_ecdsa_verify_openssl_signatures() {
    for curve in EcCurve::ALL {
        let ossl = ossl_key(curve);
        let public = EcPublicKey::import_x963(curve, &ossl.point).expect("import");

        for kind in [DigestKind::Sha1, DigestKind::Sha256, DigestKind::Sha512] {
            let digest =
                Hasher::hash_vec(&mut HashAlgo::from(kind), b"corecrypto ecdsa").expect("hash");
            let sig = ossl_sign(&ossl, &digest);
            assert_eq!(ecdsa_verify(&public, &digest, &sig), Ok(true), "{curve:?} {kind:?}");

            let mut wrong = digest.clone();
            wrong[0] ^= 0x80;
            assert_eq!(ecdsa_verify(&public, &wrong, &sig), Ok(false), "{curve:?} {kind:?}");
        }
    }
}

#[test]
fn test_ecdsa_algo_hashes_message() {
    let ossl = ossl_key(EcCurve::P256);
    let public = EcPublicKey::import_x963(EcCurve::P256, &ossl.point).expect("import");
    let message = b"The quick brown fox jumps over the lazy dog";
    let sig = ossl_sign(&ossl, &openssl::sha::sha256(message));

    let mut algo = EcdsaAlgo::new(HashAlgo::sha256());
    assert_eq!(Verifier::verify(&mut algo, &public, message, &sig), Ok(true));
    assert_eq!(Verifier::verify(&mut algo, &public, b"another message", &sig), Ok(false));

    let mut prehashed = EcdsaAlgo::prehashed();
    assert_eq!(
        Verifier::verify(&mut prehashed, &public, &openssl::sha::sha256(message), &sig),
        Ok(true)
    );
}

#[test]
fn test_ecdsa_wrong_key_fails() {
    let signer = ossl_key(EcCurve::P384);
    let other =
        EcPublicKey::import_x963(EcCurve::P384, &ossl_key(EcCurve::P384).point).expect("import");
    let digest = [0x5a; 48];
    assert_eq!(ecdsa_verify(&other, &digest, &ossl_sign(&signer, &digest)), Ok(false));
}

#[test]
fn test_ecdsa_rejects_out_of_range_components() {
    let ossl = ossl_key(EcCurve::P256);
    let public = EcPublicKey::import_x963(EcCurve::P256, &ossl.point).expect("import");
    let digest = [0x11; 32];
    let sig = DerEcdsaSignature::from_der(&ossl_sign(&ossl, &digest)).expect("parse");
    let n = hex::decode("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
        .expect("hex");

    for (r, s) in [
        (&[0u8][..], sig.s()),
        (sig.r(), &[0u8][..]),
        (&n[..], sig.s()),
        (sig.r(), &n[..]),
        (&[0xff; 33][..], sig.s()),
    ] {
        let der = DerEcdsaSignature::new(r, s).to_der_vec().expect("encode");
        assert_eq!(ecdsa_verify(&public, &digest, &der), Err(CryptoError::InvalidSignature));
    }

    assert_eq!(
        ecdsa_verify(&public, &digest, b"not a signature"),
        Err(CryptoError::InvalidSignature)
    );
}

#[test]
fn test_ecdsa_tampered_signature_fails() {
    let ossl = ossl_key(EcCurve::P521);
    let public = EcPublicKey::import_x963(EcCurve::P521, &ossl.point).expect("import");
    let digest = [0x77; 64];
    let sig = DerEcdsaSignature::from_der(&ossl_sign(&ossl, &digest)).expect("parse");

    let mut s = sig.s().to_vec();
    let last = s.len() - 1;
    s[last] ^= 1;
    let tampered = DerEcdsaSignature::new(sig.r(), &s).to_der_vec().expect("encode");
    assert_eq!(ecdsa_verify(&public, &digest, &tampered), Ok(false));
}
