// Copyright (C) Microsoft Corporation. All rights reserved.

use openssl::bn::BigNum as OsslBigNum;
use openssl::bn::BigNumContext;
use rand::RngCore;
use test_with_tracing::test;

use super::*;

/// P-256 field prime.
const P256_P: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";

/// P-521 field prime.
const P521_P: &str = concat!(
    "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
);

fn field(p_hex: &str) -> (Zp, Vec<u8>) {
    let p = hex::decode(p_hex).expect("hex");
    (Zp::from_be_bytes(&p).expect("field"), p)
}

fn random_element(f: &Zp, p: &[u8]) -> (BigNum, OsslBigNum) {
    let mut bytes = vec![0u8; p.len()];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut ctx = BigNumContext::new().expect("ctx");
    let modulus = OsslBigNum::from_slice(p).expect("bn");
    let mut reduced = OsslBigNum::new().expect("bn");
    reduced
        .nnmod(&OsslBigNum::from_slice(&bytes).expect("bn"), &modulus, &mut ctx)
        .expect("mod");
    let ours = BigNum::from_be_bytes(f.n(), &reduced.to_vec()).expect("fits");
    (ours, reduced)
}

fn to_ossl(x: &[Unit], len: usize) -> OsslBigNum {
    let mut be = vec![0u8; len];
    limbs::write_be(x, &mut be).expect("fits");
    OsslBigNum::from_slice(&be).expect("bn")
}

#[test]
fn test_zp_matches_openssl() {
    for p_hex in [P256_P, P521_P] {
        let (f, p) = field(p_hex);
        let modulus = OsslBigNum::from_slice(&p).expect("bn");
        let mut ctx = BigNumContext::new().expect("ctx");
        let n = f.n();

        for _ in 0..8 {
            let (a, oa) = random_element(&f, &p);
            let (b, ob) = random_element(&f, &p);
            let mut r = vec![0; n];
            let mut expected = OsslBigNum::new().expect("bn");

            f.add(&mut r, a.as_units(), b.as_units());
            expected.mod_add(&oa, &ob, &modulus, &mut ctx).expect("add");
            assert_eq!(to_ossl(&r, p.len()), expected, "add");

            f.sub(&mut r, a.as_units(), b.as_units());
            expected.mod_sub(&oa, &ob, &modulus, &mut ctx).expect("sub");
            assert_eq!(to_ossl(&r, p.len()), expected, "sub");

            f.mul(&mut r, a.as_units(), b.as_units());
            expected.mod_mul(&oa, &ob, &modulus, &mut ctx).expect("mul");
            assert_eq!(to_ossl(&r, p.len()), expected, "mul");

            f.sqr(&mut r, a.as_units());
            expected.mod_sqr(&oa, &modulus, &mut ctx).expect("sqr");
            assert_eq!(to_ossl(&r, p.len()), expected, "sqr");

            f.inv(&mut r, a.as_units());
            expected.mod_inverse(&oa, &modulus, &mut ctx).expect("inv");
            assert_eq!(to_ossl(&r, p.len()), expected, "inv");
        }
    }
}

#[test]
fn test_zp_edge_values() {
    let (f, _) = field(P256_P);
    let n = f.n();
    let zero = vec![0 as Unit; n];
    let mut one = vec![0 as Unit; n];
    limbs::set_unit(&mut one, 1);
    let mut p_minus_1 = vec![0 as Unit; n];
    limbs::sub(&mut p_minus_1, f.modulus(), &one);

    let mut r = vec![0; n];
    f.add(&mut r, &p_minus_1, &one);
    assert!(limbs::is_zero(&r));

    f.sub(&mut r, &zero, &one);
    assert_eq!(r, p_minus_1);

    f.mul(&mut r, &p_minus_1, &p_minus_1);
    assert_eq!(r, one, "(-1)^2 = 1");

    f.inv(&mut r, &zero);
    assert!(limbs::is_zero(&r));

    f.inv(&mut r, &one);
    assert_eq!(r, one);

    f.reduce_once(&mut r, f.modulus());
    assert!(limbs::is_zero(&r));
    f.reduce_once(&mut r, &p_minus_1);
    assert_eq!(r, p_minus_1);
}

#[test]
fn test_zp_small_prime() {
    let f = Zp::new(&[101]).expect("field");
    assert_eq!((f.n(), f.bit_len()), (1, 7));
    let mut r = [0 as Unit; 1];
    f.mul(&mut r, &[37], &[59]);
    assert_eq!(r, [(37 * 59) % 101]);
    f.inv(&mut r, &[37]);
    let mut check = [0 as Unit; 1];
    f.mul(&mut check, &r, &[37]);
    assert_eq!(check, [1]);
}

#[test]
fn test_zp_rejects_bad_modulus() {
    assert_eq!(Zp::new(&[100]).err().map(|e| e.to_string()), Some("invalid modulus".into()));
    assert!(matches!(Zp::new(&[1]), Err(CryptoError::InvalidModulus)));
    assert!(matches!(Zp::new(&[0, 0]), Err(CryptoError::InvalidModulus)));
    let trimmed = Zp::new(&[7, 0, 0]).expect("field");
    assert_eq!(trimmed.n(), 1);
}
