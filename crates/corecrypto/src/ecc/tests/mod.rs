// Copyright (C) Microsoft Corporation. All rights reserved.

mod custom_field_tests;
mod ecdsa_tests;

use openssl::bn::BigNumContext;
use openssl::ec::EcGroup;
use openssl::ec::EcKey;
use openssl::ec::PointConversionForm;
use openssl::nid::Nid;
use openssl::pkey::Private;

use super::*;

fn nid(curve: EcCurve) -> Nid {
    match curve {
        EcCurve::P192 => Nid::X9_62_PRIME192V1,
        EcCurve::P224 => Nid::SECP224R1,
        EcCurve::P256 => Nid::X9_62_PRIME256V1,
        EcCurve::P384 => Nid::SECP384R1,
        EcCurve::P521 => Nid::SECP521R1,
    }
}

/// An OpenSSL key pair with its raw scalar and X9.63 public point.
struct OsslKey {
    key: EcKey<Private>,
    scalar: Vec<u8>,
    point: Vec<u8>,
}

fn ossl_key(curve: EcCurve) -> OsslKey {
    let group = EcGroup::from_curve_name(nid(curve)).expect("group");
    let key = EcKey::generate(&group).expect("generate");
    let scalar = key
        .private_key()
        .to_vec_padded(curve.size_bytes() as i32)
        .expect("scalar");
    let mut ctx = BigNumContext::new().expect("ctx");
    let point = key
        .public_key()
        .to_bytes(&group, PointConversionForm::UNCOMPRESSED, &mut ctx)
        .expect("point");
    OsslKey { key, scalar, point }
}

fn lift<F: PrimeField>(params: &CurveParams<F>, a: &AffinePointBuf) -> ProjectivePointBuf {
    let mut r = ProjectivePointBuf::new(params.n());
    params.from_affine(&mut r.view_mut(), &a.view()).expect("from_affine");
    r
}

fn affine<F: PrimeField>(params: &CurveParams<F>, p: &ProjectivePointBuf) -> AffinePointBuf {
    let mut a = AffinePointBuf::new(params.n());
    params.to_affine(&mut a.view_mut(), &p.view()).expect("to_affine");
    a
}

fn mul<F: PrimeField>(
    params: &CurveParams<F>,
    k: &[u8],
    p: &ProjectivePointBuf,
) -> ProjectivePointBuf {
    let k = BigNum::from_be_bytes(params.order().n(), k).expect("scalar");
    let mut r = ProjectivePointBuf::new(params.n());
    params
        .scalar_multiply(&mut r.view_mut(), k.as_units(), &p.view())
        .expect("scalar_multiply");
    r
}

fn affine_hex<F: PrimeField>(params: &CurveParams<F>, a: &AffinePointBuf) -> (String, String) {
    let (x, y) = a.to_be_bytes(params.size_bytes()).expect("bytes");
    (hex::encode(x), hex::encode(y))
}

fn generator<F: PrimeField>(params: &CurveParams<F>) -> ProjectivePointBuf {
    lift(params, &params.generator())
}
