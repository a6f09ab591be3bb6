// Copyright (C) Microsoft Corporation. All rights reserved.

use std::cell::Cell;

use test_with_tracing::test;

use super::*;

/// Single-limb prime field with plain `%` reduction. Counts
/// multiplications so tests can see the curve code calling it.
#[derive(Debug)]
struct SmallPrimeField {
    p: [Unit; 1],
    muls: Cell<usize>,
}

impl SmallPrimeField {
    fn new(p: Unit) -> Self {
        Self {
            p: [p],
            muls: Cell::new(0),
        }
    }

    fn reduce(&self, v: u128) -> Unit {
        (v % u128::from(self.p[0])) as Unit
    }

    fn mul_mod(&self, a: Unit, b: Unit) -> Unit {
        self.reduce(u128::from(a) * u128::from(b))
    }
}

impl PrimeField for SmallPrimeField {
    fn n(&self) -> usize {
        1
    }

    fn modulus(&self) -> &[Unit] {
        &self.p
    }

    fn bit_len(&self) -> usize {
        (Unit::BITS - self.p[0].leading_zeros()) as usize
    }

    fn add(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]) {
        r[0] = self.reduce(u128::from(a[0]) + u128::from(b[0]));
    }

    fn sub(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]) {
        r[0] = self.reduce(u128::from(a[0]) + u128::from(self.p[0]) - u128::from(b[0]));
    }

    fn mul(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]) {
        self.muls.set(self.muls.get() + 1);
        r[0] = self.mul_mod(a[0], b[0]);
    }

    fn inv(&self, r: &mut [Unit], a: &[Unit]) {
        // a^(p - 2)
        let mut e = self.p[0] - 2;
        let mut base = a[0];
        let mut acc = 1;
        while e > 0 {
            if e & 1 == 1 {
                acc = self.mul_mod(acc, base);
            }
            base = self.mul_mod(base, base);
            e >>= 1;
        }
        r[0] = acc;
    }

    fn reduce_once(&self, r: &mut [Unit], a: &[Unit]) {
        r[0] = if a[0] >= self.p[0] { a[0] - self.p[0] } else { a[0] };
    }
}

/// `y^2 = x^3 + 2x + 3` over F_97 with `G = (3, 6)` of order 5.
fn small_curve() -> CurveParams<SmallPrimeField> {
    CurveParams::with_field(SmallPrimeField::new(97), &[2], &[3], &[3], &[6], &[5], 20)
        .expect("small curve")
}

#[test]
fn test_custom_field_multiples() {
    let params = small_curve();
    let g = generator(&params);

    for (k, x, y) in [(1u8, 3, 6), (2, 80, 10), (3, 80, 87), (4, 3, 91)] {
        let p = affine(&params, &mul(&params, &[k], &g));
        assert_eq!((p.x(), p.y()), (&[x][..], &[y][..]), "{k}G");
    }
    assert!(mul(&params, &[5], &g).view().is_at_infinity());
    assert!(params.field().muls.get() > 0);
}

#[test]
fn test_custom_field_matches_zp() {
    let custom = small_curve();
    let zp = CurveParams::new(&[97], &[2], &[3], &[3], &[6], &[5], 20).expect("zp curve");
    let (gc, gz) = (generator(&custom), generator(&zp));

    let (mut sum_c, mut sum_z) = (gc.clone(), gz.clone());
    for k in 2..=7 {
        let prev_c = sum_c.clone();
        custom
            .add(&mut sum_c.view_mut(), &prev_c.view(), &gc.view())
            .expect("add");
        let prev_z = sum_z.clone();
        zp.add(&mut sum_z.view_mut(), &prev_z.view(), &gz.view())
            .expect("add");

        let at_infinity = sum_z.view().is_at_infinity();
        assert_eq!(sum_c.view().is_at_infinity(), at_infinity, "{k}G");
        assert_eq!(at_infinity, k % 5 == 0, "{k}G");
        if !at_infinity {
            assert_eq!(affine(&custom, &sum_c), affine(&zp, &sum_z), "{k}G");
        }
    }
}

#[test]
fn test_custom_field_rejects_off_curve_generator() {
    assert!(matches!(
        CurveParams::with_field(SmallPrimeField::new(97), &[2], &[3], &[3], &[7], &[5], 20),
        Err(CryptoError::InvalidPoint)
    ));
    let params = small_curve();
    let off = AffinePointBuf::from_be_bytes(1, &[3], &[7]).expect("point");
    assert_eq!(params.is_on_curve(&off.view()), Ok(false));
}

#[test]
fn test_zp_through_generic_constructor() {
    let p256 = EcCurve::P256.params().expect("params");
    let p = hex::decode("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff")
        .expect("hex");
    let field = Zp::from_be_bytes(&p).expect("field");
    let a = p256.a().to_be_bytes(32).expect("a");
    let b = p256.b().to_be_bytes(32).expect("b");
    let (gx, gy) = p256.generator().to_be_bytes(32).expect("g");
    let n = hex::decode("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
        .expect("hex");

    let params = CurveParams::with_field(field, &a, &b, &gx, &gy, &n, 1).expect("params");
    assert_eq!(params.curve(), None);
    assert_eq!(params.field().modulus(), p256.field().modulus());

    let two_g = affine(&params, &mul(&params, &[2], &generator(&params)));
    assert_eq!(
        affine_hex(&params, &two_g).0,
        "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978"
    );
}
