// Copyright (C) Microsoft Corporation. All rights reserved.

//! Curve identifiers and domain parameters.

use std::sync::OnceLock;

use super::*;

/// OID of NIST P-192 (prime192v1).
pub const OID_P192: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 10045, 3, 1, 1);

/// OID of NIST P-224 (secp224r1).
pub const OID_P224: asn1::ObjectIdentifier = asn1::oid!(1, 3, 132, 0, 33);

/// OID of NIST P-256 (prime256v1).
pub const OID_P256: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 10045, 3, 1, 7);

/// OID of NIST P-384 (secp384r1).
pub const OID_P384: asn1::ObjectIdentifier = asn1::oid!(1, 3, 132, 0, 34);

/// OID of NIST P-521 (secp521r1).
pub const OID_P521: asn1::ObjectIdentifier = asn1::oid!(1, 3, 132, 0, 35);

/// The NIST prime curves of FIPS 186-4.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EcCurve {
    /// NIST P-192.
    P192,
    /// NIST P-224.
    P224,
    /// NIST P-256.
    P256,
    /// NIST P-384.
    P384,
    /// NIST P-521.
    P521,
}

/// Hex domain parameters, big-endian: p, a, b, Gx, Gy, n.
struct CurveHex {
    p: &'static str,
    a: &'static str,
    b: &'static str,
    gx: &'static str,
    gy: &'static str,
    n: &'static str,
}

const P192_HEX: CurveHex = CurveHex {
    p: "fffffffffffffffffffffffffffffffeffffffffffffffff",
    a: "fffffffffffffffffffffffffffffffefffffffffffffffc",
    b: "64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1",
    gx: "188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012",
    gy: "07192b95ffc8da78631011ed6b24cdd573f977a11e794811",
    n: "ffffffffffffffffffffffff99def836146bc9b1b4d22831",
};

const P224_HEX: CurveHex = CurveHex {
    p: "ffffffffffffffffffffffffffffffff000000000000000000000001",
    a: "fffffffffffffffffffffffffffffffefffffffffffffffffffffffe",
    b: "b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4",
    gx: "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21",
    gy: "bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34",
    n: "ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d",
};

const P256_HEX: CurveHex = CurveHex {
    p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    a: "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
    b: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    n: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
};

const P384_HEX: CurveHex = CurveHex {
    p: concat!(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe",
        "ffffffff0000000000000000ffffffff"
    ),
    a: concat!(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe",
        "ffffffff0000000000000000fffffffc"
    ),
    b: concat!(
        "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a",
        "c656398d8a2ed19d2a85c8edd3ec2aef"
    ),
    gx: concat!(
        "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38",
        "5502f25dbf55296c3a545e3872760ab7"
    ),
    gy: concat!(
        "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0",
        "0a60b1ce1d7e819d7a431d7c90ea0e5f"
    ),
    n: concat!(
        "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf",
        "581a0db248b0a77aecec196accc52973"
    ),
};

const P521_HEX: CurveHex = CurveHex {
    p: concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffff"
    ),
    a: concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "fffc"
    ),
    b: concat!(
        "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1",
        "09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b50",
        "3f00"
    ),
    gx: concat!(
        "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d",
        "3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5",
        "bd66"
    ),
    gy: concat!(
        "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e",
        "662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd1",
        "6650"
    ),
    n: concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138",
        "6409"
    ),
};

/// Decodes a compile-time hex constant.
fn decode_param(s: &str) -> Result<Vec<u8>, CryptoError> {
    hex::decode(s).map_err(|_| CryptoError::InvalidLength)
}

impl EcCurve {
    /// Every supported curve, smallest first.
    pub const ALL: [EcCurve; 5] = [
        EcCurve::P192,
        EcCurve::P224,
        EcCurve::P256,
        EcCurve::P384,
        EcCurve::P521,
    ];

    /// Returns the field size in bits.
    pub fn bits(self) -> usize {
        match self {
            EcCurve::P192 => 192,
            EcCurve::P224 => 224,
            EcCurve::P256 => 256,
            EcCurve::P384 => 384,
            EcCurve::P521 => 521,
        }
    }

    /// Returns the size of one coordinate or scalar in bytes.
    pub fn size_bytes(self) -> usize {
        self.bits().div_ceil(8)
    }

    /// Returns the curve's named-curve object identifier.
    pub fn oid(self) -> asn1::ObjectIdentifier {
        match self {
            EcCurve::P192 => OID_P192,
            EcCurve::P224 => OID_P224,
            EcCurve::P256 => OID_P256,
            EcCurve::P384 => OID_P384,
            EcCurve::P521 => OID_P521,
        }
    }

    /// Looks a curve up by field size.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] for any other size.
    pub fn from_bits(bits: usize) -> Result<Self, CryptoError> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.bits() == bits)
            .ok_or_else(|| {
                tracing::error!(bits, "unsupported curve size");
                CryptoError::UnsupportedAlgorithm
            })
    }

    /// Looks a curve up by named-curve object identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] for an unknown OID.
    pub fn from_oid(oid: &asn1::ObjectIdentifier) -> Result<Self, CryptoError> {
        Self::ALL
            .into_iter()
            .find(|curve| &curve.oid() == oid)
            .ok_or_else(|| {
                tracing::error!(%oid, "unsupported curve OID");
                CryptoError::UnsupportedAlgorithm
            })
    }

    /// Returns whether a curve of this size is supported.
    pub fn keysize_is_supported(bits: usize) -> bool {
        Self::ALL.into_iter().any(|curve| curve.bits() == bits)
    }

    fn hex(self) -> &'static CurveHex {
        match self {
            EcCurve::P192 => &P192_HEX,
            EcCurve::P224 => &P224_HEX,
            EcCurve::P256 => &P256_HEX,
            EcCurve::P384 => &P384_HEX,
            EcCurve::P521 => &P521_HEX,
        }
    }

    fn cell(self) -> &'static OnceLock<CurveParams> {
        static P192: OnceLock<CurveParams> = OnceLock::new();
        static P224: OnceLock<CurveParams> = OnceLock::new();
        static P256: OnceLock<CurveParams> = OnceLock::new();
        static P384: OnceLock<CurveParams> = OnceLock::new();
        static P521: OnceLock<CurveParams> = OnceLock::new();
        match self {
            EcCurve::P192 => &P192,
            EcCurve::P224 => &P224,
            EcCurve::P256 => &P256,
            EcCurve::P384 => &P384,
            EcCurve::P521 => &P521,
        }
    }

    /// Returns the curve's domain parameters, built on first use and shared
    /// for the life of the process.
    pub fn params(self) -> Result<&'static CurveParams, CryptoError> {
        let cell = self.cell();
        if let Some(params) = cell.get() {
            return Ok(params);
        }
        let h = self.hex();
        let params = CurveParams::new(
            &decode_param(h.p)?,
            &decode_param(h.a)?,
            &decode_param(h.b)?,
            &decode_param(h.gx)?,
            &decode_param(h.gy)?,
            &decode_param(h.n)?,
            1,
        )?
        .with_curve(self);
        tracing::debug!(curve = ?self, "curve parameters initialized");
        Ok(cell.get_or_init(|| params))
    }
}

/// Short Weierstrass curve `y^2 = x^3 + ax + b` over a prime field, with a
/// base point of prime order.
///
/// Point arithmetic runs through the [`PrimeField`] `F`. The named curves
/// use [`Zp`]; a caller with its own reduction supplies another field
/// through [`CurveParams::with_field`].
#[derive(Debug, Clone)]
pub struct CurveParams<F: PrimeField = Zp> {
    curve: Option<EcCurve>,
    field: F,
    order: Zp,
    a: BigNum,
    b: BigNum,
    gx: BigNum,
    gy: BigNum,
    cofactor: Unit,
    size: usize,
}

impl CurveParams<Zp> {
    /// Builds curve parameters from big-endian values.
    ///
    /// # Arguments
    ///
    /// * `p` - Field prime
    /// * `a`, `b` - Curve coefficients, reduced modulo `p`
    /// * `gx`, `gy` - Base point
    /// * `n` - Order of the base point
    /// * `cofactor` - Group cofactor
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidModulus`] if `p` or `n` is not an odd value
    ///   greater than two
    /// - [`CryptoError::InsufficientCapacity`] if a coefficient or coordinate
    ///   is wider than the field
    /// - [`CryptoError::InvalidPoint`] if a coefficient or coordinate is not
    ///   reduced, or the base point is not on the curve
    pub fn new(
        p: &[u8],
        a: &[u8],
        b: &[u8],
        gx: &[u8],
        gy: &[u8],
        n: &[u8],
        cofactor: Unit,
    ) -> Result<Self, CryptoError> {
        Self::with_field(Zp::from_be_bytes(p)?, a, b, gx, gy, n, cofactor)
    }
}

impl<F: PrimeField> CurveParams<F> {
    /// Builds curve parameters over a caller-supplied coordinate field.
    ///
    /// Same as [`CurveParams::new`] with the prime replaced by `field`.
    pub fn with_field(
        field: F,
        a: &[u8],
        b: &[u8],
        gx: &[u8],
        gy: &[u8],
        n: &[u8],
        cofactor: Unit,
    ) -> Result<Self, CryptoError> {
        let order = Zp::from_be_bytes(n)?;
        let width = field.n();

        let reduced = |bytes: &[u8]| -> Result<BigNum, CryptoError> {
            let v = BigNum::from_be_bytes(width, bytes)?;
            if limbs::cmp(v.as_units(), field.modulus()) != std::cmp::Ordering::Less {
                tracing::error!("curve parameter not reduced modulo p");
                return Err(CryptoError::InvalidPoint);
            }
            Ok(v)
        };

        let params = Self {
            curve: None,
            a: reduced(a)?,
            b: reduced(b)?,
            gx: reduced(gx)?,
            gy: reduced(gy)?,
            size: field.bit_len().div_ceil(8),
            field,
            order,
            cofactor,
        };

        if !params.is_on_curve(&params.generator().view())? {
            tracing::error!("base point is not on the curve");
            return Err(CryptoError::InvalidPoint);
        }
        Ok(params)
    }

    fn with_curve(mut self, curve: EcCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Returns the named curve these parameters belong to, if any.
    pub fn curve(&self) -> Option<EcCurve> {
        self.curve
    }

    /// Returns the coordinate field.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Returns the scalar field, modulo the group order.
    pub fn order(&self) -> &Zp {
        &self.order
    }

    /// Returns the limb count of field elements.
    pub fn n(&self) -> usize {
        self.field.n()
    }

    /// Returns the byte size of an encoded coordinate.
    pub fn size_bytes(&self) -> usize {
        self.size
    }

    /// Returns the coefficient `a`.
    pub fn a(&self) -> &BigNum {
        &self.a
    }

    /// Returns the coefficient `b`.
    pub fn b(&self) -> &BigNum {
        &self.b
    }

    /// Returns the cofactor.
    pub fn cofactor(&self) -> Unit {
        self.cofactor
    }

    /// Returns the base point.
    pub fn generator(&self) -> AffinePointBuf {
        AffinePointBuf::from_units(self.gx.as_units(), self.gy.as_units())
    }
}
