// Copyright (C) Microsoft Corporation. All rights reserved.

//! ECDSA signature verification (FIPS 186-4 section 6.4).

use std::cmp::Ordering;

use super::*;

/// Reads a signature component, rejecting values outside `[1, n - 1]`.
fn read_component(order: &Zp, bytes: &[u8]) -> Result<BigNum, CryptoError> {
    let v = BigNum::from_be_bytes(order.n(), bytes).map_err(|_| CryptoError::InvalidSignature)?;
    if v.is_zero() || limbs::cmp(v.as_units(), order.modulus()) != Ordering::Less {
        tracing::error!("signature component out of range");
        return Err(CryptoError::InvalidSignature);
    }
    Ok(v)
}

/// Converts a digest to an integer modulo `n`, keeping its leftmost
/// `bit_len(n)` bits.
fn digest_to_scalar(order: &Zp, digest: &[u8]) -> Result<BigNum, CryptoError> {
    let nbits = order.bit_len();
    let digest = &digest[..digest.len().min(nbits.div_ceil(8))];
    let mut e = BigNum::from_be_bytes(order.n(), digest)?;
    let excess = (digest.len() * 8).saturating_sub(nbits);
    if excess > 0 {
        let src = e.clone();
        limbs::shift_right(e.as_units_mut(), src.as_units(), excess);
    }
    // e < 2^nbits < 2n
    let src = e.clone();
    order.reduce_once(e.as_units_mut(), src.as_units());
    Ok(e)
}

/// Verifies a DER ECDSA signature over a precomputed digest.
///
/// # Returns
///
/// `Ok(true)` if the signature is valid, `Ok(false)` if it is well formed
/// but does not match.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidSignature`] if the signature is not DER or
/// `r` or `s` is outside `[1, n - 1]`.
pub fn ecdsa_verify(
    key: &EcPublicKey,
    digest: &[u8],
    signature: &[u8],
) -> Result<bool, CryptoError> {
    let sig = DerEcdsaSignature::from_der(signature).map_err(|_| CryptoError::InvalidSignature)?;
    let params = key.curve().params()?;
    let order = params.order();

    let r = read_component(order, sig.r())?;
    let s = read_component(order, sig.s())?;
    let e = digest_to_scalar(order, digest)?;

    let width = order.n();
    let mut w = BigNum::zero(width);
    order.inv(w.as_units_mut(), s.as_units());
    let mut u1 = BigNum::zero(width);
    order.mul(u1.as_units_mut(), e.as_units(), w.as_units());
    let mut u2 = BigNum::zero(width);
    order.mul(u2.as_units_mut(), r.as_units(), w.as_units());

    let g = params.projective_buf(&params.generator().view())?;
    let q = params.projective_buf(&key.point())?;
    let sum = params.add_buf(
        &params.ladder_buf(u1.as_units(), &g),
        &params.ladder_buf(u2.as_units(), &q),
    );
    if sum.view().is_at_infinity() {
        tracing::debug!("ECDSA verification reached the point at infinity");
        return Ok(false);
    }

    // v = R.x mod n
    let rx = params.affine_buf(&sum)?;
    let mut v = BigNum::zero(params.n().max(width));
    v.as_units_mut()[..params.n()].copy_from_slice(rx.x());
    let mut n = BigNum::zero(v.n());
    n.as_units_mut()[..width].copy_from_slice(order.modulus());
    while limbs::cmp(v.as_units(), n.as_units()) != Ordering::Less {
        limbs::sub_assign(v.as_units_mut(), n.as_units());
    }
    let mut expected = BigNum::zero(v.n());
    expected.as_units_mut()[..width].copy_from_slice(r.as_units());

    Ok(bool::from(limbs::ct_eq(v.as_units(), expected.as_units())))
}

/// ECDSA verification, optionally hashing the message first.
pub struct EcdsaAlgo {
    hash: Option<HashAlgo>,
}

impl EcdsaAlgo {
    /// Verifies signatures over `hash(data)`.
    pub fn new(hash: HashAlgo) -> Self {
        Self { hash: Some(hash) }
    }

    /// Verifies signatures over `data` taken as the digest.
    pub fn prehashed() -> Self {
        Self { hash: None }
    }
}

impl VerifyOp for EcdsaAlgo {
    type Key = EcPublicKey;

    fn verify(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError> {
        match self.hash.as_mut() {
            Some(hash) => {
                let digest = Hasher::hash_vec(hash, data)?;
                ecdsa_verify(key, &digest, signature)
            }
            None => ecdsa_verify(key, data, signature),
        }
    }
}
