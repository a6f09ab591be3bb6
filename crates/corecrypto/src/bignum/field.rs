// Copyright (C) Microsoft Corporation. All rights reserved.

//! Arithmetic modulo an odd prime.
//!
//! [`Zp`] multiplies with word-by-word Montgomery reduction. Operands and
//! results are canonical residues in `[0, p)` at every call boundary; the
//! Montgomery form never escapes. Every operation runs a fixed sequence of
//! limb operations for a given modulus size.

use subtle::Choice;
use zeroize::Zeroize;

use super::*;

/// Arithmetic in a prime field `GF(p)`.
///
/// Output slices must not alias inputs, which the borrow rules already
/// guarantee. All slices are [`PrimeField::n`] limbs and inputs must be
/// reduced.
pub trait PrimeField {
    /// Limb count of field elements.
    fn n(&self) -> usize;

    /// The modulus `p`.
    fn modulus(&self) -> &[Unit];

    /// Significant bits in `p`.
    fn bit_len(&self) -> usize;

    /// `r = a + b mod p`.
    fn add(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]);

    /// `r = a - b mod p`.
    fn sub(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]);

    /// `r = a * b mod p`.
    fn mul(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]);

    /// `r = a^2 mod p`.
    fn sqr(&self, r: &mut [Unit], a: &[Unit]) {
        self.mul(r, a, a);
    }

    /// `r = a^-1 mod p`, with `0^-1 = 0`.
    fn inv(&self, r: &mut [Unit], a: &[Unit]);

    /// `r = a mod p` for any `a < 2p`.
    fn reduce_once(&self, r: &mut [Unit], a: &[Unit]);
}

/// A prime field with Montgomery multiplication.
#[derive(Clone)]
pub struct Zp {
    modulus: Vec<Unit>,
    bit_len: usize,
    /// `-p^-1 mod 2^64`.
    m0inv: Unit,
    /// `R^2 mod p` with `R = 2^(64 n)`.
    rr: Vec<Unit>,
    /// `p - 2`, the Fermat inversion exponent.
    inv_exp: Vec<Unit>,
}

impl std::fmt::Debug for Zp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zp")
            .field("bit_len", &self.bit_len)
            .field("n", &self.modulus.len())
            .finish()
    }
}

impl Zp {
    /// Builds the field for the modulus `p`.
    ///
    /// The limb count is the minimum needed for `p`; extra zero limbs are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidModulus`] if `p` is even or less than 3.
    pub fn new(p: &[Unit]) -> Result<Self, CryptoError> {
        let bit_len = limbs::bit_len(p);
        let n = units_for_bits(bit_len);
        if bit_len < 2 || p[0] & 1 == 0 {
            tracing::error!(bit_len, "field modulus must be odd and at least 3");
            return Err(CryptoError::InvalidModulus);
        }
        let modulus = p[..n].to_vec();

        // Newton iteration doubles the correct low bits each step: 1, 2, 4 ... 64.
        let mut inv: Unit = 1;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(modulus[0].wrapping_mul(inv)));
        }
        let m0inv = inv.wrapping_neg();

        let mut inv_exp = vec![0; n];
        let two = BigNum::from_unit(n, 2);
        limbs::sub(&mut inv_exp, &modulus, two.as_units());

        let mut field = Self {
            modulus,
            bit_len,
            m0inv,
            rr: vec![0; n],
            inv_exp,
        };

        // R^2 mod p by doubling 1 a total of 2 * 64 * n times.
        let mut x = vec![0; n];
        let mut t = vec![0; n];
        limbs::set_unit(&mut x, 1);
        for _ in 0..2 * UNIT_BITS * n {
            field.add(&mut t, &x, &x);
            x.copy_from_slice(&t);
        }
        field.rr = x;

        tracing::debug!(bit_len, n, "prime field ready");
        Ok(field)
    }

    /// Builds the field from a big-endian modulus.
    pub fn from_be_bytes(p: &[u8]) -> Result<Self, CryptoError> {
        let num = BigNum::from_be_bytes(units_for_bytes(p.len()).max(1), p)?;
        Self::new(num.as_units())
    }

    /// Montgomery product `r = a * b * R^-1 mod p` for `a, b < p`.
    fn mont_mul(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]) {
        let n = self.modulus.len();
        let p = &self.modulus;
        let mut t = vec![0 as Unit; n + 2];

        for &ai in a.iter().take(n) {
            let mut carry: u128 = 0;
            for j in 0..n {
                let acc = u128::from(t[j]) + u128::from(ai) * u128::from(b[j]) + carry;
                t[j] = acc as Unit;
                carry = acc >> UNIT_BITS;
            }
            let acc = u128::from(t[n]) + carry;
            t[n] = acc as Unit;
            t[n + 1] = (acc >> UNIT_BITS) as Unit;

            let m = t[0].wrapping_mul(self.m0inv);
            let acc = u128::from(t[0]) + u128::from(m) * u128::from(p[0]);
            let mut carry = acc >> UNIT_BITS;
            for j in 1..n {
                let acc = u128::from(t[j]) + u128::from(m) * u128::from(p[j]) + carry;
                t[j - 1] = acc as Unit;
                carry = acc >> UNIT_BITS;
            }
            let acc = u128::from(t[n]) + carry;
            t[n - 1] = acc as Unit;
            t[n] = t[n + 1] + (acc >> UNIT_BITS) as Unit;
        }

        // t < 2p: subtract p once unless that borrows out of the top limb.
        let borrow = limbs::sub(r, &t[..n], p);
        let keep_t = Choice::from((borrow & !t[n] & 1) as u8);
        limbs::conditional_assign(r, &t[..n], keep_t);
        t.zeroize();
    }
}

impl PrimeField for Zp {
    fn n(&self) -> usize {
        self.modulus.len()
    }

    fn modulus(&self) -> &[Unit] {
        &self.modulus
    }

    fn bit_len(&self) -> usize {
        self.bit_len
    }

    fn add(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]) {
        let n = self.n();
        let mut sum = vec![0; n];
        let carry = limbs::add(&mut sum, a, b);
        let borrow = limbs::sub(r, &sum, &self.modulus);
        // Keep the unreduced sum only if it was already below p.
        let keep_sum = Choice::from((borrow & !carry & 1) as u8);
        limbs::conditional_assign(r, &sum, keep_sum);
        sum.zeroize();
    }

    fn sub(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]) {
        let n = self.n();
        let borrow = limbs::sub(r, a, b);
        let mut wrapped = vec![0; n];
        limbs::add(&mut wrapped, r, &self.modulus);
        limbs::conditional_assign(r, &wrapped, Choice::from(borrow as u8));
        wrapped.zeroize();
    }

    fn mul(&self, r: &mut [Unit], a: &[Unit], b: &[Unit]) {
        let mut t = vec![0; self.n()];
        self.mont_mul(&mut t, a, b);
        self.mont_mul(r, &t, &self.rr);
        t.zeroize();
    }

    fn inv(&self, r: &mut [Unit], a: &[Unit]) {
        let n = self.n();
        let mut base = vec![0; n];
        self.mont_mul(&mut base, a, &self.rr);

        let mut one = vec![0; n];
        limbs::set_unit(&mut one, 1);
        let mut acc = vec![0; n];
        self.mont_mul(&mut acc, &one, &self.rr);

        let mut sq = vec![0; n];
        let mut prod = vec![0; n];
        for k in (0..n * UNIT_BITS).rev() {
            self.mont_mul(&mut sq, &acc, &acc);
            self.mont_mul(&mut prod, &sq, &base);
            let take = Choice::from(limbs::bit(&self.inv_exp, k) as u8);
            limbs::conditional_select(&mut acc, &sq, &prod, take);
        }

        self.mont_mul(r, &acc, &one);
        base.zeroize();
        acc.zeroize();
        sq.zeroize();
        prod.zeroize();
    }

    fn reduce_once(&self, r: &mut [Unit], a: &[Unit]) {
        let borrow = limbs::sub(r, a, &self.modulus);
        limbs::conditional_assign(r, a, Choice::from(borrow as u8));
    }
}
