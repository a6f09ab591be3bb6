// Copyright (C) Microsoft Corporation. All rights reserved.

//! Point storage and Jacobian point arithmetic.
//!
//! A projective point `(X, Y, Z)` stands for the affine point
//! `(X / Z^2, Y / Z^3)`. The point at infinity is stored as exactly
//! `(1, 1, 0)`; every operation canonicalizes a zero `Z` to that encoding.
//!
//! Points are handled through borrowed views over caller storage. Sources
//! must have exactly the field's limb count ([`CryptoError::InvalidLength`]
//! otherwise); destinations need at least that many limbs
//! ([`CryptoError::InsufficientCapacity`] otherwise) and have any extra
//! limbs cleared.

use subtle::Choice;
use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;
use zeroize::Zeroizing;

use super::*;

/// A field element temporary, wiped on drop.
type Fe = Zeroizing<Vec<Unit>>;

/// Splits `n` limbs off the front of each coordinate slice.
fn take_mut<'a>(n: usize, s: &'a mut [Unit]) -> Result<&'a mut [Unit], CryptoError> {
    if s.len() < n {
        tracing::error!(len = s.len(), required = n, "point coordinate buffer too small");
        return Err(CryptoError::InsufficientCapacity);
    }
    Ok(s.split_at_mut(n).0)
}

fn take<'a>(n: usize, s: &'a [Unit]) -> Result<&'a [Unit], CryptoError> {
    if s.len() < n {
        tracing::error!(len = s.len(), required = n, "point coordinate buffer too small");
        return Err(CryptoError::InsufficientCapacity);
    }
    Ok(&s[..n])
}

/// Writes `src` into the low limbs of `dst` and clears the rest.
fn store(dst: &mut [Unit], src: &[Unit]) {
    dst[..src.len()].copy_from_slice(src);
    limbs::zero(&mut dst[src.len()..]);
}

/// Exact `(1, 1, 0)` check.
fn ct_is_canonical_infinity(x: &[Unit], y: &[Unit], z: &[Unit]) -> Choice {
    let mut one = vec![0 as Unit; x.len()];
    limbs::set_unit(&mut one, 1);
    limbs::ct_eq(x, &one) & limbs::ct_eq(y, &one) & limbs::ct_is_zero(z)
}

/// A mutable view of a projective point.
pub struct ProjectivePoint<'a> {
    n: usize,
    x: &'a mut [Unit],
    y: &'a mut [Unit],
    z: &'a mut [Unit],
}

impl<'a> ProjectivePoint<'a> {
    /// Views `n` limbs of each coordinate buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if any buffer is shorter
    /// than `n` limbs.
    pub fn new(
        n: usize,
        x: &'a mut [Unit],
        y: &'a mut [Unit],
        z: &'a mut [Unit],
    ) -> Result<Self, CryptoError> {
        Ok(Self {
            n,
            x: take_mut(n, x)?,
            y: take_mut(n, y)?,
            z: take_mut(n, z)?,
        })
    }

    /// Returns the limb count.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the `X` coordinate.
    pub fn x(&self) -> &[Unit] {
        &*self.x
    }

    /// Returns the `Y` coordinate.
    pub fn y(&self) -> &[Unit] {
        &*self.y
    }

    /// Returns the `Z` coordinate.
    pub fn z(&self) -> &[Unit] {
        &*self.z
    }

    /// Returns a read-only view of the same point.
    pub fn as_const(&self) -> ConstProjectivePoint<'_> {
        ConstProjectivePoint {
            n: self.n,
            x: &*self.x,
            y: &*self.y,
            z: &*self.z,
        }
    }

    /// Returns whether the point is stored as exactly `(1, 1, 0)`.
    pub fn is_at_infinity(&self) -> bool {
        self.as_const().is_at_infinity()
    }

    fn assign(&mut self, src: &ProjectivePointBuf) {
        store(self.x, &src.x);
        store(self.y, &src.y);
        store(self.z, &src.z);
    }
}

/// A read-only view of a projective point.
#[derive(Clone, Copy)]
pub struct ConstProjectivePoint<'a> {
    n: usize,
    x: &'a [Unit],
    y: &'a [Unit],
    z: &'a [Unit],
}

impl<'a> ConstProjectivePoint<'a> {
    /// Views `n` limbs of each coordinate buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if any buffer is shorter
    /// than `n` limbs.
    pub fn new(n: usize, x: &'a [Unit], y: &'a [Unit], z: &'a [Unit]) -> Result<Self, CryptoError> {
        Ok(Self {
            n,
            x: take(n, x)?,
            y: take(n, y)?,
            z: take(n, z)?,
        })
    }

    /// Returns the limb count.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the `X` coordinate.
    pub fn x(&self) -> &'a [Unit] {
        self.x
    }

    /// Returns the `Y` coordinate.
    pub fn y(&self) -> &'a [Unit] {
        self.y
    }

    /// Returns the `Z` coordinate.
    pub fn z(&self) -> &'a [Unit] {
        self.z
    }

    /// Returns whether the point is stored as exactly `(1, 1, 0)`.
    ///
    /// Other encodings with `Z = 0` are not recognized; the arithmetic in
    /// this module never produces them.
    pub fn is_at_infinity(&self) -> bool {
        ct_is_canonical_infinity(self.x, self.y, self.z).into()
    }
}

/// A mutable view of an affine point.
pub struct AffinePoint<'a> {
    n: usize,
    x: &'a mut [Unit],
    y: &'a mut [Unit],
}

impl<'a> AffinePoint<'a> {
    /// Views `n` limbs of each coordinate buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if either buffer is
    /// shorter than `n` limbs.
    pub fn new(n: usize, x: &'a mut [Unit], y: &'a mut [Unit]) -> Result<Self, CryptoError> {
        Ok(Self {
            n,
            x: take_mut(n, x)?,
            y: take_mut(n, y)?,
        })
    }

    /// Returns the limb count.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the `x` coordinate.
    pub fn x(&self) -> &[Unit] {
        &*self.x
    }

    /// Returns the `y` coordinate.
    pub fn y(&self) -> &[Unit] {
        &*self.y
    }

    /// Returns a read-only view of the same point.
    pub fn as_const(&self) -> ConstAffinePoint<'_> {
        ConstAffinePoint {
            n: self.n,
            x: &*self.x,
            y: &*self.y,
        }
    }
}

/// A read-only view of an affine point.
#[derive(Clone, Copy)]
pub struct ConstAffinePoint<'a> {
    n: usize,
    x: &'a [Unit],
    y: &'a [Unit],
}

impl<'a> ConstAffinePoint<'a> {
    /// Views `n` limbs of each coordinate buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if either buffer is
    /// shorter than `n` limbs.
    pub fn new(n: usize, x: &'a [Unit], y: &'a [Unit]) -> Result<Self, CryptoError> {
        Ok(Self {
            n,
            x: take(n, x)?,
            y: take(n, y)?,
        })
    }

    /// Returns the limb count.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the `x` coordinate.
    pub fn x(&self) -> &'a [Unit] {
        self.x
    }

    /// Returns the `y` coordinate.
    pub fn y(&self) -> &'a [Unit] {
        self.y
    }
}

/// Owned storage for a projective point.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ProjectivePointBuf {
    x: Vec<Unit>,
    y: Vec<Unit>,
    z: Vec<Unit>,
}

impl std::fmt::Debug for ProjectivePointBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectivePointBuf")
            .field("x", &BigNum::from_units(&self.x))
            .field("y", &BigNum::from_units(&self.y))
            .field("z", &BigNum::from_units(&self.z))
            .finish()
    }
}

impl ProjectivePointBuf {
    /// Allocates a zeroed point of `n` limbs per coordinate.
    pub fn new(n: usize) -> Self {
        Self {
            x: vec![0; n],
            y: vec![0; n],
            z: vec![0; n],
        }
    }

    fn infinity(n: usize) -> Self {
        let mut p = Self::new(n);
        limbs::set_unit(&mut p.x, 1);
        limbs::set_unit(&mut p.y, 1);
        p
    }

    fn from_fe(x: Fe, y: Fe, z: Fe) -> Self {
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.to_vec(),
        }
    }

    /// Returns the limb count.
    pub fn n(&self) -> usize {
        self.x.len()
    }

    /// Borrows the point read-only.
    pub fn view(&self) -> ConstProjectivePoint<'_> {
        ConstProjectivePoint {
            n: self.n(),
            x: &self.x,
            y: &self.y,
            z: &self.z,
        }
    }

    /// Borrows the point mutably.
    pub fn view_mut(&mut self) -> ProjectivePoint<'_> {
        ProjectivePoint {
            n: self.x.len(),
            x: &mut self.x,
            y: &mut self.y,
            z: &mut self.z,
        }
    }

    fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        limbs::conditional_assign(&mut self.x, &other.x, choice);
        limbs::conditional_assign(&mut self.y, &other.y, choice);
        limbs::conditional_assign(&mut self.z, &other.z, choice);
    }

    fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        limbs::conditional_swap(&mut a.x, &mut b.x, choice);
        limbs::conditional_swap(&mut a.y, &mut b.y, choice);
        limbs::conditional_swap(&mut a.z, &mut b.z, choice);
    }
}

/// Owned storage for an affine point.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AffinePointBuf {
    x: Vec<Unit>,
    y: Vec<Unit>,
}

impl std::fmt::Debug for AffinePointBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffinePointBuf")
            .field("x", &BigNum::from_units(&self.x))
            .field("y", &BigNum::from_units(&self.y))
            .finish()
    }
}

impl AffinePointBuf {
    /// Allocates a zeroed point of `n` limbs per coordinate.
    pub fn new(n: usize) -> Self {
        Self {
            x: vec![0; n],
            y: vec![0; n],
        }
    }

    /// Copies coordinates given as limbs. Both must have the same length.
    pub fn from_units(x: &[Unit], y: &[Unit]) -> Self {
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
        }
    }

    /// Reads big-endian coordinates into `n` limbs each.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if a coordinate does
    /// not fit in `n` limbs.
    pub fn from_be_bytes(n: usize, x: &[u8], y: &[u8]) -> Result<Self, CryptoError> {
        let mut p = Self::new(n);
        limbs::read_be(&mut p.x, x)?;
        limbs::read_be(&mut p.y, y)?;
        Ok(p)
    }

    /// Writes both coordinates big-endian, `len` bytes each.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if a coordinate does
    /// not fit in `len` bytes.
    pub fn to_be_bytes(&self, len: usize) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        let mut x = vec![0u8; len];
        let mut y = vec![0u8; len];
        limbs::write_be(&self.x, &mut x)?;
        limbs::write_be(&self.y, &mut y)?;
        Ok((x, y))
    }

    /// Returns the limb count.
    pub fn n(&self) -> usize {
        self.x.len()
    }

    /// Returns the `x` coordinate.
    pub fn x(&self) -> &[Unit] {
        &self.x
    }

    /// Returns the `y` coordinate.
    pub fn y(&self) -> &[Unit] {
        &self.y
    }

    /// Borrows the point read-only.
    pub fn view(&self) -> ConstAffinePoint<'_> {
        ConstAffinePoint {
            n: self.n(),
            x: &self.x,
            y: &self.y,
        }
    }

    /// Borrows the point mutably.
    pub fn view_mut(&mut self) -> AffinePoint<'_> {
        AffinePoint {
            n: self.x.len(),
            x: &mut self.x,
            y: &mut self.y,
        }
    }
}

impl<F: PrimeField> CurveParams<F> {
    fn fe(&self) -> Fe {
        Zeroizing::new(vec![0; self.n()])
    }

    fn fadd(&self, a: &[Unit], b: &[Unit]) -> Fe {
        let mut r = self.fe();
        self.field().add(&mut r, a, b);
        r
    }

    fn fsub(&self, a: &[Unit], b: &[Unit]) -> Fe {
        let mut r = self.fe();
        self.field().sub(&mut r, a, b);
        r
    }

    fn fmul(&self, a: &[Unit], b: &[Unit]) -> Fe {
        let mut r = self.fe();
        self.field().mul(&mut r, a, b);
        r
    }

    fn fsqr(&self, a: &[Unit]) -> Fe {
        let mut r = self.fe();
        self.field().sqr(&mut r, a);
        r
    }

    fn check_source(&self, what: &'static str, n: usize) -> Result<(), CryptoError> {
        if n != self.n() {
            tracing::error!(what, n, expected = self.n(), "point width does not match the field");
            return Err(CryptoError::InvalidLength);
        }
        Ok(())
    }

    fn check_dest(&self, n: usize) -> Result<(), CryptoError> {
        if n < self.n() {
            tracing::error!(n, required = self.n(), "destination point narrower than the field");
            return Err(CryptoError::InsufficientCapacity);
        }
        Ok(())
    }

    fn load(&self, p: &ConstProjectivePoint<'_>) -> Result<ProjectivePointBuf, CryptoError> {
        self.check_source("projective", p.n)?;
        Ok(ProjectivePointBuf {
            x: p.x.to_vec(),
            y: p.y.to_vec(),
            z: p.z.to_vec(),
        })
    }

    /// Rewrites any point with `Z = 0` as exactly `(1, 1, 0)`.
    fn canonicalize(&self, p: &mut ProjectivePointBuf) {
        let inf = limbs::ct_is_zero(&p.z);
        let mut one = self.fe();
        limbs::set_unit(&mut one, 1);
        limbs::conditional_assign(&mut p.x, &one, inf);
        limbs::conditional_assign(&mut p.y, &one, inf);
    }

    /// Jacobian doubling for a general `a`.
    pub(crate) fn double_buf(&self, p: &ProjectivePointBuf) -> ProjectivePointBuf {
        let xx = self.fsqr(&p.x);
        let yy = self.fsqr(&p.y);
        let yyyy = self.fsqr(&yy);
        let zz = self.fsqr(&p.z);

        // S = 2((X + YY)^2 - XX - YYYY)
        let t = self.fsqr(&self.fadd(&p.x, &yy));
        let t = self.fsub(&self.fsub(&t, &xx), &yyyy);
        let s = self.fadd(&t, &t);

        // M = 3XX + a ZZ^2
        let m = self.fadd(&self.fadd(&xx, &xx), &xx);
        let m = self.fadd(&m, &self.fmul(self.a().as_units(), &self.fsqr(&zz)));

        // X3 = M^2 - 2S
        let x3 = self.fsub(&self.fsqr(&m), &self.fadd(&s, &s));

        // Y3 = M(S - X3) - 8 YYYY
        let y2 = self.fadd(&yyyy, &yyyy);
        let y4 = self.fadd(&y2, &y2);
        let y8 = self.fadd(&y4, &y4);
        let y3 = self.fsub(&self.fmul(&m, &self.fsub(&s, &x3)), &y8);

        // Z3 = (Y + Z)^2 - YY - ZZ = 2YZ
        let z3 = self.fsub(&self.fsub(&self.fsqr(&self.fadd(&p.y, &p.z)), &yy), &zz);

        let mut r = ProjectivePointBuf::from_fe(x3, y3, z3);
        self.canonicalize(&mut r);
        r
    }

    /// Complete Jacobian addition.
    ///
    /// The generic formula fails for `P = Q` and for an input at infinity;
    /// those results are replaced by constant-time selection. `P = -Q`
    /// yields `Z3 = 0` and canonicalizes to infinity.
    pub(crate) fn add_buf(
        &self,
        p: &ProjectivePointBuf,
        q: &ProjectivePointBuf,
    ) -> ProjectivePointBuf {
        let z1z1 = self.fsqr(&p.z);
        let z2z2 = self.fsqr(&q.z);
        let u1 = self.fmul(&p.x, &z2z2);
        let u2 = self.fmul(&q.x, &z1z1);
        let s1 = self.fmul(&self.fmul(&p.y, &q.z), &z2z2);
        let s2 = self.fmul(&self.fmul(&q.y, &p.z), &z1z1);
        let h = self.fsub(&u2, &u1);
        let r = self.fsub(&s2, &s1);

        let hh = self.fsqr(&h);
        let hhh = self.fmul(&h, &hh);
        let v = self.fmul(&u1, &hh);

        // X3 = R^2 - H^3 - 2 U1 H^2
        let x3 = self.fsub(&self.fsub(&self.fsqr(&r), &hhh), &self.fadd(&v, &v));
        // Y3 = R(U1 H^2 - X3) - S1 H^3
        let y3 = self.fsub(&self.fmul(&r, &self.fsub(&v, &x3)), &self.fmul(&s1, &hhh));
        // Z3 = Z1 Z2 H
        let z3 = self.fmul(&self.fmul(&p.z, &q.z), &h);

        let p_inf = limbs::ct_is_zero(&p.z);
        let q_inf = limbs::ct_is_zero(&q.z);
        let same = limbs::ct_is_zero(&h) & limbs::ct_is_zero(&r) & !p_inf & !q_inf;

        let mut out = ProjectivePointBuf::from_fe(x3, y3, z3);
        out.conditional_assign(&self.double_buf(p), same);
        out.conditional_assign(q, p_inf);
        out.conditional_assign(p, q_inf);
        self.canonicalize(&mut out);
        out
    }

    /// Montgomery ladder over every bit of `k`, most significant first.
    ///
    /// The iteration count depends only on `k.len()`; each step runs one
    /// addition and one doubling behind constant-time swaps.
    pub(crate) fn ladder_buf(&self, k: &[Unit], p: &ProjectivePointBuf) -> ProjectivePointBuf {
        let mut r0 = ProjectivePointBuf::infinity(self.n());
        let mut r1 = p.clone();
        self.canonicalize(&mut r1);

        for i in (0..k.len() * UNIT_BITS).rev() {
            let bit = Choice::from(limbs::bit(k, i) as u8);
            ProjectivePointBuf::conditional_swap(&mut r0, &mut r1, bit);
            r1 = self.add_buf(&r0, &r1);
            r0 = self.double_buf(&r0);
            ProjectivePointBuf::conditional_swap(&mut r0, &mut r1, bit);
        }
        r0
    }

    pub(crate) fn affine_buf(&self, p: &ProjectivePointBuf) -> Result<AffinePointBuf, CryptoError> {
        if limbs::is_zero(&p.z) {
            tracing::error!("point at infinity has no affine form");
            return Err(CryptoError::InvalidPoint);
        }
        let mut zinv = self.fe();
        self.field().inv(&mut zinv, &p.z);
        let zinv2 = self.fsqr(&zinv);
        let zinv3 = self.fmul(&zinv2, &zinv);
        let x = self.fmul(&p.x, &zinv2);
        let y = self.fmul(&p.y, &zinv3);
        Ok(AffinePointBuf::from_units(&x, &y))
    }

    pub(crate) fn projective_buf(
        &self,
        a: &ConstAffinePoint<'_>,
    ) -> Result<ProjectivePointBuf, CryptoError> {
        self.check_source("affine", a.n)?;
        let mut p = ProjectivePointBuf {
            x: a.x.to_vec(),
            y: a.y.to_vec(),
            z: vec![0; self.n()],
        };
        limbs::set_unit(&mut p.z, 1);
        Ok(p)
    }

    /// Sets `r` to the point at infinity, `(1, 1, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if `r` is narrower than
    /// the field.
    pub fn init_at_infinity(&self, r: &mut ProjectivePoint<'_>) -> Result<(), CryptoError> {
        self.check_dest(r.n)?;
        r.assign(&ProjectivePointBuf::infinity(self.n()));
        Ok(())
    }

    /// Lifts an affine point: `(x, y) -> (x, y, 1)`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if `a` does not match the field width
    /// - [`CryptoError::InsufficientCapacity`] if `r` is narrower than the field
    pub fn from_affine(
        &self,
        r: &mut ProjectivePoint<'_>,
        a: &ConstAffinePoint<'_>,
    ) -> Result<(), CryptoError> {
        self.check_dest(r.n)?;
        r.assign(&self.projective_buf(a)?);
        Ok(())
    }

    /// Normalizes `p` to affine coordinates `(X / Z^2, Y / Z^3)`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if `p` does not match the field width
    /// - [`CryptoError::InsufficientCapacity`] if `r` is narrower than the field
    /// - [`CryptoError::InvalidPoint`] if `p` is the point at infinity
    pub fn to_affine(
        &self,
        r: &mut AffinePoint<'_>,
        p: &ConstProjectivePoint<'_>,
    ) -> Result<(), CryptoError> {
        self.check_dest(r.n)?;
        let a = self.affine_buf(&self.load(p)?)?;
        store(r.x, &a.x);
        store(r.y, &a.y);
        Ok(())
    }

    /// Sets `r = 2p`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if `p` does not match the field width
    /// - [`CryptoError::InsufficientCapacity`] if `r` is narrower than the field
    pub fn double(
        &self,
        r: &mut ProjectivePoint<'_>,
        p: &ConstProjectivePoint<'_>,
    ) -> Result<(), CryptoError> {
        self.check_dest(r.n)?;
        let p = self.load(p)?;
        r.assign(&self.double_buf(&p));
        Ok(())
    }

    /// Sets `r = p + q`. Every input combination is handled, including
    /// `p = q`, `p = -q` and either input at infinity.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if an input does not match the field width
    /// - [`CryptoError::InsufficientCapacity`] if `r` is narrower than the field
    pub fn add(
        &self,
        r: &mut ProjectivePoint<'_>,
        p: &ConstProjectivePoint<'_>,
        q: &ConstProjectivePoint<'_>,
    ) -> Result<(), CryptoError> {
        self.check_dest(r.n)?;
        let p = self.load(p)?;
        let q = self.load(q)?;
        r.assign(&self.add_buf(&p, &q));
        Ok(())
    }

    /// Sets `r = k * p`.
    ///
    /// `k` is little-endian limbs. The ladder always runs `64 * k.len()`
    /// steps, so callers should pass scalars at a fixed width.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if `p` does not match the field width
    /// - [`CryptoError::InsufficientCapacity`] if `r` is narrower than the field
    pub fn scalar_multiply(
        &self,
        r: &mut ProjectivePoint<'_>,
        k: &[Unit],
        p: &ConstProjectivePoint<'_>,
    ) -> Result<(), CryptoError> {
        self.check_dest(r.n)?;
        let p = self.load(p)?;
        r.assign(&self.ladder_buf(k, &p));
        Ok(())
    }

    /// Returns whether `a` satisfies `y^2 = x^3 + ax + b` with both
    /// coordinates reduced.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if `a` does not match the
    /// field width.
    pub fn is_on_curve(&self, a: &ConstAffinePoint<'_>) -> Result<bool, CryptoError> {
        self.check_source("affine", a.n)?;
        let p = self.field().modulus();
        if limbs::cmp(a.x, p) != std::cmp::Ordering::Less
            || limbs::cmp(a.y, p) != std::cmp::Ordering::Less
        {
            return Ok(false);
        }
        let lhs = self.fsqr(a.y);
        // (x^2 + a) x + b
        let rhs = self.fadd(&self.fsqr(a.x), self.a().as_units());
        let rhs = self.fadd(&self.fmul(&rhs, a.x), self.b().as_units());
        Ok(bool::from(limbs::ct_eq(&lhs, &rhs)))
    }
}
