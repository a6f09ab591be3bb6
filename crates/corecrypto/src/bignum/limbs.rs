// Copyright (C) Microsoft Corporation. All rights reserved.

//! Slice arithmetic on little-endian limb arrays.
//!
//! Apart from [`bit_len`] and the byte conversions, which depend only on
//! public lengths and are documented where they leak, these functions run
//! in time that depends on operand lengths but not on operand values.

use std::cmp::Ordering;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use super::*;

/// `r = s + t`, returning the carry out (0 or 1).
pub fn add(r: &mut [Unit], s: &[Unit], t: &[Unit]) -> Unit {
    let mut carry = 0;
    for ((ri, &si), &ti) in r.iter_mut().zip(s).zip(t) {
        let (v, c1) = si.overflowing_add(ti);
        let (v, c2) = v.overflowing_add(carry);
        *ri = v;
        carry = Unit::from(c1) + Unit::from(c2);
    }
    carry
}

/// `r = s - t`, returning the borrow out (0 or 1).
pub fn sub(r: &mut [Unit], s: &[Unit], t: &[Unit]) -> Unit {
    let mut borrow = 0;
    for ((ri, &si), &ti) in r.iter_mut().zip(s).zip(t) {
        let (v, b1) = si.overflowing_sub(ti);
        let (v, b2) = v.overflowing_sub(borrow);
        *ri = v;
        borrow = Unit::from(b1) + Unit::from(b2);
    }
    borrow
}

/// `r += t` in place, returning the carry out.
pub fn add_assign(r: &mut [Unit], t: &[Unit]) -> Unit {
    let mut carry = 0;
    for (ri, &ti) in r.iter_mut().zip(t) {
        let (v, c1) = ri.overflowing_add(ti);
        let (v, c2) = v.overflowing_add(carry);
        *ri = v;
        carry = Unit::from(c1) + Unit::from(c2);
    }
    carry
}

/// `r -= t` in place, returning the borrow out.
pub fn sub_assign(r: &mut [Unit], t: &[Unit]) -> Unit {
    let mut borrow = 0;
    for (ri, &ti) in r.iter_mut().zip(t) {
        let (v, b1) = ri.overflowing_sub(ti);
        let (v, b2) = v.overflowing_sub(borrow);
        *ri = v;
        borrow = Unit::from(b1) + Unit::from(b2);
    }
    borrow
}

/// Compares `s` and `t`.
///
/// The comparison itself does not branch on limb values; only the final
/// [`Ordering`] is revealed.
pub fn cmp(s: &[Unit], t: &[Unit]) -> Ordering {
    let eq = ct_eq(s, t);
    let lt = ct_lt(s, t);
    if bool::from(eq) {
        Ordering::Equal
    } else if bool::from(lt) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Constant-time `s == t`.
pub fn ct_eq(s: &[Unit], t: &[Unit]) -> Choice {
    s.ct_eq(t)
}

/// Constant-time `s < t`.
pub fn ct_lt(s: &[Unit], t: &[Unit]) -> Choice {
    let mut borrow: Unit = 0;
    for (&si, &ti) in s.iter().zip(t) {
        let (v, b1) = si.overflowing_sub(ti);
        let (_, b2) = v.overflowing_sub(borrow);
        borrow = Unit::from(b1) + Unit::from(b2);
    }
    Choice::from(borrow as u8)
}

/// Constant-time `s == 0`.
pub fn ct_is_zero(s: &[Unit]) -> Choice {
    let acc = s.iter().fold(0, |acc, &v| acc | v);
    acc.ct_eq(&0)
}

/// Returns whether `s` is zero.
pub fn is_zero(s: &[Unit]) -> bool {
    bool::from(ct_is_zero(s))
}

/// Returns bit `k` of `s` as 0 or 1. Bits past the end read as zero.
pub fn bit(s: &[Unit], k: usize) -> Unit {
    s.get(k / UNIT_BITS)
        .map_or(0, |&u| (u >> (k % UNIT_BITS)) & 1)
}

/// Number of significant bits in `s`. Leaks the position of the top set bit.
pub fn bit_len(s: &[Unit]) -> usize {
    s.iter()
        .rposition(|&u| u != 0)
        .map_or(0, |i| i * UNIT_BITS + (UNIT_BITS - s[i].leading_zeros() as usize))
}

/// Sets `r = 0`.
pub fn zero(r: &mut [Unit]) {
    r.fill(0);
}

/// Sets `r` to the small value `v`.
pub fn set_unit(r: &mut [Unit], v: Unit) {
    r.fill(0);
    if let Some(low) = r.first_mut() {
        *low = v;
    }
}

/// Full-width product: `r = s * t` with `r.len() == s.len() + t.len()`.
pub fn mul(r: &mut [Unit], s: &[Unit], t: &[Unit]) {
    debug_assert_eq!(r.len(), s.len() + t.len());
    r.fill(0);
    for (i, &si) in s.iter().enumerate() {
        let mut carry: u128 = 0;
        for (j, &tj) in t.iter().enumerate() {
            let acc = u128::from(r[i + j]) + u128::from(si) * u128::from(tj) + carry;
            r[i + j] = acc as Unit;
            carry = acc >> UNIT_BITS;
        }
        r[i + t.len()] = carry as Unit;
    }
}

/// `r = s >> k` for any shift `k`; bits shifted past the end are lost.
pub fn shift_right(r: &mut [Unit], s: &[Unit], k: usize) {
    let limbs = k / UNIT_BITS;
    let bits = k % UNIT_BITS;
    for i in 0..r.len() {
        let lo = s.get(i + limbs).copied().unwrap_or(0);
        let hi = s.get(i + limbs + 1).copied().unwrap_or(0);
        r[i] = if bits == 0 {
            lo
        } else {
            (lo >> bits) | (hi << (UNIT_BITS - bits))
        };
    }
}

/// Reads a big-endian byte string into `r`, zero-extending.
///
/// Leading zero bytes beyond the capacity of `r` are accepted.
///
/// # Errors
///
/// Returns [`CryptoError::InsufficientCapacity`] if the value needs more
/// limbs than `r` has.
pub fn read_be(r: &mut [Unit], bytes: &[u8]) -> Result<(), CryptoError> {
    let capacity = r.len() * UNIT_BYTES;
    let (excess, bytes) = bytes.split_at(bytes.len().saturating_sub(capacity));
    if excess.iter().any(|&b| b != 0) {
        tracing::error!(
            len = excess.len() + bytes.len(),
            capacity,
            "number wider than destination"
        );
        return Err(CryptoError::InsufficientCapacity);
    }

    r.fill(0);
    for (i, &b) in bytes.iter().rev().enumerate() {
        r[i / UNIT_BYTES] |= Unit::from(b) << (8 * (i % UNIT_BYTES));
    }
    Ok(())
}

/// Writes `s` big-endian into exactly `out.len()` bytes, left-padding with
/// zeros.
///
/// # Errors
///
/// Returns [`CryptoError::InsufficientCapacity`] if the value does not fit.
pub fn write_be(s: &[Unit], out: &mut [u8]) -> Result<(), CryptoError> {
    if bit_len(s) > out.len() * 8 {
        tracing::error!(bits = bit_len(s), len = out.len(), "number wider than output");
        return Err(CryptoError::InsufficientCapacity);
    }
    for (i, o) in out.iter_mut().rev().enumerate() {
        *o = s.get(i / UNIT_BYTES).map_or(0, |&u| (u >> (8 * (i % UNIT_BYTES))) as u8);
    }
    Ok(())
}

/// `r = choice ? b : a`.
pub fn conditional_select(r: &mut [Unit], a: &[Unit], b: &[Unit], choice: Choice) {
    for ((ri, ai), bi) in r.iter_mut().zip(a).zip(b) {
        *ri = Unit::conditional_select(ai, bi, choice);
    }
}

/// `r = b` if `choice`, else unchanged.
pub fn conditional_assign(r: &mut [Unit], b: &[Unit], choice: Choice) {
    for (ri, bi) in r.iter_mut().zip(b) {
        ri.conditional_assign(bi, choice);
    }
}

/// Swaps `a` and `b` if `choice`.
pub fn conditional_swap(a: &mut [Unit], b: &mut [Unit], choice: Choice) {
    for (ai, bi) in a.iter_mut().zip(b.iter_mut()) {
        Unit::conditional_swap(ai, bi, choice);
    }
}
