// Copyright (C) Microsoft Corporation. All rights reserved.

//! Fixed-width multi-precision integers.
//!
//! Numbers are little-endian arrays of [`Unit`] limbs: `s[0]` is the least
//! significant limb. The [`limbs`] functions work on caller-provided slices
//! and never allocate; all operands of one call have the same limb count
//! unless stated otherwise. [`BigNum`] owns its limbs, and [`Zp`] provides
//! arithmetic modulo an odd prime.

mod field;
pub mod limbs;
mod number;

pub use field::*;
pub use number::*;

use super::*;

/// One limb of a multi-precision integer.
pub type Unit = u64;

/// Bits per [`Unit`].
pub const UNIT_BITS: usize = Unit::BITS as usize;

/// Bytes per [`Unit`].
pub const UNIT_BYTES: usize = UNIT_BITS / 8;

/// Number of limbs needed to hold `bits` bits.
pub const fn units_for_bits(bits: usize) -> usize {
    bits.div_ceil(UNIT_BITS)
}

/// Number of limbs needed to hold `bytes` bytes.
pub const fn units_for_bytes(bytes: usize) -> usize {
    bytes.div_ceil(UNIT_BYTES)
}

#[cfg(test)]
mod tests;
