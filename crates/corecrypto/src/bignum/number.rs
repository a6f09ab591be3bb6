// Copyright (C) Microsoft Corporation. All rights reserved.

//! Owned fixed-width numbers.

use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

use super::*;

/// An owned number of a fixed limb count, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BigNum {
    units: Vec<Unit>,
}

impl std::fmt::Debug for BigNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut be = vec![0u8; self.units.len() * UNIT_BYTES];
        // The buffer is exactly as wide as the limbs.
        let _ = limbs::write_be(&self.units, &mut be);
        f.debug_tuple("BigNum").field(&hex_string(&be)).finish()
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl BigNum {
    /// Zero with `n` limbs.
    pub fn zero(n: usize) -> Self {
        Self { units: vec![0; n] }
    }

    /// The small value `v` with `n` limbs (`n >= 1`).
    pub fn from_unit(n: usize, v: Unit) -> Self {
        let mut num = Self::zero(n.max(1));
        num.units[0] = v;
        num
    }

    /// Wraps existing limbs, least significant first.
    pub fn from_units(units: &[Unit]) -> Self {
        Self {
            units: units.to_vec(),
        }
    }

    /// Reads a big-endian byte string into an `n`-limb number.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if the value does not
    /// fit in `n` limbs.
    pub fn from_be_bytes(n: usize, bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut num = Self::zero(n);
        limbs::read_be(&mut num.units, bytes)?;
        Ok(num)
    }

    /// Writes the value big-endian into `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InsufficientCapacity`] if the value does not
    /// fit in `len` bytes.
    pub fn to_be_bytes(&self, len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut out = vec![0u8; len];
        limbs::write_be(&self.units, &mut out)?;
        Ok(out)
    }

    /// Limb count.
    pub fn n(&self) -> usize {
        self.units.len()
    }

    /// The limbs, least significant first.
    pub fn as_units(&self) -> &[Unit] {
        &self.units
    }

    /// Mutable access to the limbs.
    pub fn as_units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    /// Number of significant bits.
    pub fn bit_len(&self) -> usize {
        limbs::bit_len(&self.units)
    }

    /// Bit `k` as 0 or 1.
    pub fn bit(&self, k: usize) -> Unit {
        limbs::bit(&self.units, k)
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.units)
    }
}

impl AsRef<[Unit]> for BigNum {
    fn as_ref(&self) -> &[Unit] {
        &self.units
    }
}

impl AsMut<[Unit]> for BigNum {
    fn as_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }
}
