// Copyright (C) Microsoft Corporation. All rights reserved.

//! Arithmetic in GF(2^128).
//!
//! [`Gf128Block`] stores a field element as 16 bytes addressed
//! little-endian: `bytes[15]` holds the most significant byte of the
//! 128-bit integer view. GCM writes blocks big-endian with the x^0
//! coefficient in the leftmost bit, so [`Gf128Block::load_be`] and
//! [`Gf128Block::store_be`] reverse the bytes and integer bit 127 is the
//! x^0 coefficient.
//!
//! Reduction is by x^128 + x^7 + x^2 + x + 1, which in this bit order is
//! the byte `0xE1` folded into the top byte on every shift.
//!
//! No operation branches on or indexes by element contents. `mul` runs a
//! fixed 128 iterations and selects with masks.

use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

/// Size of a field element in bytes.
pub const GF128_BLOCK_SIZE: usize = 16;

/// `0xE1` in the top byte of the integer view.
const GCM_R: u128 = 0xE1 << 120;

/// XTS feedback for multiplication by alpha.
const XTS_R: u128 = 0x87;

/// A GF(2^128) element.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Gf128Block {
    bytes: [u8; GF128_BLOCK_SIZE],
}

impl std::fmt::Debug for Gf128Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut be = [0u8; GF128_BLOCK_SIZE];
        self.store_be(&mut be);
        f.debug_tuple("Gf128Block").field(&be).finish()
    }
}

impl Gf128Block {
    /// The additive identity.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Wraps raw little-endian-addressed bytes without reordering.
    pub fn from_bytes(bytes: [u8; GF128_BLOCK_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw little-endian-addressed bytes.
    pub fn as_bytes(&self) -> &[u8; GF128_BLOCK_SIZE] {
        &self.bytes
    }

    /// Returns a copy of the raw little-endian-addressed bytes.
    pub fn to_bytes(&self) -> [u8; GF128_BLOCK_SIZE] {
        self.bytes
    }

    fn to_u128(&self) -> u128 {
        u128::from_le_bytes(self.bytes)
    }

    fn from_u128(v: u128) -> Self {
        Self {
            bytes: v.to_le_bytes(),
        }
    }

    /// Loads a big-endian block.
    ///
    /// Inputs shorter than 16 bytes are the leading bytes of the block and
    /// are zero-padded on the right; longer inputs are truncated to 16.
    pub fn load_be(input: &[u8]) -> Self {
        let mut be = [0u8; GF128_BLOCK_SIZE];
        let len = input.len().min(GF128_BLOCK_SIZE);
        be[..len].copy_from_slice(&input[..len]);
        let v = u128::from_be_bytes(be);
        be.zeroize();
        Self::from_u128(v)
    }

    /// Stores the block big-endian.
    ///
    /// Outputs shorter than 16 bytes receive the leading bytes, which is
    /// the truncation GCM applies to short tags. Bytes past 16 are zeroed.
    pub fn store_be(&self, out: &mut [u8]) {
        let mut be = self.to_u128().to_be_bytes();
        let len = out.len().min(GF128_BLOCK_SIZE);
        out[..len].copy_from_slice(&be[..len]);
        out[len..].fill(0);
        be.zeroize();
    }

    /// Returns `self ^ other`.
    pub fn xor(&self, other: &Gf128Block) -> Gf128Block {
        Self::from_u128(self.to_u128() ^ other.to_u128())
    }

    /// Sets `self ^= other`.
    pub fn xor_assign(&mut self, other: &Gf128Block) {
        let v = self.to_u128() ^ other.to_u128();
        self.bytes = v.to_le_bytes();
    }

    /// Returns bit `index` (0..128) of the integer view as 0 or 1.
    ///
    /// Bit 127 is the x^0 coefficient.
    pub fn bit(&self, index: usize) -> u8 {
        let index = index % 128;
        ((self.to_u128() >> index) & 1) as u8
    }

    /// Shifts the integer view right by one bit.
    ///
    /// In polynomial terms this multiplies by x without reducing.
    pub fn shift_right_once(&mut self) {
        let v = self.to_u128() >> 1;
        self.bytes = v.to_le_bytes();
    }

    /// Multiplies two elements.
    ///
    /// Shift-and-add over the 128 bits of `self`, most significant
    /// coefficient first, folding `0xE1` in whenever a bit is shifted out.
    pub fn mul(&self, other: &Gf128Block) -> Gf128Block {
        let x = self.to_u128();
        let mut v = other.to_u128();
        let mut z = 0u128;

        for i in 0..128 {
            let take = 0u128.wrapping_sub((x >> (127 - i)) & 1);
            z ^= v & take;
            let carry = 0u128.wrapping_sub(v & 1);
            v = (v >> 1) ^ (GCM_R & carry);
        }

        Self::from_u128(z)
    }

    /// Increments the low 32 bits of the integer view modulo 2^32.
    ///
    /// In big-endian terms these are the last four bytes; the upper 96 bits
    /// are never touched. This is GCM's `inc32`.
    pub fn lsw_increment(&mut self) {
        let low = u32::from_le_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]]);
        self.bytes[..4].copy_from_slice(&low.wrapping_add(1).to_le_bytes());
    }

    /// Keeps the `nbits` least significant bits of the integer view and
    /// clears the rest.
    pub fn lsbits(&self, nbits: usize) -> Gf128Block {
        let mask = match nbits {
            0 => 0,
            n if n >= 128 => u128::MAX,
            n => (1u128 << n) - 1,
        };
        Self::from_u128(self.to_u128() & mask)
    }

    /// Keeps the `nbits` most significant bits of the integer view and
    /// clears the rest.
    ///
    /// Storing the result big-endian gives the leftmost `nbits` of the block,
    /// which is how truncated authentication tags are formed.
    pub fn msbits(&self, nbits: usize) -> Gf128Block {
        let mask = match nbits {
            0 => 0,
            n if n >= 128 => u128::MAX,
            n => !((1u128 << (128 - n)) - 1),
        };
        Self::from_u128(self.to_u128() & mask)
    }

    /// Multiplies by alpha in the XTS convention.
    ///
    /// XTS treats the raw bytes as a little-endian integer with x^0 in bit
    /// 0, so doubling is a left shift with `0x87` fed back into byte 0.
    pub fn xts_double(&mut self) {
        let v = self.to_u128();
        let carry = 0u128.wrapping_sub(v >> 127);
        self.bytes = ((v << 1) ^ (XTS_R & carry)).to_le_bytes();
    }
}

#[cfg(test)]
mod tests;
