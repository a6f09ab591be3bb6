// Copyright (C) Microsoft Corporation. All rights reserved.

//! Fixed-width byte order helpers.
//!
//! The compression functions read message words and write chaining values
//! through these; callers guarantee the slices are long enough.

/// Byte order of a word or length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first (MD4, MD5).
    Little,
    /// Most significant byte first (SHA family).
    Big,
}

/// Loads a little-endian `u32` from the first four bytes of `b`.
#[inline]
pub fn load32_le(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Loads a big-endian `u32` from the first four bytes of `b`.
#[inline]
pub fn load32_be(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

/// Stores `v` little-endian into the first four bytes of `b`.
#[inline]
pub fn store32_le(v: u32, b: &mut [u8]) {
    b[..4].copy_from_slice(&v.to_le_bytes());
}

/// Stores `v` big-endian into the first four bytes of `b`.
#[inline]
pub fn store32_be(v: u32, b: &mut [u8]) {
    b[..4].copy_from_slice(&v.to_be_bytes());
}

/// Loads a big-endian `u64` from the first eight bytes of `b`.
#[inline]
pub fn load64_be(b: &[u8]) -> u64 {
    let mut w = [0u8; 8];
    w.copy_from_slice(&b[..8]);
    u64::from_be_bytes(w)
}

/// Stores `v` big-endian into the first eight bytes of `b`.
#[inline]
pub fn store64_be(v: u64, b: &mut [u8]) {
    b[..8].copy_from_slice(&v.to_be_bytes());
}

/// Stores `v` into the first eight bytes of `b` in the given order.
#[inline]
pub fn store64(order: ByteOrder, v: u64, b: &mut [u8]) {
    match order {
        ByteOrder::Little => b[..8].copy_from_slice(&v.to_le_bytes()),
        ByteOrder::Big => store64_be(v, b),
    }
}

/// Serializes `words` little-endian into `out`, stopping when `out` is full.
///
/// A trailing partial word is truncated, which is how digests shorter than
/// the chaining state are emitted.
pub fn store_words_le(words: &[u32], out: &mut [u8]) {
    for (chunk, w) in out.chunks_mut(4).zip(words) {
        chunk.copy_from_slice(&w.to_le_bytes()[..chunk.len()]);
    }
}

/// Serializes `words` big-endian into `out`, stopping when `out` is full.
pub fn store_words_be(words: &[u32], out: &mut [u8]) {
    for (chunk, w) in out.chunks_mut(4).zip(words) {
        chunk.copy_from_slice(&w.to_be_bytes()[..chunk.len()]);
    }
}
