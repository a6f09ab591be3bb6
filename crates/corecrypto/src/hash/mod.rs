// Copyright (C) Microsoft Corporation. All rights reserved.

//! Generic Merkle–Damgård digest engine.
//!
//! A [`DigestAlgorithm`] describes one hash function: its block size,
//! chaining state, compression function, length encoding and output
//! serialization. [`DigestContext`] drives any descriptor through the
//! init / update / final lifecycle, buffering partial blocks and applying
//! the padding shared by MD4, MD5, SHA-1 and SHA-2:
//!
//! ```text
//! message || 0x80 || 0x00 * z || bit length (length_size bytes)
//! ```
//!
//! where `z` brings the total to a multiple of the block size.
//!
//! Descriptors are immutable statics looked up through [`DigestKind`].

mod md4;
mod md5;
mod registry;
mod sha1;
mod sha256;
mod sha512;

pub use registry::*;
use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

use super::*;

/// Largest block size of any registered digest (SHA-384/512).
pub const MAX_DIGEST_BLOCK_SIZE: usize = 128;

/// Largest chaining state of any registered digest, in 32-bit words.
pub const MAX_DIGEST_STATE_WORDS: usize = 16;

/// Largest output of any registered digest (SHA-512).
pub const MAX_DIGEST_OUTPUT_SIZE: usize = 64;

/// Block compression function: `compress(state, nblocks, data)`.
///
/// `data` holds exactly `nblocks * block_size` bytes.
pub type CompressFn = fn(&mut [u32], usize, &[u8]);

/// Output serialization: writes `out.len()` bytes of the chaining state.
pub type FinalizeFn = fn(&[u32], &mut [u8]);

/// Immutable description of a Merkle–Damgård hash function.
#[derive(Debug)]
pub struct DigestAlgorithm {
    pub(crate) name: &'static str,
    pub(crate) block_size: usize,
    pub(crate) state_size: usize,
    pub(crate) output_size: usize,
    pub(crate) length_size: usize,
    pub(crate) length_order: ByteOrder,
    pub(crate) initial_state: &'static [u32],
    pub(crate) compress: CompressFn,
    pub(crate) finalize: FinalizeFn,
    pub(crate) oid: asn1::ObjectIdentifier,
}

impl DigestAlgorithm {
    /// Returns the algorithm name, e.g. `"SHA-256"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the block size in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the chaining state size in 32-bit words.
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// Returns the digest size in bytes.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Returns the size of the trailing length field in bytes.
    pub fn length_size(&self) -> usize {
        self.length_size
    }

    /// Returns the byte order of the trailing length field.
    pub fn length_order(&self) -> ByteOrder {
        self.length_order
    }

    /// Returns the initial chaining state.
    pub fn initial_state(&self) -> &'static [u32] {
        self.initial_state
    }

    /// Runs the compression function over `nblocks` full blocks of `data`.
    pub fn compress(&self, state: &mut [u32], nblocks: usize, data: &[u8]) {
        (self.compress)(state, nblocks, data)
    }

    /// Serializes `state` into `out`.
    pub fn finalize(&self, state: &[u32], out: &mut [u8]) {
        (self.finalize)(state, out)
    }

    /// Returns the algorithm's object identifier.
    pub fn oid(&self) -> &asn1::ObjectIdentifier {
        &self.oid
    }
}

/// Handle to a registered hash algorithm.
///
/// This is the value callers pass to [`Hasher`]; it is `Copy` and refers
/// to the static descriptor for its [`DigestKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashAlgo {
    kind: DigestKind,
}

impl HashAlgo {
    /// MD4 (RFC 1320).
    pub fn md4() -> Self {
        DigestKind::Md4.into()
    }

    /// MD5 (RFC 1321).
    pub fn md5() -> Self {
        DigestKind::Md5.into()
    }

    /// SHA-1 (FIPS 180-4).
    pub fn sha1() -> Self {
        DigestKind::Sha1.into()
    }

    /// SHA-224 (FIPS 180-4).
    pub fn sha224() -> Self {
        DigestKind::Sha224.into()
    }

    /// SHA-256 (FIPS 180-4).
    pub fn sha256() -> Self {
        DigestKind::Sha256.into()
    }

    /// SHA-384 (FIPS 180-4).
    pub fn sha384() -> Self {
        DigestKind::Sha384.into()
    }

    /// SHA-512 (FIPS 180-4).
    pub fn sha512() -> Self {
        DigestKind::Sha512.into()
    }

    /// Resolves a DER-encoded object identifier to a hash algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] for unknown OIDs.
    pub fn from_oid(oid: &[u8]) -> Result<Self, CryptoError> {
        DigestKind::from_der_oid(oid).map(Self::from)
    }

    /// Returns the registry identifier.
    pub fn kind(&self) -> DigestKind {
        self.kind
    }

    /// Returns the static descriptor.
    pub fn descriptor(&self) -> &'static DigestAlgorithm {
        self.kind.descriptor()
    }

    /// Returns the digest size in bytes.
    pub fn size(&self) -> usize {
        self.descriptor().output_size
    }
}

impl From<DigestKind> for HashAlgo {
    fn from(kind: DigestKind) -> Self {
        Self { kind }
    }
}

impl HashOp for HashAlgo {
    fn hash(&mut self, data: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(self.size());
        };
        let mut ctx = DigestContext::init(*self);
        ctx.update(data)?;
        ctx.finish(Some(output))
    }
}

impl HashStreamingOp for HashAlgo {
    type Context = DigestContext;

    fn hash_init(self) -> Result<Self::Context, CryptoError> {
        Ok(DigestContext::init(self))
    }
}

/// Streaming state of one digest computation.
///
/// Holds the chaining state, up to one block of unconsumed input and the
/// number of bits already compressed. The state and buffer are wiped on
/// drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DigestContext {
    #[zeroize(skip)]
    algo: HashAlgo,
    state: [u32; MAX_DIGEST_STATE_WORDS],
    buffer: [u8; MAX_DIGEST_BLOCK_SIZE],
    buffered: usize,
    bit_count: u64,
}

impl DigestContext {
    /// Starts a new digest with the algorithm's initial state.
    pub fn init(algo: HashAlgo) -> Self {
        let desc = algo.descriptor();
        let mut state = [0u32; MAX_DIGEST_STATE_WORDS];
        state[..desc.state_size].copy_from_slice(desc.initial_state);
        tracing::debug!(algo = desc.name, "digest context initialized");
        Self {
            algo,
            state,
            buffer: [0u8; MAX_DIGEST_BLOCK_SIZE],
            buffered: 0,
            bit_count: 0,
        }
    }

    /// Returns the number of message bytes held in the partial block buffer.
    pub fn buffered_count(&self) -> usize {
        self.buffered
    }

    /// Returns the number of message bits compressed so far.
    ///
    /// Bytes still sitting in the buffer are not counted until they are
    /// compressed or the digest is finalized.
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Feeds bytes to the compression function without length accounting
    /// checks. Used for both message data and padding.
    fn absorb(&mut self, mut data: &[u8]) {
        let desc = self.algo.descriptor();
        let bs = desc.block_size;
        let words = desc.state_size;

        if self.buffered > 0 {
            let take = (bs - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < bs {
                return;
            }
            desc.compress(&mut self.state[..words], 1, &self.buffer[..bs]);
            self.bit_count = self.bit_count.saturating_add(bs as u64 * 8);
            self.buffered = 0;
        }

        let nblocks = data.len() / bs;
        if nblocks > 0 {
            let len = nblocks * bs;
            desc.compress(&mut self.state[..words], nblocks, &data[..len]);
            self.bit_count = self.bit_count.saturating_add(len as u64 * 8);
            data = &data[len..];
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }
}

impl HashOpContext for DigestContext {
    type Algo = HashAlgo;

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        let total_bits = (data.len() as u64)
            .checked_add(self.buffered as u64)
            .and_then(|bytes| bytes.checked_mul(8))
            .and_then(|bits| bits.checked_add(self.bit_count));
        if total_bits.is_none() {
            tracing::error!(
                bit_count = self.bit_count,
                len = data.len(),
                "message length overflows the 64-bit bit counter"
            );
            return Err(CryptoError::InvalidLength);
        }

        self.absorb(data);
        Ok(())
    }

    fn finish(mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let desc = self.algo.descriptor();
        let Some(output) = output else {
            return Ok(desc.output_size);
        };
        if output.len() < desc.output_size {
            tracing::error!(
                len = output.len(),
                required = desc.output_size,
                "digest output buffer too small"
            );
            return Err(CryptoError::BufferTooSmall);
        }

        let bs = desc.block_size;
        let bit_count = self.bit_count.saturating_add(self.buffered as u64 * 8);

        // 0x80, then zeros up to the reserved tail, then the length.
        let reserved = bs - desc.length_size;
        let zeros = (reserved + bs - (self.buffered + 1)) % bs;
        let mut pad = [0u8; 2 * MAX_DIGEST_BLOCK_SIZE];
        pad[0] = 0x80;
        let len_at = 1 + zeros + desc.length_size - 8;
        store64(desc.length_order, bit_count, &mut pad[len_at..len_at + 8]);
        let pad_len = 1 + zeros + desc.length_size;

        self.absorb(&pad[..pad_len]);
        debug_assert_eq!(self.buffered, 0);

        desc.finalize(
            &self.state[..desc.state_size],
            &mut output[..desc.output_size],
        );
        Ok(desc.output_size)
    }

    fn output_size(&self) -> usize {
        self.algo.size()
    }

    fn algo(&self) -> &Self::Algo {
        &self.algo
    }

    fn into_algo(self) -> Self::Algo {
        self.algo
    }
}

#[cfg(test)]
mod tests;
