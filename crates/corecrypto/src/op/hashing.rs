// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for cryptographic hash operations.
//!
//! Two levels of API are provided:
//!
//! - **Single-operation**: [`HashOp`] digests a complete message in one call.
//! - **Streaming**: [`HashStreamingOp`] creates a [`HashOpContext`] that
//!   absorbs data in chunks and is consumed when the digest is produced.

use super::*;

/// Trait for single-operation hashing.
///
/// Uses the optional output buffer pattern: `None` returns the digest size,
/// `Some` computes the digest into the buffer.
pub trait HashOp {
    /// Computes the digest of `data`.
    ///
    /// # Arguments
    ///
    /// * `data` - The input data to hash
    /// * `output` - Optional output buffer for the digest. If `None`, only
    ///   calculates required size.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or the digest size if `output` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output buffer is smaller than the digest
    /// - The message is too long for the algorithm's length counter
    fn hash(&mut self, data: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError>;
}

/// Trait for streaming hash operations.
///
/// # Lifecycle
///
/// 1. [`hash_init`](Self::hash_init) creates a context
/// 2. [`update`](HashOpContext::update) absorbs chunks
/// 3. [`finish`](HashOpContext::finish) consumes the context and produces the digest
pub trait HashStreamingOp {
    /// The context type for streaming hash operations.
    type Context: HashOpContext<Algo = Self>;

    /// Initializes a streaming hash context.
    fn hash_init(self) -> Result<Self::Context, CryptoError>;
}

/// An in-progress streaming hash computation.
///
/// Contexts are not shared between threads; create one per computation.
pub trait HashOpContext: Sized {
    /// The associated hash algorithm type.
    type Algo: HashStreamingOp<Context = Self>;

    /// Absorbs a chunk of data.
    ///
    /// Partial blocks are buffered internally; full blocks are compressed
    /// straight from `data`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if the total message length
    /// would overflow the algorithm's bit counter.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Pads, compresses the final block(s) and writes the digest.
    ///
    /// The context is consumed; a new one must be created for another
    /// message.
    ///
    /// # Arguments
    ///
    /// * `output` - Optional output buffer. If `None`, the context is dropped
    ///   and only the digest size is returned.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or the digest size if `output` is `None`.
    fn finish(self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Finalizes the hash computation and returns the digest as a `Vec<u8>`.
    fn finish_vec(self) -> Result<Vec<u8>, CryptoError> {
        let mut digest = vec![0u8; self.output_size()];
        let written = self.finish(Some(&mut digest))?;
        digest.truncate(written);
        Ok(digest)
    }

    /// Returns the digest size in bytes.
    fn output_size(&self) -> usize;

    /// Returns a reference to the hash algorithm.
    fn algo(&self) -> &Self::Algo;

    /// Consumes the context and returns the hash algorithm.
    fn into_algo(self) -> Self::Algo;
}
