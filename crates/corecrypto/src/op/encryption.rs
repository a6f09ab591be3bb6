// Copyright (C) Microsoft Corporation. All rights reserved.

//! Traits for encryption and decryption operations.
//!
//! These traits abstract over the block cipher modes (CBC, CTR, GCM, XTS,
//! ...) while keeping one calling convention.
//!
//! - **Single-operation**: [`EncryptOp`] / [`DecryptOp`] process a complete
//!   message with a borrowed key.
//! - **Streaming**: [`EncryptStreamingOp`] / [`DecryptStreamingOp`] take the
//!   key by value and return a context processing data in chunks.

use super::*;

/// Trait for single-operation encryption.
pub trait EncryptOp {
    /// The key type required by this algorithm.
    type Key: EncryptionKey;

    /// Encrypts `input` with `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - The encryption key
    /// * `input` - Plaintext
    /// * `output` - Optional output buffer. If `None`, only calculates required size.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or required when `output` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input length is not acceptable for the mode
    /// - The output buffer is too small
    fn encrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// Trait for streaming encryption.
pub trait EncryptStreamingOp {
    /// The key type required by this algorithm.
    type Key: EncryptionKey;
    /// The streaming context type.
    type Context: EncryptOpContext<Algo = Self>;

    /// Starts a streaming encryption, taking ownership of the key.
    fn encrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError>;
}

/// An in-progress streaming encryption.
pub trait EncryptOpContext {
    /// The associated algorithm type.
    type Algo: EncryptStreamingOp;

    /// Encrypts a chunk.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or required when `output` is `None`.
    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Completes the encryption, writing any trailing output.
    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Completes the encryption and returns trailing output as a `Vec<u8>`.
    fn finish_vec(&mut self) -> Result<Vec<u8>, CryptoError> {
        let required_size = self.finish(None)?;
        let mut output = vec![0u8; required_size];
        let written_size = self.finish(Some(&mut output))?;
        output.truncate(written_size);
        Ok(output)
    }

    /// Returns a reference to the algorithm.
    fn algo(&self) -> &Self::Algo;

    /// Consumes the context and returns the algorithm.
    fn into_algo(self) -> Self::Algo;
}

/// Trait for single-operation decryption.
pub trait DecryptOp {
    /// The key type required by this algorithm.
    type Key: DecryptionKey;

    /// Decrypts `input` with `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input length is not acceptable for the mode
    /// - The output buffer is too small
    /// - Authentication fails (AEAD modes)
    fn decrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// Trait for streaming decryption.
pub trait DecryptStreamingOp {
    /// The key type required by this algorithm.
    type Key: DecryptionKey;
    /// The streaming context type.
    type Context: DecryptOpContext<Algo = Self>;

    /// Starts a streaming decryption, taking ownership of the key.
    fn decrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError>;
}

/// An in-progress streaming decryption.
pub trait DecryptOpContext {
    /// The associated algorithm type.
    type Algo: DecryptStreamingOp;

    /// Decrypts a chunk.
    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Completes the decryption.
    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Completes the decryption and returns trailing output as a `Vec<u8>`.
    fn finish_vec(&mut self) -> Result<Vec<u8>, CryptoError> {
        let required_size = self.finish(None)?;
        let mut output = vec![0u8; required_size];
        let written_size = self.finish(Some(&mut output))?;
        output.truncate(written_size);
        Ok(output)
    }

    /// Returns a reference to the algorithm.
    fn algo(&self) -> &Self::Algo;

    /// Consumes the context and returns the algorithm.
    fn into_algo(self) -> Self::Algo;
}
