// Copyright (C) Microsoft Corporation. All rights reserved.

//! Block cipher primitives.
//!
//! A [`BlockCipher`] is a keyed, fixed-width permutation: constructing one
//! runs the key schedule, and the resulting value is the key object the mode
//! layer consumes. The mode constructions in this crate never look inside a
//! cipher; they only use [`BlockCipher::BLOCK_SIZE`] and the two block
//! transforms.
//!
//! Implementations:
//!
//! - [`Aes`]: FIPS-197 with 128, 192 and 256-bit keys
//! - [`Des`]: single DES
//! - [`TripleDes`]: EDE triple DES with two or three keys

mod aes;
mod des;
mod des_tables;
mod registry;

pub use aes::*;
pub use des::*;
pub use registry::*;

use super::*;

/// Largest block size of any supported cipher, in bytes.
pub const MAX_BLOCK_SIZE: usize = 16;

/// A keyed block cipher.
///
/// The cipher value owns its expanded key schedule and wipes it on drop.
pub trait BlockCipher: SymmetricKey + EncryptionKey + DecryptionKey + Sized {
    /// Block size in bytes.
    const BLOCK_SIZE: usize;

    /// Runs the key schedule over `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] if the key length is not
    /// one this cipher supports.
    fn new(key: &[u8]) -> Result<Self, CryptoError>;

    /// Encrypts one block. Both slices are exactly `BLOCK_SIZE` bytes.
    fn encrypt_block(&self, input: &[u8], output: &mut [u8]);

    /// Decrypts one block. Both slices are exactly `BLOCK_SIZE` bytes.
    fn decrypt_block(&self, input: &[u8], output: &mut [u8]);
}

/// Implements the symmetric key capability traits for block cipher types.
macro_rules! impl_cipher_key {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SymmetricKey for $ty {}
            impl EncryptionKey for $ty {}
            impl DecryptionKey for $ty {}

            impl ImportableKey for $ty {
                fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
                    <$ty as BlockCipher>::new(bytes)
                }
            }
        )+
    };
}

impl_cipher_key!(Aes, Des, TripleDes);

#[cfg(test)]
mod tests;
