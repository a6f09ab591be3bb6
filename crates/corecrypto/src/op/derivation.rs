// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key derivation operation trait.
//!
//! Key agreement fits here too: the local private key is the source key and
//! the peer's public key is a parameter of the algorithm object.

use super::*;

/// Trait for key derivation operations.
pub trait DeriveOp {
    /// The source key material.
    type Key: DerivationKey;

    /// The key produced by the derivation.
    type DerivedKey: SecretKey;

    /// Derives a key of `derived_len` bytes from `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source key is unsuitable, `derived_len` is not
    /// a length the algorithm can produce, or the derivation fails.
    fn derive(&self, key: &Self::Key, derived_len: usize) -> Result<Self::DerivedKey, CryptoError>;
}
