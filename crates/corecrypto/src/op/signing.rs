// Copyright (C) Microsoft Corporation. All rights reserved.

//! Signature verification operation trait.
//!
//! Only verification is provided: signing needs a source of randomness or a
//! private-key exponentiation, neither of which this crate implements.

use super::*;

/// Trait for single-operation signature verification.
pub trait VerifyOp {
    /// The public key type used for verification.
    type Key: VerificationKey;

    /// Verifies `signature` over `data`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the signature is valid, `Ok(false)` if it is well formed
    /// but does not match.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is malformed, the key does not fit
    /// the algorithm, or the data cannot be processed.
    fn verify(
        &mut self,
        key: &Self::Key,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError>;
}
