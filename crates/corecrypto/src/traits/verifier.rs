// Copyright (C) Microsoft Corporation. All rights reserved.

//! Verification operation wrapper.

use super::*;

/// Verification operation wrapper.
pub struct Verifier;

impl Verifier {
    /// Performs single-operation signature verification.
    ///
    /// # Arguments
    ///
    /// * `algo` - The verification algorithm implementation
    /// * `key` - The public key to verify with
    /// * `data` - Input data that was signed
    /// * `signature` - The signature to verify
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the signature is valid, `Ok(false)` if it does not match.
    pub fn verify<Algo: VerifyOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError> {
        algo.verify(key, data, signature)
    }
}
