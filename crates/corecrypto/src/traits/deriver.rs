// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key derivation operation wrapper.

use super::*;

/// Key derivation operation wrapper.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derives a key of `derived_len` bytes from `key` using `algo`.
    pub fn derive<Algo: DeriveOp>(
        algo: &Algo,
        key: &Algo::Key,
        derived_len: usize,
    ) -> Result<Algo::DerivedKey, CryptoError> {
        algo.derive(key, derived_len)
    }
}
