// Copyright (C) Microsoft Corporation. All rights reserved.

//! Hash operation wrapper.

use super::*;

/// Hash operation wrapper.
pub struct Hasher;

impl Hasher {
    /// Performs single-operation hashing.
    ///
    /// # Arguments
    ///
    /// * `algo` - The hashing algorithm implementation
    /// * `data` - Input data to hash
    /// * `output` - Optional output buffer. If `None`, only calculates required size.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or the digest size if `output` is `None`.
    pub fn hash<Algo: HashOp>(
        algo: &mut Algo,
        data: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.hash(data, output)
    }

    /// Performs single-operation hashing and returns the digest as a vector.
    pub fn hash_vec<Algo: HashOp>(algo: &mut Algo, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let hash_size = algo.hash(data, None)?;
        let mut digest = vec![0u8; hash_size];
        let written = algo.hash(data, Some(&mut digest))?;
        digest.truncate(written);
        Ok(digest)
    }

    /// Initializes a streaming hash context.
    pub fn hash_init<Algo: HashStreamingOp>(algo: Algo) -> Result<Algo::Context, CryptoError> {
        algo.hash_init()
    }

    /// Digests `data` with the registered algorithm `kind`.
    ///
    /// This is the lookup-by-identifier entry point used by callers that
    /// carry a [`DigestKind`] (for example one resolved from an OID).
    pub fn digest(kind: DigestKind, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Self::hash_vec(&mut HashAlgo::from(kind), data)
    }
}
