// Copyright (C) Microsoft Corporation. All rights reserved.

//! Elliptic curve Diffie-Hellman.
//!
//! The shared secret is the big-endian x coordinate of `k * Q`, padded to
//! the curve size (SEC 1 section 3.3.1).

use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

use super::*;

/// Computes the ECDH shared secret of `key` and `peer`.
///
/// With `None`, returns the secret size without computing it.
///
/// # Errors
///
/// - [`CryptoError::InvalidPoint`] if the keys are on different curves or the
///   product is the point at infinity
/// - [`CryptoError::BufferTooSmall`] if `output` cannot hold the secret
pub fn ecdh_compute_key(
    key: &EcPrivateKey,
    peer: &EcPublicKey,
    output: Option<&mut [u8]>,
) -> Result<usize, CryptoError> {
    if key.curve() != peer.curve() {
        tracing::error!(
            ours = ?key.curve(),
            peer = ?peer.curve(),
            "ECDH keys are on different curves"
        );
        return Err(CryptoError::InvalidPoint);
    }
    let size = key.curve().size_bytes();
    let Some(output) = output else {
        return Ok(size);
    };
    if output.len() < size {
        tracing::error!(len = output.len(), required = size, "output buffer too small");
        return Err(CryptoError::BufferTooSmall);
    }

    let params = key.curve().params()?;
    let q = params.projective_buf(&peer.point())?;
    let shared = params.ladder_buf(key.scalar().as_units(), &q);
    let shared = params.affine_buf(&shared)?;
    limbs::write_be(shared.x(), &mut output[..size])?;
    Ok(size)
}

/// An ECDH shared secret, wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    /// Returns the secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Key for SharedSecret {
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl SecretKey for SharedSecret {}

impl DerivationKey for SharedSecret {}

impl ExportableKey for SharedSecret {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let len = self.bytes.len();
        if let Some(bytes) = bytes {
            if bytes.len() < len {
                return Err(CryptoError::BufferTooSmall);
            }
            bytes[..len].copy_from_slice(&self.bytes);
        }
        Ok(len)
    }
}

/// ECDH key agreement against a fixed peer public key.
pub struct EcdhAlgo<'a> {
    peer_key: &'a EcPublicKey,
}

impl<'a> EcdhAlgo<'a> {
    /// Creates an agreement with `peer_key`.
    pub fn new(peer_key: &'a EcPublicKey) -> Self {
        Self { peer_key }
    }
}

impl DeriveOp for EcdhAlgo<'_> {
    type Key = EcPrivateKey;
    type DerivedKey = SharedSecret;

    /// Derives the shared secret. `derived_len` must equal the curve size.
    fn derive(&self, key: &Self::Key, derived_len: usize) -> Result<Self::DerivedKey, CryptoError> {
        let len = ecdh_compute_key(key, self.peer_key, None)?;
        if derived_len != len {
            tracing::error!(derived_len, len, "ECDH secret length is fixed by the curve");
            return Err(CryptoError::InvalidLength);
        }
        let mut bytes = vec![0u8; len];
        ecdh_compute_key(key, self.peer_key, Some(&mut bytes))?;
        Ok(SharedSecret { bytes })
    }
}
