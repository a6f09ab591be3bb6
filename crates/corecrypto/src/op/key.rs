// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key capability traits.
//!
//! Symmetric keys in this crate are key schedules: importing raw key bytes
//! runs the cipher's key expansion, and the schedule is wiped when the key
//! is dropped.

use super::*;

/// Root trait for all key types.
pub trait Key {
    /// Returns the size of the raw key material in bytes.
    fn size(&self) -> usize;

    /// Returns the size of the raw key material in bits.
    fn bits(&self) -> usize {
        self.size() * 8
    }
}

/// Marker trait for secret symmetric keys.
pub trait SymmetricKey: Key {}

/// Marker trait for keys usable for encryption.
pub trait EncryptionKey: Key {}

/// Marker trait for keys usable for decryption.
pub trait DecryptionKey: Key {}

/// Trait for keys that can be imported from raw bytes.
pub trait ImportableKey: Key {
    /// Builds the key (running any key schedule) from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] when the key length is
    /// not one the algorithm supports, or [`CryptoError::InvalidLength`] when
    /// the bytes are structurally invalid for the key type.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>
    where
        Self: Sized;
}

/// Marker trait for asymmetric private keys.
pub trait PrivateKey: Key {
    /// The matching public key type.
    type PublicKey: PublicKey;

    /// Computes the public key for this private key.
    ///
    /// # Errors
    ///
    /// Returns an error if the public key cannot be computed from the
    /// private key material.
    fn public_key(&self) -> Result<Self::PublicKey, CryptoError>;
}

/// Marker trait for asymmetric public keys.
pub trait PublicKey: Key {}

/// Marker trait for secret key material such as key agreement output.
///
/// Implementors wipe their bytes on drop.
pub trait SecretKey: Key {}

/// Marker trait for keys usable as the input of a key derivation or key
/// agreement.
pub trait DerivationKey: Key {}

/// Marker trait for keys that verify signatures.
pub trait VerificationKey: Key {}

/// Trait for keys that can be exported to raw bytes.
pub trait ExportableKey: Key {
    /// Writes the raw key material.
    ///
    /// With `None`, returns the required size without writing.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::BufferTooSmall`] if `bytes` cannot hold the key.
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Exports the raw key material into a new vector.
    fn to_vec(&self) -> Result<Vec<u8>, CryptoError> {
        let len = self.to_bytes(None)?;
        let mut bytes = vec![0u8; len];
        let len = self.to_bytes(Some(&mut bytes))?;
        bytes.truncate(len);
        Ok(bytes)
    }
}
