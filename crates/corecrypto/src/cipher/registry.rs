// Copyright (C) Microsoft Corporation. All rights reserved.

//! Block cipher registry.

use super::*;

/// Object identifier for AES-128 in ECB mode (2.16.840.1.101.3.4.1.1).
pub const OID_AES128_ECB: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 1, 1);

/// Object identifier for AES-192 in ECB mode (2.16.840.1.101.3.4.1.21).
pub const OID_AES192_ECB: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 1, 21);

/// Object identifier for AES-256 in ECB mode (2.16.840.1.101.3.4.1.41).
pub const OID_AES256_ECB: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 1, 41);

/// Object identifier for DES in ECB mode (1.3.14.3.2.6).
pub const OID_DES_ECB: asn1::ObjectIdentifier = asn1::oid!(1, 3, 14, 3, 2, 6);

/// Object identifier for triple DES (1.2.840.113549.3.7).
pub const OID_DES_EDE3_CBC: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 3, 7);

/// Registered block ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherKind {
    /// AES with a 128-bit key.
    Aes128,
    /// AES with a 192-bit key.
    Aes192,
    /// AES with a 256-bit key.
    Aes256,
    /// Single DES.
    Des,
    /// Three-key EDE triple DES.
    Des3,
}

impl CipherKind {
    /// Every registered cipher, in registry order.
    pub const ALL: [CipherKind; 5] = [
        CipherKind::Aes128,
        CipherKind::Aes192,
        CipherKind::Aes256,
        CipherKind::Des,
        CipherKind::Des3,
    ];

    /// Returns the block size in bytes.
    pub fn block_size(self) -> usize {
        match self {
            CipherKind::Aes128 | CipherKind::Aes192 | CipherKind::Aes256 => Aes::BLOCK_SIZE,
            CipherKind::Des | CipherKind::Des3 => Des::BLOCK_SIZE,
        }
    }

    /// Returns the key size in bytes.
    pub fn key_size(self) -> usize {
        match self {
            CipherKind::Aes128 => 16,
            CipherKind::Aes192 => 24,
            CipherKind::Aes256 => 32,
            CipherKind::Des => 8,
            CipherKind::Des3 => 24,
        }
    }

    /// Returns the cipher's object identifier.
    pub fn oid(self) -> &'static asn1::ObjectIdentifier {
        match self {
            CipherKind::Aes128 => &OID_AES128_ECB,
            CipherKind::Aes192 => &OID_AES192_ECB,
            CipherKind::Aes256 => &OID_AES256_ECB,
            CipherKind::Des => &OID_DES_ECB,
            CipherKind::Des3 => &OID_DES_EDE3_CBC,
        }
    }

    /// Resolves the DER content bytes of a cipher object identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] for malformed or unknown
    /// identifiers.
    pub fn from_oid(der: &[u8]) -> Result<Self, CryptoError> {
        let oid = asn1::ObjectIdentifier::from_der(der).map_err(|_| {
            tracing::error!(len = der.len(), "malformed cipher OID");
            CryptoError::UnsupportedAlgorithm
        })?;
        Self::ALL
            .into_iter()
            .find(|kind| *kind.oid() == oid)
            .ok_or_else(|| {
                tracing::error!(%oid, "unsupported cipher OID");
                CryptoError::UnsupportedAlgorithm
            })
    }
}
