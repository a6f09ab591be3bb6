// Copyright (C) Microsoft Corporation. All rights reserved.

//! Digest algorithm registry.
//!
//! Maps object identifiers to the static [`DigestAlgorithm`] descriptors.
//! The table is immutable and shared by every caller.

use super::*;

/// Object identifier for MD4 (1.2.840.113549.2.4).
pub const OID_MD4: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 2, 4);

/// Object identifier for MD5 (1.2.840.113549.2.5).
pub const OID_MD5: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 2, 5);

/// Object identifier for SHA-1 (1.3.14.3.2.26).
pub const OID_SHA1: asn1::ObjectIdentifier = asn1::oid!(1, 3, 14, 3, 2, 26);

/// Object identifier for SHA-224 (2.16.840.1.101.3.4.2.4).
pub const OID_SHA224: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 2, 4);

/// Object identifier for SHA-256 (2.16.840.1.101.3.4.2.1).
pub const OID_SHA256: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 2, 1);

/// Object identifier for SHA-384 (2.16.840.1.101.3.4.2.2).
pub const OID_SHA384: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 2, 2);

/// Object identifier for SHA-512 (2.16.840.1.101.3.4.2.3).
pub const OID_SHA512: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 2, 3);

/// Registered digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestKind {
    /// MD4, 16-byte digest.
    Md4,
    /// MD5, 16-byte digest.
    Md5,
    /// SHA-1, 20-byte digest.
    Sha1,
    /// SHA-224, 28-byte digest.
    Sha224,
    /// SHA-256, 32-byte digest.
    Sha256,
    /// SHA-384, 48-byte digest.
    Sha384,
    /// SHA-512, 64-byte digest.
    Sha512,
}

impl DigestKind {
    /// Every registered algorithm, in registry order.
    pub const ALL: [DigestKind; 7] = [
        DigestKind::Md4,
        DigestKind::Md5,
        DigestKind::Sha1,
        DigestKind::Sha224,
        DigestKind::Sha256,
        DigestKind::Sha384,
        DigestKind::Sha512,
    ];

    /// Returns the static descriptor for this algorithm.
    pub fn descriptor(self) -> &'static DigestAlgorithm {
        match self {
            DigestKind::Md4 => &md4::MD4,
            DigestKind::Md5 => &md5::MD5,
            DigestKind::Sha1 => &sha1::SHA1,
            DigestKind::Sha224 => &sha256::SHA224,
            DigestKind::Sha256 => &sha256::SHA256,
            DigestKind::Sha384 => &sha512::SHA384,
            DigestKind::Sha512 => &sha512::SHA512,
        }
    }

    /// Returns the algorithm's object identifier.
    pub fn oid(self) -> &'static asn1::ObjectIdentifier {
        self.descriptor().oid()
    }

    /// Returns the digest size in bytes.
    pub fn output_size(self) -> usize {
        self.descriptor().output_size()
    }

    /// Resolves an object identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] if no registered
    /// algorithm has this identifier.
    pub fn from_oid(oid: &asn1::ObjectIdentifier) -> Result<Self, CryptoError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.oid() == oid)
            .ok_or_else(|| {
                tracing::error!(%oid, "unsupported digest OID");
                CryptoError::UnsupportedAlgorithm
            })
    }

    /// Resolves the DER content bytes of an object identifier (the value
    /// of the OBJECT IDENTIFIER, without tag and length).
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] if the bytes are not a
    /// valid identifier or no registered algorithm matches.
    pub fn from_der_oid(der: &[u8]) -> Result<Self, CryptoError> {
        let oid = asn1::ObjectIdentifier::from_der(der).map_err(|_| {
            tracing::error!(len = der.len(), "malformed digest OID");
            CryptoError::UnsupportedAlgorithm
        })?;
        Self::from_oid(&oid)
    }
}
