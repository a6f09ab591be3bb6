// Copyright (C) Microsoft Corporation. All rights reserved.

//! DER encoding and decoding for `DigestInfo` (RFC 8017 section 9.2).
//!
//! ```text
//! DigestInfo ::= SEQUENCE {
//!     digestAlgorithm AlgorithmIdentifier,
//!     digest OCTET STRING
//! }
//! ```

use super::*;

/// `AlgorithmIdentifier` with optional NULL parameters.
///
/// Both the absent and the explicit NULL forms decode; encoding always
/// writes the NULL, which is the form RFC 8017 lists.
#[derive(asn1::Asn1Read, asn1::Asn1Write)]
struct AlgorithmIdentifier {
    algorithm: asn1::ObjectIdentifier,
    parameters: Option<asn1::Null>,
}

#[derive(asn1::Asn1Read, asn1::Asn1Write)]
struct DigestInfo<'a> {
    algorithm: AlgorithmIdentifier,
    digest: &'a [u8],
}

/// A digest tagged with the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerDigestInfo {
    kind: DigestKind,
    digest: Vec<u8>,
}

impl DerDigestInfo {
    /// Wraps `digest` produced by `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if the digest size does not
    /// match the algorithm's output size.
    pub fn new(kind: DigestKind, digest: &[u8]) -> Result<Self, CryptoError> {
        if kind.output_size() != digest.len() {
            tracing::error!(
                algo = kind.descriptor().name(),
                len = digest.len(),
                expected = kind.output_size(),
                "digest size does not match algorithm"
            );
            return Err(CryptoError::InvalidLength);
        }

        Ok(Self {
            kind,
            digest: digest.to_vec(),
        })
    }

    /// Returns the digest algorithm.
    pub fn kind(&self) -> DigestKind {
        self.kind
    }

    /// Returns the digest bytes.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Parses a DER `DigestInfo`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::DerDecodeError`] if the input is not a DER `DigestInfo`
    /// - [`CryptoError::UnsupportedAlgorithm`] if the algorithm is not registered
    /// - [`CryptoError::InvalidLength`] if the digest size does not match
    pub fn from_der(input: &[u8]) -> Result<Self, CryptoError> {
        let info: DigestInfo<'_> = asn1::parse_single(input).map_err(|err| {
            tracing::error!(?err, "malformed DigestInfo");
            CryptoError::DerDecodeError
        })?;
        let kind = DigestKind::from_oid(&info.algorithm.algorithm)?;
        Self::new(kind, info.digest)
    }

    /// Encodes the `DigestInfo`.
    ///
    /// With `None`, returns the encoded size without writing.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::DerEncodeError`] if encoding fails
    /// - [`CryptoError::BufferTooSmall`] if `output` cannot hold the encoding
    pub fn to_der(&self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let info = DigestInfo {
            algorithm: AlgorithmIdentifier {
                algorithm: self.kind.oid().clone(),
                parameters: Some(()),
            },
            digest: &self.digest,
        };
        let der = asn1::write_single(&info).map_err(|_| CryptoError::DerEncodeError)?;

        if let Some(output) = output {
            if output.len() < der.len() {
                return Err(CryptoError::BufferTooSmall);
            }
            output[..der.len()].copy_from_slice(&der);
        }
        Ok(der.len())
    }

    /// Encodes the `DigestInfo` into a new vector.
    pub fn to_der_vec(&self) -> Result<Vec<u8>, CryptoError> {
        let size = self.to_der(None)?;
        let mut buffer = vec![0u8; size];
        self.to_der(Some(&mut buffer))?;
        Ok(buffer)
    }
}
