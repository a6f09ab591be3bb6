// Copyright (C) Microsoft Corporation. All rights reserved.

//! DER encoding and decoding for ECDSA signature values.
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER
//! }
//! ```

use super::*;

#[derive(asn1::Asn1Read, asn1::Asn1Write)]
struct EcdsaSigValue<'a> {
    r: asn1::BigUint<'a>,
    s: asn1::BigUint<'a>,
}

/// An ECDSA signature as two unsigned big-endian integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerEcdsaSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

/// Strips leading zero bytes, keeping at least one byte.
fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len().saturating_sub(1));
    &bytes[start..]
}

/// Minimal unsigned INTEGER content: no redundant zeros, and a zero byte in
/// front when the top bit is set.
fn to_der_uint(bytes: &[u8]) -> Vec<u8> {
    let trimmed = trim_leading_zeros(bytes);
    let mut out = Vec::with_capacity(trimmed.len() + 1);
    if trimmed.first().map_or(true, |&b| b & 0x80 != 0) {
        out.push(0);
    }
    out.extend_from_slice(trimmed);
    out
}

impl DerEcdsaSignature {
    /// Builds a signature from big-endian `r` and `s`. Leading zeros are
    /// allowed and dropped.
    pub fn new(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: trim_leading_zeros(r).to_vec(),
            s: trim_leading_zeros(s).to_vec(),
        }
    }

    /// Returns `r` big-endian without leading zeros.
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// Returns `s` big-endian without leading zeros.
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Parses a DER signature.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::DerDecodeError`] for anything but a DER
    /// `SEQUENCE` of two non-negative INTEGERs.
    pub fn from_der(input: &[u8]) -> Result<Self, CryptoError> {
        let sig: EcdsaSigValue<'_> = asn1::parse_single(input).map_err(|err| {
            tracing::error!(?err, "malformed ECDSA signature");
            CryptoError::DerDecodeError
        })?;
        Ok(Self::new(sig.r.as_bytes(), sig.s.as_bytes()))
    }

    /// Encodes the signature.
    ///
    /// With `None`, returns the encoded size without writing.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::DerEncodeError`] if encoding fails
    /// - [`CryptoError::BufferTooSmall`] if `output` cannot hold the encoding
    pub fn to_der(&self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let r = to_der_uint(&self.r);
        let s = to_der_uint(&self.s);
        let sig = EcdsaSigValue {
            r: asn1::BigUint::new(&r).ok_or(CryptoError::DerEncodeError)?,
            s: asn1::BigUint::new(&s).ok_or(CryptoError::DerEncodeError)?,
        };
        let der = asn1::write_single(&sig).map_err(|_| CryptoError::DerEncodeError)?;

        if let Some(output) = output {
            if output.len() < der.len() {
                return Err(CryptoError::BufferTooSmall);
            }
            output[..der.len()].copy_from_slice(&der);
        }
        Ok(der.len())
    }

    /// Encodes the signature into a new vector.
    pub fn to_der_vec(&self) -> Result<Vec<u8>, CryptoError> {
        let size = self.to_der(None)?;
        let mut buffer = vec![0u8; size];
        self.to_der(Some(&mut buffer))?;
        Ok(buffer)
    }
}
