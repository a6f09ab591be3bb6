// Copyright (C) Microsoft Corporation. All rights reserved.

//! EMSA-PKCS1-v1_5 signature encoding (RFC 8017 section 9.2).
//!
//! ```text
//! EM = 0x00 || 0x01 || PS || 0x00 || T
//! ```
//!
//! `PS` is at least eight `0xFF` bytes and `T` is the DER `DigestInfo` of
//! the digest, or the bare digest for [`DigestOid::NoDer`].

use subtle::ConstantTimeEq;

use super::*;

/// Fixed bytes around `T`: two header bytes, eight padding bytes and the
/// separator.
const PKCS1_OVERHEAD: usize = 11;

/// Identifies how the digest is wrapped inside the encoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestOid {
    /// Wrap the digest in a `DigestInfo` naming this algorithm.
    Oid(DigestKind),
    /// Use the digest as `T` directly, as the TLS 1.0/1.1 MD5 || SHA-1
    /// signatures do.
    NoDer,
}

impl From<DigestKind> for DigestOid {
    fn from(kind: DigestKind) -> Self {
        DigestOid::Oid(kind)
    }
}

impl DigestOid {
    /// Builds `T` for `digest`.
    fn digest_info(self, digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            DigestOid::Oid(kind) => DerDigestInfo::new(kind, digest)?.to_der_vec(),
            DigestOid::NoDer if digest.is_empty() => {
                tracing::error!("empty digest");
                Err(CryptoError::InvalidLength)
            }
            DigestOid::NoDer => Ok(digest.to_vec()),
        }
    }
}

/// Writes the EMSA-PKCS1-v1_5 encoding of `digest` into all of `em`.
///
/// # Errors
///
/// - [`CryptoError::InvalidLength`] if `digest` is not the size the
///   algorithm produces, or is empty for [`DigestOid::NoDer`]
/// - [`CryptoError::MessageTooShort`] if `em.len() < |T| + 11`
pub fn encode_pkcs1_v15(em: &mut [u8], digest: &[u8], oid: DigestOid) -> Result<(), CryptoError> {
    let t = oid.digest_info(digest)?;
    if em.len() < t.len() + PKCS1_OVERHEAD {
        tracing::error!(em_len = em.len(), t_len = t.len(), "encoded message too short");
        return Err(CryptoError::MessageTooShort);
    }

    let start = em.len() - t.len();
    em.fill(0xFF);
    em[0] = 0x00;
    em[1] = 0x01;
    em[start - 1] = 0x00;
    em[start..].copy_from_slice(&t);
    Ok(())
}

/// Checks that `em` is the EMSA-PKCS1-v1_5 encoding of `digest`.
///
/// The expected encoding is rebuilt and compared in constant time. Any
/// parameter that cannot be encoded yields `false`.
pub fn verify_pkcs1_v15(em: &[u8], digest: &[u8], oid: DigestOid) -> bool {
    let mut expected = vec![0u8; em.len()];
    if encode_pkcs1_v15(&mut expected, digest, oid).is_err() {
        return false;
    }
    em.ct_eq(&expected).into()
}

/// PKCS#1 v1.5 signature padding as an encoder over a fixed digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPkcs1PadAlgo {
    em_len: usize,
    oid: DigestOid,
    digest: Vec<u8>,
}

impl RsaPkcs1PadAlgo {
    /// Creates a padding operation producing `em_len` bytes.
    ///
    /// # Arguments
    ///
    /// * `em_len` - Encoded message length, the RSA modulus size in bytes
    /// * `oid` - How the digest is identified
    /// * `digest` - The message digest
    pub fn new(em_len: usize, oid: DigestOid, digest: &[u8]) -> Self {
        Self {
            em_len,
            oid,
            digest: digest.to_vec(),
        }
    }

    /// Returns the encoded message length.
    pub fn em_len(&self) -> usize {
        self.em_len
    }

    /// Returns the digest identifier.
    pub fn oid(&self) -> DigestOid {
        self.oid
    }

    /// Returns the digest.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }
}

/// Parameters for recovering the digest from an encoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPkcs1PadParams {
    oid: DigestOid,
}

impl RsaPkcs1PadParams {
    /// Expects digests identified by `oid`.
    pub fn new(oid: DigestOid) -> Self {
        Self { oid }
    }

    /// Returns the expected digest identifier.
    pub fn oid(&self) -> DigestOid {
        self.oid
    }
}

impl EncodeOp for RsaPkcs1PadAlgo {
    /// Writes the `em_len`-byte encoded message.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::BufferTooSmall`] if `output` is shorter than `em_len`
    /// - any error of [`encode_pkcs1_v15`]
    fn to_bytes(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(self.em_len);
        };
        if output.len() < self.em_len {
            tracing::error!(len = output.len(), required = self.em_len, "output buffer too small");
            return Err(CryptoError::BufferTooSmall);
        }
        encode_pkcs1_v15(&mut output[..self.em_len], &self.digest, self.oid)?;
        Ok(self.em_len)
    }
}

impl DecodeOp for RsaPkcs1PadAlgo {
    type T = RsaPkcs1PadAlgo;
    type P = RsaPkcs1PadParams;

    /// Recovers the digest from an encoded message.
    ///
    /// The message length becomes `em_len`. The recovered digest is
    /// re-encoded and must reproduce `input` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSignature`] if the padding is malformed
    /// or `T` does not match `params`.
    fn from_bytes(input: &[u8], params: Self::P) -> Result<Self::T, CryptoError> {
        if input.len() < PKCS1_OVERHEAD || input[0] != 0x00 || input[1] != 0x01 {
            tracing::error!(len = input.len(), "PKCS#1 v1.5 header");
            return Err(CryptoError::InvalidSignature);
        }

        let ps_len = input[2..]
            .iter()
            .position(|&b| b != 0xFF)
            .ok_or(CryptoError::InvalidSignature)?;
        let sep = ps_len + 2;
        if ps_len < 8 || input[sep] != 0x00 {
            tracing::error!(ps_len, "PKCS#1 v1.5 padding string");
            return Err(CryptoError::InvalidSignature);
        }

        let t = &input[sep + 1..];
        let digest = match params.oid {
            DigestOid::Oid(kind) => {
                let info = DerDigestInfo::from_der(t).map_err(|_| CryptoError::InvalidSignature)?;
                if info.kind() != kind {
                    tracing::error!(
                        expected = ?kind,
                        found = ?info.kind(),
                        "digest algorithm mismatch"
                    );
                    return Err(CryptoError::InvalidSignature);
                }
                info.digest().to_vec()
            }
            DigestOid::NoDer => t.to_vec(),
        };

        let algo = RsaPkcs1PadAlgo::new(input.len(), params.oid, &digest);
        if !verify_pkcs1_v15(input, &algo.digest, algo.oid) {
            return Err(CryptoError::InvalidSignature);
        }
        Ok(algo)
    }
}
