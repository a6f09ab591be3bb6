// Copyright (C) Microsoft Corporation. All rights reserved.

//! Software cryptographic primitives.
//!
//! This crate provides the building blocks other subsystems compose into
//! protocols:
//!
//! - **Hash**: a generic Merkle–Damgård digest engine driving MD4, MD5,
//!   SHA-1 and the SHA-2 family
//! - **Cipher**: AES, DES and triple DES block transforms
//! - **Modes**: ECB, CBC, CFB, CFB8, CTR, OFB, XTS, CCM and GCM built
//!   generically over any [`BlockCipher`]
//! - **GF128**: carry-less arithmetic in GF(2^128) for GHASH and XTS
//! - **ECC**: Jacobian point arithmetic over prime fields, the NIST curves,
//!   X9.63 point encoding, ECDH and ECDSA verification
//! - **RSA**: EMSA-PKCS1-v1_5 signature padding
//!
//! Every operation works on caller-owned contexts and buffers. The only
//! process-wide state is the immutable algorithm registry.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bignum;
mod cipher;
mod der;
mod ecc;
mod endian;
mod gf128;
mod hash;
mod modes;
mod rsa;

mod op;
mod traits;

#[cfg(test)]
mod test_log;

pub use bignum::*;
pub use cipher::*;
pub use der::*;
pub use ecc::*;
pub use endian::*;
pub use gf128::*;
pub use hash::*;
pub use modes::*;
pub use op::*;
pub use rsa::*;
use thiserror::Error;
pub use traits::*;

/// Error type for all cryptographic operations.
///
/// Errors are returned to the immediate caller and never retried
/// internally; every operation here is a deterministic computation.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CryptoError {
    /// A buffer, IV, nonce, tag or key is outside the accepted length range.
    #[error("invalid length")]
    InvalidLength,
    /// The encoded message is too short to hold the RSA padding.
    #[error("message too short for padding")]
    MessageTooShort,
    /// A mode context was driven out of its required call order.
    #[error("invalid state")]
    InvalidState,
    /// A destination is narrower than the source width.
    #[error("insufficient capacity")]
    InsufficientCapacity,
    /// Unknown algorithm identifier or unsupported key size.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,
    /// The block cipher's block size does not fit the requested mode.
    #[error("invalid block size")]
    InvalidBlockSize,
    /// The output buffer cannot hold the result.
    #[error("buffer too small")]
    BufferTooSmall,
    /// An authentication tag did not verify.
    #[error("authentication tag mismatch")]
    TagMismatch,
    /// An encoded elliptic curve point is malformed or not on the curve.
    #[error("invalid point")]
    InvalidPoint,
    /// A signature is malformed or its components are out of range.
    #[error("invalid signature")]
    InvalidSignature,
    /// A prime field modulus is zero or even.
    #[error("invalid modulus")]
    InvalidModulus,
    /// A private key is outside the range its group allows.
    #[error("invalid key")]
    InvalidKey,

    // DER errors
    /// ASN.1 encoding failed.
    #[error("DER encode error")]
    DerEncodeError,
    /// ASN.1 decoding failed.
    #[error("DER decode error")]
    DerDecodeError,
}
