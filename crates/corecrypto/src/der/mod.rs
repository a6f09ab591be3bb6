// Copyright (C) Microsoft Corporation. All rights reserved.

//! DER encoding and decoding of the ASN.1 structures the primitives
//! exchange with the outside world.
//!
//! - [`digest`]: `DigestInfo`, the payload of PKCS#1 v1.5 signatures
//! - [`ecdsa`]: the `SEQUENCE { r, s }` ECDSA signature value
//!
//! Structures are declared with the `asn1` derive macros and parsed with
//! [`asn1::parse_single`], so anything that is not strict DER is rejected.

mod digest;
mod ecdsa;

pub use digest::*;
pub use ecdsa::*;

use super::*;

#[cfg(test)]
mod tests;
