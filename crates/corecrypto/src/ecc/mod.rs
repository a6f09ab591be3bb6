// Copyright (C) Microsoft Corporation. All rights reserved.

//! Elliptic curve arithmetic over prime fields.
//!
//! - [`EcCurve`] / [`CurveParams`]: the NIST curves P-192 through P-521,
//!   plus caller-supplied short Weierstrass curves
//! - [`ProjectivePoint`] and friends: Jacobian point storage and arithmetic
//! - [`EcPublicKey`] / [`EcPrivateKey`]: X9.63 points and private scalars
//! - [`EcdhAlgo`]: Diffie-Hellman key agreement
//! - [`EcdsaAlgo`]: ECDSA signature verification
//!
//! Scalar multiplication is a Montgomery ladder with a fixed step count and
//! constant-time swaps, so it is safe to use with secret scalars. Signing is
//! not provided.

mod curve;
mod ecdh;
mod ecdsa;
mod key;
mod point;

pub use curve::*;
pub use ecdh::*;
pub use ecdsa::*;
pub use key::*;
pub use point::*;

use super::*;

#[cfg(test)]
mod tests;
