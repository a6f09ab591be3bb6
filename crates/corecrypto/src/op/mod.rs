// Copyright (C) Microsoft Corporation. All rights reserved.

//! Core cryptographic operation traits.
//!
//! These traits are the seams between algorithm objects (a [`HashAlgo`], a
//! [`CbcAlgo`], an [`RsaPkcs1PadAlgo`]) and the wrapper facades in the
//! `traits` module.
//!
//! - [`key`]: key capability traits
//! - [`hashing`]: one-shot and streaming digests
//! - [`encryption`]: one-shot and streaming encryption/decryption
//! - [`encoding`]: byte encoders and decoders (padding schemes)
//! - [`signing`]: signature verification
//! - [`derivation`]: key derivation and key agreement
//!
//! # Buffer Pattern
//!
//! Operations producing bytes take `output: Option<&mut [u8]>`:
//! - `None`: return the required buffer size
//! - `Some(buffer)`: perform the operation and return the bytes written
mod derivation;
mod encoding;
mod encryption;
mod hashing;
mod key;
mod signing;

pub use derivation::*;
pub use encoding::*;
pub use encryption::*;
pub use hashing::*;
pub use key::*;
pub use signing::*;

use super::*;
