// Copyright (C) Microsoft Corporation. All rights reserved.

//! Wrapper facades over the operation traits.
//!
//! - [`Hasher`]: one-shot and streaming digests
//! - [`Encrypter`] / [`Decrypter`]: one-shot and streaming mode operations
//! - [`Encoder`] / [`Decoder`]: padding encoders
//! - [`Verifier`]: signature verification
//! - [`KeyDeriver`]: key derivation and agreement
//!
//! The `_vec` variants query the output size first, allocate, then run the
//! operation for real.
mod codec;
mod crypter;
mod deriver;
mod hasher;
mod verifier;

pub use codec::*;
pub use crypter::*;
pub use deriver::*;
pub use hasher::*;
pub use verifier::*;

use super::*;
