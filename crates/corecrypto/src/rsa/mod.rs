// Copyright (C) Microsoft Corporation. All rights reserved.

//! RSA signature padding.
//!
//! Only the message encoding half of RSA lives here: the modular
//! exponentiation is done by whoever owns the key.

mod pkcs1_sign;

pub use pkcs1_sign::*;

use super::*;

#[cfg(test)]
mod tests;
