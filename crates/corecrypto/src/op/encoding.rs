// Copyright (C) Microsoft Corporation. All rights reserved.

//! Encoding and decoding traits.
//!
//! Used by the padding schemes: an encoder renders itself into a caller
//! buffer, a decoder parses bytes back into a value given side parameters.

use super::*;

/// Trait for encoding a value into bytes.
pub trait EncodeOp {
    /// Encodes into `output`.
    ///
    /// # Arguments
    ///
    /// * `output` - Optional output buffer. If `None`, only the required size is returned.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or required when `output` is `None`.
    fn to_bytes(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;
}

/// Trait for decoding a value from bytes.
pub trait DecodeOp {
    /// The decoded value type.
    type T;
    /// Parameters needed to decode.
    type P;

    /// Decodes `input` with `params`.
    fn from_bytes(input: &[u8], params: Self::P) -> Result<Self::T, CryptoError>;
}
