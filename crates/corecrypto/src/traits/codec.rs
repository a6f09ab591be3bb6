// Copyright (C) Microsoft Corporation. All rights reserved.

//! Encoding and decoding wrappers.

use super::*;

/// Encoding operation wrapper.
pub struct Encoder;

impl Encoder {
    /// Encodes `algo` into `output`, or returns the required size when
    /// `output` is `None`.
    pub fn encode<Algo: EncodeOp>(
        algo: &mut Algo,
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.to_bytes(output)
    }

    /// Encodes `algo` into a new vector.
    pub fn encode_vec<Algo: EncodeOp>(algo: &mut Algo) -> Result<Vec<u8>, CryptoError> {
        let size = Self::encode(algo, None)?;
        let mut buffer = vec![0u8; size];
        let len = Self::encode(algo, Some(&mut buffer))?;
        buffer.truncate(len);
        Ok(buffer)
    }
}

/// Decoding operation wrapper.
pub struct Decoder;

impl Decoder {
    /// Decodes `input` as `Algo` with `params`.
    pub fn decode<Algo: DecodeOp>(input: &[u8], params: Algo::P) -> Result<Algo::T, CryptoError> {
        Algo::from_bytes(input, params)
    }
}
