// Copyright (C) Microsoft Corporation. All rights reserved.

//! Block cipher modes of operation.
//!
//! Every mode is generic over a [`BlockCipher`] and expressed through the
//! crate's operation traits, so the same code drives AES, DES and triple
//! DES:
//!
//! | Mode | Type | Input |
//! |------|------|-------|
//! | ECB | [`EcbAlgo`] | whole blocks |
//! | CBC | [`CbcAlgo`] | whole blocks |
//! | CFB | [`CfbAlgo`] | any length |
//! | CFB8 | [`Cfb8Algo`] | any length |
//! | CTR | [`CtrAlgo`] | any length |
//! | OFB | [`OfbAlgo`] | any length |
//! | XTS | [`XtsAlgo`] | whole data units |
//! | CCM | [`CcmContext`], [`CcmAlgo`] | any length, declared up front |
//! | GCM | [`GcmContext`], [`GcmAlgo`] | any length |
//!
//! Chaining state (IV register, counter, keystream position) lives in the
//! algorithm object and advances with every call, so consecutive one-shot
//! calls continue the same stream. XTS, CCM and GCM need a 16-byte block
//! and reject narrower ciphers with [`CryptoError::InvalidBlockSize`].

mod cbc;
mod ccm;
mod cfb;
mod cfb8;
mod ctr;
mod ecb;
mod gcm;
mod ofb;
mod xts;

pub use cbc::*;
pub use ccm::*;
pub use cfb::*;
pub use cfb8::*;
pub use ctr::*;
pub use ecb::*;
pub use gcm::*;
pub use ofb::*;
pub use xts::*;
use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

use super::*;

/// Direction of a mode operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Encrypt,
    Decrypt,
}

/// A block-sized register (IV, counter or keystream), wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct BlockBuf {
    bytes: [u8; MAX_BLOCK_SIZE],
    len: usize,
}

impl BlockBuf {
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            bytes: [0u8; MAX_BLOCK_SIZE],
            len,
        }
    }

    pub(crate) fn from_slice(src: &[u8]) -> Self {
        let mut buf = Self::zeroed(src.len());
        buf.bytes[..src.len()].copy_from_slice(src);
        buf
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }
}

/// Checks that an IV matches the cipher's block size.
pub(crate) fn check_iv<C: BlockCipher>(mode: &'static str, iv: &[u8]) -> Result<(), CryptoError> {
    if iv.len() != C::BLOCK_SIZE {
        tracing::error!(
            mode,
            len = iv.len(),
            block = C::BLOCK_SIZE,
            "IV length must equal block size"
        );
        return Err(CryptoError::InvalidLength);
    }
    Ok(())
}

/// Checks that the cipher has the 16-byte block a mode is defined over.
pub(crate) fn require_block_size<C: BlockCipher>(mode: &'static str) -> Result<(), CryptoError> {
    if C::BLOCK_SIZE != GF128_BLOCK_SIZE {
        tracing::error!(mode, block = C::BLOCK_SIZE, "mode requires a 128-bit block cipher");
        return Err(CryptoError::InvalidBlockSize);
    }
    Ok(())
}

/// `out[i] = a[i] ^ b[i]` over the length of `out`.
pub(crate) fn xor_into(out: &mut [u8], a: &[u8], b: &[u8]) {
    for ((o, x), y) in out.iter_mut().zip(a).zip(b) {
        *o = x ^ y;
    }
}

/// The chaining step shared by the confidentiality-only modes.
pub(crate) trait ChainMode {
    /// The block cipher this mode runs over.
    type Cipher: BlockCipher;

    /// Mode name for diagnostics.
    const NAME: &'static str;

    /// Whether each call must cover whole blocks.
    const BLOCK_ALIGNED: bool;

    /// Transforms `input` into `output`, both the same length, advancing the
    /// chaining state.
    fn crypt(&mut self, key: &Self::Cipher, dir: Direction, input: &[u8], output: &mut [u8]);
}

/// Runs one call of a chaining mode with the optional-output convention.
pub(crate) fn chain_apply<M: ChainMode>(
    mode: &mut M,
    key: &M::Cipher,
    dir: Direction,
    input: &[u8],
    output: Option<&mut [u8]>,
) -> Result<usize, CryptoError> {
    let bs = <M::Cipher as BlockCipher>::BLOCK_SIZE;
    if M::BLOCK_ALIGNED && input.len() % bs != 0 {
        tracing::error!(mode = M::NAME, len = input.len(), block = bs, "input is not whole blocks");
        return Err(CryptoError::InvalidLength);
    }

    let Some(output) = output else {
        return Ok(input.len());
    };
    if output.len() < input.len() {
        tracing::error!(
            mode = M::NAME,
            len = output.len(),
            required = input.len(),
            "output buffer too small"
        );
        return Err(CryptoError::BufferTooSmall);
    }

    mode.crypt(key, dir, input, &mut output[..input.len()]);
    Ok(input.len())
}

/// Generates the one-shot and streaming operation impls for a chaining mode
/// algorithm type, plus its encrypt and decrypt context types.
macro_rules! impl_chain_ops {
    ($algo:ident, $enc_ctx:ident, $dec_ctx:ident) => {
        impl<C: BlockCipher> EncryptOp for $algo<C> {
            type Key = C;

            fn encrypt(
                &mut self,
                key: &C,
                input: &[u8],
                output: Option<&mut [u8]>,
            ) -> Result<usize, CryptoError> {
                chain_apply(self, key, Direction::Encrypt, input, output)
            }
        }

        impl<C: BlockCipher> DecryptOp for $algo<C> {
            type Key = C;

            fn decrypt(
                &mut self,
                key: &C,
                input: &[u8],
                output: Option<&mut [u8]>,
            ) -> Result<usize, CryptoError> {
                chain_apply(self, key, Direction::Decrypt, input, output)
            }
        }

        #[doc = concat!("Streaming encryption context for [`", stringify!($algo), "`].")]
        pub struct $enc_ctx<C: BlockCipher> {
            algo: $algo<C>,
            key: C,
        }

        impl<C: BlockCipher> EncryptStreamingOp for $algo<C> {
            type Key = C;
            type Context = $enc_ctx<C>;

            fn encrypt_init(self, key: C) -> Result<Self::Context, CryptoError> {
                Ok($enc_ctx { algo: self, key })
            }
        }

        impl<C: BlockCipher> EncryptOpContext for $enc_ctx<C> {
            type Algo = $algo<C>;

            fn update(
                &mut self,
                input: &[u8],
                output: Option<&mut [u8]>,
            ) -> Result<usize, CryptoError> {
                chain_apply(&mut self.algo, &self.key, Direction::Encrypt, input, output)
            }

            fn finish(&mut self, _output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
                Ok(0)
            }

            fn algo(&self) -> &Self::Algo {
                &self.algo
            }

            fn into_algo(self) -> Self::Algo {
                self.algo
            }
        }

        #[doc = concat!("Streaming decryption context for [`", stringify!($algo), "`].")]
        pub struct $dec_ctx<C: BlockCipher> {
            algo: $algo<C>,
            key: C,
        }

        impl<C: BlockCipher> DecryptStreamingOp for $algo<C> {
            type Key = C;
            type Context = $dec_ctx<C>;

            fn decrypt_init(self, key: C) -> Result<Self::Context, CryptoError> {
                Ok($dec_ctx { algo: self, key })
            }
        }

        impl<C: BlockCipher> DecryptOpContext for $dec_ctx<C> {
            type Algo = $algo<C>;

            fn update(
                &mut self,
                input: &[u8],
                output: Option<&mut [u8]>,
            ) -> Result<usize, CryptoError> {
                chain_apply(&mut self.algo, &self.key, Direction::Decrypt, input, output)
            }

            fn finish(&mut self, _output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
                Ok(0)
            }

            fn algo(&self) -> &Self::Algo {
                &self.algo
            }

            fn into_algo(self) -> Self::Algo {
                self.algo
            }
        }
    };
}

pub(crate) use impl_chain_ops;

#[cfg(test)]
mod tests;
