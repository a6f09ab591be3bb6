// Copyright (C) Microsoft Corporation. All rights reserved.

//! Full-block cipher feedback mode.
//!
//! The keystream block is `E(register)`, and the register is refilled with
//! ciphertext byte by byte. A partially used keystream block carries over
//! to the next call.

use std::marker::PhantomData;

use super::*;

/// CFB over cipher `C`, with feedback width equal to the block size.
pub struct CfbAlgo<C: BlockCipher> {
    register: BlockBuf,
    pad: BlockBuf,
    pos: usize,
    _cipher: PhantomData<fn() -> C>,
}

impl<C: BlockCipher> CfbAlgo<C> {
    /// Creates a CFB operation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if `iv` is not one block.
    pub fn new(iv: &[u8]) -> Result<Self, CryptoError> {
        check_iv::<C>("CFB", iv)?;
        Ok(Self {
            register: BlockBuf::from_slice(iv),
            pad: BlockBuf::zeroed(C::BLOCK_SIZE),
            pos: C::BLOCK_SIZE,
            _cipher: PhantomData,
        })
    }
}

impl<C: BlockCipher> ChainMode for CfbAlgo<C> {
    type Cipher = C;
    const NAME: &'static str = "CFB";
    const BLOCK_ALIGNED: bool = false;

    fn crypt(&mut self, key: &C, dir: Direction, input: &[u8], output: &mut [u8]) {
        for (&src, dst) in input.iter().zip(output.iter_mut()) {
            if self.pos == C::BLOCK_SIZE {
                key.encrypt_block(self.register.as_slice(), self.pad.as_mut_slice());
                self.pos = 0;
            }
            let out = src ^ self.pad.as_slice()[self.pos];
            let ct = match dir {
                Direction::Encrypt => out,
                Direction::Decrypt => src,
            };
            self.register.as_mut_slice()[self.pos] = ct;
            *dst = out;
            self.pos += 1;
        }
    }
}

impl_chain_ops!(CfbAlgo, CfbEncryptContext, CfbDecryptContext);
