// Copyright (C) Microsoft Corporation. All rights reserved.

//! Output feedback mode.
//!
//! The register is repeatedly encrypted and used directly as keystream,
//! independent of the data. Encryption and decryption are the same
//! operation.

use std::marker::PhantomData;

use super::*;

/// OFB over cipher `C`.
pub struct OfbAlgo<C: BlockCipher> {
    register: BlockBuf,
    pos: usize,
    _cipher: PhantomData<fn() -> C>,
}

impl<C: BlockCipher> OfbAlgo<C> {
    /// Creates an OFB operation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if `iv` is not one block.
    pub fn new(iv: &[u8]) -> Result<Self, CryptoError> {
        check_iv::<C>("OFB", iv)?;
        Ok(Self {
            register: BlockBuf::from_slice(iv),
            pos: C::BLOCK_SIZE,
            _cipher: PhantomData,
        })
    }
}

impl<C: BlockCipher> ChainMode for OfbAlgo<C> {
    type Cipher = C;
    const NAME: &'static str = "OFB";
    const BLOCK_ALIGNED: bool = false;

    fn crypt(&mut self, key: &C, _dir: Direction, input: &[u8], output: &mut [u8]) {
        let mut next = BlockBuf::zeroed(C::BLOCK_SIZE);
        for (&src, dst) in input.iter().zip(output.iter_mut()) {
            if self.pos == C::BLOCK_SIZE {
                key.encrypt_block(self.register.as_slice(), next.as_mut_slice());
                self.register.as_mut_slice().copy_from_slice(next.as_slice());
                self.pos = 0;
            }
            *dst = src ^ self.register.as_slice()[self.pos];
            self.pos += 1;
        }
    }
}

impl_chain_ops!(OfbAlgo, OfbEncryptContext, OfbDecryptContext);
