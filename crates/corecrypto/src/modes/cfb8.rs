// Copyright (C) Microsoft Corporation. All rights reserved.

//! 8-bit cipher feedback mode.
//!
//! One block encryption per byte: the leftmost keystream byte masks the
//! data, then the register shifts left one byte and takes the ciphertext
//! byte at the right.

use std::marker::PhantomData;

use super::*;

/// CFB8 over cipher `C`.
pub struct Cfb8Algo<C: BlockCipher> {
    register: BlockBuf,
    _cipher: PhantomData<fn() -> C>,
}

impl<C: BlockCipher> Cfb8Algo<C> {
    /// Creates a CFB8 operation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if `iv` is not one block.
    pub fn new(iv: &[u8]) -> Result<Self, CryptoError> {
        check_iv::<C>("CFB8", iv)?;
        Ok(Self {
            register: BlockBuf::from_slice(iv),
            _cipher: PhantomData,
        })
    }
}

impl<C: BlockCipher> ChainMode for Cfb8Algo<C> {
    type Cipher = C;
    const NAME: &'static str = "CFB8";
    const BLOCK_ALIGNED: bool = false;

    fn crypt(&mut self, key: &C, dir: Direction, input: &[u8], output: &mut [u8]) {
        let bs = C::BLOCK_SIZE;
        let mut pad = BlockBuf::zeroed(bs);

        for (&src, dst) in input.iter().zip(output.iter_mut()) {
            key.encrypt_block(self.register.as_slice(), pad.as_mut_slice());
            let out = src ^ pad.as_slice()[0];
            let ct = match dir {
                Direction::Encrypt => out,
                Direction::Decrypt => src,
            };
            let reg = self.register.as_mut_slice();
            reg.copy_within(1.., 0);
            reg[bs - 1] = ct;
            *dst = out;
        }
    }
}

impl_chain_ops!(Cfb8Algo, Cfb8EncryptContext, Cfb8DecryptContext);
