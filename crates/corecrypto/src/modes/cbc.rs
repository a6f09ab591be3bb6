// Copyright (C) Microsoft Corporation. All rights reserved.

//! Cipher block chaining mode.
//!
//! Encryption: `C_i = E(P_i ^ C_{i-1})` with `C_0 = IV`.
//! Decryption: `P_i = D(C_i) ^ C_{i-1}`.
//!
//! No padding is applied; every call must cover whole blocks.

use std::marker::PhantomData;

use super::*;

/// CBC over cipher `C`.
pub struct CbcAlgo<C: BlockCipher> {
    iv: BlockBuf,
    _cipher: PhantomData<fn() -> C>,
}

impl<C: BlockCipher> CbcAlgo<C> {
    /// Creates a CBC operation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if `iv` is not one block.
    pub fn new(iv: &[u8]) -> Result<Self, CryptoError> {
        check_iv::<C>("CBC", iv)?;
        Ok(Self {
            iv: BlockBuf::from_slice(iv),
            _cipher: PhantomData,
        })
    }

    /// Returns the current IV register: the last ciphertext block processed,
    /// or the initial IV before any data.
    pub fn iv(&self) -> &[u8] {
        self.iv.as_slice()
    }
}

impl<C: BlockCipher> ChainMode for CbcAlgo<C> {
    type Cipher = C;
    const NAME: &'static str = "CBC";
    const BLOCK_ALIGNED: bool = true;

    fn crypt(&mut self, key: &C, dir: Direction, input: &[u8], output: &mut [u8]) {
        let bs = C::BLOCK_SIZE;
        let mut tmp = BlockBuf::zeroed(bs);

        for (src, dst) in input.chunks_exact(bs).zip(output.chunks_exact_mut(bs)) {
            match dir {
                Direction::Encrypt => {
                    xor_into(tmp.as_mut_slice(), src, self.iv.as_slice());
                    key.encrypt_block(tmp.as_slice(), dst);
                    self.iv.as_mut_slice().copy_from_slice(dst);
                }
                Direction::Decrypt => {
                    key.decrypt_block(src, tmp.as_mut_slice());
                    xor_into(dst, tmp.as_slice(), self.iv.as_slice());
                    self.iv.as_mut_slice().copy_from_slice(src);
                }
            }
        }
    }
}

impl_chain_ops!(CbcAlgo, CbcEncryptContext, CbcDecryptContext);
