// Copyright (C) Microsoft Corporation. All rights reserved.

//! Electronic codebook mode.

use std::marker::PhantomData;

use super::*;

/// ECB over cipher `C`. Stateless; every block is transformed independently.
pub struct EcbAlgo<C: BlockCipher> {
    _cipher: PhantomData<fn() -> C>,
}

impl<C: BlockCipher> EcbAlgo<C> {
    /// Creates an ECB operation.
    pub fn new() -> Self {
        Self {
            _cipher: PhantomData,
        }
    }
}

impl<C: BlockCipher> Default for EcbAlgo<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BlockCipher> ChainMode for EcbAlgo<C> {
    type Cipher = C;
    const NAME: &'static str = "ECB";
    const BLOCK_ALIGNED: bool = true;

    fn crypt(&mut self, key: &C, dir: Direction, input: &[u8], output: &mut [u8]) {
        for (src, dst) in input
            .chunks_exact(C::BLOCK_SIZE)
            .zip(output.chunks_exact_mut(C::BLOCK_SIZE))
        {
            match dir {
                Direction::Encrypt => key.encrypt_block(src, dst),
                Direction::Decrypt => key.decrypt_block(src, dst),
            }
        }
    }
}

impl_chain_ops!(EcbAlgo, EcbEncryptContext, EcbDecryptContext);
