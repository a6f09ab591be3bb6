// Copyright (C) Microsoft Corporation. All rights reserved.

//! Counter mode.
//!
//! Keystream block `i` is `E(counter + i)`. The counter is the whole block
//! read as one big-endian integer and wraps modulo 2^(8 * block size).

use std::marker::PhantomData;

use super::*;

/// Increments `counter` as a big-endian integer, wrapping within its length.
///
/// The whole block is one counter, as in SP 800-38A appendix B.1 and
/// OpenSSL: a carry out of the low-order 32 or 64 bits runs on into the
/// higher bytes instead of wrapping inside a fixed-width low word.
pub(crate) fn increment_be(counter: &mut [u8]) {
    let mut carry = 1u16;
    for b in counter.iter_mut().rev() {
        let sum = u16::from(*b) + carry;
        *b = sum as u8;
        carry = sum >> 8;
    }
}

/// CTR over cipher `C`.
pub struct CtrAlgo<C: BlockCipher> {
    counter: BlockBuf,
    pad: BlockBuf,
    pos: usize,
    _cipher: PhantomData<fn() -> C>,
}

impl<C: BlockCipher> CtrAlgo<C> {
    /// Creates a CTR operation from the initial counter block.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if `counter` is not one block.
    pub fn new(counter: &[u8]) -> Result<Self, CryptoError> {
        check_iv::<C>("CTR", counter)?;
        Ok(Self {
            counter: BlockBuf::from_slice(counter),
            pad: BlockBuf::zeroed(C::BLOCK_SIZE),
            pos: C::BLOCK_SIZE,
            _cipher: PhantomData,
        })
    }

    /// Returns the next counter block to be encrypted.
    pub fn counter(&self) -> &[u8] {
        self.counter.as_slice()
    }
}

impl<C: BlockCipher> ChainMode for CtrAlgo<C> {
    type Cipher = C;
    const NAME: &'static str = "CTR";
    const BLOCK_ALIGNED: bool = false;

    fn crypt(&mut self, key: &C, _dir: Direction, input: &[u8], output: &mut [u8]) {
        for (&src, dst) in input.iter().zip(output.iter_mut()) {
            if self.pos == C::BLOCK_SIZE {
                key.encrypt_block(self.counter.as_slice(), self.pad.as_mut_slice());
                increment_be(self.counter.as_mut_slice());
                self.pos = 0;
            }
            *dst = src ^ self.pad.as_slice()[self.pos];
            self.pos += 1;
        }
    }
}

impl_chain_ops!(CtrAlgo, CtrEncryptContext, CtrDecryptContext);
