// Copyright (C) Microsoft Corporation. All rights reserved.

//! Galois/Counter mode (SP 800-38D).
//!
//! [`GcmContext`] is the streaming AEAD state machine:
//!
//! ```text
//! new(key) -> set_iv -> aad* -> (encrypt | decrypt)* -> finalize | verify_tag
//!      ^                                                        |
//!      +----------------------- reset --------------------------+
//! ```
//!
//! Calls out of this order fail with [`CryptoError::InvalidState`]. The
//! hash subkey `H = E(0^128)` is computed once per key and survives
//! [`GcmContext::reset`].
//!
//! [`GcmAlgo`] wraps the state machine in the one-shot and streaming
//! operation traits.

use subtle::ConstantTimeEq;

use super::*;

const GCM_BLOCK_SIZE: usize = GF128_BLOCK_SIZE;
const GCM_TAG_SIZE: usize = GF128_BLOCK_SIZE;

/// Most plaintext bits one IV may protect: 2^39 - 256.
const GCM_MAX_TEXT_BITS: u64 = (1 << 39) - 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GcmPhase {
    Iv,
    Aad,
    Text,
    Finalized,
}

/// Key-independent GCM state. Block operations borrow the cipher per call.
struct GcmCore {
    h: Gf128Block,
    j0: Gf128Block,
    counter: Gf128Block,
    ghash: Gf128Block,
    ghash_buf: [u8; GCM_BLOCK_SIZE],
    ghash_pos: usize,
    pad: [u8; GCM_BLOCK_SIZE],
    pad_pos: usize,
    aad_bits: u64,
    text_bits: u64,
    phase: GcmPhase,
    direction: Option<Direction>,
}

impl Drop for GcmCore {
    fn drop(&mut self) {
        self.ghash_buf.zeroize();
        self.pad.zeroize();
    }
}

impl GcmCore {
    fn new<C: BlockCipher>(key: &C) -> Result<Self, CryptoError> {
        require_block_size::<C>("GCM")?;
        let mut h = [0u8; GCM_BLOCK_SIZE];
        key.encrypt_block(&[0u8; GCM_BLOCK_SIZE], &mut h);
        let core = Self {
            h: Gf128Block::load_be(&h),
            j0: Gf128Block::zero(),
            counter: Gf128Block::zero(),
            ghash: Gf128Block::zero(),
            ghash_buf: [0u8; GCM_BLOCK_SIZE],
            ghash_pos: 0,
            pad: [0u8; GCM_BLOCK_SIZE],
            pad_pos: GCM_BLOCK_SIZE,
            aad_bits: 0,
            text_bits: 0,
            phase: GcmPhase::Iv,
            direction: None,
        };
        h.zeroize();
        Ok(core)
    }

    fn reset(&mut self) {
        self.j0 = Gf128Block::zero();
        self.counter = Gf128Block::zero();
        self.ghash = Gf128Block::zero();
        self.ghash_buf.zeroize();
        self.ghash_pos = 0;
        self.pad.zeroize();
        self.pad_pos = GCM_BLOCK_SIZE;
        self.aad_bits = 0;
        self.text_bits = 0;
        self.phase = GcmPhase::Iv;
        self.direction = None;
    }

    fn expect_phase(&self, allowed: &[GcmPhase], call: &'static str) -> Result<(), CryptoError> {
        if !allowed.contains(&self.phase) {
            tracing::error!(call, phase = ?self.phase, "GCM call out of order");
            return Err(CryptoError::InvalidState);
        }
        Ok(())
    }

    fn ghash_block(&mut self, block: &[u8]) {
        self.ghash.xor_assign(&Gf128Block::load_be(block));
        self.ghash = self.ghash.mul(&self.h);
    }

    fn ghash_update(&mut self, mut data: &[u8]) {
        if self.ghash_pos > 0 {
            let take = (GCM_BLOCK_SIZE - self.ghash_pos).min(data.len());
            self.ghash_buf[self.ghash_pos..self.ghash_pos + take].copy_from_slice(&data[..take]);
            self.ghash_pos += take;
            data = &data[take..];
            if self.ghash_pos < GCM_BLOCK_SIZE {
                return;
            }
            let block = self.ghash_buf;
            self.ghash_block(&block);
            self.ghash_pos = 0;
        }

        let mut blocks = data.chunks_exact(GCM_BLOCK_SIZE);
        for block in &mut blocks {
            self.ghash_block(block);
        }
        let rest = blocks.remainder();
        self.ghash_buf[..rest.len()].copy_from_slice(rest);
        self.ghash_pos = rest.len();
    }

    /// Zero-pads and absorbs any partial GHASH block.
    fn ghash_flush(&mut self) {
        if self.ghash_pos > 0 {
            self.ghash_buf[self.ghash_pos..].fill(0);
            let block = self.ghash_buf;
            self.ghash_block(&block);
            self.ghash_pos = 0;
        }
    }

    fn set_iv(&mut self, iv: &[u8]) -> Result<(), CryptoError> {
        self.expect_phase(&[GcmPhase::Iv], "set_iv")?;
        if iv.is_empty() {
            tracing::error!("GCM IV must not be empty");
            return Err(CryptoError::InvalidLength);
        }

        if iv.len() == 12 {
            let mut block = [0u8; GCM_BLOCK_SIZE];
            block[..12].copy_from_slice(iv);
            block[15] = 1;
            self.j0 = Gf128Block::load_be(&block);
        } else {
            // J0 = GHASH(IV || 0-pad || 0^64 || [len(IV)]_64)
            self.ghash = Gf128Block::zero();
            self.ghash_update(iv);
            self.ghash_flush();
            let mut len_block = [0u8; GCM_BLOCK_SIZE];
            store64_be((iv.len() as u64) * 8, &mut len_block[8..]);
            self.ghash_block(&len_block);
            self.j0 = self.ghash.clone();
            self.ghash = Gf128Block::zero();
        }

        self.counter = self.j0.clone();
        self.counter.lsw_increment();
        self.phase = GcmPhase::Aad;
        tracing::debug!(iv_len = iv.len(), "GCM IV set");
        Ok(())
    }

    fn aad(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.expect_phase(&[GcmPhase::Aad], "aad")?;
        self.aad_bits = (data.len() as u64)
            .checked_mul(8)
            .and_then(|bits| bits.checked_add(self.aad_bits))
            .ok_or_else(|| {
                tracing::error!(len = data.len(), "GCM AAD length overflow");
                CryptoError::InvalidLength
            })?;
        self.ghash_update(data);
        Ok(())
    }

    fn crypt<C: BlockCipher>(
        &mut self,
        key: &C,
        dir: Direction,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        self.expect_phase(&[GcmPhase::Aad, GcmPhase::Text], "encrypt/decrypt")?;
        if self.direction.is_some_and(|d| d != dir) {
            tracing::error!(?dir, "GCM data calls must keep one direction");
            return Err(CryptoError::InvalidState);
        }
        if output.len() < input.len() {
            tracing::error!(
                len = output.len(),
                required = input.len(),
                "GCM output buffer too small"
            );
            return Err(CryptoError::BufferTooSmall);
        }
        let text_bits = (input.len() as u64)
            .checked_mul(8)
            .and_then(|bits| bits.checked_add(self.text_bits))
            .filter(|&bits| bits <= GCM_MAX_TEXT_BITS)
            .ok_or_else(|| {
                tracing::error!(len = input.len(), "GCM plaintext length limit exceeded");
                CryptoError::InvalidLength
            })?;

        if self.phase == GcmPhase::Aad {
            self.ghash_flush();
            self.phase = GcmPhase::Text;
        }
        self.direction = Some(dir);
        self.text_bits = text_bits;

        if dir == Direction::Decrypt {
            self.ghash_update(input);
        }

        let mut counter_block = [0u8; GCM_BLOCK_SIZE];
        for (&src, dst) in input.iter().zip(output.iter_mut()) {
            if self.pad_pos == GCM_BLOCK_SIZE {
                self.counter.store_be(&mut counter_block);
                key.encrypt_block(&counter_block, &mut self.pad);
                self.counter.lsw_increment();
                self.pad_pos = 0;
            }
            *dst = src ^ self.pad[self.pad_pos];
            self.pad_pos += 1;
        }

        if dir == Direction::Encrypt {
            self.ghash_update(&output[..input.len()]);
        }
        Ok(())
    }

    /// Computes the full 16-byte tag and closes the context.
    fn finalize<C: BlockCipher>(&mut self, key: &C) -> Result<[u8; GCM_TAG_SIZE], CryptoError> {
        self.expect_phase(&[GcmPhase::Aad, GcmPhase::Text], "finalize")?;

        self.ghash_flush();
        let mut len_block = [0u8; GCM_BLOCK_SIZE];
        store64_be(self.aad_bits, &mut len_block[..8]);
        store64_be(self.text_bits, &mut len_block[8..]);
        self.ghash_block(&len_block);

        let mut j0 = [0u8; GCM_BLOCK_SIZE];
        self.j0.store_be(&mut j0);
        let mut ek_j0 = [0u8; GCM_BLOCK_SIZE];
        key.encrypt_block(&j0, &mut ek_j0);

        let mut tag = [0u8; GCM_TAG_SIZE];
        self.ghash.xor(&Gf128Block::load_be(&ek_j0)).store_be(&mut tag);
        ek_j0.zeroize();

        self.phase = GcmPhase::Finalized;
        tracing::debug!(
            aad_bits = self.aad_bits,
            text_bits = self.text_bits,
            "GCM finalized"
        );
        Ok(tag)
    }

    fn finalize_into<C: BlockCipher>(
        &mut self,
        key: &C,
        tag_out: &mut [u8],
    ) -> Result<usize, CryptoError> {
        if tag_out.is_empty() || tag_out.len() > GCM_TAG_SIZE {
            tracing::error!(len = tag_out.len(), "GCM tag must be 1 to 16 bytes");
            return Err(CryptoError::InvalidLength);
        }
        let mut tag = self.finalize(key)?;
        tag_out.copy_from_slice(&tag[..tag_out.len()]);
        tag.zeroize();
        Ok(tag_out.len())
    }

    fn verify_tag<C: BlockCipher>(&mut self, key: &C, expected: &[u8]) -> Result<(), CryptoError> {
        if expected.is_empty() || expected.len() > GCM_TAG_SIZE {
            tracing::error!(len = expected.len(), "GCM tag must be 1 to 16 bytes");
            return Err(CryptoError::InvalidLength);
        }
        let tag = self.finalize(key)?;
        if bool::from(tag[..expected.len()].ct_eq(expected)) {
            Ok(())
        } else {
            tracing::error!("GCM tag mismatch");
            Err(CryptoError::TagMismatch)
        }
    }
}

/// Streaming GCM over cipher `C`.
///
/// Owns the key schedule. See the module documentation for the call order.
pub struct GcmContext<C: BlockCipher> {
    key: C,
    core: GcmCore,
}

impl<C: BlockCipher> GcmContext<C> {
    /// Keys a new context and derives the hash subkey.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBlockSize`] if `C` does not have a
    /// 16-byte block.
    pub fn new(key: C) -> Result<Self, CryptoError> {
        let core = GcmCore::new(&key)?;
        tracing::debug!("GCM context keyed");
        Ok(Self { key, core })
    }

    /// Shorthand for [`GcmContext::new`] followed by [`GcmContext::set_iv`].
    pub fn init_with_iv(key: C, iv: &[u8]) -> Result<Self, CryptoError> {
        let mut ctx = Self::new(key)?;
        ctx.set_iv(iv)?;
        Ok(ctx)
    }

    /// Sets the IV. A 12-byte IV is used directly as the counter prefix;
    /// any other length is hashed to form the pre-counter block.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] for an empty IV
    /// - [`CryptoError::InvalidState`] if an IV is already set
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<(), CryptoError> {
        self.core.set_iv(iv)
    }

    /// Increments the last 8 bytes of a 12-byte IV as a big-endian counter,
    /// resets the context and sets the new IV.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if `iv` is not 12 bytes
    /// - [`CryptoError::InvalidState`] if the counter would wrap
    pub fn inc_iv(&mut self, iv: &mut [u8]) -> Result<(), CryptoError> {
        if iv.len() != 12 {
            tracing::error!(len = iv.len(), "GCM inc_iv requires a 12-byte IV");
            return Err(CryptoError::InvalidLength);
        }
        let next = load64_be(&iv[4..]).checked_add(1).ok_or_else(|| {
            tracing::error!("GCM IV counter exhausted");
            CryptoError::InvalidState
        })?;
        store64_be(next, &mut iv[4..]);
        self.reset();
        self.set_iv(iv)
    }

    /// Absorbs additional authenticated data. Must precede all data calls.
    pub fn aad(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.core.aad(data)
    }

    /// Encrypts `input` into the first `input.len()` bytes of `output`.
    pub fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
        self.core.crypt(&self.key, Direction::Encrypt, input, output)
    }

    /// Decrypts `input` into the first `input.len()` bytes of `output`.
    ///
    /// The plaintext is unauthenticated until [`GcmContext::verify_tag`]
    /// succeeds.
    pub fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
        self.core.crypt(&self.key, Direction::Decrypt, input, output)
    }

    /// Writes the tag, truncated to `tag.len()` (1 to 16) bytes.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] for a tag length outside 1..=16
    /// - [`CryptoError::InvalidState`] if no IV is set or the context is
    ///   already finalized
    pub fn finalize(&mut self, tag: &mut [u8]) -> Result<usize, CryptoError> {
        self.core.finalize_into(&self.key, tag)
    }

    /// Finalizes and compares the tag against `expected` in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::TagMismatch`] if the tags differ, plus the
    /// errors of [`GcmContext::finalize`].
    pub fn verify_tag(&mut self, expected: &[u8]) -> Result<(), CryptoError> {
        self.core.verify_tag(&self.key, expected)
    }

    /// Returns to the keyed state, ready for a new IV.
    pub fn reset(&mut self) {
        self.core.reset();
    }
}

/// One-shot GCM parameters: IV, optional AAD, and the tag.
///
/// After encryption [`GcmAlgo::tag`] holds the 16-byte tag. For decryption
/// the expected tag is supplied up front and verified before any
/// plaintext is released.
pub struct GcmAlgo<C: BlockCipher> {
    iv: Vec<u8>,
    tag: Vec<u8>,
    aad: Option<Vec<u8>>,
    _cipher: std::marker::PhantomData<fn() -> C>,
}

impl<C: BlockCipher> GcmAlgo<C> {
    /// Creates an encryption operation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] for an empty IV.
    pub fn for_encrypt(iv: &[u8], aad: Option<&[u8]>) -> Result<Self, CryptoError> {
        Self::check_iv(iv)?;
        Ok(Self {
            iv: iv.to_vec(),
            tag: vec![0u8; GCM_TAG_SIZE],
            aad: aad.map(|a| a.to_vec()),
            _cipher: std::marker::PhantomData,
        })
    }

    /// Creates a decryption operation that verifies `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] for an empty IV or a tag
    /// outside 4..=16 bytes.
    pub fn for_decrypt(iv: &[u8], tag: &[u8], aad: Option<&[u8]>) -> Result<Self, CryptoError> {
        Self::check_iv(iv)?;
        if !(4..=GCM_TAG_SIZE).contains(&tag.len()) {
            tracing::error!(len = tag.len(), "GCM tag must be 4 to 16 bytes");
            return Err(CryptoError::InvalidLength);
        }
        Ok(Self {
            iv: iv.to_vec(),
            tag: tag.to_vec(),
            aad: aad.map(|a| a.to_vec()),
            _cipher: std::marker::PhantomData,
        })
    }

    fn check_iv(iv: &[u8]) -> Result<(), CryptoError> {
        if iv.is_empty() {
            tracing::error!("GCM IV must not be empty");
            return Err(CryptoError::InvalidLength);
        }
        Ok(())
    }

    /// Returns the IV.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Returns the tag: computed after encryption, expected for decryption.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    fn start(&self, key: &C) -> Result<GcmCore, CryptoError> {
        let mut core = GcmCore::new(key)?;
        core.set_iv(&self.iv)?;
        if let Some(aad) = &self.aad {
            core.aad(aad)?;
        }
        Ok(core)
    }
}

impl<C: BlockCipher> EncryptOp for GcmAlgo<C> {
    type Key = C;

    fn encrypt(
        &mut self,
        key: &C,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(input.len());
        };
        let mut core = self.start(key)?;
        core.crypt(key, Direction::Encrypt, input, output)?;
        self.tag.resize(GCM_TAG_SIZE, 0);
        core.finalize_into(key, &mut self.tag)?;
        Ok(input.len())
    }
}

impl<C: BlockCipher> DecryptOp for GcmAlgo<C> {
    type Key = C;

    fn decrypt(
        &mut self,
        key: &C,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(input.len());
        };
        let mut core = self.start(key)?;
        core.crypt(key, Direction::Decrypt, input, output)?;
        if let Err(err) = core.verify_tag(key, &self.tag) {
            output[..input.len()].zeroize();
            return Err(err);
        }
        Ok(input.len())
    }
}

/// Streaming GCM encryption. `finish` stores the tag in the algorithm.
pub struct GcmEncryptContext<C: BlockCipher> {
    algo: GcmAlgo<C>,
    key: C,
    core: GcmCore,
}

impl<C: BlockCipher> EncryptStreamingOp for GcmAlgo<C> {
    type Key = C;
    type Context = GcmEncryptContext<C>;

    fn encrypt_init(self, key: C) -> Result<Self::Context, CryptoError> {
        let core = self.start(&key)?;
        Ok(GcmEncryptContext {
            algo: self,
            key,
            core,
        })
    }
}

impl<C: BlockCipher> EncryptOpContext for GcmEncryptContext<C> {
    type Algo = GcmAlgo<C>;

    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(input.len());
        };
        self.core.crypt(&self.key, Direction::Encrypt, input, output)?;
        Ok(input.len())
    }

    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        if output.is_none() {
            return Ok(0);
        }
        self.algo.tag.resize(GCM_TAG_SIZE, 0);
        self.core.finalize_into(&self.key, &mut self.algo.tag)?;
        Ok(0)
    }

    fn algo(&self) -> &Self::Algo {
        &self.algo
    }

    fn into_algo(self) -> Self::Algo {
        self.algo
    }
}

/// Streaming GCM decryption. `finish` verifies the expected tag.
///
/// Plaintext returned by `update` is unauthenticated until `finish`
/// succeeds.
pub struct GcmDecryptContext<C: BlockCipher> {
    algo: GcmAlgo<C>,
    key: C,
    core: GcmCore,
}

impl<C: BlockCipher> DecryptStreamingOp for GcmAlgo<C> {
    type Key = C;
    type Context = GcmDecryptContext<C>;

    fn decrypt_init(self, key: C) -> Result<Self::Context, CryptoError> {
        let core = self.start(&key)?;
        Ok(GcmDecryptContext {
            algo: self,
            key,
            core,
        })
    }
}

impl<C: BlockCipher> DecryptOpContext for GcmDecryptContext<C> {
    type Algo = GcmAlgo<C>;

    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let Some(output) = output else {
            return Ok(input.len());
        };
        self.core.crypt(&self.key, Direction::Decrypt, input, output)?;
        Ok(input.len())
    }

    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        if output.is_none() {
            return Ok(0);
        }
        self.core.verify_tag(&self.key, &self.algo.tag)?;
        Ok(0)
    }

    fn algo(&self) -> &Self::Algo {
        &self.algo
    }

    fn into_algo(self) -> Self::Algo {
        self.algo
    }
}
