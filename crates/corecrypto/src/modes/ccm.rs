// Copyright (C) Microsoft Corporation. All rights reserved.

//! Counter with CBC-MAC mode (SP 800-38C, RFC 3610).
//!
//! CCM authenticates with a CBC-MAC over `B0 || encoded AAD || payload` and
//! encrypts with CTR. `B0` commits to the nonce, tag length and payload
//! length, so both lengths are declared in [`CcmContext::set_iv`] before
//! any data is supplied:
//!
//! ```text
//! new(key) -> set_iv(nonce, tag_len, aad_len, text_len)
//!     -> aad* -> (encrypt | decrypt)* -> finalize
//! ```

use subtle::ConstantTimeEq;

use super::ctr::increment_be;
use super::*;

const CCM_BLOCK_SIZE: usize = GF128_BLOCK_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CcmPhase {
    Keyed,
    Aad,
    Text,
    Finalized,
}

/// Key-independent CCM state.
struct CcmCore {
    phase: CcmPhase,
    direction: Option<Direction>,
    q: usize,
    tag_len: usize,
    aad_len: u64,
    aad_seen: u64,
    text_len: u64,
    text_seen: u64,
    mac: [u8; CCM_BLOCK_SIZE],
    mac_buf: [u8; CCM_BLOCK_SIZE],
    mac_pos: usize,
    counter: [u8; CCM_BLOCK_SIZE],
    s0: [u8; CCM_BLOCK_SIZE],
    pad: [u8; CCM_BLOCK_SIZE],
    pad_pos: usize,
}

impl Drop for CcmCore {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl CcmCore {
    fn new<C: BlockCipher>() -> Result<Self, CryptoError> {
        require_block_size::<C>("CCM")?;
        Ok(Self {
            phase: CcmPhase::Keyed,
            direction: None,
            q: 0,
            tag_len: 0,
            aad_len: 0,
            aad_seen: 0,
            text_len: 0,
            text_seen: 0,
            mac: [0u8; CCM_BLOCK_SIZE],
            mac_buf: [0u8; CCM_BLOCK_SIZE],
            mac_pos: 0,
            counter: [0u8; CCM_BLOCK_SIZE],
            s0: [0u8; CCM_BLOCK_SIZE],
            pad: [0u8; CCM_BLOCK_SIZE],
            pad_pos: CCM_BLOCK_SIZE,
        })
    }

    fn wipe(&mut self) {
        self.mac.zeroize();
        self.mac_buf.zeroize();
        self.counter.zeroize();
        self.s0.zeroize();
        self.pad.zeroize();
    }

    fn reset(&mut self) {
        self.wipe();
        self.phase = CcmPhase::Keyed;
        self.direction = None;
        self.q = 0;
        self.tag_len = 0;
        self.aad_len = 0;
        self.aad_seen = 0;
        self.text_len = 0;
        self.text_seen = 0;
        self.mac_pos = 0;
        self.pad_pos = CCM_BLOCK_SIZE;
    }

    fn expect_phase(&self, allowed: &[CcmPhase], call: &'static str) -> Result<(), CryptoError> {
        if !allowed.contains(&self.phase) {
            tracing::error!(call, phase = ?self.phase, "CCM call out of order");
            return Err(CryptoError::InvalidState);
        }
        Ok(())
    }

    fn mac_block<C: BlockCipher>(&mut self, key: &C, block: &[u8]) {
        let mut x = [0u8; CCM_BLOCK_SIZE];
        xor_into(&mut x, &self.mac, block);
        key.encrypt_block(&x, &mut self.mac);
        x.zeroize();
    }

    fn mac_update<C: BlockCipher>(&mut self, key: &C, mut data: &[u8]) {
        if self.mac_pos > 0 {
            let take = (CCM_BLOCK_SIZE - self.mac_pos).min(data.len());
            self.mac_buf[self.mac_pos..self.mac_pos + take].copy_from_slice(&data[..take]);
            self.mac_pos += take;
            data = &data[take..];
            if self.mac_pos < CCM_BLOCK_SIZE {
                return;
            }
            let block = self.mac_buf;
            self.mac_block(key, &block);
            self.mac_pos = 0;
        }

        let mut blocks = data.chunks_exact(CCM_BLOCK_SIZE);
        for block in &mut blocks {
            self.mac_block(key, block);
        }
        let rest = blocks.remainder();
        self.mac_buf[..rest.len()].copy_from_slice(rest);
        self.mac_pos = rest.len();
    }

    fn mac_flush<C: BlockCipher>(&mut self, key: &C) {
        if self.mac_pos > 0 {
            self.mac_buf[self.mac_pos..].fill(0);
            let block = self.mac_buf;
            self.mac_block(key, &block);
            self.mac_pos = 0;
        }
    }

    fn set_iv<C: BlockCipher>(
        &mut self,
        key: &C,
        nonce: &[u8],
        tag_len: usize,
        aad_len: usize,
        text_len: usize,
    ) -> Result<(), CryptoError> {
        self.expect_phase(&[CcmPhase::Keyed], "set_iv")?;
        if !(7..=13).contains(&nonce.len()) {
            tracing::error!(len = nonce.len(), "CCM nonce must be 7 to 13 bytes");
            return Err(CryptoError::InvalidLength);
        }
        if !(4..=16).contains(&tag_len) || tag_len % 2 != 0 {
            tracing::error!(tag_len, "CCM tag must be an even length from 4 to 16");
            return Err(CryptoError::InvalidLength);
        }
        // The payload length must fit in the q = 15 - n byte length field.
        let q = 15 - nonce.len();
        let text_len = text_len as u64;
        if q < 8 && text_len >> (8 * q) != 0 {
            tracing::error!(text_len, q, "CCM payload too long for nonce size");
            return Err(CryptoError::InvalidLength);
        }

        let flags_aad = if aad_len > 0 { 0x40 } else { 0 };
        let mut b0 = [0u8; CCM_BLOCK_SIZE];
        b0[0] = flags_aad | ((((tag_len - 2) / 2) as u8) << 3) | (q as u8 - 1);
        b0[1..1 + nonce.len()].copy_from_slice(nonce);
        let len_bytes = text_len.to_be_bytes();
        b0[16 - q.min(8)..].copy_from_slice(&len_bytes[8 - q.min(8)..]);

        self.mac = [0u8; CCM_BLOCK_SIZE];
        self.mac_block(key, &b0);

        self.counter = [0u8; CCM_BLOCK_SIZE];
        self.counter[0] = q as u8 - 1;
        self.counter[1..1 + nonce.len()].copy_from_slice(nonce);
        key.encrypt_block(&self.counter, &mut self.s0);
        increment_be(&mut self.counter[16 - q..]);

        self.q = q;
        self.tag_len = tag_len;
        self.aad_len = aad_len as u64;
        self.text_len = text_len;

        if aad_len > 0 {
            let mut header = [0u8; 10];
            let header_len = encode_aad_len(self.aad_len, &mut header);
            self.mac_update(key, &header[..header_len]);
        }

        self.phase = CcmPhase::Aad;
        tracing::debug!(nonce_len = nonce.len(), tag_len, aad_len, "CCM IV set");
        Ok(())
    }

    fn aad<C: BlockCipher>(&mut self, key: &C, data: &[u8]) -> Result<(), CryptoError> {
        self.expect_phase(&[CcmPhase::Aad], "aad")?;
        let seen = self.aad_seen + data.len() as u64;
        if seen > self.aad_len {
            tracing::error!(declared = self.aad_len, seen, "CCM AAD longer than declared");
            return Err(CryptoError::InvalidState);
        }
        self.aad_seen = seen;
        self.mac_update(key, data);
        Ok(())
    }

    /// Ends the AAD section: checks it is complete and pads the MAC input.
    fn close_aad<C: BlockCipher>(&mut self, key: &C) -> Result<(), CryptoError> {
        if self.phase != CcmPhase::Aad {
            return Ok(());
        }
        if self.aad_seen != self.aad_len {
            tracing::error!(
                declared = self.aad_len,
                seen = self.aad_seen,
                "CCM AAD shorter than declared"
            );
            return Err(CryptoError::InvalidState);
        }
        self.mac_flush(key);
        self.phase = CcmPhase::Text;
        Ok(())
    }

    fn crypt<C: BlockCipher>(
        &mut self,
        key: &C,
        dir: Direction,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        self.expect_phase(&[CcmPhase::Aad, CcmPhase::Text], "encrypt/decrypt")?;
        if self.direction.is_some_and(|d| d != dir) {
            tracing::error!(?dir, "CCM data calls must keep one direction");
            return Err(CryptoError::InvalidState);
        }
        if output.len() < input.len() {
            tracing::error!(
                len = output.len(),
                required = input.len(),
                "CCM output buffer too small"
            );
            return Err(CryptoError::BufferTooSmall);
        }
        let seen = self.text_seen + input.len() as u64;
        if seen > self.text_len {
            tracing::error!(declared = self.text_len, seen, "CCM payload longer than declared");
            return Err(CryptoError::InvalidState);
        }
        self.close_aad(key)?;
        self.direction = Some(dir);
        self.text_seen = seen;

        if dir == Direction::Encrypt {
            self.mac_update(key, input);
        }

        let ctr_start = CCM_BLOCK_SIZE - self.q;
        for (&src, dst) in input.iter().zip(output.iter_mut()) {
            if self.pad_pos == CCM_BLOCK_SIZE {
                key.encrypt_block(&self.counter, &mut self.pad);
                increment_be(&mut self.counter[ctr_start..]);
                self.pad_pos = 0;
            }
            *dst = src ^ self.pad[self.pad_pos];
            self.pad_pos += 1;
        }

        if dir == Direction::Decrypt {
            self.mac_update(key, &output[..input.len()]);
        }
        Ok(())
    }

    fn finalize<C: BlockCipher>(&mut self, key: &C) -> Result<[u8; CCM_BLOCK_SIZE], CryptoError> {
        self.expect_phase(&[CcmPhase::Aad, CcmPhase::Text], "finalize")?;
        self.close_aad(key)?;
        if self.text_seen != self.text_len {
            tracing::error!(
                declared = self.text_len,
                seen = self.text_seen,
                "CCM payload shorter than declared"
            );
            return Err(CryptoError::InvalidState);
        }
        self.mac_flush(key);

        let mut tag = [0u8; CCM_BLOCK_SIZE];
        xor_into(&mut tag, &self.mac, &self.s0);
        self.phase = CcmPhase::Finalized;
        Ok(tag)
    }

    fn finalize_into<C: BlockCipher>(
        &mut self,
        key: &C,
        tag_out: &mut [u8],
    ) -> Result<usize, CryptoError> {
        if tag_out.len() < self.tag_len {
            tracing::error!(
                len = tag_out.len(),
                required = self.tag_len,
                "CCM tag buffer too small"
            );
            return Err(CryptoError::InvalidLength);
        }
        let mut tag = self.finalize(key)?;
        tag_out[..self.tag_len].copy_from_slice(&tag[..self.tag_len]);
        tag.zeroize();
        Ok(self.tag_len)
    }

    fn verify_tag<C: BlockCipher>(&mut self, key: &C, expected: &[u8]) -> Result<(), CryptoError> {
        self.expect_phase(&[CcmPhase::Aad, CcmPhase::Text], "verify_tag")?;
        if expected.len() != self.tag_len {
            tracing::error!(
                len = expected.len(),
                required = self.tag_len,
                "CCM tag length mismatch"
            );
            return Err(CryptoError::InvalidLength);
        }
        let tag = self.finalize(key)?;
        if bool::from(tag[..self.tag_len].ct_eq(expected)) {
            Ok(())
        } else {
            tracing::error!("CCM tag mismatch");
            Err(CryptoError::TagMismatch)
        }
    }
}

/// Writes the CCM encoding of the AAD length and returns its size.
fn encode_aad_len(aad_len: u64, out: &mut [u8; 10]) -> usize {
    if aad_len < 0xff00 {
        out[..2].copy_from_slice(&(aad_len as u16).to_be_bytes());
        2
    } else if aad_len <= u64::from(u32::MAX) {
        out[..2].copy_from_slice(&[0xff, 0xfe]);
        out[2..6].copy_from_slice(&(aad_len as u32).to_be_bytes());
        6
    } else {
        out[..2].copy_from_slice(&[0xff, 0xff]);
        out[2..10].copy_from_slice(&aad_len.to_be_bytes());
        10
    }
}

/// Streaming CCM over cipher `C`.
pub struct CcmContext<C: BlockCipher> {
    key: C,
    core: CcmCore,
}

impl<C: BlockCipher> CcmContext<C> {
    /// Keys a new context.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBlockSize`] if `C` does not have a
    /// 16-byte block.
    pub fn new(key: C) -> Result<Self, CryptoError> {
        let core = CcmCore::new::<C>()?;
        tracing::debug!("CCM context keyed");
        Ok(Self { key, core })
    }

    /// Sets the nonce and declares the tag, AAD and payload lengths.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] for a nonce outside 7..=13 bytes, a
    ///   tag length that is odd or outside 4..=16, or a payload too long
    ///   for the nonce size
    /// - [`CryptoError::InvalidState`] if the nonce is already set
    pub fn set_iv(
        &mut self,
        nonce: &[u8],
        tag_len: usize,
        aad_len: usize,
        text_len: usize,
    ) -> Result<(), CryptoError> {
        self.core.set_iv(&self.key, nonce, tag_len, aad_len, text_len)
    }

    /// Absorbs additional authenticated data.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidState`] after a data call or when more
    /// AAD is supplied than declared.
    pub fn aad(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.core.aad(&self.key, data)
    }

    /// Encrypts `input` into the first `input.len()` bytes of `output`.
    pub fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
        self.core.crypt(&self.key, Direction::Encrypt, input, output)
    }

    /// Decrypts `input` into the first `input.len()` bytes of `output`.
    ///
    /// The plaintext is unauthenticated until [`CcmContext::verify_tag`]
    /// succeeds.
    pub fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
        self.core.crypt(&self.key, Direction::Decrypt, input, output)
    }

    /// Writes the tag (of the length declared in `set_iv`) to `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidState`] if the declared AAD or payload
    /// was not fully supplied, or the context is already finalized.
    pub fn finalize(&mut self, tag: &mut [u8]) -> Result<usize, CryptoError> {
        self.core.finalize_into(&self.key, tag)
    }

    /// Finalizes and compares the tag against `expected` in constant time.
    pub fn verify_tag(&mut self, expected: &[u8]) -> Result<(), CryptoError> {
        self.core.verify_tag(&self.key, expected)
    }

    /// Returns to the keyed state, ready for a new nonce.
    pub fn reset(&mut self) {
        self.core.reset();
    }
}

/// One-shot CCM parameters: nonce, optional AAD, and the tag.
pub struct CcmAlgo<C: BlockCipher> {
    nonce: Vec<u8>,
    tag: Vec<u8>,
    aad: Option<Vec<u8>>,
    _cipher: std::marker::PhantomData<fn() -> C>,
}

impl<C: BlockCipher> CcmAlgo<C> {
    /// Creates an encryption operation producing a `tag_len`-byte tag.
    pub fn for_encrypt(
        nonce: &[u8],
        tag_len: usize,
        aad: Option<&[u8]>,
    ) -> Result<Self, CryptoError> {
        Self::check_params(nonce, tag_len)?;
        Ok(Self {
            nonce: nonce.to_vec(),
            tag: vec![0u8; tag_len],
            aad: aad.map(|a| a.to_vec()),
            _cipher: std::marker::PhantomData,
        })
    }

    /// Creates a decryption operation that verifies `tag`.
    pub fn for_decrypt(nonce: &[u8], tag: &[u8], aad: Option<&[u8]>) -> Result<Self, CryptoError> {
        Self::check_params(nonce, tag.len())?;
        Ok(Self {
            nonce: nonce.to_vec(),
            tag: tag.to_vec(),
            aad: aad.map(|a| a.to_vec()),
            _cipher: std::marker::PhantomData,
        })
    }

    fn check_params(nonce: &[u8], tag_len: usize) -> Result<(), CryptoError> {
        if !(7..=13).contains(&nonce.len()) || !(4..=16).contains(&tag_len) || tag_len % 2 != 0 {
            tracing::error!(nonce_len = nonce.len(), tag_len, "invalid CCM parameters");
            return Err(CryptoError::InvalidLength);
        }
        Ok(())
    }

    /// Returns the nonce.
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Returns the tag: computed after encryption, expected for decryption.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    fn start(&self, key: &C, text_len: usize) -> Result<CcmCore, CryptoError> {
        let aad = self.aad.as_deref().unwrap_or_default();
        let mut core = CcmCore::new::<C>()?;
        core.set_iv(key, &self.nonce, self.tag.len(), aad.len(), text_len)?;
        core.aad(key, aad)?;
        Ok(core)
    }
}

impl<C: BlockCipher> EncryptOp for CcmAlgo<C> {
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
        let mut core = self.start(key, input.len())?;
        core.crypt(key, Direction::Encrypt, input, output)?;
        core.finalize_into(key, &mut self.tag)?;
        Ok(input.len())
    }
}

impl<C: BlockCipher> DecryptOp for CcmAlgo<C> {
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
        let mut core = self.start(key, input.len())?;
        core.crypt(key, Direction::Decrypt, input, output)?;
        if let Err(err) = core.verify_tag(key, &self.tag) {
            output[..input.len()].zeroize();
            return Err(err);
        }
        Ok(input.len())
    }
}
