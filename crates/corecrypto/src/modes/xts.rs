// Copyright (C) Microsoft Corporation. All rights reserved.

//! XTS mode (IEEE 1619).
//!
//! Each data unit is encrypted under the tweak `T = E_k2(i)` where `i` is
//! the 16-byte little-endian data unit number. Block `j` of the unit is
//! `E_k1(P_j ^ T_j) ^ T_j` with `T_{j+1} = T_j * alpha`. Units whose length
//! is not a multiple of the block size end with ciphertext stealing.

use subtle::ConstantTimeEq;

use super::*;

/// A pair of key schedules for XTS: one for data, one for tweaks.
pub struct XtsKey<C: BlockCipher> {
    data: C,
    tweak: C,
}

impl<C: BlockCipher> XtsKey<C> {
    /// Splits `key` into data and tweak halves and schedules both.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidBlockSize`] if `C` does not have a 16-byte block
    /// - [`CryptoError::InvalidLength`] if the key length is odd or the two
    ///   halves are equal
    /// - [`CryptoError::UnsupportedAlgorithm`] if a half is not a valid key
    ///   for `C`
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        require_block_size::<C>("XTS")?;
        if key.is_empty() || key.len() % 2 != 0 {
            tracing::error!(len = key.len(), "XTS key must be two equal halves");
            return Err(CryptoError::InvalidLength);
        }
        let (k1, k2) = key.split_at(key.len() / 2);
        if bool::from(k1.ct_eq(k2)) {
            tracing::error!("XTS data and tweak keys must differ");
            return Err(CryptoError::InvalidLength);
        }
        Ok(Self {
            data: C::new(k1)?,
            tweak: C::new(k2)?,
        })
    }
}

impl<C: BlockCipher> Key for XtsKey<C> {
    fn size(&self) -> usize {
        self.data.size() + self.tweak.size()
    }
}

impl<C: BlockCipher> SymmetricKey for XtsKey<C> {}
impl<C: BlockCipher> EncryptionKey for XtsKey<C> {}
impl<C: BlockCipher> DecryptionKey for XtsKey<C> {}

impl<C: BlockCipher> ImportableKey for XtsKey<C> {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::new(bytes)
    }
}

/// XTS over cipher `C`.
pub struct XtsAlgo<C: BlockCipher> {
    tweak: u128,
    data_unit_len: usize,
    _cipher: std::marker::PhantomData<fn() -> C>,
}

impl<C: BlockCipher> XtsAlgo<C> {
    const TWEAK_SIZE: usize = 16;

    /// Creates an XTS operation.
    ///
    /// # Arguments
    ///
    /// * `tweak` - 16-byte little-endian number of the first data unit
    /// * `data_unit_len` - Data unit (sector) size in bytes, at least one block
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] for a wrong tweak size or a
    /// data unit shorter than one block.
    pub fn new(tweak: &[u8], data_unit_len: usize) -> Result<Self, CryptoError> {
        let tweak: [u8; 16] = tweak.try_into().map_err(|_| {
            tracing::error!(len = tweak.len(), "XTS tweak must be 16 bytes");
            CryptoError::InvalidLength
        })?;
        if data_unit_len < GF128_BLOCK_SIZE {
            tracing::error!(data_unit_len, "XTS data unit shorter than one block");
            return Err(CryptoError::InvalidLength);
        }
        Ok(Self {
            tweak: u128::from_le_bytes(tweak),
            data_unit_len,
            _cipher: std::marker::PhantomData,
        })
    }

    /// Returns the tweak of the next data unit, little-endian.
    pub fn tweak(&self) -> [u8; 16] {
        self.tweak.to_le_bytes()
    }

    /// Returns the data unit length.
    pub fn data_unit_len(&self) -> usize {
        self.data_unit_len
    }

    fn crypt_unit(key: &XtsKey<C>, tweak: u128, dir: Direction, input: &[u8], output: &mut [u8]) {
        const BS: usize = GF128_BLOCK_SIZE;

        let mut encrypted_tweak = [0u8; BS];
        key.tweak.encrypt_block(&tweak.to_le_bytes(), &mut encrypted_tweak);
        let mut t = Gf128Block::from_bytes(encrypted_tweak);
        encrypted_tweak.zeroize();

        let full = input.len() / BS;
        let tail = input.len() % BS;
        // With stealing, the last full block is handled with the tail.
        let plain_blocks = if tail == 0 { full } else { full - 1 };

        for j in 0..plain_blocks {
            let range = j * BS..(j + 1) * BS;
            Self::crypt_block(key, &t, dir, &input[range.clone()], &mut output[range]);
            t.xts_double();
        }

        if tail == 0 {
            return;
        }

        let last = plain_blocks * BS;
        let mut cc = [0u8; BS];
        let mut pp = [0u8; BS];
        match dir {
            Direction::Encrypt => {
                Self::crypt_block(key, &t, dir, &input[last..last + BS], &mut cc);
                t.xts_double();
                pp[..tail].copy_from_slice(&input[last + BS..]);
                pp[tail..].copy_from_slice(&cc[tail..]);
                output[last + BS..].copy_from_slice(&cc[..tail]);
                Self::crypt_block(key, &t, dir, &pp, &mut output[last..last + BS]);
            }
            Direction::Decrypt => {
                let mut next = t.clone();
                next.xts_double();
                Self::crypt_block(key, &next, dir, &input[last..last + BS], &mut pp);
                cc[..tail].copy_from_slice(&input[last + BS..]);
                cc[tail..].copy_from_slice(&pp[tail..]);
                output[last + BS..].copy_from_slice(&pp[..tail]);
                Self::crypt_block(key, &t, dir, &cc, &mut output[last..last + BS]);
            }
        }
        cc.zeroize();
        pp.zeroize();
    }

    fn crypt_block(
        key: &XtsKey<C>,
        t: &Gf128Block,
        dir: Direction,
        input: &[u8],
        output: &mut [u8],
    ) {
        let mut x = [0u8; GF128_BLOCK_SIZE];
        xor_into(&mut x, input, t.as_bytes());
        match dir {
            Direction::Encrypt => key.data.encrypt_block(&x, output),
            Direction::Decrypt => key.data.decrypt_block(&x, output),
        }
        for (o, k) in output.iter_mut().zip(t.as_bytes()) {
            *o ^= k;
        }
        x.zeroize();
    }

    fn crypt_data_units(
        &mut self,
        dir: Direction,
        key: &XtsKey<C>,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        if input.len() % self.data_unit_len != 0 {
            tracing::error!(
                len = input.len(),
                data_unit_len = self.data_unit_len,
                "XTS input is not whole data units"
            );
            return Err(CryptoError::InvalidLength);
        }

        let Some(output) = output else {
            return Ok(input.len());
        };
        if output.len() < input.len() {
            tracing::error!(len = output.len(), required = input.len(), "output buffer too small");
            return Err(CryptoError::BufferTooSmall);
        }

        // Refuse before writing anything if the unit numbers would wrap.
        let units = (input.len() / self.data_unit_len) as u128;
        let next = self.tweak.checked_add(units).ok_or_else(|| {
            tracing::error!(units = units as u64, "XTS tweak overflow");
            CryptoError::InvalidState
        })?;

        for (i, (src, dst)) in input
            .chunks_exact(self.data_unit_len)
            .zip(output.chunks_exact_mut(self.data_unit_len))
            .enumerate()
        {
            Self::crypt_unit(key, self.tweak + i as u128, dir, src, dst);
        }
        self.tweak = next;

        Ok(input.len())
    }
}

impl<C: BlockCipher> EncryptOp for XtsAlgo<C> {
    type Key = XtsKey<C>;

    fn encrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        self.crypt_data_units(Direction::Encrypt, key, input, output)
    }
}

impl<C: BlockCipher> DecryptOp for XtsAlgo<C> {
    type Key = XtsKey<C>;

    fn decrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        self.crypt_data_units(Direction::Decrypt, key, input, output)
    }
}

/// Streaming XTS encryption. Each update covers whole data units.
pub struct XtsEncryptContext<C: BlockCipher> {
    algo: XtsAlgo<C>,
    key: XtsKey<C>,
}

impl<C: BlockCipher> EncryptStreamingOp for XtsAlgo<C> {
    type Key = XtsKey<C>;
    type Context = XtsEncryptContext<C>;

    fn encrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError> {
        Ok(XtsEncryptContext { algo: self, key })
    }
}

impl<C: BlockCipher> EncryptOpContext for XtsEncryptContext<C> {
    type Algo = XtsAlgo<C>;

    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        self.algo
            .crypt_data_units(Direction::Encrypt, &self.key, input, output)
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

/// Streaming XTS decryption. Each update covers whole data units.
pub struct XtsDecryptContext<C: BlockCipher> {
    algo: XtsAlgo<C>,
    key: XtsKey<C>,
}

impl<C: BlockCipher> DecryptStreamingOp for XtsAlgo<C> {
    type Key = XtsKey<C>;
    type Context = XtsDecryptContext<C>;

    fn decrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError> {
        Ok(XtsDecryptContext { algo: self, key })
    }
}

impl<C: BlockCipher> DecryptOpContext for XtsDecryptContext<C> {
    type Algo = XtsAlgo<C>;

    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        self.algo
            .crypt_data_units(Direction::Decrypt, &self.key, input, output)
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
