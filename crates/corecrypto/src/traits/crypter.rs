// Copyright (C) Microsoft Corporation. All rights reserved.

//! Encryption and decryption wrappers.

use super::*;

/// Encryption operation wrapper.
pub struct Encrypter;

impl Encrypter {
    /// Performs single-operation encryption.
    ///
    /// # Arguments
    ///
    /// * `algo` - The mode algorithm (IV and mode parameters)
    /// * `key` - The keyed block cipher
    /// * `input` - Plaintext
    /// * `output` - Optional output buffer. If `None`, only calculates required size.
    pub fn encrypt<Algo: EncryptOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.encrypt(key, input, output)
    }

    /// Performs single-operation encryption and returns the ciphertext.
    pub fn encrypt_vec<Algo: EncryptOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        input: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let required_size = algo.encrypt(key, input, None)?;
        let mut output = vec![0u8; required_size];
        let written_size = algo.encrypt(key, input, Some(&mut output))?;
        output.truncate(written_size);
        Ok(output)
    }

    /// Starts a streaming encryption.
    pub fn encrypt_init<Algo: EncryptStreamingOp>(
        algo: Algo,
        key: Algo::Key,
    ) -> Result<Algo::Context, CryptoError> {
        algo.encrypt_init(key)
    }
}

/// Decryption operation wrapper.
pub struct Decrypter;

impl Decrypter {
    /// Performs single-operation decryption.
    ///
    /// # Arguments
    ///
    /// * `algo` - The mode algorithm (IV, tag and mode parameters)
    /// * `key` - The keyed block cipher
    /// * `input` - Ciphertext
    /// * `output` - Optional output buffer. If `None`, only calculates required size.
    pub fn decrypt<Algo: DecryptOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.decrypt(key, input, output)
    }

    /// Performs single-operation decryption and returns the plaintext.
    pub fn decrypt_vec<Algo: DecryptOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        input: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let required_size = algo.decrypt(key, input, None)?;
        let mut output = vec![0u8; required_size];
        let written_size = algo.decrypt(key, input, Some(&mut output))?;
        output.truncate(written_size);
        Ok(output)
    }

    /// Starts a streaming decryption.
    pub fn decrypt_init<Algo: DecryptStreamingOp>(
        algo: Algo,
        key: Algo::Key,
    ) -> Result<Algo::Context, CryptoError> {
        algo.decrypt_init(key)
    }
}
