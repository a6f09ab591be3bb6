// Copyright (C) Microsoft Corporation. All rights reserved.

//! EC public and private keys.

use zeroize::Zeroize;

use super::*;

/// Leading byte of an uncompressed X9.63 point.
const X963_UNCOMPRESSED: u8 = 0x04;

/// Finds the curve whose coordinate size is `size` bytes.
fn curve_for_size(size: usize) -> Result<EcCurve, CryptoError> {
    EcCurve::ALL
        .into_iter()
        .find(|curve| curve.size_bytes() == size)
        .ok_or_else(|| {
            tracing::error!(size, "no curve with this coordinate size");
            CryptoError::UnsupportedAlgorithm
        })
}

/// An EC public key: a validated point on a named curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    curve: EcCurve,
    point: AffinePointBuf,
}

impl EcPublicKey {
    /// Imports an uncompressed X9.63 point, `0x04 || X || Y`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if the input is not `2 * size + 1` bytes
    /// - [`CryptoError::InvalidPoint`] if the prefix is not `0x04` or the point
    ///   is not on the curve
    pub fn import_x963(curve: EcCurve, bytes: &[u8]) -> Result<Self, CryptoError> {
        let size = curve.size_bytes();
        if bytes.len() != 2 * size + 1 {
            tracing::error!(
                ?curve,
                len = bytes.len(),
                expected = 2 * size + 1,
                "X9.63 point length"
            );
            return Err(CryptoError::InvalidLength);
        }
        if bytes[0] != X963_UNCOMPRESSED {
            tracing::error!(prefix = bytes[0], "only uncompressed X9.63 points are supported");
            return Err(CryptoError::InvalidPoint);
        }

        let params = curve.params()?;
        let (x, y) = bytes[1..].split_at(size);
        let point = AffinePointBuf::from_be_bytes(params.n(), x, y)?;
        if !params.is_on_curve(&point.view())? {
            tracing::error!(?curve, "public key is not on the curve");
            return Err(CryptoError::InvalidPoint);
        }
        Ok(Self { curve, point })
    }

    pub(crate) fn from_point(curve: EcCurve, point: AffinePointBuf) -> Self {
        Self { curve, point }
    }

    /// Exports the point as uncompressed X9.63.
    ///
    /// With `None`, returns the encoded size without writing.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::BufferTooSmall`] if `output` cannot hold the
    /// encoding.
    pub fn export_x963(&self, output: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let size = self.curve.size_bytes();
        let len = 2 * size + 1;
        let Some(output) = output else {
            return Ok(len);
        };
        if output.len() < len {
            tracing::error!(len = output.len(), required = len, "output buffer too small");
            return Err(CryptoError::BufferTooSmall);
        }
        output[0] = X963_UNCOMPRESSED;
        let (x, y) = output[1..len].split_at_mut(size);
        limbs::write_be(self.point.x(), x)?;
        limbs::write_be(self.point.y(), y)?;
        Ok(len)
    }

    /// Exports the point as uncompressed X9.63 into a new vector.
    pub fn export_x963_vec(&self) -> Result<Vec<u8>, CryptoError> {
        let len = self.export_x963(None)?;
        let mut out = vec![0u8; len];
        self.export_x963(Some(&mut out))?;
        Ok(out)
    }

    /// Returns the curve.
    pub fn curve(&self) -> EcCurve {
        self.curve
    }

    /// Returns the affine point.
    pub fn point(&self) -> ConstAffinePoint<'_> {
        self.point.view()
    }
}

impl Key for EcPublicKey {
    fn size(&self) -> usize {
        self.curve.size_bytes()
    }

    fn bits(&self) -> usize {
        self.curve.bits()
    }
}

impl PublicKey for EcPublicKey {}

impl VerificationKey for EcPublicKey {}

impl ImportableKey for EcPublicKey {
    /// Imports an X9.63 point, inferring the curve from its length.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() % 2 != 1 {
            tracing::error!(len = bytes.len(), "X9.63 point length must be odd");
            return Err(CryptoError::InvalidLength);
        }
        Self::import_x963(curve_for_size(bytes.len() / 2)?, bytes)
    }
}

impl ExportableKey for EcPublicKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        self.export_x963(bytes)
    }
}

/// An EC private key: a scalar `1 <= k < n`, wiped on drop.
pub struct EcPrivateKey {
    curve: EcCurve,
    scalar: BigNum,
}

impl std::fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl EcPrivateKey {
    /// Imports a big-endian private scalar of exactly the curve's size.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidLength`] if `bytes` is not the curve's size
    /// - [`CryptoError::InvalidKey`] if the scalar is zero or not below the
    ///   group order
    pub fn from_scalar(curve: EcCurve, bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != curve.size_bytes() {
            tracing::error!(?curve, len = bytes.len(), "private scalar length");
            return Err(CryptoError::InvalidLength);
        }
        let order = curve.params()?.order();
        let scalar = BigNum::from_be_bytes(order.n(), bytes)?;
        let in_range = !limbs::ct_is_zero(scalar.as_units())
            & limbs::ct_lt(scalar.as_units(), order.modulus());
        if !bool::from(in_range) {
            tracing::error!(?curve, "private scalar out of range");
            return Err(CryptoError::InvalidKey);
        }
        Ok(Self { curve, scalar })
    }

    /// Returns the curve.
    pub fn curve(&self) -> EcCurve {
        self.curve
    }

    pub(crate) fn scalar(&self) -> &BigNum {
        &self.scalar
    }
}

impl Key for EcPrivateKey {
    fn size(&self) -> usize {
        self.curve.size_bytes()
    }

    fn bits(&self) -> usize {
        self.curve.bits()
    }
}

impl PrivateKey for EcPrivateKey {
    type PublicKey = EcPublicKey;

    /// Computes `k * G`.
    fn public_key(&self) -> Result<EcPublicKey, CryptoError> {
        let params = self.curve.params()?;
        let g = params.projective_buf(&params.generator().view())?;
        let q = params.ladder_buf(self.scalar.as_units(), &g);
        Ok(EcPublicKey::from_point(self.curve, params.affine_buf(&q)?))
    }
}

impl DerivationKey for EcPrivateKey {}

impl ImportableKey for EcPrivateKey {
    /// Imports a private scalar, inferring the curve from its length.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_scalar(curve_for_size(bytes.len())?, bytes)
    }
}

impl ExportableKey for EcPrivateKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let size = self.curve.size_bytes();
        let Some(bytes) = bytes else {
            return Ok(size);
        };
        if bytes.len() < size {
            tracing::error!(len = bytes.len(), required = size, "output buffer too small");
            return Err(CryptoError::BufferTooSmall);
        }
        let mut be = self.scalar.to_be_bytes(size)?;
        bytes[..size].copy_from_slice(&be);
        be.zeroize();
        Ok(size)
    }
}
