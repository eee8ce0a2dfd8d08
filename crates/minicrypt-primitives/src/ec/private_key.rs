//! Private signing scalars.

use std::fmt;

use num_bigint::BigUint;

use crate::ec::curve::{parse_hex, CurveField};
use crate::ec::point::to_fixed_be;
use crate::ec::signature::in_scalar_range;
use crate::PrimitivesError;

/// A private key: a scalar `d` in `[1, n-1]` for the curve it was built for.
///
/// `Debug` output is redacted so keys do not end up in logs or panic messages.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    scalar: BigUint,
}

impl PrivateKey {
    /// Wrap a scalar after checking it against the curve order.
    ///
    /// # Arguments
    /// * `scalar` - The secret scalar.
    /// * `curve` - The curve the key will sign over.
    ///
    /// # Returns
    /// `Ok(PrivateKey)`, or `InvalidPrivateKey` if the scalar is 0 or `>= n`.
    pub fn new(scalar: BigUint, curve: &CurveField) -> Result<Self, PrimitivesError> {
        if !in_scalar_range(&scalar, curve.n()) {
            return Err(PrimitivesError::InvalidPrivateKey(
                "scalar must be in [1, n-1]".to_string(),
            ));
        }
        Ok(PrivateKey { scalar })
    }

    /// Create a private key from a big-endian hex string.
    pub fn from_hex(hex_str: &str, curve: &CurveField) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        PrivateKey::new(parse_hex(hex_str)?, curve)
    }

    /// Key without the range check, for scalars drawn from `[1, n-1]` already.
    pub(crate) fn from_scalar_unchecked(scalar: BigUint) -> Self {
        PrivateKey { scalar }
    }

    pub fn scalar(&self) -> &BigUint {
        &self.scalar
    }

    /// Serialize as big-endian bytes left-padded to `scalar_len`.
    pub fn to_bytes(&self, scalar_len: usize) -> Result<Vec<u8>, PrimitivesError> {
        to_fixed_be(&self.scalar, scalar_len)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}
