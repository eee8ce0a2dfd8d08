//! ECDSA signature values.
//!
//! A signature is the pair `(r, s)`, both in `[1, n-1]` for the curve order
//! `n`. Range checks need the curve, so they take `n` explicitly.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ec::curve::parse_hex;
use crate::ec::point::{to_fixed_be, to_hex};
use crate::PrimitivesError;

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    /// Create a signature from big-endian hex components.
    pub fn from_hex(r: &str, s: &str) -> Result<Self, PrimitivesError> {
        Ok(Signature::new(parse_hex(r)?, parse_hex(s)?))
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Whether both components lie in `[1, n-1]`.
    pub fn is_in_range(&self, n: &BigUint) -> bool {
        in_scalar_range(&self.r, n) && in_scalar_range(&self.s, n)
    }

    /// Like `is_in_range`, but names the offending component.
    pub fn validate(&self, n: &BigUint) -> Result<(), PrimitivesError> {
        if self.r.is_zero() {
            return Err(PrimitivesError::InvalidSignature("signature R is zero".to_string()));
        }
        if self.s.is_zero() {
            return Err(PrimitivesError::InvalidSignature("signature S is zero".to_string()));
        }
        if &self.r >= n {
            return Err(PrimitivesError::InvalidSignature("signature R is >= curve.N".to_string()));
        }
        if &self.s >= n {
            return Err(PrimitivesError::InvalidSignature("signature S is >= curve.N".to_string()));
        }
        Ok(())
    }

    /// Return the equivalent signature with `s <= n/2`.
    ///
    /// `(r, s)` and `(r, n - s)` verify under the same key and message; some
    /// verifiers only accept the low form.
    pub fn to_low_s(&self, n: &BigUint) -> Signature {
        let half_order = n >> 1;
        if self.s > half_order && &self.s < n {
            Signature::new(self.r.clone(), n - &self.s)
        } else {
            self.clone()
        }
    }

    /// Serialize as `r || s`, each left-padded to `scalar_len` bytes.
    pub fn to_bytes(&self, scalar_len: usize) -> Result<Vec<u8>, PrimitivesError> {
        let mut out = to_fixed_be(&self.r, scalar_len)?;
        out.extend_from_slice(&to_fixed_be(&self.s, scalar_len)?);
        Ok(out)
    }

    /// Parse a fixed-width `r || s` encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(PrimitivesError::InvalidSignature(format!(
                "malformed signature: length {} is not two equal halves",
                bytes.len()
            )));
        }
        let (r, s) = bytes.split_at(bytes.len() / 2);
        Ok(Signature::new(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s)))
    }
}

/// `value` in `[1, n-1]`.
pub(crate) fn in_scalar_range(value: &BigUint, n: &BigUint) -> bool {
    !value.is_zero() && value < n
}

#[derive(Serialize, Deserialize)]
struct SignatureHex {
    r: String,
    s: String,
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SignatureHex {
            r: to_hex(&self.r),
            s: to_hex(&self.s),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = SignatureHex::deserialize(deserializer)?;
        Signature::from_hex(&raw.r, &raw.s).map_err(serde::de::Error::custom)
    }
}
