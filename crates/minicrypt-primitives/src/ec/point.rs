//! Affine curve points.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ec::curve::parse_hex;
use crate::PrimitivesError;

/// SEC1 tag byte for an uncompressed point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// An affine point `(x, y)` with coordinates reduced modulo the field prime.
///
/// The point at infinity is not representable; arithmetic that
/// lands on it reports `PrimitivesError::PointAtInfinity` instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    x: BigUint,
    y: BigUint,
}

/// A public key is the point `d*G` for a private scalar `d`.
pub type PublicKey = Point;

impl Point {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Point { x, y }
    }

    /// Create a point from big-endian hex coordinates.
    pub fn from_hex(x: &str, y: &str) -> Result<Self, PrimitivesError> {
        Ok(Point::new(parse_hex(x)?, parse_hex(y)?))
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Serialize as uncompressed SEC1: `0x04 || x || y`, each coordinate
    /// left-padded to `field_len` bytes.
    ///
    /// # Arguments
    /// * `field_len` - Byte length of a field element (`CurveField::field_len`).
    ///
    /// # Returns
    /// The encoded point, or an error if a coordinate does not fit.
    pub fn to_uncompressed(&self, field_len: usize) -> Result<Vec<u8>, PrimitivesError> {
        let mut out = Vec::with_capacity(1 + 2 * field_len);
        out.push(UNCOMPRESSED_TAG);
        out.extend_from_slice(&to_fixed_be(&self.x, field_len)?);
        out.extend_from_slice(&to_fixed_be(&self.y, field_len)?);
        Ok(out)
    }

    /// Parse an uncompressed SEC1 point.
    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 3 || bytes.len() % 2 == 0 {
            return Err(PrimitivesError::InvalidPoint(format!(
                "uncompressed point has length {}",
                bytes.len()
            )));
        }
        if bytes[0] != UNCOMPRESSED_TAG {
            return Err(PrimitivesError::InvalidPoint(format!(
                "expected tag 0x04, got 0x{:02x}",
                bytes[0]
            )));
        }
        let field_len = (bytes.len() - 1) / 2;
        Ok(Point::new(
            BigUint::from_bytes_be(&bytes[1..1 + field_len]),
            BigUint::from_bytes_be(&bytes[1 + field_len..]),
        ))
    }
}

/// Hex wire form shared by `Point` serialization.
#[derive(Serialize, Deserialize)]
struct PointHex {
    x: String,
    y: String,
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PointHex {
            x: to_hex(&self.x),
            y: to_hex(&self.y),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = PointHex::deserialize(deserializer)?;
        Point::from_hex(&raw.x, &raw.y).map_err(serde::de::Error::custom)
    }
}

/// Minimal even-length big-endian hex of an integer (`"00"` for zero).
pub(crate) fn to_hex(value: &BigUint) -> String {
    hex::encode(value.to_bytes_be())
}

/// Big-endian bytes of `value`, left-padded to exactly `len` bytes.
pub(crate) fn to_fixed_be(value: &BigUint, len: usize) -> Result<Vec<u8>, PrimitivesError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > len {
        return Err(PrimitivesError::InvalidHex(format!(
            "integer needs {} bytes, only {} available",
            bytes.len(),
            len
        )));
    }
    let mut out = vec![0u8; len];
    out[len - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}
