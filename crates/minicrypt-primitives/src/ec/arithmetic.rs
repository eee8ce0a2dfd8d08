//! Group arithmetic on curve points.
//!
//! The signature engine never does field or group math itself. It calls a
//! `PointArithmetic` implementation, which keeps the engine independent of
//! any particular curve backend and lets tests substitute their own.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::ec::curve::CurveField;
use crate::ec::point::Point;
use crate::PrimitivesError;

/// Point operations over the field of one bound curve.
pub trait PointArithmetic {
    /// Compute `scalar * point`.
    ///
    /// Returns `PointAtInfinity` when the result is the identity.
    fn scalar_multiply(&self, point: &Point, scalar: &BigUint) -> Result<Point, PrimitivesError>;

    /// Compute `lhs + rhs`.
    ///
    /// Returns `PointAtInfinity` when the result is the identity.
    fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point, PrimitivesError>;

    /// Modular multiplicative inverse of `value` modulo `modulus`.
    ///
    /// Fails with `NonInvertible` when `value` shares a factor with `modulus`.
    fn inverse(&self, value: &BigUint, modulus: &BigUint) -> Result<BigUint, PrimitivesError>;
}

/// Affine chord-and-tangent arithmetic over arbitrary-precision integers.
///
/// Not constant time: running time depends on the bits of the scalar.
#[derive(Clone, Debug)]
pub struct AffineArithmetic {
    curve: CurveField,
}

impl AffineArithmetic {
    pub fn new(curve: &CurveField) -> Self {
        AffineArithmetic {
            curve: curve.clone(),
        }
    }

    /// `scalar * point` with the identity represented as `None`.
    pub(crate) fn multiply_or_identity(
        &self,
        point: &Point,
        scalar: &BigUint,
    ) -> Result<Option<Point>, PrimitivesError> {
        self.check_on_curve(point)?;

        // Left-to-right double-and-add.
        let mut acc: Option<Point> = None;
        for i in (0..scalar.bits()).rev() {
            acc = self.double(acc.as_ref())?;
            if scalar.bit(i) {
                acc = self.add_or_identity(acc.as_ref(), Some(point))?;
            }
        }
        Ok(acc)
    }

    fn check_on_curve(&self, point: &Point) -> Result<(), PrimitivesError> {
        if self.curve.contains(point) {
            Ok(())
        } else {
            Err(PrimitivesError::PointNotOnCurve)
        }
    }

    fn double(&self, point: Option<&Point>) -> Result<Option<Point>, PrimitivesError> {
        self.add_or_identity(point, point)
    }

    fn add_or_identity(
        &self,
        lhs: Option<&Point>,
        rhs: Option<&Point>,
    ) -> Result<Option<Point>, PrimitivesError> {
        let (lhs, rhs) = match (lhs, rhs) {
            (None, other) | (other, None) => return Ok(other.cloned()),
            (Some(l), Some(r)) => (l, r),
        };
        let p = self.curve.p();

        let slope = if lhs.x() == rhs.x() {
            // P + (-P) = O, which also covers doubling a point with y = 0.
            if ((lhs.y() + rhs.y()) % p).is_zero() {
                return Ok(None);
            }
            // Tangent: (3x^2 + a) / 2y
            let numerator = (BigUint::from(3u8) * lhs.x() * lhs.x() + self.curve.a()) % p;
            let denominator = (BigUint::from(2u8) * lhs.y()) % p;
            numerator * self.inverse(&denominator, p)? % p
        } else {
            // Chord: (y2 - y1) / (x2 - x1)
            let numerator = sub_mod(rhs.y(), lhs.y(), p);
            let denominator = sub_mod(rhs.x(), lhs.x(), p);
            numerator * self.inverse(&denominator, p)? % p
        };

        let x3 = sub_mod(&sub_mod(&(&slope * &slope % p), lhs.x(), p), rhs.x(), p);
        let y3 = sub_mod(&(&slope * sub_mod(lhs.x(), &x3, p) % p), lhs.y(), p);
        Ok(Some(Point::new(x3, y3)))
    }
}

impl PointArithmetic for AffineArithmetic {
    fn scalar_multiply(&self, point: &Point, scalar: &BigUint) -> Result<Point, PrimitivesError> {
        self.multiply_or_identity(point, scalar)?
            .ok_or(PrimitivesError::PointAtInfinity)
    }

    fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point, PrimitivesError> {
        self.check_on_curve(lhs)?;
        self.check_on_curve(rhs)?;
        self.add_or_identity(Some(lhs), Some(rhs))?
            .ok_or(PrimitivesError::PointAtInfinity)
    }

    fn inverse(&self, value: &BigUint, modulus: &BigUint) -> Result<BigUint, PrimitivesError> {
        if modulus <= &BigUint::one() {
            return Err(PrimitivesError::NonInvertible(format!("modulus {} is too small", modulus)));
        }
        value
            .modinv(modulus)
            .ok_or_else(|| PrimitivesError::NonInvertible(format!("{} mod {}", value, modulus)))
    }
}

/// `(a - b) mod p` for `a, b < p`.
fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}
