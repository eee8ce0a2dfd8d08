//! Short-Weierstrass curve domain parameters.
//!
//! A `CurveField` describes `y^2 = x^3 + a*x + b (mod p)` together with a
//! base point `G` of prime order `n`. It is immutable once built and is
//! cloned into every engine that signs or verifies over it.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;

use crate::ec::point::Point;
use crate::PrimitivesError;

/// Name given to curves built from caller-supplied parameters.
pub const CUSTOM_CURVE_NAME: &str = "custom";

/// Miller-Rabin rounds used to check the group order.
const PRIMALITY_ROUNDS: usize = 32;

const SMALL_PRIMES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

// secp256k1 (SEC 2, section 2.4.1).
const SECP256K1_P: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];
const SECP256K1_A: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];
const SECP256K1_B: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07,
];
const SECP256K1_N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];
const SECP256K1_GX: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac,
    0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9,
    0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];
const SECP256K1_GY: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65,
    0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8,
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19,
    0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

// NIST P-256 / secp256r1 (SEC 2, section 2.4.2).
const P256_P: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];
const P256_A: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfc,
];
const P256_B: [u8; 32] = [
    0x5a, 0xc6, 0x35, 0xd8, 0xaa, 0x3a, 0x93, 0xe7,
    0xb3, 0xeb, 0xbd, 0x55, 0x76, 0x98, 0x86, 0xbc,
    0x65, 0x1d, 0x06, 0xb0, 0xcc, 0x53, 0xb0, 0xf6,
    0x3b, 0xce, 0x3c, 0x3e, 0x27, 0xd2, 0x60, 0x4b,
];
const P256_N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84,
    0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63, 0x25, 0x51,
];
const P256_GX: [u8; 32] = [
    0x6b, 0x17, 0xd1, 0xf2, 0xe1, 0x2c, 0x42, 0x47,
    0xf8, 0xbc, 0xe6, 0xe5, 0x63, 0xa4, 0x40, 0xf2,
    0x77, 0x03, 0x7d, 0x81, 0x2d, 0xeb, 0x33, 0xa0,
    0xf4, 0xa1, 0x39, 0x45, 0xd8, 0x98, 0xc2, 0x96,
];
const P256_GY: [u8; 32] = [
    0x4f, 0xe3, 0x42, 0xe2, 0xfe, 0x1a, 0x7f, 0x9b,
    0x8e, 0xe7, 0xeb, 0x4a, 0x7c, 0x0f, 0x9e, 0x16,
    0x2b, 0xce, 0x33, 0x57, 0x6b, 0x31, 0x5e, 0xce,
    0xcb, 0xb6, 0x40, 0x68, 0x37, 0xbf, 0x51, 0xf5,
];

/// Domain parameters of a short-Weierstrass curve over a prime field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveField {
    /// Human-readable curve name, e.g. `secp256k1`.
    name: String,
    /// Coefficient `a` of the curve equation.
    a: BigUint,
    /// Coefficient `b` of the curve equation.
    b: BigUint,
    /// The field prime.
    p: BigUint,
    /// Order of the base point.
    n: BigUint,
    /// The base point.
    g: Point,
}

impl CurveField {
    /// Build a curve from its parameters, validating them.
    ///
    /// Checks that `p > 3`, `n > 1`, the coefficients and base point are
    /// reduced modulo `p`, the curve is non-singular and `G` lies on it.
    /// The order of `G` is not checked here since that needs point
    /// arithmetic; `SignatureEngine::new` checks it.
    ///
    /// # Arguments
    /// * `a`, `b` - Curve coefficients.
    /// * `p` - The field prime.
    /// * `n` - The order of `g`.
    /// * `g` - The base point.
    ///
    /// # Returns
    /// `Ok(CurveField)` or `InvalidCurve` / `PointNotOnCurve`.
    pub fn new(
        a: BigUint,
        b: BigUint,
        p: BigUint,
        n: BigUint,
        g: Point,
    ) -> Result<Self, PrimitivesError> {
        if p <= BigUint::from(3u8) {
            return Err(PrimitivesError::InvalidCurve(format!("field prime {} is too small", p)));
        }
        if n <= BigUint::from(1u8) {
            return Err(PrimitivesError::InvalidCurve(format!("group order {} is too small", n)));
        }
        if a >= p || b >= p {
            return Err(PrimitivesError::InvalidCurve(
                "curve coefficients must be reduced modulo p".to_string(),
            ));
        }
        if g.x() >= &p || g.y() >= &p {
            return Err(PrimitivesError::InvalidCurve(
                "base point coordinates must be reduced modulo p".to_string(),
            ));
        }

        // 4a^3 + 27b^2 != 0 (mod p)
        let discriminant = (BigUint::from(4u8) * a.modpow(&BigUint::from(3u8), &p)
            + BigUint::from(27u8) * b.modpow(&BigUint::from(2u8), &p))
            % &p;
        if discriminant.is_zero() {
            return Err(PrimitivesError::InvalidCurve("curve is singular".to_string()));
        }

        let curve = CurveField {
            name: CUSTOM_CURVE_NAME.to_string(),
            a,
            b,
            p,
            n,
            g,
        };
        if !curve.contains(&curve.g) {
            return Err(PrimitivesError::PointNotOnCurve);
        }
        Ok(curve)
    }

    /// Build a curve from big-endian hex strings.
    pub fn from_hex(
        a: &str,
        b: &str,
        p: &str,
        n: &str,
        gx: &str,
        gy: &str,
    ) -> Result<Self, PrimitivesError> {
        CurveField::new(
            parse_hex(a)?,
            parse_hex(b)?,
            parse_hex(p)?,
            parse_hex(n)?,
            Point::from_hex(gx, gy)?,
        )
    }

    /// The secp256k1 curve.
    pub fn secp256k1() -> Self {
        CurveField::from_constants(
            "secp256k1",
            &SECP256K1_A,
            &SECP256K1_B,
            &SECP256K1_P,
            &SECP256K1_N,
            &SECP256K1_GX,
            &SECP256K1_GY,
        )
    }

    /// The NIST P-256 curve (`a = p - 3`).
    pub fn p256() -> Self {
        CurveField::from_constants("P-256", &P256_A, &P256_B, &P256_P, &P256_N, &P256_GX, &P256_GY)
    }

    fn from_constants(
        name: &str,
        a: &[u8; 32],
        b: &[u8; 32],
        p: &[u8; 32],
        n: &[u8; 32],
        gx: &[u8; 32],
        gy: &[u8; 32],
    ) -> Self {
        CurveField {
            name: name.to_string(),
            a: BigUint::from_bytes_be(a),
            b: BigUint::from_bytes_be(b),
            p: BigUint::from_bytes_be(p),
            n: BigUint::from_bytes_be(n),
            g: Point::new(BigUint::from_bytes_be(gx), BigUint::from_bytes_be(gy)),
        }
    }

    /// Label the curve, e.g. after building it with `from_hex`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn g(&self) -> &Point {
        &self.g
    }

    /// Byte length of a field element (coordinate).
    pub fn field_len(&self) -> usize {
        self.p.bits().div_ceil(8) as usize
    }

    /// Byte length of a scalar modulo `n`.
    pub fn scalar_len(&self) -> usize {
        self.n.bits().div_ceil(8) as usize
    }

    /// Whether `point` satisfies the curve equation with reduced coordinates.
    pub fn contains(&self, point: &Point) -> bool {
        let p = &self.p;
        if point.x() >= p || point.y() >= p {
            return false;
        }
        let lhs = (point.y() * point.y()) % p;
        let rhs = (point.x() * point.x() * point.x() + &self.a * point.x() + &self.b) % p;
        lhs == rhs
    }

    /// Check that `n` can be the order of a point on this curve.
    ///
    /// `n` must be prime and within the Hasse bound `p + 1 + 2*sqrt(p)`.
    /// Together with `n*G = O` this pins the order of `G` to exactly `n`.
    pub(crate) fn check_order(&self) -> Result<(), PrimitivesError> {
        let (p, n) = (&self.p, &self.n);
        let trace_bound = p + 1u8;
        if n > &trace_bound {
            // (n - p - 1)^2 <= 4p
            let excess = n - &trace_bound;
            if &excess * &excess > p * 4u8 {
                return Err(PrimitivesError::InvalidCurve(format!(
                    "group order {} exceeds the Hasse bound for p = {}",
                    n, p
                )));
            }
        }
        if !is_probable_prime(n) {
            return Err(PrimitivesError::InvalidCurve(format!(
                "group order {} is not prime",
                n
            )));
        }
        Ok(())
    }
}

/// Miller-Rabin with random witnesses after trial division by small primes.
pub(crate) fn is_probable_prime(n: &BigUint) -> bool {
    if n < &BigUint::from(2u8) {
        return false;
    }
    for small in SMALL_PRIMES {
        let small = BigUint::from(small);
        if n == &small {
            return true;
        }
        if (n % &small).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^r with d odd
    let n_minus_one = n - 1u8;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;
    let two = BigUint::from(2u8);

    let mut rng = OsRng;
    'witness: for _ in 0..PRIMALITY_ROUNDS {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

pub(crate) fn parse_hex(s: &str) -> Result<BigUint, PrimitivesError> {
    Ok(BigUint::from_bytes_be(&hex::decode(s)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::test_curves::toy_curve;

    #[test]
    fn test_presets_pass_validation() {
        for curve in [CurveField::secp256k1(), CurveField::p256()] {
            let rebuilt = CurveField::new(
                curve.a().clone(),
                curve.b().clone(),
                curve.p().clone(),
                curve.n().clone(),
                curve.g().clone(),
            )
            .unwrap()
            .with_name(curve.name());
            assert_eq!(rebuilt, curve);
            assert!(curve.check_order().is_ok());
            assert_eq!(curve.field_len(), 32);
            assert_eq!(curve.scalar_len(), 32);
        }
    }

    #[test]
    fn test_p256_a_is_p_minus_three() {
        let curve = CurveField::p256();
        assert_eq!(curve.a() + BigUint::from(3u8), *curve.p());
    }

    #[test]
    fn test_from_hex_secp256k1() {
        let curve = CurveField::from_hex(
            "00",
            "07",
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
        .unwrap();
        assert_eq!(curve.name(), CUSTOM_CURVE_NAME);
        assert_eq!(curve.with_name("secp256k1"), CurveField::secp256k1());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let g = Point::new(BigUint::from(5u8), BigUint::from(1u8));

        // Base point off the curve.
        let off = Point::new(BigUint::from(5u8), BigUint::from(2u8));
        assert_eq!(
            CurveField::new(2u8.into(), 2u8.into(), 17u8.into(), 19u8.into(), off),
            Err(PrimitivesError::PointNotOnCurve)
        );

        // Tiny prime and order.
        assert!(CurveField::new(2u8.into(), 2u8.into(), 3u8.into(), 19u8.into(), g.clone()).is_err());
        assert!(CurveField::new(2u8.into(), 2u8.into(), 17u8.into(), 1u8.into(), g.clone()).is_err());

        // Unreduced coefficient.
        assert!(CurveField::new(19u8.into(), 2u8.into(), 17u8.into(), 19u8.into(), g).is_err());

        // Singular: y^2 = x^3 over F_17.
        let cusp = Point::new(BigUint::from(1u8), BigUint::from(1u8));
        assert!(matches!(
            CurveField::new(0u8.into(), 0u8.into(), 17u8.into(), 19u8.into(), cusp),
            Err(PrimitivesError::InvalidCurve(_))
        ));

        assert!(CurveField::from_hex("0", "07", "11", "13", "05", "01").is_err());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(CurveField::secp256k1().name(), "secp256k1");
        assert_eq!(CurveField::p256().name(), "P-256");
        assert_eq!(toy_curve().name(), CUSTOM_CURVE_NAME);
        assert_eq!(toy_curve().with_name("toy").name(), "toy");
    }

    #[test]
    fn test_check_order() {
        let toy = toy_curve();
        assert!(toy.check_order().is_ok());

        let with_order = |n: u8| {
            CurveField::new(
                toy.a().clone(),
                toy.b().clone(),
                toy.p().clone(),
                BigUint::from(n),
                toy.g().clone(),
            )
            .unwrap()
        };
        // Twice the real order is past the Hasse bound (18 + 2*sqrt(17) < 27).
        assert!(matches!(
            with_order(38).check_order(),
            Err(PrimitivesError::InvalidCurve(_))
        ));
        // Inside the bound but composite.
        assert!(matches!(
            with_order(20).check_order(),
            Err(PrimitivesError::InvalidCurve(_))
        ));
        // Prime and inside the bound: only n*G can tell this one apart.
        assert!(with_order(23).check_order().is_ok());
    }

    #[test]
    fn test_is_probable_prime() {
        for prime in [2u64, 3, 37, 41, 7919, 2_147_483_647, 2_305_843_009_213_693_951] {
            assert!(is_probable_prime(&BigUint::from(prime)), "{}", prime);
        }
        // 561 is a Carmichael number; 3215031751 is a strong pseudoprime to bases 2, 3, 5 and 7.
        for composite in [0u64, 1, 4, 561, 1681, 3_215_031_751, 2_147_483_647 * 2_147_483_649] {
            assert!(!is_probable_prime(&BigUint::from(composite)), "{}", composite);
        }
        assert!(is_probable_prime(CurveField::secp256k1().n()));
        assert!(is_probable_prime(CurveField::p256().n()));
        assert!(!is_probable_prime(&(CurveField::secp256k1().n() * 3u8)));
    }

    #[test]
    fn test_contains() {
        let curve = toy_curve();
        assert!(curve.contains(curve.g()));
        assert!(curve.contains(&Point::new(0u8.into(), 6u8.into())));
        assert!(!curve.contains(&Point::new(0u8.into(), 7u8.into())));
        // Unreduced coordinates are not accepted.
        assert!(!curve.contains(&Point::new(22u8.into(), 1u8.into())));
    }
}
