//! ECDSA signing and verification over a bound curve.
//!
//! `SignatureEngine` holds a `CurveField` and a `PointArithmetic`
//! implementation and nothing else. Every operation is a pure function of its
//! arguments and those two values, so one engine can be shared freely.
//!
//! Randomness is always supplied by the caller and must be a `CryptoRng`.
//! A reused or predictable nonce reveals the private key.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::ec::arithmetic::{AffineArithmetic, PointArithmetic};
use crate::ec::curve::CurveField;
use crate::ec::point::{Point, PublicKey};
use crate::ec::private_key::PrivateKey;
use crate::ec::signature::{in_scalar_range, Signature};
use crate::PrimitivesError;

/// Nonces `sign_with_rng` draws before giving up on `ZeroR` / `ZeroS`.
///
/// For a real curve the chance of even one retry is about `2/n`.
pub const MAX_SIGN_ATTEMPTS: usize = 16;

/// ECDSA over one curve with injected point arithmetic.
#[derive(Clone, Debug)]
pub struct SignatureEngine<A = AffineArithmetic> {
    curve: CurveField,
    arithmetic: A,
}

impl SignatureEngine<AffineArithmetic> {
    /// Build an engine with the default affine arithmetic.
    ///
    /// Fails with `InvalidCurve` unless `G` has order exactly `n`: `n` must be
    /// a prime within the Hasse bound and `n * G` must be the point at infinity.
    pub fn new(curve: CurveField) -> Result<Self, PrimitivesError> {
        curve.check_order()?;
        let arithmetic = AffineArithmetic::new(&curve);
        if arithmetic
            .multiply_or_identity(curve.g(), curve.n())?
            .is_some()
        {
            return Err(PrimitivesError::InvalidCurve(
                "base point does not have order n".to_string(),
            ));
        }
        Ok(SignatureEngine { curve, arithmetic })
    }
}

impl<A: PointArithmetic> SignatureEngine<A> {
    /// Build an engine around a caller-supplied arithmetic backend.
    ///
    /// The backend must operate over `curve`; no order check is done.
    pub fn with_arithmetic(curve: CurveField, arithmetic: A) -> Self {
        SignatureEngine { curve, arithmetic }
    }

    pub fn curve(&self) -> &CurveField {
        &self.curve
    }

    pub fn arithmetic(&self) -> &A {
        &self.arithmetic
    }

    /// Draw a nonce uniformly from `[1, n-1]`.
    pub fn generate_nonce<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_range(&BigUint::one(), self.curve.n())
    }

    /// Draw a private key uniformly from `[1, n-1]`.
    pub fn generate_private_key<R: RngCore + CryptoRng>(&self, rng: &mut R) -> PrivateKey {
        PrivateKey::from_scalar_unchecked(rng.gen_biguint_range(&BigUint::one(), self.curve.n()))
    }

    /// Draw a private key from the operating system's random source.
    pub fn generate_private_key_os(&self) -> PrivateKey {
        self.generate_private_key(&mut OsRng)
    }

    /// Compute the public key `d * G`.
    pub fn derive_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, PrimitivesError> {
        self.check_private_key(private_key)?;
        self.arithmetic
            .scalar_multiply(self.curve.g(), private_key.scalar())
    }

    /// Sign `message_hash` with an explicit nonce.
    ///
    /// `ZeroR` and `ZeroS` mean this nonce cannot produce a signature; draw
    /// another and call again (see `PrimitivesError::is_retryable`). Never
    /// reuse a nonce across two different messages.
    ///
    /// # Arguments
    /// * `private_key` - The signing key `d`.
    /// * `nonce` - The per-signature scalar `k` in `[1, n-1]`.
    /// * `message_hash` - The message digest as an integer `e`.
    ///
    /// # Returns
    /// `Ok(Signature)` with `r = (k*G).x mod n` and `s = k^-1 (e + d*r) mod n`.
    pub fn sign(
        &self,
        private_key: &PrivateKey,
        nonce: &BigUint,
        message_hash: &BigUint,
    ) -> Result<Signature, PrimitivesError> {
        let n = self.curve.n();
        self.check_private_key(private_key)?;
        if !in_scalar_range(nonce, n) {
            return Err(PrimitivesError::InvalidNonce(
                "nonce must be in [1, n-1]".to_string(),
            ));
        }

        let big_r = self.arithmetic.scalar_multiply(self.curve.g(), nonce)?;
        let r = big_r.x() % n;
        if r.is_zero() {
            return Err(PrimitivesError::ZeroR);
        }

        let k_inv = self.arithmetic.inverse(nonce, n)?;
        let s = (k_inv * ((message_hash + private_key.scalar() * &r) % n)) % n;
        if s.is_zero() {
            return Err(PrimitivesError::ZeroS);
        }

        Ok(Signature::new(r, s))
    }

    /// Sign with nonces drawn from `rng`, retrying on `ZeroR` / `ZeroS`.
    ///
    /// Gives up after `MAX_SIGN_ATTEMPTS` nonces and returns the last
    /// retryable error. Any other error is returned immediately.
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        private_key: &PrivateKey,
        message_hash: &BigUint,
        rng: &mut R,
    ) -> Result<Signature, PrimitivesError> {
        let mut last_err = PrimitivesError::ZeroR;
        for _ in 0..MAX_SIGN_ATTEMPTS {
            let nonce = self.generate_nonce(rng);
            match self.sign(private_key, &nonce, message_hash) {
                Err(e) if e.is_retryable() => last_err = e,
                result => return result,
            }
        }
        Err(last_err)
    }

    /// Verify `signature` over `message_hash` against `public_key`.
    ///
    /// Out-of-range components, a public key off the curve and an
    /// intermediate point at infinity are all ordinary rejections (`Ok(false)`).
    /// Only backend failures such as `NonInvertible` are returned as errors.
    pub fn verify(
        &self,
        signature: &Signature,
        message_hash: &BigUint,
        public_key: &PublicKey,
    ) -> Result<bool, PrimitivesError> {
        let n = self.curve.n();
        if !signature.is_in_range(n) {
            return Ok(false);
        }

        let w = self.arithmetic.inverse(signature.s(), n)?;
        let u1 = (message_hash * &w) % n;
        let u2 = (signature.r() * &w) % n;

        let point = match self.linear_combination(&u1, &u2, public_key) {
            Ok(point) => point,
            Err(PrimitivesError::PointAtInfinity) | Err(PrimitivesError::PointNotOnCurve) => {
                return Ok(false)
            }
            Err(e) => return Err(e),
        };

        Ok(&(point.x() % n) == signature.r())
    }

    /// Convert a big-endian digest to the integer `e` that is signed.
    ///
    /// Digests longer than the order keep only their leftmost `bits(n)` bits.
    pub fn message_hash_from_digest(&self, digest: &[u8]) -> BigUint {
        let e = BigUint::from_bytes_be(digest);
        let digest_bits = digest.len() as u64 * 8;
        let order_bits = self.curve.n().bits();
        if digest_bits > order_bits {
            e >> (digest_bits - order_bits)
        } else {
            e
        }
    }

    /// `u1*G + u2*Q`, skipping the `G` term when `u1` is zero.
    fn linear_combination(
        &self,
        u1: &BigUint,
        u2: &BigUint,
        public_key: &PublicKey,
    ) -> Result<Point, PrimitivesError> {
        let q_term = self.arithmetic.scalar_multiply(public_key, u2)?;
        if u1.is_zero() {
            return Ok(q_term);
        }
        let g_term = self.arithmetic.scalar_multiply(self.curve.g(), u1)?;
        self.arithmetic.add(&g_term, &q_term)
    }

    fn check_private_key(&self, private_key: &PrivateKey) -> Result<(), PrimitivesError> {
        if in_scalar_range(private_key.scalar(), self.curve.n()) {
            Ok(())
        } else {
            Err(PrimitivesError::InvalidPrivateKey(
                "key is out of range for this curve".to_string(),
            ))
        }
    }
}
