/// Elliptic curve cryptography over short-Weierstrass prime-field curves.
///
/// Provides curve domain parameters, affine points, pluggable point
/// arithmetic, private keys, ECDSA signatures and the signing engine.

pub mod curve;
pub mod point;
pub mod arithmetic;
pub mod private_key;
pub mod signature;
pub mod engine;

pub use curve::CurveField;
pub use point::{Point, PublicKey};
pub use arithmetic::{AffineArithmetic, PointArithmetic};
pub use private_key::PrivateKey;
pub use signature::Signature;
pub use engine::{SignatureEngine, MAX_SIGN_ATTEMPTS};
