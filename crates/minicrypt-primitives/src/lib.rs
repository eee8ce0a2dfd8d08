/// minicrypt - Cryptographic primitives, hashing, and ECDSA.
///
/// This crate provides the building blocks used by the rest of the workspace:
/// - Hash functions (SHA-256, SHA-256d)
/// - Chain hash type with byte-reversed hex display
/// - ECDSA over configurable short-Weierstrass prime-field curves, with the
///   point arithmetic injected through the `PointArithmetic` trait

pub mod hash;
pub mod chainhash;
pub mod ec;

mod error;
pub use error::PrimitivesError;
