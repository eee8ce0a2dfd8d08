#![deny(missing_docs)]

//! minicrypt - Complete SDK.
//!
//! Re-exports the ECDSA primitives and Merkle commitments for convenient
//! single-crate usage.

pub use minicrypt_primitives as primitives;
pub use minicrypt_merkle as merkle;
