//! minicrypt - Merkle commitments.
//!
//! Computes the double-SHA256 Merkle root of an ordered list of
//! hex-encoded records, duplicating the last node of every odd level,
//! and reports it in byte-reversed display order.

pub mod error;
pub mod merkle_root;

pub use error::MerkleError;
pub use merkle_root::{
    combine, combine_hex, double_hash, hash_leaf, reduce_level, reverse_hex, root, root_hash,
};
