//! Merkle root computation.
//!
//! Every node is a SHA-256d digest. Children are concatenated in internal
//! byte order (left first) and hashed; an odd level pairs its last node with
//! itself. Only the final root is byte-reversed for display.

use minicrypt_primitives::chainhash::{double_hash_h, Hash};

use crate::MerkleError;

/// Compute SHA256(SHA256(data)).
pub fn double_hash(data: &[u8]) -> Hash {
    double_hash_h(data)
}

/// Hash a hex-encoded record into a leaf digest.
///
/// The record is hex-decoded first; odd-length or non-hex input is an error,
/// never padded or truncated.
pub fn hash_leaf(record_hex: &str) -> Result<Hash, MerkleError> {
    Ok(double_hash(&hex::decode(record_hex)?))
}

/// Compute the parent of two nodes: SHA256d(left || right).
///
/// Both children are in internal byte order; no reversal happens here.
pub fn combine(left: &[u8], right: &[u8]) -> Hash {
    let mut concatenated = Vec::with_capacity(left.len() + right.len());
    concatenated.extend_from_slice(left);
    concatenated.extend_from_slice(right);
    double_hash(&concatenated)
}

/// Compute the parent of two hex-encoded nodes.
///
/// Input and output are hex of internal byte order.
pub fn combine_hex(left: &str, right: &str) -> Result<String, MerkleError> {
    let l = hex::decode(left)?;
    let r = hex::decode(right)?;
    Ok(hex::encode(combine(&l, &r).as_bytes()))
}

/// Reduce one tree level to the next.
///
/// Pairs `(0, 1), (2, 3), ...` are combined; with an odd count the last node
/// is combined with itself. The result has `ceil(len / 2)` nodes.
pub fn reduce_level<T: AsRef<[u8]>>(level: &[T]) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => combine(left.as_ref(), right.as_ref()),
            [last] => combine(last.as_ref(), last.as_ref()),
            _ => unreachable!("chunks(2) yields one or two nodes"),
        })
        .collect()
}

/// Reduce already-hashed leaves to their root, in internal byte order.
///
/// A single leaf is its own root. The `Display` form of the result is the
/// byte-reversed hex that `root` returns.
pub fn root_hash(leaves: &[Hash]) -> Result<Hash, MerkleError> {
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = reduce_level(&level);
    }
    level.first().copied().ok_or(MerkleError::EmptyInput)
}

/// Compute the Merkle root of hex-encoded records.
///
/// # Arguments
/// * `leaves` - Hex records in tree order.
/// * `hash_leaves_first` - Replace each record with its SHA256d before
///   reducing. When false the records are used as nodes directly.
///
/// # Returns
/// The root as byte-reversed hex, `EmptyInput` for no leaves, or
/// `MalformedHex` if any record fails to decode.
pub fn root<S: AsRef<str>>(leaves: &[S], hash_leaves_first: bool) -> Result<String, MerkleError> {
    if leaves.is_empty() {
        return Err(MerkleError::EmptyInput);
    }
    let decoded = leaves
        .iter()
        .map(|leaf| hex::decode(leaf.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    if hash_leaves_first {
        let hashed: Vec<Hash> = decoded.iter().map(|record| double_hash(record)).collect();
        return Ok(root_hash(&hashed)?.to_string());
    }

    // Raw records can have any length, so a lone one is reversed as-is.
    if let [only] = decoded.as_slice() {
        let mut reversed = only.clone();
        reversed.reverse();
        return Ok(hex::encode(reversed));
    }
    Ok(root_hash(&reduce_level(&decoded))?.to_string())
}

/// Byte-reverse a hex string (little-endian to big-endian and back).
pub fn reverse_hex(hex_str: &str) -> Result<String, MerkleError> {
    let mut bytes = hex::decode(hex_str)?;
    bytes.reverse();
    Ok(hex::encode(bytes))
}
