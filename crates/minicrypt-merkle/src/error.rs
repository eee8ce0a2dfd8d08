/// Error types for Merkle commitments.
#[derive(Debug, thiserror::Error)]
pub enum MerkleError {
    #[error("cannot compute a merkle root over an empty leaf list")]
    EmptyInput,
    #[error("malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),
}
