/// Unified error type for hashing and elliptic curve operations.
///
/// `ZeroR` and `ZeroS` are the only retryable variants: the signer drew a
/// nonce that produced a degenerate signature component and must draw again.
/// Everything else is fatal for the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("signature component r is zero, retry with a fresh nonce")]
    ZeroR,

    #[error("signature component s is zero, retry with a fresh nonce")]
    ZeroS,

    #[error("value is not invertible: {0}")]
    NonInvertible(String),

    #[error("point at infinity has no affine coordinates")]
    PointAtInfinity,

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("invalid point encoding: {0}")]
    InvalidPoint(String),

    #[error("invalid curve parameters: {0}")]
    InvalidCurve(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid nonce: {0}")]
    InvalidNonce(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

impl PrimitivesError {
    /// Whether the caller should draw a fresh nonce and sign again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PrimitivesError::ZeroR | PrimitivesError::ZeroS)
    }
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
