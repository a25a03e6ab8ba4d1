//! Error types for token issuing and verification.

use thiserror::Error;

/// Result alias for token operations.
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors surfaced by [`JwtIssuer`](crate::JwtIssuer) and its parts.
///
/// Every variant is reported synchronously to the immediate caller;
/// none of these conditions are transient and nothing is retried. A
/// failed key load leaves the key caches untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JwtError {
    /// Bad caller input: empty claims payload, token, or key identifier.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The key resource named by the identifier does not exist.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The key resource exists but could not be read.
    #[error("failed to read key {id}")]
    KeyRead {
        /// Identifier of the unreadable resource.
        id: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// PEM framing did not match the expected header/footer pair.
    #[error("invalid PEM framing for key: {0}")]
    InvalidKeyFormat(String),

    /// The PEM body failed to parse as RSA key material.
    #[error("failed to parse key {id}: {reason}")]
    KeyParse {
        /// Identifier of the unparseable resource.
        id: String,
        /// Parse failure detail.
        reason: String,
    },

    /// The token did not have three segments, or a segment failed to
    /// decode as base64url/JSON.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The token header named an algorithm other than RS256.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signature did not verify against the public key.
    #[error("invalid token signature")]
    SignatureInvalid,

    /// Header or payload JSON could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The `exp` claim was not an integer second count.
    #[error("malformed exp claim: {0}")]
    MalformedExpiration(String),

    /// The token's `exp` lies in the past.
    #[error("token has expired")]
    TokenExpired,
}
