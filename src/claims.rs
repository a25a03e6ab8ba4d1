//! Claim set carried in the token payload.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// JWT claims parameter name: `"iss"`.
pub const ISSUER: &str = "iss";

/// JWT claims parameter name: `"sub"`.
pub const SUBJECT: &str = "sub";

/// JWT claims parameter name: `"aud"`.
pub const AUDIENCE: &str = "aud";

/// JWT claims parameter name: `"exp"`.
pub const EXPIRATION: &str = "exp";

/// JWT claims parameter name: `"nbf"`.
pub const NOT_BEFORE: &str = "nbf";

/// JWT claims parameter name: `"iat"`.
pub const ISSUED_AT: &str = "iat";

/// JWT claims parameter name: `"jti"`.
pub const ID: &str = "jti";

/// Claim set to issue: an insertion-ordered payload plus an optional
/// absolute expiry.
///
/// Payload entries are serialized in the order they were inserted;
/// `exp` and `iat` are appended after them at issue time when
/// [`expire_at`](Self::expire_at) is set. The issuer never mutates a
/// `Claims` value handed to it.
#[derive(Debug, Clone, Default)]
pub struct Claims {
    /// Optional absolute expiry; `None` issues a token that never
    /// expires (no `exp`/`iat` stamped).
    pub expire_at: Option<DateTime<Utc>>,
    /// Payload entries.
    pub payload: Map<String, Value>,
}

impl Claims {
    /// Create an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a payload entry.
    #[must_use]
    pub fn claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Set the absolute expiry. Normalized to UTC at the boundary.
    #[must_use]
    pub fn expire_at(mut self, at: DateTime<Utc>) -> Self {
        self.expire_at = Some(at);
        self
    }
}
