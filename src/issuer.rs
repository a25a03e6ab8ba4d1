//! Issuer/verifier facade.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::claims::Claims;
use crate::codec;
use crate::error::{JwtError, JwtResult};
use crate::expiry::{Clock, ExpirationPolicy, SystemClock};
use crate::keystore::{FsKeyStorage, KeyStorage, KeyStore};

/// Issues and verifies RS256 tokens with PEM-file RSA keys.
///
/// Owns the key caches: parsed key material lives for the lifetime of
/// the issuer instance, so distinct issuers (e.g. in tests) see
/// distinct key sets.
pub struct JwtIssuer {
    keys: KeyStore,
    policy: ExpirationPolicy,
}

impl JwtIssuer {
    /// Issuer over filesystem key storage and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_collaborators(Arc::new(FsKeyStorage), Arc::new(SystemClock))
    }

    /// Issuer over injected storage and clock collaborators.
    pub fn with_collaborators(storage: Arc<dyn KeyStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            keys: KeyStore::new(storage),
            policy: ExpirationPolicy::new(clock),
        }
    }

    /// Sign `claims` into a compact token with the private key named by
    /// `private_key_id`.
    ///
    /// The caller's claim set is never mutated; `exp`/`iat` stamping
    /// happens on a fresh copy of the payload.
    pub fn issue(&self, claims: &Claims, private_key_id: &str) -> JwtResult<String> {
        self.issue_with_headers(claims, private_key_id, None)
    }

    /// [`issue`](Self::issue) with caller-supplied extra header fields.
    /// Extras named `alg` or `typ` are ignored; the fixed `RS256`/`JWT`
    /// values always win.
    pub fn issue_with_headers(
        &self,
        claims: &Claims,
        private_key_id: &str,
        extra_headers: Option<&Map<String, Value>>,
    ) -> JwtResult<String> {
        if claims.payload.is_empty() {
            return Err(JwtError::InvalidArgument(
                "claims payload cannot be empty".into(),
            ));
        }
        if private_key_id.is_empty() {
            return Err(JwtError::InvalidArgument(
                "private key id cannot be empty".into(),
            ));
        }

        let key = self.keys.private_key(private_key_id)?;

        let mut payload = claims.payload.clone();
        self.policy.stamp(&mut payload, claims.expire_at);

        debug!(key_id = private_key_id, "issuing token");
        codec::encode(&payload, &key, extra_headers)
    }

    /// Verify `token` against the public key named by `public_key_id`
    /// and return its payload, failing if the token has expired.
    pub fn verify(&self, token: &str, public_key_id: &str) -> JwtResult<Map<String, Value>> {
        if token.is_empty() {
            return Err(JwtError::InvalidArgument("token cannot be empty".into()));
        }
        if public_key_id.is_empty() {
            return Err(JwtError::InvalidArgument(
                "public key id cannot be empty".into(),
            ));
        }

        let key = self.keys.public_key(public_key_id)?;
        let payload = codec::decode(token, &key)?;
        self.policy.check_not_expired(&payload)?;
        Ok(payload)
    }
}

impl Default for JwtIssuer {
    fn default() -> Self {
        Self::new()
    }
}
