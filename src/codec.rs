//! Compact token wire codec: JSON + base64url + RSA-SHA256.
//!
//! Wire format, reproduced exactly for interoperability:
//! `base64url(JSON(header)) . base64url(JSON(payload)) .
//! base64url(RSA_SHA256_sign("header.payload"))` with the unpadded
//! URL-safe alphabet (RFC 7515).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{JwtError, JwtResult};

const ALG_RS256: &str = "RS256";
const TYP_JWT: &str = "JWT";

/// Token header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Signature algorithm; always `RS256` on encode.
    pub alg: String,
    /// Token type; always `JWT` on encode.
    pub typ: String,
    /// Caller-supplied extra header fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JwtHeader {
    /// RS256 header merged with caller-supplied extras. Extras named
    /// `alg` or `typ` are dropped: the fixed values win.
    fn rs256(extra_headers: Option<&Map<String, Value>>) -> Self {
        let mut extra = extra_headers.cloned().unwrap_or_default();
        extra.remove("alg");
        extra.remove("typ");
        Self {
            alg: ALG_RS256.to_string(),
            typ: TYP_JWT.to_string(),
            extra,
        }
    }
}

/// Serialize and sign a stamped payload into
/// `header.payload.signature`.
pub(crate) fn encode(
    payload: &Map<String, Value>,
    private_key: &RsaPrivateKey,
    extra_headers: Option<&Map<String, Value>>,
) -> JwtResult<String> {
    let header = JwtHeader::rs256(extra_headers);
    let header_json =
        serde_json::to_string(&header).map_err(|e| JwtError::Serialization(e.to_string()))?;
    let payload_json =
        serde_json::to_string(payload).map_err(|e| JwtError::Serialization(e.to_string()))?;

    let message = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(payload_json)
    );

    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key.sign(message.as_bytes()).to_bytes();

    Ok(format!("{message}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

/// Split, decode, and verify a token; returns the parsed payload.
///
/// Expiration is not checked here — that is the facade's
/// responsibility, applied after decode.
pub(crate) fn decode(token: &str, public_key: &RsaPublicKey) -> JwtResult<Map<String, Value>> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header_b64, payload_b64, signature_b64] = parts[..] else {
        return Err(JwtError::MalformedToken(
            "token must have exactly three segments".into(),
        ));
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| JwtError::MalformedToken("undecodable header segment".into()))?;
    let header: JwtHeader = serde_json::from_slice(&header_bytes)
        .map_err(|_| JwtError::MalformedToken("invalid header JSON".into()))?;
    if header.alg != ALG_RS256 {
        return Err(JwtError::UnsupportedAlgorithm(header.alg));
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| JwtError::MalformedToken("undecodable payload segment".into()))?;
    let payload: Map<String, Value> = serde_json::from_slice(&payload_bytes)
        .map_err(|_| JwtError::MalformedToken("invalid payload JSON".into()))?;

    let signature_bytes = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| JwtError::MalformedToken("undecodable signature segment".into()))?;
    let signature =
        Signature::try_from(signature_bytes.as_slice()).map_err(|_| JwtError::SignatureInvalid)?;

    let message = format!("{header_b64}.{payload_b64}");
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    verifying_key
        .verify(message.as_bytes(), &signature)
        .map_err(|_| JwtError::SignatureInvalid)?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extras_cannot_override_alg_or_typ() {
        let mut extras = Map::new();
        extras.insert("alg".into(), "none".into());
        extras.insert("typ".into(), "XYZ".into());
        extras.insert("kid".into(), "key-1".into());

        let header = JwtHeader::rs256(Some(&extras));
        assert_eq!(header.alg, "RS256");
        assert_eq!(header.typ, "JWT");
        assert_eq!(header.extra["kid"], "key-1");
        assert!(!header.extra.contains_key("alg"));
    }

    #[test]
    fn header_serializes_alg_and_typ_first() {
        let mut extras = Map::new();
        extras.insert("kid".into(), "key-1".into());

        let json = serde_json::to_string(&JwtHeader::rs256(Some(&extras)))
            .expect("header serializes");
        assert_eq!(json, r#"{"alg":"RS256","typ":"JWT","kid":"key-1"}"#);
    }
}
